//! Scene-instantiation collaborator
//!
//! The library never creates scene objects itself. A [`SceneSink`] receives
//! each [`PlacementDirective`] and hands back an opaque handle; the
//! [`PlacedFeatures`] registry remembers handles by display name so a UI can
//! list them and jump to one.

use crate::placement::{PlacementDirective, Position};

/// Receives placement directives and creates whatever represents them.
pub trait SceneSink {
    /// Opaque identity of an instantiated feature.
    type Handle;

    /// Takes ownership of a directive and instantiates it.
    fn instantiate(&mut self, directive: PlacementDirective) -> Self::Handle;
}

/// A feature that has been handed to the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFeature<H> {
    pub handle: H,
    pub display_name: String,
    pub position: Position,
}

/// Handles of instantiated features, in instantiation order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFeatures<H> {
    features: Vec<PlacedFeature<H>>,
}

impl<H> Default for PlacedFeatures<H> {
    fn default() -> Self {
        Self {
            features: Vec::new(),
        }
    }
}

impl<H> PlacedFeatures<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiates every directive through `sink` and records the handles.
    pub fn instantiate_all<S, I>(&mut self, sink: &mut S, directives: I)
    where
        S: SceneSink<Handle = H>,
        I: IntoIterator<Item = PlacementDirective>,
    {
        for directive in directives {
            let display_name = directive.display_name().to_string();
            let position = directive.position();
            let handle = sink.instantiate(directive);
            self.features.push(PlacedFeature {
                handle,
                display_name,
                position,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedFeature<H>> {
        self.features.iter()
    }

    /// Display names in sorted order, for pick lists.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .features
            .iter()
            .map(|f| f.display_name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Finds the first feature with this display name.
    pub fn find(&self, display_name: &str) -> Option<&PlacedFeature<H>> {
        self.features
            .iter()
            .find(|f| f.display_name == display_name)
    }
}
