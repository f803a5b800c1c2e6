//! Query string assembly.

use super::error::QueryError;
use super::params::{AttributeFilter, QueryParameters, SpatialFilter};

/// Where clause that matches every feature.
pub const MATCH_ALL_WHERE: &str = "1=1";

/// Builds feature-service query strings from [`QueryParameters`].
///
/// Building is pure: the same parameters always produce the same string.
/// Clauses are emitted in a fixed order:
///
/// `f`, `outFields`, `outSR`, then either `where` or the spatial clauses,
/// then `resultRecordCount`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Builds the query string (without the leading `?`).
    ///
    /// An empty output field set omits the `outFields` clause entirely.
    /// When no filter is configured the match-all clause `where=1%3D1` is sent.
    pub fn build(&self, params: &QueryParameters) -> Result<String, QueryError> {
        let mut clauses: Vec<String> = Vec::with_capacity(10);

        clauses.push(format!("f={}", params.output_format.as_str()));

        if !params.output_fields.is_empty() {
            for field in &params.output_fields {
                validate_field_name(field)?;
            }
            let joined: Vec<&str> = params.output_fields.iter().map(String::as_str).collect();
            clauses.push(format!("outFields={}", joined.join(",")));
        }

        clauses.push(format!("outSR={}", params.out_sr));

        match (&params.attribute_filter, &params.spatial_filter) {
            (Some(_), Some(_)) => return Err(QueryError::ConflictingFilters),
            (Some(filter), None) => clauses.push(where_clause(filter)?),
            (None, Some(filter)) => clauses.extend(spatial_clauses(filter)?),
            (None, None) => clauses.push(format!(
                "where={}",
                urlencoding::encode(MATCH_ALL_WHERE)
            )),
        }

        if let Some(limit) = params.result_limit {
            if limit == 0 {
                return Err(QueryError::ZeroResultLimit);
            }
            clauses.push(format!("resultRecordCount={}", limit));
        }

        Ok(clauses.join("&"))
    }

    /// Builds the full request URL: `<layer_url>/query?<query string>`.
    pub fn query_url(
        &self,
        layer_url: &str,
        params: &QueryParameters,
    ) -> Result<String, QueryError> {
        let base = layer_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(QueryError::EmptyLayerUrl);
        }
        let query = self.build(params)?;
        Ok(format!("{}/query?{}", base, query))
    }
}

/// Checks that a field name can be sent unencoded in a comma-separated list.
pub fn validate_field_name(name: &str) -> Result<(), QueryError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(QueryError::InvalidFieldName(name.to_string()))
    }
}

fn where_clause(filter: &AttributeFilter) -> Result<String, QueryError> {
    let expression = match filter {
        AttributeFilter::Equals { field, value } => {
            validate_field_name(field)?;
            // SQL string literal: embedded quotes are doubled
            format!("{}='{}'", field, value.replace('\'', "''"))
        }
        AttributeFilter::Expression(expr) => {
            let expr = expr.trim();
            if expr.is_empty() {
                return Err(QueryError::EmptyExpression);
            }
            expr.to_string()
        }
    };
    Ok(format!("where={}", urlencoding::encode(&expression)))
}

fn spatial_clauses(filter: &SpatialFilter) -> Result<Vec<String>, QueryError> {
    if !filter.radius.is_finite() || filter.radius <= 0.0 {
        return Err(QueryError::InvalidRadius(filter.radius));
    }
    if filter.in_sr.is_geographic() {
        filter.center.validate_geographic()?;
    }

    Ok(vec![
        "geometryType=esriGeometryPoint".to_string(),
        format!("geometry={}", filter.center),
        "spatialRel=esriSpatialRelIntersects".to_string(),
        format!("distance={}", filter.radius),
        format!("units={}", filter.units.esri_name()),
        format!("inSR={}", filter.in_sr),
    ])
}
