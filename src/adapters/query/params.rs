//! Named query parameter binding
//!
//! Templates use `:name` placeholders. Before execution the adapter
//! rewrites them into positional `$n` placeholders and collects the bound
//! values in order. The parameter set is derived from the export request
//! and is the same for the `count` and `data` templates of a source.

use crate::domain::errors::QueryError;
use crate::domain::request::ExportRequest;

/// A value bound into a query
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    IntList(Vec<i64>),
    Text(String),
}

/// Builds the named parameter set for a request
///
/// Always includes `workspace_id`, `storefront_ids`, `start_date`, and
/// `end_date`; the keyword-performance extras are merged in when present.
pub fn request_params(request: &ExportRequest) -> Vec<(String, ParamValue)> {
    let mut params = vec![
        (
            "workspace_id".to_string(),
            ParamValue::Int(request.workspace_id.value() as i64),
        ),
        (
            "storefront_ids".to_string(),
            ParamValue::IntList(
                request
                    .storefront_ids
                    .iter()
                    .map(|id| id.value() as i64)
                    .collect(),
            ),
        ),
        (
            "start_date".to_string(),
            ParamValue::Text(request.start_date.format("%Y-%m-%d").to_string()),
        ),
        (
            "end_date".to_string(),
            ParamValue::Text(request.end_date.format("%Y-%m-%d").to_string()),
        ),
    ];
    if let Some(options) = &request.extra_options {
        params.push((
            "device_type".to_string(),
            ParamValue::Text(options.device_type.as_param().to_string()),
        ));
        params.push((
            "display_type".to_string(),
            ParamValue::Text(options.display_type.as_param().to_string()),
        ));
        params.push((
            "product_position".to_string(),
            ParamValue::Text(options.product_position.as_param().to_string()),
        ));
    }
    params
}

/// Rewrites `:name` placeholders into `$n` and collects values in order
///
/// Repeated placeholders reuse the same positional index. `::` casts are
/// left untouched.
///
/// # Errors
///
/// Returns a configuration error for a placeholder with no matching
/// parameter; templates and parameter sets ship together, so a mismatch is
/// a deployment defect.
pub fn bind_named(
    sql: &str,
    params: &[(String, ParamValue)],
) -> Result<(String, Vec<ParamValue>), QueryError> {
    let mut rewritten = String::with_capacity(sql.len());
    let mut bound: Vec<(String, ParamValue)> = Vec::new();

    let bytes = sql.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c == ':' {
            // A `::` cast is not a placeholder
            let prev_colon = i > 0 && bytes[i - 1] == b':';
            let next_colon = i + 1 < bytes.len() && bytes[i + 1] == b':';
            if prev_colon || next_colon {
                rewritten.push(c);
                i += 1;
                continue;
            }
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && is_ident_char(bytes[end] as char) {
                end += 1;
            }
            if end == start {
                rewritten.push(c);
                i += 1;
                continue;
            }
            let name = &sql[start..end];
            let position = match bound.iter().position(|(n, _)| n == name) {
                Some(pos) => pos,
                None => {
                    let value = params
                        .iter()
                        .find(|(n, _)| n == name)
                        .map(|(_, v)| v.clone())
                        .ok_or_else(|| {
                            QueryError::Configuration(format!(
                                "Template references unknown parameter :{name}"
                            ))
                        })?;
                    bound.push((name.to_string(), value));
                    bound.len() - 1
                }
            };
            rewritten.push_str(&format!("${}", position + 1));
            i = end;
        } else {
            rewritten.push(c);
            i += 1;
        }
    }

    Ok((rewritten, bound.into_iter().map(|(_, v)| v).collect()))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{StorefrontId, WorkspaceId};
    use crate::domain::source::{DataSource, ExtraOptions};
    use chrono::NaiveDate;

    fn request(source: DataSource) -> ExportRequest {
        ExportRequest::new(
            source,
            WorkspaceId::new(123),
            vec![StorefrontId::new(1), StorefrontId::new(2)],
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            Some(ExtraOptions::default()),
        )
        .unwrap()
    }

    #[test]
    fn test_base_params() {
        let params = request_params(&request(DataSource::KeywordLab));
        let names: Vec<&str> = params.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["workspace_id", "storefront_ids", "start_date", "end_date"]
        );
        assert_eq!(params[0].1, ParamValue::Int(123));
        assert_eq!(params[1].1, ParamValue::IntList(vec![1, 2]));
        assert_eq!(params[2].1, ParamValue::Text("2024-01-01".to_string()));
        assert_eq!(params[3].1, ParamValue::Text("2024-01-15".to_string()));
    }

    #[test]
    fn test_extra_params_merged_for_keyword_performance() {
        let params = request_params(&request(DataSource::KeywordPerformance));
        let names: Vec<&str> = params.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"device_type"));
        assert!(names.contains(&"display_type"));
        assert!(names.contains(&"product_position"));
    }

    #[test]
    fn test_bind_rewrites_in_first_use_order() {
        let params = request_params(&request(DataSource::KeywordLab));
        let sql = "SELECT * FROM t WHERE ws = :workspace_id AND d BETWEEN :start_date AND :end_date";
        let (rewritten, values) = bind_named(sql, &params).unwrap();
        assert_eq!(
            rewritten,
            "SELECT * FROM t WHERE ws = $1 AND d BETWEEN $2 AND $3"
        );
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], ParamValue::Int(123));
    }

    #[test]
    fn test_bind_reuses_repeated_placeholder() {
        let params = request_params(&request(DataSource::KeywordLab));
        let sql = "SELECT :workspace_id, :workspace_id";
        let (rewritten, values) = bind_named(sql, &params).unwrap();
        assert_eq!(rewritten, "SELECT $1, $1");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_bind_leaves_casts_alone() {
        let params = request_params(&request(DataSource::KeywordLab));
        let sql = "SELECT :start_date::date";
        let (rewritten, _) = bind_named(sql, &params).unwrap();
        assert_eq!(rewritten, "SELECT $1::date");
    }

    #[test]
    fn test_bind_unknown_placeholder_is_configuration_error() {
        let params = request_params(&request(DataSource::KeywordLab));
        let err = bind_named("SELECT :mystery", &params).unwrap_err();
        assert!(matches!(err, QueryError::Configuration(_)));
    }
}
