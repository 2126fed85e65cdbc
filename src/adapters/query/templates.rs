//! SQL template registry
//!
//! Each data source resolves to a pair of SQL templates: a `count` query
//! for gating and a `data` query for preview and export. Templates live as
//! `{key}_count.sql` / `{key}_data.sql` files in the configured SQL
//! directory and are loaded once at startup. A missing or empty template is
//! a deployment defect, so loading fails fast instead of deferring the
//! error to the first query.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::domain::errors::QueryError;
use crate::domain::source::DataSource;

/// The `count`/`data` template pair for one data source
#[derive(Debug, Clone)]
pub struct QueryPair {
    pub count: String,
    pub data: String,
}

/// Static mapping from data source to its query templates
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<DataSource, QueryPair>,
}

impl TemplateRegistry {
    /// Loads templates for every registered data source from a directory
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any template file is missing,
    /// unreadable, or empty.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, QueryError> {
        let dir = dir.as_ref();
        let mut templates = HashMap::new();
        for source in DataSource::ALL {
            let pair = QueryPair {
                count: read_template(dir, source, "count")?,
                data: read_template(dir, source, "data")?,
            };
            templates.insert(source, pair);
        }
        tracing::info!(
            sql_dir = %dir.display(),
            sources = templates.len(),
            "Loaded query templates"
        );
        Ok(Self { templates })
    }

    /// Builds a registry from in-memory pairs (tests and embedded setups)
    pub fn from_pairs(pairs: impl IntoIterator<Item = (DataSource, QueryPair)>) -> Self {
        Self {
            templates: pairs.into_iter().collect(),
        }
    }

    /// Resolves the template pair for a data source
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the source has no registered pair.
    pub fn pair(&self, source: DataSource) -> Result<&QueryPair, QueryError> {
        self.templates.get(&source).ok_or_else(|| {
            QueryError::Configuration(format!(
                "No query templates registered for data source '{source}'"
            ))
        })
    }

    /// Data sources with registered templates
    pub fn sources(&self) -> impl Iterator<Item = DataSource> + '_ {
        self.templates.keys().copied()
    }
}

fn read_template(dir: &Path, source: DataSource, kind: &str) -> Result<String, QueryError> {
    let path = dir.join(format!("{}_{kind}.sql", source.key()));
    let sql = fs::read_to_string(&path).map_err(|e| {
        QueryError::Configuration(format!(
            "Cannot read SQL template {}: {e}",
            path.display()
        ))
    })?;
    if sql.trim().is_empty() {
        return Err(QueryError::Configuration(format!(
            "SQL template {} is empty",
            path.display()
        )));
    }
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(count: &str, data: &str) -> QueryPair {
        QueryPair {
            count: count.to_string(),
            data: data.to_string(),
        }
    }

    #[test]
    fn test_pair_resolution() {
        let registry = TemplateRegistry::from_pairs([(
            DataSource::KeywordLab,
            pair("SELECT count(*) FROM kwl", "SELECT * FROM kwl"),
        )]);
        let resolved = registry.pair(DataSource::KeywordLab).unwrap();
        assert!(resolved.count.contains("count(*)"));
    }

    #[test]
    fn test_unregistered_source_is_configuration_error() {
        let registry = TemplateRegistry::default();
        let err = registry.pair(DataSource::ProductTracking).unwrap_err();
        assert!(matches!(err, QueryError::Configuration(_)));
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let err = TemplateRegistry::load("/nonexistent/sql").unwrap_err();
        assert!(matches!(err, QueryError::Configuration(_)));
    }
}
