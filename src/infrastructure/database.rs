//! Line-delimited JSON database loader
//!
//! The source database is UTF-8 text with one JSON record per line.
//! Each line parses independently: in the default lenient mode a bad
//! line is logged and skipped so one corrupt record cannot take down
//! the whole load. Strict mode turns any parse failure or unrecognized
//! record into a load failure.

use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::domain::entities::{Model, ModelError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read database {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Strict mode only: a line never parsed, so it has no record id to
    /// report; it is identified by line number instead.
    #[error("line {line} of {} is not valid JSON: {source}", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("database entry of unexpected type: {id}")]
    UnrecognizedRecord { id: String },

    #[error("database entry {id} could not be constructed: {source}")]
    InvalidRecord {
        id: String,
        #[source]
        source: ModelError,
    },
}

/// Load the database at `path`, keeping records accepted by
/// `recognizer` and specializing each with `construct`.
///
/// Lenient mode drops unparseable lines (logged), silently filters
/// unrecognized records, and drops records whose construction fails
/// (logged). Strict mode fails the whole load on the first unparseable
/// line, or the first record the recognizer or constructor rejects.
pub async fn load_database<T, G, C>(
    path: &Path,
    recognizer: G,
    construct: C,
    strict: bool,
) -> Result<Vec<T>, LoadError>
where
    G: Fn(&Model) -> bool,
    C: Fn(Model) -> Result<T, ModelError>,
{
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let mut models = Vec::new();
    let mut first_bad_line: Option<(usize, serde_json::Error)> = None;
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Model>(line) {
            Ok(model) => models.push(model),
            Err(e) => {
                error!(line = index + 1, "failed to parse database record: {e}");
                if first_bad_line.is_none() {
                    first_bad_line = Some((index + 1, e));
                }
            }
        }
    }

    if strict {
        if let Some((line, source)) = first_bad_line {
            return Err(LoadError::MalformedLine {
                path: path.to_path_buf(),
                line,
                source,
            });
        }
    }

    let mut entities = Vec::with_capacity(models.len());
    for model in models {
        if !recognizer(&model) {
            if strict {
                return Err(LoadError::UnrecognizedRecord { id: model.id });
            }
            continue;
        }
        let id = model.id.clone();
        match construct(model) {
            Ok(entity) => entities.push(entity),
            Err(source) => {
                if strict {
                    return Err(LoadError::InvalidRecord { id, source });
                }
                warn!(record = %id, "dropping invalid database record: {source}");
            }
        }
    }

    debug!(path = %path.display(), records = entities.len(), "database loaded");
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::entities::CprActor;

    fn record(id: &str, system_id: &str, kind: &str) -> String {
        format!(
            r#"{{"_id":"{id}","_stats":{{"systemId":"{system_id}"}},"name":"{id}","type":"{kind}","img":"x.png","system":{{"stats":{{}}}},"flags":{{}}}}"#
        )
    }

    fn write_db(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[tokio::test]
    async fn lenient_load_skips_bad_lines() {
        let a = record("a", "cyberpunk-red-core", "character");
        let b = record("b", "cyberpunk-red-core", "mook");
        let db = write_db(&[&a, "not json", "", &b]);

        let actors = load_database(db.path(), CprActor::is_actor, CprActor::from_model, false)
            .await
            .unwrap();
        let mut ids: Vec<_> = actors.iter().map(|a| a.id().to_string()).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn lenient_load_filters_unrecognized_records() {
        let a = record("a", "cyberpunk-red-core", "character");
        let foreign = record("f", "dnd5e", "character");
        let db = write_db(&[&a, &foreign]);

        let actors = load_database(db.path(), CprActor::is_actor, CprActor::from_model, false)
            .await
            .unwrap();
        assert_eq!(actors.len(), 1);
        assert_eq!(actors[0].id(), "a");
    }

    #[tokio::test]
    async fn strict_load_reports_unparseable_line_by_number() {
        let a = record("a", "cyberpunk-red-core", "character");
        let db = write_db(&[&a, "not json"]);

        let err = load_database(db.path(), CprActor::is_actor, CprActor::from_model, true)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::MalformedLine { line: 2, .. }));
    }

    #[tokio::test]
    async fn strict_load_names_the_recognizer_failing_record() {
        let a = record("a", "cyberpunk-red-core", "character");
        let foreign = record("f", "dnd5e", "character");
        let db = write_db(&[&a, &foreign]);

        let err = load_database(db.path(), CprActor::is_actor, CprActor::from_model, true)
            .await
            .unwrap_err();
        match err {
            LoadError::UnrecognizedRecord { id } => assert_eq!(id, "f"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = load_database(
            Path::new("/nonexistent/actors.db"),
            CprActor::is_actor,
            CprActor::from_model,
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
