use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::catalog::ClassifiedRecord;
use crate::error::SyncError;

/// Read a whole text file; a missing file is `ResourceNotFound`.
pub fn read_text(path: &Path) -> Result<String, SyncError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SyncError::ResourceNotFound(path.to_path_buf()),
        _ => SyncError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

pub fn read_catalog(path: &Path) -> Result<String, SyncError> {
    let markup = read_text(path)?;
    info!(path = %path.display(), bytes = markup.len(), "read catalog");
    Ok(markup)
}

pub fn write_text(path: &Path, contents: &str) -> Result<(), SyncError> {
    std::fs::write(path, contents).map_err(|e| SyncError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), bytes = contents.len(), "wrote");
    Ok(())
}

#[derive(Serialize)]
struct Preview<'a> {
    total: usize,
    rules: &'a str,
    tools: &'a [ClassifiedRecord],
}

/// Dry-run output: the classified catalog as pretty JSON.
pub fn write_preview(path: &Path, rules: &str, records: &[ClassifiedRecord]) -> Result<(), SyncError> {
    let preview = Preview {
        total: records.len(),
        rules,
        tools: records,
    };
    let mut json = serde_json::to_string_pretty(&preview).map_err(|e| SyncError::Io {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    json.push('\n');
    write_text(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::rules::RuleSet;
    use crate::classify::Classifier;
    use crate::parser::cards::extract_cards;

    #[test]
    fn missing_file_is_resource_not_found() {
        let err = read_text(Path::new("tests/fixtures/no-such-file.html")).unwrap_err();
        assert!(matches!(err, SyncError::ResourceNotFound(_)));
    }

    #[test]
    fn preview_is_json() {
        let html = read_catalog(Path::new("tests/fixtures/catalog.html")).unwrap();
        let rules = RuleSet::standard();
        let classifier = Classifier::new(&rules);
        let records: Vec<_> = extract_cards(&html).iter().map(|r| classifier.classify(r)).collect();

        let path = std::env::temp_dir().join(format!("quiz_sync_preview_{}.json", std::process::id()));
        write_preview(&path, rules.name, &records).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["total"], 4);
        assert_eq!(value["rules"], "standard");
        assert_eq!(value["tools"][1]["slug"], "class-pulse");
        assert_eq!(value["tools"][1]["category"], "student_interaction");
        assert_eq!(value["tools"][1]["techLevel"], "intermediate");
        assert_eq!(value["tools"][0]["roles"][0]["role"], "student");
    }
}
