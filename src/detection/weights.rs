use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::ModelConfig;
use crate::detection::ModelError;

const LABELS_FILE_NAME: &str = "labels.txt";

/// Find the checkpoint in `folder`: a file with the given extension whose name
/// contains one of the markers. Entries are checked in name order, first match wins.
pub fn find_weights<P: AsRef<Path>>(
    folder: P,
    extension: &str,
    markers: &[String],
) -> anyhow::Result<PathBuf> {
    let folder = folder.as_ref();
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(folder)
        .map_err(|_| ModelError::NotFound(folder.to_path_buf()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();

    let suffix = format!(".{}", extension.trim_start_matches('.'));
    candidates
        .into_iter()
        .find(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            name.ends_with(&suffix) && markers.iter().any(|m| name.contains(m.as_str()))
        })
        .ok_or_else(|| ModelError::NotFound(folder.to_path_buf()).into())
}

/// Class names from `labels.txt` next to the weights, one per line,
/// falling back to the configured list
pub fn load_labels<P: AsRef<Path>>(folder: P, fallback: &[String]) -> anyhow::Result<Vec<String>> {
    let labels_path = folder.as_ref().join(LABELS_FILE_NAME);
    if !labels_path.is_file() {
        return Ok(fallback.to_vec());
    }

    let raw = std::fs::read_to_string(&labels_path)
        .with_context(|| format!("Failed to read labels {:?}", labels_path))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Locate weights and labels for a model config
pub fn resolve(config: &ModelConfig) -> anyhow::Result<(PathBuf, Vec<String>)> {
    let weights = find_weights(&config.folder, &config.extension, &config.markers)?;
    let labels = load_labels(&config.folder, &config.labels)?;
    Ok((weights, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn markers() -> Vec<String> {
        vec!["best".to_string(), "last".to_string()]
    }

    #[test]
    fn test_finds_marked_checkpoint() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("epoch10.rten"), b"").unwrap();
        fs::write(dir.path().join("last.rten"), b"").unwrap();
        fs::write(dir.path().join("best.onnx"), b"").unwrap();

        let found = find_weights(dir.path(), "rten", &markers()).unwrap();
        assert_eq!(found, dir.path().join("last.rten"));
    }

    #[test]
    fn test_first_match_in_name_order_wins() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("last.rten"), b"").unwrap();
        fs::write(dir.path().join("best.rten"), b"").unwrap();

        let found = find_weights(dir.path(), ".rten", &markers()).unwrap();
        assert_eq!(found, dir.path().join("best.rten"));
    }

    #[test]
    fn test_missing_checkpoint_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("weights.rten"), b"").unwrap();

        let err = find_weights(dir.path(), "rten", &markers()).unwrap_err();
        assert!(matches!(err.downcast_ref::<ModelError>(), Some(ModelError::NotFound(_))));

        let err = find_weights(dir.path().join("missing"), "rten", &markers()).unwrap_err();
        assert!(matches!(err.downcast_ref::<ModelError>(), Some(ModelError::NotFound(_))));
    }

    #[test]
    fn test_labels_file_overrides_fallback() {
        let dir = tempfile::TempDir::new().unwrap();
        let fallback = vec!["fallback".to_string()];
        assert_eq!(load_labels(dir.path(), &fallback).unwrap(), fallback);

        fs::write(dir.path().join("labels.txt"), "10 rupees\n\n  500 rupees \n").unwrap();
        assert_eq!(
            load_labels(dir.path(), &fallback).unwrap(),
            vec!["10 rupees", "500 rupees"]
        );
    }
}
