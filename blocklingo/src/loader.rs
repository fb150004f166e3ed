use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::LoadError;
use crate::vocabulary::{Vocabularies, Vocabulary};

#[derive(Deserialize)]
struct VocabularyFile {
    #[serde(default)]
    commands: Option<Map<String, Value>>,
}

/// Load a vocabulary from a single JSON file
///
/// The JSON file should have the following structure:
/// ```json
/// {
///     "@metadata": { ... },  // Ignored
///     "commands": {
///         "move %1 steps": "%1 歩動かす",
///         "go to %1": "%1 へ行く"
///     }
/// }
/// ```
///
/// The locale is taken from the file name (`ja.json` -> `"ja"`). A file
/// without a `commands` table yields a vocabulary that is present but cannot
/// be used as a translation target.
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON, or a root that is not an object
pub fn load_vocabulary_from_file(path: &Path) -> Result<Vocabulary, LoadError> {
    let locale = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| LoadError::Invalid {
            path: path.to_path_buf(),
            reason: "file name is not a locale code".to_string(),
        })?;

    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file: VocabularyFile =
        serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(commands) = file.commands else {
        warn!(path = %path.display(), "Vocabulary has no command table");
        return Ok(Vocabulary::new(locale));
    };

    let mut pairs = Vec::with_capacity(commands.len());
    for (spec, template) in commands {
        match template {
            Value::String(template) => pairs.push((spec, template)),
            _ => warn!(spec = %spec, "Command template is not a string, skipping"),
        }
    }

    let vocabulary = Vocabulary::from_commands(locale, pairs);
    info!(
        locale = vocabulary.locale(),
        commands = vocabulary.len(),
        "Loaded vocabulary"
    );
    Ok(vocabulary)
}

/// Load all vocabularies from a directory of JSON files
///
/// Scans the directory for `*.json` files; each file name (without extension)
/// is the locale code. The built-in canonical vocabulary is always included,
/// and an `en.json` in the directory replaces it.
///
/// # Errors
/// - Directory not found
/// - Any file read or parse error
pub fn load_all_vocabularies_from_dir(dir: &Path) -> Result<Vocabularies, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut vocabularies = Vocabularies::new();
    let mut loaded = 0;
    for entry in entries {
        let path = entry
            .map_err(|source| LoadError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        vocabularies.insert(load_vocabulary_from_file(&path)?);
        loaded += 1;
    }

    if loaded == 0 {
        warn!(dir = %dir.display(), "No vocabulary files found");
    }

    Ok(vocabularies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "blocklingo-loader-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_vocabulary_file() {
        let dir = scratch_dir("file");
        let path = dir.join("ja.json");
        fs::write(
            &path,
            r#"{"@metadata": {"authors": []}, "commands": {"move %1 steps": "%1 歩動かす", "show": 3}}"#,
        )
        .unwrap();

        let vocabulary = load_vocabulary_from_file(&path).unwrap();
        assert_eq!(vocabulary.locale(), "ja");
        assert_eq!(vocabulary.len(), 1);
        assert!(vocabulary.template("move %1 steps").is_some());
    }

    #[test]
    fn test_load_vocabulary_without_commands() {
        let dir = scratch_dir("empty");
        let path = dir.join("de.json");
        fs::write(&path, r#"{"dropdowns": {}}"#).unwrap();

        let vocabulary = load_vocabulary_from_file(&path).unwrap();
        assert!(!vocabulary.has_commands());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = scratch_dir("invalid");
        let path = dir.join("ja.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_vocabulary_from_file(&path),
            Err(LoadError::Json { .. })
        ));
    }

    #[test]
    fn test_load_dir() {
        let dir = scratch_dir("dir");
        fs::write(
            dir.join("ja.json"),
            r#"{"commands": {"go to %1": "%1 へ行く"}}"#,
        )
        .unwrap();
        fs::write(dir.join("README.txt"), "not a vocabulary").unwrap();

        let vocabularies = load_all_vocabularies_from_dir(&dir).unwrap();
        assert_eq!(vocabularies.locales(), vec!["en", "ja"]);
    }

    #[test]
    fn test_missing_dir() {
        let dir = std::env::temp_dir().join("blocklingo-loader-does-not-exist");
        assert!(matches!(
            load_all_vocabularies_from_dir(&dir),
            Err(LoadError::MissingDirectory(_))
        ));
    }
}
