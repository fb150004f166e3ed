//! Dropdown mapping tables
//!
//! The mapping artifact lists dropdown literals of one locale next to their
//! equivalents in another. [`MappingTable::build`] turns those pairs into a
//! forward map and its inverse so both directions can be served.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde_json::Value;
use tracing::{info, warn};

use crate::direction::Direction;
use crate::error::{TranslateError, TranslateResult};
use crate::pattern::{PatternRule, compile_rules};

/// Literal-to-literal substitutions for one direction
#[derive(Debug, Clone, Default)]
pub struct DropdownMap {
    entries: HashMap<String, String>,
    /// Compiled on first use by the pattern strategy
    rules: OnceLock<Vec<PatternRule>>,
}

impl DropdownMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, literal: &str) -> Option<&str> {
        self.entries.get(literal).map(String::as_str)
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.entries.contains_key(literal)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.entries
    }

    /// Substitution rules ordered longest key first
    pub(crate) fn pattern_rules(&self) -> &[PatternRule] {
        self.rules.get_or_init(|| compile_rules(&self.entries))
    }
}

impl FromIterator<(String, String)> for DropdownMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        DropdownMap {
            entries: pairs.into_iter().collect(),
            rules: OnceLock::new(),
        }
    }
}

/// Bidirectional mapping between the literals of two locales
#[derive(Debug, Clone)]
pub struct MappingTable {
    source_locale: String,
    target_locale: String,
    forward: DropdownMap,
    inverse: DropdownMap,
}

impl MappingTable {
    /// Build forward and inverse maps from `(source literal, target literal)` pairs.
    ///
    /// The inverse is lossy when two source literals share a translation: the
    /// pair that comes later in `pairs` wins and the collision is logged.
    pub fn build<I>(direction: &Direction, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let (forward, inverse) = build_maps(pairs);
        info!(
            direction = %direction,
            forward = forward.len(),
            inverse = inverse.len(),
            "Built dropdown mapping table"
        );
        MappingTable {
            source_locale: direction.source().to_string(),
            target_locale: direction.target().to_string(),
            forward,
            inverse,
        }
    }

    /// A table mapping nothing in either direction
    pub fn empty(direction: &Direction) -> Self {
        MappingTable {
            source_locale: direction.source().to_string(),
            target_locale: direction.target().to_string(),
            forward: DropdownMap::new(),
            inverse: DropdownMap::new(),
        }
    }

    /// Load the mapping artifact at `path` for the given direction
    pub fn from_file(path: &Path, direction: &Direction) -> TranslateResult<Self> {
        Ok(Self::build(direction, load_mapping_file(path)?))
    }

    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    pub fn target_locale(&self) -> &str {
        &self.target_locale
    }

    pub fn forward(&self) -> &DropdownMap {
        &self.forward
    }

    pub fn inverse(&self) -> &DropdownMap {
        &self.inverse
    }

    /// The map that serves `direction`, if this table covers it
    pub fn for_direction(&self, direction: &Direction) -> Option<&DropdownMap> {
        let (source, target) = (direction.source(), direction.target());
        if source == self.source_locale && target == self.target_locale {
            Some(&self.forward)
        } else if source == self.target_locale && target == self.source_locale {
            Some(&self.inverse)
        } else {
            None
        }
    }
}

/// Split raw pairs into a forward map and its inverse
pub fn build_maps<I>(pairs: I) -> (DropdownMap, DropdownMap)
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut forward = HashMap::new();
    let mut inverse: HashMap<String, String> = HashMap::new();

    for (source, target) in pairs {
        if let Some(previous) = inverse.insert(target.clone(), source.clone()) {
            if previous != source {
                warn!(
                    literal = %target,
                    previous = %previous,
                    replacement = %source,
                    "Inverse dropdown mapping collision, later entry wins"
                );
            }
        }
        forward.insert(source, target);
    }

    (
        forward.into_iter().collect(),
        inverse.into_iter().collect(),
    )
}

/// Read `(source, target)` pairs from a mapping artifact, in file order.
///
/// Accepts either a flat JSON object or one whose pairs live under a
/// `"dropdowns"` object. A `"dropdowns"` key with a string value is an
/// ordinary pair. Keys starting with `@` are metadata and skipped, as are
/// entries whose value is not a string.
pub fn load_mapping_file(path: &Path) -> TranslateResult<Vec<(String, String)>> {
    let content = fs::read_to_string(path).map_err(|e| {
        TranslateError::ConfigLoadFailure(format!(
            "Failed to read '{}': {}",
            path.display(),
            e
        ))
    })?;

    let root: Value = serde_json::from_str(&content).map_err(|e| {
        TranslateError::ConfigLoadFailure(format!(
            "Failed to parse JSON from '{}': {}",
            path.display(),
            e
        ))
    })?;

    let object = match root {
        Value::Object(object) => match object.get("dropdowns") {
            Some(Value::Object(nested)) => nested.clone(),
            _ => object,
        },
        _ => {
            return Err(TranslateError::ConfigLoadFailure(format!(
                "Mapping file '{}' must contain a JSON object",
                path.display()
            )));
        }
    };

    let mut pairs = Vec::with_capacity(object.len());
    for (key, value) in object {
        if key.starts_with('@') {
            continue;
        }
        match value {
            Value::String(target) => pairs.push((key, target)),
            _ => warn!(key = %key, "Dropdown mapping value is not a string, skipping"),
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    fn en_to_ja() -> Direction {
        "en-to-ja".parse().unwrap()
    }

    fn scratch_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "blocklingo-mapping-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dropdown_map.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_inverse_round_trip() {
        let table = MappingTable::build(
            &en_to_ja(),
            pairs(&[("random position", "どこかの場所"), ("edge", "端")]),
        );
        for (source, target) in table.forward().iter() {
            assert_eq!(table.inverse().get(target), Some(source));
        }
        assert_eq!(table.inverse().get("端"), Some("edge"));
    }

    #[test]
    fn test_inverse_collision_last_wins() {
        let (forward, inverse) = build_maps(pairs(&[("left", "左"), ("left side", "左")]));
        assert_eq!(forward.len(), 2);
        assert_eq!(inverse.len(), 1);
        assert_eq!(inverse.get("左"), Some("left side"));
    }

    #[test]
    fn test_for_direction() {
        let table = MappingTable::build(&en_to_ja(), pairs(&[("edge", "端")]));

        let forward = table.for_direction(&en_to_ja()).unwrap();
        assert_eq!(forward.get("edge"), Some("端"));

        let inverse = table.for_direction(&"ja-to-en".parse().unwrap()).unwrap();
        assert_eq!(inverse.get("端"), Some("edge"));

        assert!(table.for_direction(&"en-to-fr".parse().unwrap()).is_none());
        assert!(table.for_direction(&"en-to-en".parse().unwrap()).is_none());
    }

    #[test]
    fn test_load_flat_mapping_file() {
        let path = scratch_file(
            "flat",
            r#"{"@metadata": {"authors": []}, "edge": "端", "size": 3, "mouse-pointer": "マウスのポインター"}"#,
        );
        let loaded = load_mapping_file(&path).unwrap();
        assert_eq!(
            loaded,
            pairs(&[("edge", "端"), ("mouse-pointer", "マウスのポインター")])
        );
    }

    #[test]
    fn test_load_nested_mapping_file() {
        let path = scratch_file("nested", r#"{"dropdowns": {"edge": "端"}}"#);
        let table = MappingTable::from_file(&path, &en_to_ja()).unwrap();
        assert_eq!(table.forward().get("edge"), Some("端"));
    }

    #[test]
    fn test_dropdowns_string_value_is_a_pair() {
        let path = scratch_file(
            "literal",
            r#"{"edge": "端", "dropdowns": "ドロップダウン", "front": "最前面"}"#,
        );
        assert_eq!(
            load_mapping_file(&path).unwrap(),
            pairs(&[
                ("edge", "端"),
                ("dropdowns", "ドロップダウン"),
                ("front", "最前面")
            ])
        );
    }

    #[test]
    fn test_load_mapping_file_errors() {
        let missing = std::env::temp_dir().join("blocklingo-mapping-does-not-exist.json");
        assert!(matches!(
            load_mapping_file(&missing),
            Err(TranslateError::ConfigLoadFailure(_))
        ));

        let array = scratch_file("array", r#"["edge"]"#);
        assert!(matches!(
            load_mapping_file(&array),
            Err(TranslateError::ConfigLoadFailure(_))
        ));
    }
}
