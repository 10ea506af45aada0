//! The immutable root of a playthrough's content.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::scene::Scene;
use crate::error::ContentError;

/// Serialization format of a content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl ContentFormat {
    /// Infers the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(ContentFormat::Json),
            Some("yaml" | "yml") => Ok(ContentFormat::Yaml),
            _ => Err(ContentError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Scene graph driving one playthrough: a start scene and every node.
///
/// Loaded once per session and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSpec {
    /// Identifier of the first scene.
    pub start: String,
    /// Every scene, keyed by identifier.
    pub scenes: BTreeMap<String, Scene>,
}

impl GameSpec {
    /// Parses a document in the given format.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Json` or `ContentError::Yaml` when the document
    /// does not match the content schema.
    pub fn parse(source: &str, format: ContentFormat) -> Result<Self, ContentError> {
        match format {
            ContentFormat::Json => Self::from_json_str(source),
            ContentFormat::Yaml => Self::from_yaml_str(source),
        }
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Json` on malformed input.
    pub fn from_json_str(source: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Yaml` on malformed input.
    pub fn from_yaml_str(source: &str) -> Result<Self, ContentError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Looks up a scene by identifier.
    #[must_use]
    pub fn scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.get(scene_id)
    }

    /// The start scene, if it exists.
    #[must_use]
    pub fn start_scene(&self) -> Option<&Scene> {
        self.scene(&self.start)
    }

    /// SHA-256 hex digest of the canonical JSON encoding.
    ///
    /// Two documents that differ only in formatting or key order share a
    /// fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        // Serialization of derived Serialize types with string keys is infallible.
        let canonical = serde_json::to_vec(self).expect("GameSpec serialization is infallible");
        format!("{:x}", Sha256::digest(&canonical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scene::SceneKind;
    use branchline_core::meter::Meter;

    const JSON_SPEC: &str = r#"{
        "start": "s1",
        "scenes": {
            "s1": {
                "id": "s1",
                "type": "choices",
                "title": "Kickoff",
                "choices": [
                    { "id": "c1", "label": "Listen", "next": "s2", "effect": { "customer": 10 } }
                ]
            },
            "s2": { "id": "s2", "type": "result" }
        }
    }"#;

    const YAML_SPEC: &str = r"
start: s1
scenes:
  s2:
    id: s2
    type: result
  s1:
    id: s1
    type: choices
    title: Kickoff
    choices:
      - id: c1
        label: Listen
        next: s2
        effect:
          customer: 10
";

    #[test]
    fn test_parse_json_spec() {
        let spec = GameSpec::from_json_str(JSON_SPEC).unwrap();

        assert_eq!(spec.start, "s1");
        assert_eq!(spec.scenes.len(), 2);
        assert_eq!(spec.start_scene().unwrap().kind(), SceneKind::Choices);
        let choice = spec.scene("s1").unwrap().choosable("c1").unwrap();
        assert_eq!(choice.effect.get(Meter::Customer), Some(10));
    }

    #[test]
    fn test_yaml_and_json_documents_are_equivalent() {
        let from_json = GameSpec::parse(JSON_SPEC, ContentFormat::Json).unwrap();
        let from_yaml = GameSpec::parse(YAML_SPEC, ContentFormat::Yaml).unwrap();

        assert_eq!(from_json, from_yaml);
        assert_eq!(from_json.fingerprint(), from_yaml.fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let spec = GameSpec::from_json_str(JSON_SPEC).unwrap();
        let mut edited = spec.clone();
        edited.start = "s2".to_owned();

        assert_eq!(spec.fingerprint().len(), 64);
        assert_ne!(spec.fingerprint(), edited.fingerprint());
    }

    #[test]
    fn test_null_effect_and_null_choices_still_load() {
        let json = r#"{
            "start": "s1",
            "scenes": {
                "s1": { "id": "s1", "type": "choices", "choices": [
                    { "id": "c1", "label": "Go", "next": "s2", "effect": null }
                ] },
                "s2": { "id": "s2", "type": "text", "choices": null }
            }
        }"#;
        let yaml = "start: s1\nscenes:\n  s1:\n    id: s1\n    type: text\n    choices: ~\n";

        let from_json = GameSpec::from_json_str(json).unwrap();
        let from_yaml = GameSpec::from_yaml_str(yaml).unwrap();

        let choice = from_json.scene("s1").unwrap().choosable("c1").unwrap();
        assert!(choice.effect.is_empty());
        assert!(from_json.scene("s2").unwrap().authored_choices().is_empty());
        assert!(from_yaml.start_scene().unwrap().authored_choices().is_empty());
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let result = GameSpec::from_json_str(r#"{ "start": "s1" }"#);

        assert!(matches!(result, Err(ContentError::Json(_))));
    }

    #[test]
    fn test_format_detection_from_extension() {
        assert_eq!(
            ContentFormat::from_path(Path::new("content/game.json")).unwrap(),
            ContentFormat::Json
        );
        assert_eq!(
            ContentFormat::from_path(Path::new("game.YML")).unwrap(),
            ContentFormat::Yaml
        );
        assert!(matches!(
            ContentFormat::from_path(Path::new("game.toml")),
            Err(ContentError::UnsupportedFormat(_))
        ));
    }
}
