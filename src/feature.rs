//! Typed dev-container feature manifests (devcontainer-feature.json).
//!
//! The two bundled features (`proxy`, `claude-code`) ship their manifests
//! in-repo; `validate` parses them and checks that the documented option
//! identifiers are declared.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureManifest {
    pub id: String,
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: BTreeMap<String, FeatureOption>,
    #[serde(default, rename = "installsAfter")]
    pub installs_after: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureOption {
    #[serde(rename = "type")]
    pub option_type: String,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub proposals: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl FeatureManifest {
    pub fn load(path: &Path) -> io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: {e}", path.display()),
            )
        })
    }

    pub fn option_ids(&self) -> Vec<&str> {
        self.options.keys().map(String::as_str).collect()
    }
}

/// Option identifiers each bundled feature must declare.
pub fn required_option_ids(feature_id: &str) -> &'static [&'static str] {
    match feature_id {
        "proxy" => &["http_proxy", "https_proxy", "no_proxy", "apt_proxy", "enabled"],
        "claude-code" => &[
            "version",
            "provider",
            "models",
            "http_proxy",
            "https_proxy",
            "no_proxy",
            "enabled",
        ],
        _ => &[],
    }
}

/// Manifest paths under a features directory, in install order.
pub fn bundled_manifest_paths(features_dir: &Path) -> Vec<PathBuf> {
    ["proxy", "claude-code"]
        .iter()
        .map(|id| features_dir.join(id).join("devcontainer-feature.json"))
        .collect()
}

/// Validate all bundled manifests under `features_dir`; returns the parsed
/// manifests or the first shape error.
pub fn validate_features_dir(features_dir: &Path) -> io::Result<Vec<FeatureManifest>> {
    let mut out = Vec::new();
    for path in bundled_manifest_paths(features_dir) {
        let manifest = FeatureManifest::load(&path)?;
        for id in required_option_ids(&manifest.id) {
            if !manifest.options.contains_key(*id) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "{}: feature '{}' is missing option '{id}'",
                        path.display(),
                        manifest.id
                    ),
                ));
            }
        }
        out.push(manifest);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_manifest() {
        let raw = r#"{
            "id": "proxy",
            "version": "1.0.0",
            "name": "Proxy",
            "options": {
                "http_proxy": { "type": "string", "default": "" }
            }
        }"#;
        let m: FeatureManifest = serde_json::from_str(raw).unwrap();
        assert_eq!(m.id, "proxy");
        assert_eq!(m.option_ids(), vec!["http_proxy"]);
        assert_eq!(m.options["http_proxy"].option_type, "string");
    }

    #[test]
    fn test_unknown_field_is_a_shape_error() {
        let raw = r#"{ "id": "x", "version": "1", "name": "X", "bogus": true }"#;
        assert!(serde_json::from_str::<FeatureManifest>(raw).is_err());
    }

    #[test]
    fn test_validate_flags_missing_option() {
        let td = tempfile::tempdir().unwrap();
        let dir = td.path().join("proxy");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("devcontainer-feature.json"),
            r#"{ "id": "proxy", "version": "1.0.0", "name": "Proxy", "options": {} }"#,
        )
        .unwrap();
        let err = validate_features_dir(td.path()).unwrap_err();
        assert!(err.to_string().contains("missing option"));
    }
}
