//! Deep merge of TOML value trees with per-field source tracking.
//!
//! Merging raw [`toml::Value`] trees rather than deserialized structs keeps
//! "absent" distinct from "default": a key missing from an overlay never
//! overrides the base layer.

use std::collections::HashMap;

/// Which configuration layer a value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLayer {
    /// Compiled-in defaults (`defaults.toml`).
    Defaults,
    /// User-level configuration (`~/.termpipe/config.toml`).
    User,
    /// Workspace-level configuration (`{workspace}/.termpipe/config.toml`).
    Workspace,
    /// Environment variable fallback.
    Environment,
    /// Legacy iFlow CLI settings (`~/.iflow/settings.json`).
    Legacy,
}

impl ConfigLayer {
    /// Whether the value came from a config file the user wrote.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::User | Self::Workspace)
    }
}

impl std::fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::User => write!(f, "user (~/.termpipe/config.toml)"),
            Self::Workspace => write!(f, "workspace (.termpipe/config.toml)"),
            Self::Environment => write!(f, "environment variable"),
            Self::Legacy => write!(f, "legacy (~/.iflow/settings.json)"),
        }
    }
}

/// Tracks which layer set each field's value, keyed by dotted path.
pub type FieldSources = HashMap<String, ConfigLayer>;

/// Deep-merge `overlay` into `base`, recording which layer set each leaf.
///
/// Tables merge per key; scalars and arrays from the overlay replace the base.
pub fn deep_merge_tracking(
    base: &mut toml::Value,
    overlay: &toml::Value,
    prefix: &str,
    layer: &ConfigLayer,
    sources: &mut FieldSources,
) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let path = join_path(prefix, key);
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge_tracking(base_val, overlay_val, &path, layer, sources);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                    record_leaves(overlay_val, &path, layer, sources);
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            record_leaves(overlay, prefix, layer, sources);
        },
    }
}

/// Mark every leaf under `val` as set by `layer`.
pub fn record_leaves(
    val: &toml::Value,
    prefix: &str,
    layer: &ConfigLayer,
    sources: &mut FieldSources,
) {
    if let toml::Value::Table(table) = val {
        for (key, child) in table {
            record_leaves(child, &join_path(prefix, key), layer, sources);
        }
    } else {
        sources.insert(prefix.to_owned(), layer.clone());
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn test_overlay_replaces_scalars_and_keeps_siblings() {
        let mut base = parse("[editor]\nfuzzy_threshold = 0.6\ndiff_context = 3\n");
        let overlay = parse("[editor]\ndiff_context = 5\n");
        let mut sources = FieldSources::new();

        deep_merge_tracking(&mut base, &overlay, "", &ConfigLayer::User, &mut sources);

        assert_eq!(base["editor"]["diff_context"].as_integer(), Some(5));
        assert_eq!(base["editor"]["fuzzy_threshold"].as_float(), Some(0.6));
        assert_eq!(sources.get("editor.diff_context"), Some(&ConfigLayer::User));
        assert!(!sources.contains_key("editor.fuzzy_threshold"));
    }

    #[test]
    fn test_new_sections_are_recorded() {
        let mut base = parse("[editor]\ndiff_context = 3\n");
        let overlay = parse("[logging]\nlevel = \"debug\"\n");
        let mut sources = FieldSources::new();

        deep_merge_tracking(
            &mut base,
            &overlay,
            "",
            &ConfigLayer::Workspace,
            &mut sources,
        );

        assert_eq!(base["logging"]["level"].as_str(), Some("debug"));
        assert_eq!(
            sources.get("logging.level"),
            Some(&ConfigLayer::Workspace)
        );
    }

    #[test]
    fn test_arrays_replace_wholesale() {
        let mut base = parse("[logging]\ndirectives = [\"a=debug\", \"b=info\"]\n");
        let overlay = parse("[logging]\ndirectives = [\"c=trace\"]\n");
        let mut sources = FieldSources::new();

        deep_merge_tracking(&mut base, &overlay, "", &ConfigLayer::User, &mut sources);

        let directives = base["logging"]["directives"].as_array().unwrap();
        assert_eq!(directives.len(), 1);
    }

    #[test]
    fn test_layer_is_file() {
        assert!(ConfigLayer::User.is_file());
        assert!(ConfigLayer::Workspace.is_file());
        assert!(!ConfigLayer::Defaults.is_file());
        assert!(!ConfigLayer::Environment.is_file());
    }
}
