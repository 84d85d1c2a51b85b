//! Source-annotated display for `termpipe config show`.

use std::fmt::{self, Write as _};
use std::path::Path;

use crate::loader::{CONFIG_DIR, legacy_settings_path};
use crate::merge::FieldSources;
use crate::types::Config;

/// A resolved configuration together with source annotations.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final merged configuration.
    pub config: Config,
    /// Dotted field path → which layer set the value.
    pub field_sources: FieldSources,
    /// Files that contributed values, in precedence order.
    pub loaded_files: Vec<String>,
}

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    /// TOML with inline comments showing source.
    Toml,
    /// JSON (for programmatic consumption).
    Json,
}

impl ResolvedConfig {
    /// Render the resolved config, optionally restricted to one section.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or `section` does not exist.
    pub fn show(&self, format: ShowFormat, section: Option<&str>) -> Result<String, fmt::Error> {
        match format {
            ShowFormat::Toml => self.show_toml(section),
            ShowFormat::Json => self.show_json(section),
        }
    }

    fn section_value(&self, section: &str) -> Result<toml::Value, fmt::Error> {
        let val = toml::Value::try_from(&self.config).map_err(|_| fmt::Error)?;
        val.get(section).cloned().ok_or(fmt::Error)
    }

    fn show_toml(&self, section: Option<&str>) -> Result<String, fmt::Error> {
        let toml_str = match section {
            Some(name) => toml::to_string_pretty(&self.section_value(name)?),
            None => toml::to_string_pretty(&self.config),
        }
        .map_err(|_| fmt::Error)?;

        let mut output = String::new();
        output.push_str("# Resolved TermPipe configuration\n");
        output.push_str("# Source annotations: [defaults] [user] [workspace] [env] [legacy]\n");

        if !self.loaded_files.is_empty() {
            output.push_str("#\n# Loaded files (in precedence order):\n");
            for (i, path) in self.loaded_files.iter().enumerate() {
                writeln!(output, "#   {}. {path}", i.saturating_add(1))?;
            }
        }
        output.push('\n');

        // Section headers change the path prefix as we walk the output.
        let mut prefix = section.unwrap_or("").to_owned();
        for line in toml_str.lines() {
            let trimmed = line.trim();
            if let Some(header) = trimmed.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
                prefix = match section {
                    Some(s) => format!("{s}.{header}"),
                    None => header.to_owned(),
                };
            }
            match self.annotate_line(trimmed, &prefix) {
                Some(annotation) => writeln!(output, "{line}  # {annotation}")?,
                None => writeln!(output, "{line}")?,
            }
        }

        Ok(output)
    }

    fn show_json(&self, section: Option<&str>) -> Result<String, fmt::Error> {
        match section {
            Some(name) => serde_json::to_string_pretty(&self.section_value(name)?),
            None => serde_json::to_string_pretty(&self.config),
        }
        .map_err(|_| fmt::Error)
    }

    fn annotate_line(&self, trimmed: &str, prefix: &str) -> Option<String> {
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('[') {
            return None;
        }

        let key = trimmed.split('=').next()?.trim();
        let field_path = if prefix.is_empty() {
            key.to_owned()
        } else {
            format!("{prefix}.{key}")
        };

        self.field_sources
            .get(&field_path)
            .map(|layer| format!("[{layer}]"))
    }

    /// List every file consulted during loading, in precedence order.
    #[must_use]
    pub fn config_paths(home_dir: Option<&Path>, workspace_root: Option<&Path>) -> Vec<String> {
        let mut paths = Vec::new();

        match home_dir {
            Some(home) => {
                paths.push(home.join(CONFIG_DIR).join("config.toml").display().to_string());
            },
            None => paths.push(format!("~/{CONFIG_DIR}/config.toml")),
        }

        match workspace_root {
            Some(ws) => paths.push(ws.join(CONFIG_DIR).join("config.toml").display().to_string()),
            None => paths.push(format!("{{workspace}}/{CONFIG_DIR}/config.toml")),
        }

        match home_dir {
            Some(home) => paths.push(legacy_settings_path(home).display().to_string()),
            None => paths.push("~/.iflow/settings.json".to_owned()),
        }

        paths
    }
}
