//! Configuration for site-specific screening vocabularies.
//!
//! A `.ncdrecon.toml` in the working directory (or any ancestor) can
//! override the canonical category and status orders. The core functions
//! never read configuration themselves; commands resolve it here and pass
//! explicit order overrides down, which keeps the reconciliation layer pure.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const CONFIG_FILE_NAME: &str = ".ncdrecon.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NcdreconConfig {
    /// Category order override. Absent means the canonical default order
    /// plus any extra keys found in the records being processed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    /// Status order override. Absent means `normal`, `risk`, `sick`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<String>>,

    /// Treat anomalies (invalid baselines, realism issues) as failures.
    #[serde(default)]
    pub strict: bool,
}

impl NcdreconConfig {
    pub fn category_order(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }

    pub fn status_order(&self) -> Option<&[String]> {
        self.statuses.as_deref()
    }
}

static CONFIG: OnceLock<NcdreconConfig> = OnceLock::new();

/// The process-wide configuration, loaded once from the nearest
/// `.ncdrecon.toml` or defaulted when none exists.
pub fn get_config() -> &'static NcdreconConfig {
    CONFIG.get_or_init(|| {
        std::env::current_dir()
            .ok()
            .and_then(|cwd| find_config_file(&cwd))
            .map(|path| {
                load_from_path(&path).unwrap_or_else(|err| {
                    log::warn!("Failed to load config, using defaults: {err:#}");
                    NcdreconConfig::default()
                })
            })
            .unwrap_or_default()
    })
}

/// Load and parse a specific config file.
pub fn load_from_path(path: &Path) -> anyhow::Result<NcdreconConfig> {
    use anyhow::Context;

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: NcdreconConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Walk upward from `start` looking for a config file.
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

/// Commented template written by `ncdrecon init`.
pub fn default_config_template() -> &'static str {
    r#"# ncdrecon configuration
#
# Override the category order. Unlisted categories found in records are
# ignored when this is set; leave it out to use the canonical order plus
# whatever extra categories the records carry.
# categories = ["Overview", "Obesity", "Diabetes", "Hypertension", "Mental", "Alcohol", "Smoking"]

# Override the status order.
# statuses = ["normal", "risk", "sick"]

# Exit non-zero whenever a record carries anomalies.
strict = false
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config: NcdreconConfig = toml::from_str("").unwrap();
        assert!(config.categories.is_none());
        assert!(config.statuses.is_none());
        assert!(!config.strict);
    }

    #[test]
    fn parses_order_overrides() {
        let config: NcdreconConfig = toml::from_str(indoc! {r#"
            categories = ["Diabetes", "Overview"]
            statuses = ["sick", "risk", "normal"]
            strict = true
        "#})
        .unwrap();

        assert_eq!(
            config.category_order().unwrap().to_vec(),
            vec!["Diabetes".to_string(), "Overview".to_string()]
        );
        assert_eq!(config.status_order().unwrap().len(), 3);
        assert!(config.strict);
    }

    #[test]
    fn template_parses() {
        let config: NcdreconConfig = toml::from_str(default_config_template()).unwrap();
        assert!(config.categories.is_none());
        assert!(!config.strict);
    }

    #[test]
    fn finds_config_in_ancestor_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = fs::File::create(&config_path).unwrap();
        writeln!(file, "strict = true").unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, config_path);
        assert!(load_from_path(&found).unwrap().strict);
    }

    #[test]
    fn missing_config_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config_file(dir.path()).is_none());
    }
}
