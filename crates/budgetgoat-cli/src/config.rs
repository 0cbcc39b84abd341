use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. BUDGETGOAT_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.budgetgoat (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    // Priority 2: BUDGETGOAT_PATH environment variable
    if let Ok(env_path) = std::env::var("BUDGETGOAT_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    // Priority 3: XDG data directory (recommended default)
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("budgetgoat"));
    }

    // Priority 4: Fallback to ~/.budgetgoat (last resort for systems without XDG)
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".budgetgoat"));
    }

    bail!("Could not determine data directory: no HOME directory or XDG data directory found")
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Diagnostics buffer capacity.
    #[serde(default = "default_max_local_logs")]
    pub max_local_logs: usize,

    /// Echo every diagnostic entry to the console as it is recorded.
    #[serde(default)]
    pub console: bool,
}

fn default_max_local_logs() -> usize {
    100
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            max_local_logs: default_max_local_logs(),
            console: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.logging.max_local_logs, 100);
        assert!(!config.logging.console);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.logging.max_local_logs = 25;
        config.logging.console = true;

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.logging.max_local_logs, 25);
        assert!(loaded.logging.console);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.logging.max_local_logs, 100);

        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[logging]\nconsole = true\n")?;

        let config = Config::load_from(&config_path)?;
        assert!(config.logging.console);
        assert_eq!(config.logging.max_local_logs, 100);

        Ok(())
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = std::env::var_os("HOME") {
            let expanded = expand_tilde("~/budget");
            assert_eq!(expanded, PathBuf::from(home).join("budget"));
        }

        let absolute = expand_tilde("/tmp/budget");
        assert_eq!(absolute, PathBuf::from("/tmp/budget"));
    }
}
