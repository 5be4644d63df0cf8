//! Configuration file support for rebrand
//!
//! Loads `.rebrand.toml` from current directory or parent directories.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".rebrand.toml";

/// Roots scanned when neither the command line nor a config file names any
pub const DEFAULT_ROOTS: &[&str] = &[
    "backend/src/routes",
    "backend/src/schemas",
    "backend/src/lib",
    "backend/src/middleware",
    "frontend/src/pages",
    "frontend/src/components",
];

pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".jsx"];

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub rules: RulesConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directories to scan, in order
    pub roots: Vec<PathBuf>,
    /// File name suffixes eligible for rewriting
    pub extensions: Vec<String>,
    /// Glob patterns to exclude from processing
    pub exclude: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            roots: DEFAULT_ROOTS.iter().map(PathBuf::from).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Built-in preset to use (default: partner)
    pub preset: Option<String>,
    /// YAML rule file; takes precedence over the preset
    pub file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text" or "json"
    pub format: Option<String>,
    /// Write a timestamped run log here
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load config from `.rebrand.toml` searching from current directory upward
    pub fn load() -> Result<Option<(Config, PathBuf)>> {
        Self::load_from(std::env::current_dir()?)
    }

    /// Load config searching from the given directory upward
    pub fn load_from(start_dir: PathBuf) -> Result<Option<(Config, PathBuf)>> {
        let mut current = Some(start_dir.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                let config = Self::load_path(&config_path)?;
                return Ok(Some((config, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Load config from a specific path.
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn load_path(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        self.paths.roots.iter_mut().for_each(resolve);
        self.rules.file.iter_mut().for_each(resolve);
        self.output.log_file.iter_mut().for_each(resolve);
    }

    /// Roots to scan: command line paths override the config
    pub fn effective_roots(&self, cli_roots: &[PathBuf]) -> Vec<PathBuf> {
        if !cli_roots.is_empty() {
            return cli_roots.to_vec();
        }
        self.paths.roots.clone()
    }

    /// Suffixes to match: command line overrides the config.
    ///
    /// A bare extension like `js` is treated as `.js`.
    pub fn effective_extensions(&self, cli_extensions: &[String]) -> Vec<String> {
        let source = if cli_extensions.is_empty() {
            &self.paths.extensions
        } else {
            cli_extensions
        };

        let mut extensions: Vec<String> = Vec::with_capacity(source.len());
        for ext in source.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
            let normalized = if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{}", ext)
            };
            if !extensions.contains(&normalized) {
                extensions.push(normalized);
            }
        }
        extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_config(dir: &Path, content: &str) {
        fs::write(dir.join(CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_load_basic_config() {
        let temp = TempDir::new().unwrap();
        create_config(
            temp.path(),
            r#"
[paths]
roots = ["backend/src/routes", "/abs/pages"]
extensions = [".js", "ts"]
exclude = ["node_modules/", "*.min.js"]

[rules]
preset = "partner"
file = "rules.yaml"

[output]
format = "json"
log_file = "run.log"
"#,
        );

        let (config, path) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert_eq!(path, temp.path().join(CONFIG_FILE_NAME));
        assert_eq!(
            config.paths.roots,
            vec![
                temp.path().join("backend/src/routes"),
                PathBuf::from("/abs/pages"),
            ]
        );
        assert_eq!(
            config.paths.exclude,
            vec!["node_modules/".to_string(), "*.min.js".to_string()]
        );
        assert_eq!(config.rules.preset, Some("partner".to_string()));
        assert_eq!(config.rules.file, Some(temp.path().join("rules.yaml")));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.log_file, Some(temp.path().join("run.log")));
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "");

        let (config, _) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert_eq!(config.paths.roots.len(), DEFAULT_ROOTS.len());
        assert_eq!(
            config.paths.roots[0],
            temp.path().join("backend/src/routes")
        );
        assert_eq!(config.effective_extensions(&[]), vec![".js", ".jsx"]);
        assert!(config.paths.exclude.is_empty());
        assert!(config.rules.preset.is_none());
        assert!(config.rules.file.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_load_from_parent_directory() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "[output]\nformat = \"text\"\n");
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let (_, path) = Config::load_from(nested).unwrap().unwrap();
        assert_eq!(path, temp.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_no_config_found() {
        let temp = TempDir::new().unwrap();
        let result = Config::load_from(temp.path().to_path_buf()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "[paths]\nroots = 3\n");
        assert!(Config::load_from(temp.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_effective_roots_cli_override() {
        let config = Config::default();
        assert_eq!(config.effective_roots(&[]).len(), DEFAULT_ROOTS.len());

        let cli = vec![PathBuf::from("src")];
        assert_eq!(config.effective_roots(&cli), cli);
    }

    #[test]
    fn test_effective_extensions_normalized() {
        let config = Config::default();
        let cli = vec!["ts".to_string(), ".tsx".to_string(), "ts".to_string(), " ".to_string()];
        assert_eq!(config.effective_extensions(&cli), vec![".ts", ".tsx"]);
    }
}
