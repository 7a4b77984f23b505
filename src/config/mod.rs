pub mod aliases;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::CatalogResult;

pub use aliases::ColumnAliases;

const DEFAULT_SETTINGS: &str = "config/settings";
const ENV_PREFIX: &str = "PDF_CATALOG";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub heuristics: HeuristicsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// extract-links 的输出，build-projects 的输入
    pub links: String,
    /// pdf-to-json 读取的文本/表格 JSON
    pub text: String,
    pub catalog: String,
    /// pdf-to-json 的默认输出
    pub extracted: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HeuristicsConfig {
    pub context_window_chars: usize,
    pub context_lines: usize,
    pub fallback_chars: usize,
    pub raw_text_chars: usize,
}

impl AppConfig {
    /// 加载 config/settings.toml（可选），再叠加 PDF_CATALOG__* 环境变量
    pub fn load() -> CatalogResult<Self> {
        Self::load_from(None)
    }

    pub fn load_from(path: Option<&Path>) -> CatalogResult<Self> {
        let file = match path {
            Some(p) => ::config::File::from(p).required(true),
            None => ::config::File::with_name(DEFAULT_SETTINGS).required(false),
        };

        let settings = ::config::Config::builder()
            .add_source(file)
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            links: "scripts/extracted_links.json".to_string(),
            text: "scripts/out.json".to_string(),
            catalog: "data/projects.json".to_string(),
            extracted: "scripts/out.json".to_string(),
        }
    }
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            context_window_chars: 400,
            context_lines: 4,
            fallback_chars: 200,
            raw_text_chars: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut custom = AppConfig::default();
        custom.paths.catalog = "out/catalog.json".to_string();
        custom.heuristics.context_lines = 2;
        std::fs::write(&path, toml::to_string_pretty(&custom).unwrap()).unwrap();

        let loaded = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded, custom);
    }

    #[test]
    fn partial_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[heuristics]\nfallback_chars = 50\n").unwrap();

        let loaded = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.heuristics.fallback_chars, 50);
        assert_eq!(loaded.heuristics.context_window_chars, 400);
        assert_eq!(loaded.paths, PathsConfig::default());
    }
}
