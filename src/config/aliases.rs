use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::CatalogResult;

/// 表格列名别名，按优先级排列
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ColumnAliases {
    pub title: Vec<String>,
    pub pi_name: Vec<String>,
    pub institution: Vec<String>,
    pub topic: Vec<String>,
    pub year: Vec<String>,
    pub description: Vec<String>,
}

impl ColumnAliases {
    pub fn load() -> CatalogResult<Self> {
        Self::load_from(Path::new("config/aliases.toml"))
    }

    pub fn load_from(path: &Path) -> CatalogResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let aliases: ColumnAliases = toml::from_str(&content)?;
        Ok(aliases)
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            title: names(&["Title", "title", "Project Title"]),
            pi_name: names(&["PI", "Principal Investigator", "pi"]),
            institution: names(&["Institution", "Org", "institution"]),
            topic: names(&["Topic", "Research Area", "topic"]),
            year: names(&["Year", "year"]),
            description: names(&["Description", "Abstract", "Notes"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let aliases = ColumnAliases::load_from(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(aliases, ColumnAliases::default());
        assert_eq!(aliases.title[2], "Project Title");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.toml");
        std::fs::write(&path, "topic = [\"Area\", \"Topic\"]\n").unwrap();

        let aliases = ColumnAliases::load_from(&path).unwrap();
        assert_eq!(aliases.topic, vec!["Area".to_string(), "Topic".to_string()]);
        assert_eq!(aliases.pi_name, ColumnAliases::default().pi_name);
    }
}
