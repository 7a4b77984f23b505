use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

use super::models::ProjectRecord;
use crate::utils::{CatalogError, CatalogResult};

/// 输出目录：已有记录原样保留，新记录追加在后面
#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    records: Vec<Value>,
    existing: usize,
}

impl ProjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_existing(records: Vec<Value>) -> Self {
        let existing = records.len();
        Self { records, existing }
    }

    /// 读取已有目录文件；文件不存在或为空时得到空目录。
    /// 无法解析时返回错误，不覆盖原文件
    pub fn load(path: &Path) -> CatalogResult<Self> {
        if !path.exists() {
            info!("目录文件不存在，新建: {}", path.display());
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let value: Value = serde_json::from_str(&content).map_err(|e| {
            CatalogError::Catalog(format!("{} 无法解析: {}", path.display(), e))
        })?;

        match value {
            Value::Array(records) => {
                info!("已有目录 {} 条记录: {}", records.len(), path.display());
                Ok(Self::from_existing(records))
            }
            _ => Err(CatalogError::Catalog(format!(
                "{} 不是 JSON 数组",
                path.display()
            ))),
        }
    }

    /// max(已有 id) + 1；没有记录时为 1。非整数 id 按 0 计
    pub fn next_id(&self) -> CatalogResult<u64> {
        let max = self
            .records
            .iter()
            .map(|r| r.get("id").and_then(Value::as_u64).unwrap_or(0))
            .max()
            .unwrap_or(0);
        max.checked_add(1)
            .ok_or_else(|| CatalogError::Catalog(format!("已有 id 过大，无法继续编号: {}", max)))
    }

    pub fn push(&mut self, record: &ProjectRecord) -> CatalogResult<()> {
        self.records.push(serde_json::to_value(record)?);
        Ok(())
    }

    pub fn extend<'a, I>(&mut self, records: I) -> CatalogResult<()>
    where
        I: IntoIterator<Item = &'a ProjectRecord>,
    {
        for record in records {
            self.push(record)?;
        }
        Ok(())
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn existing_len(&self) -> usize {
        self.existing
    }

    pub fn added_len(&self) -> usize {
        self.records.len() - self.existing
    }

    pub fn to_json(&self) -> CatalogResult<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// 整体写出：先写同目录临时文件再重命名
    pub fn save(&self, path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = self.to_json()?;
        let tmp = tmp_path(path);
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;

        info!("已写入 {}，共 {} 条 (新增 {})", path.display(), self.len(), self.added_len());
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "projects.json".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: u64) -> ProjectRecord {
        ProjectRecord {
            id,
            title: format!("Project {}", id),
            pi_name: String::new(),
            institution: String::new(),
            topic: String::new(),
            year: None,
            description: String::new(),
            source_url: Some("https://example.org".to_string()),
        }
    }

    #[test]
    fn empty_catalog_starts_at_one() {
        assert_eq!(ProjectCatalog::new().next_id().unwrap(), 1);
    }

    #[test]
    fn next_id_continues_after_max() {
        let catalog = ProjectCatalog::from_existing(vec![
            json!({"id": 1}),
            json!({"id": 2}),
            json!({"id": 5}),
        ]);
        assert_eq!(catalog.next_id().unwrap(), 6);
    }

    #[test]
    fn non_integer_ids_count_as_zero() {
        let catalog = ProjectCatalog::from_existing(vec![json!({"id": "x"}), json!({"title": "t"})]);
        assert_eq!(catalog.next_id().unwrap(), 1);
    }

    #[test]
    fn largest_possible_id_cannot_be_continued() {
        let catalog = ProjectCatalog::from_existing(vec![json!({"id": u64::MAX})]);
        assert!(matches!(catalog.next_id(), Err(CatalogError::Catalog(_))));
    }

    #[test]
    fn missing_and_blank_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("projects.json");
        assert!(ProjectCatalog::load(&missing).unwrap().is_empty());

        std::fs::write(&missing, "  \n").unwrap();
        assert!(ProjectCatalog::load(&missing).unwrap().is_empty());
    }

    #[test]
    fn corrupt_catalog_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(&path, "{\"id\": 1}").unwrap();
        assert!(matches!(ProjectCatalog::load(&path), Err(CatalogError::Catalog(_))));

        std::fs::write(&path, "[{").unwrap();
        assert!(ProjectCatalog::load(&path).is_err());
    }

    #[test]
    fn save_round_trips_existing_records_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("projects.json");
        let existing = vec![
            json!({"id": 2, "title": "Ünïcode", "extra": [1, 2], "piName": ""}),
            json!({"id": 1, "title": "B"}),
        ];
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, serde_json::to_string_pretty(&existing).unwrap()).unwrap();

        let mut catalog = ProjectCatalog::load(&path).unwrap();
        assert_eq!(catalog.existing_len(), 2);
        catalog.push(&record(catalog.next_id().unwrap())).unwrap();
        catalog.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Ünïcode"));
        let parsed: Vec<Value> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed[..2], existing[..]);
        assert_eq!(parsed[2]["id"], json!(3));
        assert!(!dir.path().join("data").join(".projects.json.tmp").exists());
    }
}
