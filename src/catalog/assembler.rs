use super::fields::FieldGuess;
use crate::storage::ProjectRecord;
use crate::utils::{CatalogError, CatalogResult};

/// 组装项目记录，并持有递增的 id
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    next_id: u64,
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl RecordAssembler {
    pub fn starting_at(next_id: u64) -> Self {
        Self { next_id }
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// 取出当前 id 并递增；计数器溢出时报错
    pub fn take_id(&mut self) -> CatalogResult<u64> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| CatalogError::Catalog(format!("id 超出范围: {}", id)))?;
        Ok(id)
    }

    /// 链接启发式路径：标题缺失时用 URI，描述为原始上下文
    pub fn assemble(
        &mut self,
        uri: &str,
        context: Option<&str>,
        fields: FieldGuess,
    ) -> CatalogResult<ProjectRecord> {
        let title = if fields.title.is_empty() {
            uri.to_string()
        } else {
            fields.title
        };

        Ok(ProjectRecord {
            id: self.take_id()?,
            title,
            pi_name: fields.pi_name,
            institution: String::new(),
            topic: String::new(),
            year: fields.year,
            description: context.unwrap_or_default().to_string(),
            source_url: Some(uri.to_string()),
        })
    }
}
