pub mod assembler;
pub mod context;
pub mod fields;
pub mod mapper;

pub use assembler::RecordAssembler;
pub use context::ContextLocator;
pub use fields::{FieldExtractor, FieldGuess};
pub use mapper::RowMapper;

use std::path::Path;
use tracing::{debug, info};

use crate::config::{ColumnAliases, HeuristicsConfig};
use crate::storage::{input, ExtractedRow, LinkEntry, ProjectCatalog, ProjectRecord};
use crate::utils::CatalogResult;

/// 目录构建管道：链接启发式路径与表格映射路径
pub struct CatalogPipeline {
    locator: ContextLocator,
    extractor: FieldExtractor,
    mapper: RowMapper,
}

impl Default for CatalogPipeline {
    fn default() -> Self {
        Self::new(&HeuristicsConfig::default(), ColumnAliases::default())
    }
}

impl CatalogPipeline {
    pub fn new(heuristics: &HeuristicsConfig, aliases: ColumnAliases) -> Self {
        Self {
            locator: ContextLocator::from_config(heuristics),
            extractor: FieldExtractor::new(),
            mapper: RowMapper::new(aliases),
        }
    }

    /// 每个链接生成一条记录，重复链接不去重
    pub fn records_from_links(
        &self,
        links: &[LinkEntry],
        raw_text: &str,
        assembler: &mut RecordAssembler,
    ) -> CatalogResult<Vec<ProjectRecord>> {
        let mut located = 0;
        let records = links
            .iter()
            .map(|link| {
                let context = self.locator.locate(raw_text, &link.uri);
                if context.is_some() {
                    located += 1;
                } else {
                    debug!("未在文本中找到链接 (第 {} 页): {}", link.page, link.uri);
                }
                let fields = context
                    .as_deref()
                    .map(|c| self.extractor.extract(c))
                    .unwrap_or_default();
                assembler.assemble(&link.uri, context.as_deref(), fields)
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        info!("链接 {} 个，其中 {} 个找到上下文", links.len(), located);
        Ok(records)
    }

    pub fn records_from_rows(
        &self,
        rows: &[ExtractedRow],
        assembler: &mut RecordAssembler,
    ) -> CatalogResult<Vec<ProjectRecord>> {
        rows.iter()
            .map(|row| assembler.take_id().map(|id| self.mapper.map_row(row, id)))
            .collect()
    }

    /// 链接 JSON + 文本 JSON -> 追加到目录文件
    pub fn build_projects(
        &self,
        links_path: &Path,
        text_path: &Path,
        catalog_path: &Path,
    ) -> CatalogResult<ProjectCatalog> {
        let mut catalog = ProjectCatalog::load(catalog_path)?;
        let links = input::load_links(links_path);
        let raw_text = input::load_raw_text(text_path);

        let mut assembler = RecordAssembler::starting_at(catalog.next_id()?);
        let records = self.records_from_links(&links, &raw_text, &mut assembler)?;
        catalog.extend(&records)?;
        catalog.save(catalog_path)?;
        Ok(catalog)
    }

    /// 表格行 JSON -> 追加到目录文件
    pub fn map_rows(&self, rows_path: &Path, catalog_path: &Path) -> CatalogResult<ProjectCatalog> {
        let mut catalog = ProjectCatalog::load(catalog_path)?;
        let rows = input::load_rows(rows_path);
        info!("读取表格行 {} 条: {}", rows.len(), rows_path.display());

        let mut assembler = RecordAssembler::starting_at(catalog.next_id()?);
        let records = self.records_from_rows(&rows, &mut assembler)?;
        catalog.extend(&records)?;
        catalog.save(catalog_path)?;
        Ok(catalog)
    }
}
