use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{info, warn};

use crate::storage::TextRecord;
use crate::utils::{CatalogError, CatalogResult};

static TITLE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Title[:\s]+(.+)").unwrap());
static YEAR_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Year[:\s]+([0-9]{4})").unwrap());

pub struct PdfParser;

impl Default for PdfParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfParser {
    pub fn new() -> Self {
        Self
    }

    /// 提取完整文本
    pub fn extract_full_text(&self, pdf_path: &Path) -> CatalogResult<String> {
        info!("提取PDF完整文本: {}", pdf_path.display());

        if !pdf_path.exists() {
            return Err(CatalogError::Pdf(format!("PDF文件不存在: {}", pdf_path.display())));
        }

        let text = pdf_extract::extract_text(pdf_path)
            .map_err(|e| CatalogError::Pdf(e.to_string()))?;

        if text.trim().is_empty() {
            warn!("PDF中未提取到文本内容");
        } else {
            info!("提取文本长度: {} 字符", text.chars().count());
        }

        Ok(text)
    }

    /// 没有表格时的兜底记录：Title/Year 字段加前 N 个字符的原文
    pub fn text_record(&self, text: &str, raw_text_chars: usize) -> TextRecord {
        let title = TITLE_LINE
            .captures(text)
            .map(|c| c[1].trim().to_string());
        let year = YEAR_LINE
            .captures(text)
            .and_then(|c| c[1].parse().ok());

        TextRecord {
            title,
            year,
            raw_text: text.chars().take(raw_text_chars).collect(),
        }
    }
}
