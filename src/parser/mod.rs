pub mod link_extractor;
pub mod pdf_parser;
pub mod table_parser;

pub use link_extractor::LinkExtractor;
pub use pdf_parser::PdfParser;
pub use table_parser::TableParser;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::storage::{ExtractedRow, TextRecord};
use crate::utils::CatalogResult;

/// 提取的表格
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// pdf-to-json 的结果：表格行，或者没有表格时的一条文本记录
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Rows(Vec<ExtractedRow>),
    Text(TextRecord),
}

impl Extraction {
    pub fn len(&self) -> usize {
        match self {
            Extraction::Rows(rows) => rows.len(),
            Extraction::Text(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 总是输出 JSON 数组，与 build-projects / map-rows 的输入一致
    pub fn to_json(&self) -> CatalogResult<Value> {
        Ok(match self {
            Extraction::Rows(rows) => {
                Value::Array(rows.iter().cloned().map(Value::Object).collect())
            }
            Extraction::Text(record) => Value::Array(vec![serde_json::to_value(record)?]),
        })
    }
}

/// 统一提取管道
pub struct ExtractionPipeline {
    pdf_parser: PdfParser,
    table_parser: TableParser,
    raw_text_chars: usize,
}

impl ExtractionPipeline {
    pub fn new(raw_text_chars: usize) -> Self {
        Self {
            pdf_parser: PdfParser::new(),
            table_parser: TableParser::new(),
            raw_text_chars,
        }
    }

    pub fn process(&self, pdf_path: &Path) -> CatalogResult<Extraction> {
        info!("开始提取管道: {}", pdf_path.display());
        let full_text = self.pdf_parser.extract_full_text(pdf_path)?;
        Ok(self.process_text(&full_text))
    }

    pub fn process_text(&self, full_text: &str) -> Extraction {
        let tables = self.table_parser.extract(full_text);
        let rows = self.table_parser.to_rows(&tables);

        if rows.is_empty() {
            info!("未检测到表格，输出文本记录");
            Extraction::Text(self.pdf_parser.text_record(full_text, self.raw_text_chars))
        } else {
            info!("{} 个表格，共 {} 行", tables.len(), rows.len());
            Extraction::Rows(rows)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tables_win_over_text_record() {
        let text = "Table 2. Projects\nTitle    Year\nRadiation Shielding    2023\n";
        let out = ExtractionPipeline::new(4000).process_text(text);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out.to_json().unwrap(),
            json!([{"Title": "Radiation Shielding", "Year": "2023"}])
        );
    }

    #[test]
    fn text_record_when_no_tables() {
        let text = "Title: Microbial Behavior\nYear: 2024\nsome prose";
        let out = ExtractionPipeline::new(10).process_text(text);
        assert_eq!(
            out.to_json().unwrap(),
            json!([{"title": "Microbial Behavior", "year": 2024, "raw_text": "Title: Mic"}])
        );
    }
}
