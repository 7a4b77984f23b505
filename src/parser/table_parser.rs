use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

use super::Table;
use crate::storage::ExtractedRow;

static TABLE_CAPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Table\s+(\d+)[.:]?\s*(.*)$").unwrap());
static COLUMN_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t]|\s{2,}").unwrap());

pub struct TableParser;

impl Default for TableParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableParser {
    pub fn new() -> Self {
        Self
    }

    /// 从全文中检测并提取表格
    pub fn extract(&self, full_text: &str) -> Vec<Table> {
        let lines: Vec<&str> = full_text.lines().collect();
        let mut tables: Vec<Table> = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let trimmed = lines[i].trim();

            // "Table N" caption followed by a block of rows
            if TABLE_CAPTION.is_match(trimmed) {
                let caption = Some(trimmed.to_string());
                i += 1;

                while i < lines.len() && lines[i].trim().is_empty() {
                    i += 1;
                }

                let (raw_rows, next) = collect_block(&lines, i, |row| !TABLE_CAPTION.is_match(row));
                i = next;

                if raw_rows.len() >= 2 {
                    if let Some((headers, rows)) = parse_rows(&raw_rows) {
                        debug!("检测到表格: {:?}, {} 行", caption, rows.len());
                        tables.push(Table { caption, headers, rows });
                    }
                }
                continue;
            }

            // Uncaptioned: 3+ consecutive lines with 2+ columns
            if looks_like_table_row(trimmed) {
                let (raw_rows, next) = collect_block(&lines, i, looks_like_table_row);

                if raw_rows.len() >= 3 {
                    if let Some((headers, rows)) = parse_rows(&raw_rows) {
                        debug!("检测到无标题表格: {} 列, {} 行", headers.len(), rows.len());
                        tables.push(Table { caption: None, headers, rows });
                    }
                }
                i = if next == i { i + 1 } else { next };
                continue;
            }

            i += 1;
        }

        info!("表格解析完成，共 {} 个", tables.len());
        tables
    }

    /// 表头 + 数据行 -> 每行一个对象；列数不一致时按较短者配对
    pub fn to_rows(&self, tables: &[Table]) -> Vec<ExtractedRow> {
        let mut records = Vec::new();
        for table in tables {
            for row in &table.rows {
                let mut obj = ExtractedRow::new();
                for (header, cell) in table.headers.iter().zip(row) {
                    obj.insert(header.trim().to_string(), Value::String(cell.trim().to_string()));
                }
                records.push(obj);
            }
        }
        records
    }
}

/// 从 `start` 开始收集非空行，遇到连续两个空行或 `accept` 拒绝的行为止；
/// 返回收集到的行和继续扫描的位置
fn collect_block<'a>(lines: &[&'a str], start: usize, accept: impl Fn(&str) -> bool) -> (Vec<&'a str>, usize) {
    let mut raw_rows = Vec::new();
    let mut blank_count = 0;
    let mut i = start;
    while i < lines.len() {
        let row = lines[i].trim();
        if row.is_empty() {
            blank_count += 1;
            if blank_count > 1 {
                break;
            }
            i += 1;
            continue;
        }
        blank_count = 0;
        if !accept(row) {
            break;
        }
        raw_rows.push(row);
        i += 1;
    }
    (raw_rows, i)
}

fn split_columns(line: &str) -> Vec<String> {
    COLUMN_GAP
        .split(line)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim().to_string())
        .collect()
}

fn looks_like_table_row(line: &str) -> bool {
    line.len() >= 5 && split_columns(line).len() >= 2
}

fn parse_rows(raw_rows: &[&str]) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let (first, rest) = raw_rows.split_first()?;

    let headers = split_columns(first);
    if headers.len() < 2 || rest.is_empty() {
        return None;
    }

    let rows = rest.iter().map(|row| split_columns(row)).collect();
    Some((headers, rows))
}
