use serde_json::Value;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info, warn};

use super::models::{ExtractedRow, LinkEntry};
use crate::utils::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

/// 先按 UTF-8 解码，失败后按 Latin-1 解码（每个字节映射到同值码点，不会失败）
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, TextEncoding) {
    match std::str::from_utf8(bytes) {
        Ok(s) => (Cow::Borrowed(s), TextEncoding::Utf8),
        Err(_) => {
            let s: String = bytes.iter().map(|&b| b as char).collect();
            (Cow::Owned(s), TextEncoding::Latin1)
        }
    }
}

/// 两次尝试解码并解析 JSON
pub fn parse_json_bytes(bytes: &[u8]) -> CatalogResult<Value> {
    let (text, encoding) = decode_text(bytes);
    if encoding == TextEncoding::Latin1 {
        info!("输入不是合法 UTF-8，已按 Latin-1 解码");
    }
    serde_json::from_str(&text)
        .map_err(|e| CatalogError::Decode(format!("{:?} 解码后 JSON 解析失败: {}", encoding, e)))
}

/// 读取中间 JSON 文件；缺失或损坏时记录警告并返回 None
pub fn read_json_lenient(path: &Path) -> Option<Value> {
    if !path.exists() {
        warn!("输入文件不存在，按空输入处理: {}", path.display());
        return None;
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            warn!("读取失败 {}: {}", path.display(), e);
            return None;
        }
    };

    match parse_json_bytes(&bytes) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("无法解析 {}: {}", path.display(), e);
            None
        }
    }
}

fn json_array(value: Option<Value>, path: &Path) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        Some(_) => {
            warn!("{} 不是 JSON 数组，按空输入处理", path.display());
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// 读取 extract-links 的输出
pub fn load_links(path: &Path) -> Vec<LinkEntry> {
    let items = json_array(read_json_lenient(path), path);
    let total = items.len();

    let links: Vec<LinkEntry> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<LinkEntry>(item) {
            Ok(link) => Some(link),
            Err(e) => {
                debug!("跳过无效链接条目: {}", e);
                None
            }
        })
        .collect();

    if links.len() < total {
        warn!("{} 中有 {} 个链接条目无效", path.display(), total - links.len());
    }
    info!("读取链接 {} 个: {}", links.len(), path.display());
    links
}

/// 取 pdf-to-json 输出第一个元素的 raw_text
pub fn load_raw_text(path: &Path) -> String {
    let items = json_array(read_json_lenient(path), path);
    let text = items
        .first()
        .and_then(|first| first.get("raw_text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    if text.is_empty() {
        warn!("{} 中没有 raw_text", path.display());
    } else {
        info!("读取原始文本 {} 字符", text.chars().count());
    }
    text
}

/// 读取表格行；非对象元素被跳过
pub fn load_rows(path: &Path) -> Vec<ExtractedRow> {
    json_array(read_json_lenient(path), path)
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(row) => Some(row),
            other => {
                debug!("跳过非对象行: {}", other);
                None
            }
        })
        .collect()
}
