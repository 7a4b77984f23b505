use serde::{Deserialize, Serialize};

/// 目录中的一条项目记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: u64,
    pub title: String,
    pub pi_name: String,
    pub institution: String,
    pub topic: String,
    pub year: Option<i32>,
    pub description: String,
    /// 只有链接启发式路径设置；表格记录不输出这个键
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// PDF 中的一个超链接注释
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub page: u32,
    pub uri: String,
}

/// 未检测到表格时输出的文本记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub raw_text: String,
}

/// 表格行：列名 -> 单元格，保持列顺序
pub type ExtractedRow = serde_json::Map<String, serde_json::Value>;
