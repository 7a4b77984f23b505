use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::HeuristicsConfig;

/// 上下文行之间的分隔符：字面的反斜杠加 `n`，不是换行；已有目录文件依赖这个格式
pub const CONTEXT_SEPARATOR: &str = "\\n";

static DOI_IN_URI: Lazy<Regex> = Lazy::new(|| Regex::new(r"10\.\d{4,9}/[\w.\-/_]+").unwrap());
static DOI_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"10\.\d{4,9}/").unwrap());
static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// 在全文中定位链接前面的上下文
#[derive(Debug, Clone)]
pub struct ContextLocator {
    window_chars: usize,
    context_lines: usize,
    fallback_chars: usize,
}

impl Default for ContextLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextLocator {
    pub fn new() -> Self {
        Self::from_config(&HeuristicsConfig::default())
    }

    pub fn from_config(config: &HeuristicsConfig) -> Self {
        Self {
            window_chars: config.context_window_chars,
            context_lines: config.context_lines,
            fallback_chars: config.fallback_chars,
        }
    }

    /// 返回链接之前的若干行；URI 和其中的 DOI 都找不到时返回 None
    pub fn locate(&self, raw_text: &str, uri: &str) -> Option<String> {
        let (offset, needle) = find_target(raw_text, uri)?;
        let start = chars_back(raw_text, offset, self.window_chars);
        let window = &raw_text[start..offset + needle.len()];

        let lines: Vec<&str> = LINE_BREAKS
            .split(window)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let anchor = lines
            .iter()
            .rposition(|line| line.contains(uri) || DOI_PREFIX.is_match(line));

        match anchor {
            Some(k) => {
                let first = k.saturating_sub(self.context_lines);
                Some(lines[first..=k].join(CONTEXT_SEPARATOR))
            }
            None => {
                debug!("窗口内没有包含链接的行，使用前 {} 字符", self.fallback_chars);
                Some(window.chars().take(self.fallback_chars).collect())
            }
        }
    }
}

/// URI 中形如 DOI 的部分
pub fn doi_in(uri: &str) -> Option<&str> {
    DOI_IN_URI.find(uri).map(|m| m.as_str())
}

fn find_target<'a>(raw_text: &str, uri: &'a str) -> Option<(usize, &'a str)> {
    if uri.is_empty() {
        return None;
    }
    if let Some(i) = raw_text.find(uri) {
        return Some((i, uri));
    }
    let doi = doi_in(uri)?;
    raw_text.find(doi).map(|i| (i, doi))
}

/// `offset` 之前 `count` 个字符处的字节偏移，不足时取 0
fn chars_back(text: &str, offset: usize, count: usize) -> usize {
    if count == 0 {
        return offset;
    }
    text[..offset]
        .char_indices()
        .rev()
        .nth(count - 1)
        .map_or(0, |(i, _)| i)
}
