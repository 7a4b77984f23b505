use once_cell::sync::Lazy;
use regex::Regex;

use super::context::CONTEXT_SEPARATOR;

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(19|20)[0-9]{2}").unwrap());
// "Smith J." style: capitalised surname, whitespace, initial with a period
static AUTHOR_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][a-z]+\s+[A-Z]\.").unwrap());

/// 从上下文中猜出的字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldGuess {
    pub title: String,
    pub pi_name: String,
    pub year: Option<i32>,
}

/// 基于规则的标题/作者/年份提取
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, context: &str) -> FieldGuess {
        let parts: Vec<&str> = context
            .split(CONTEXT_SEPARATOR)
            .filter(|p| !p.trim().is_empty())
            .collect();

        let year = extract_year(context);

        // Rule order matters: author line first, then first line as title.
        match parts.as_slice() {
            [first, second, ..] if AUTHOR_LINE.is_match(first) => FieldGuess {
                title: second.to_string(),
                pi_name: first_author(first),
                year,
            },
            [first, ..] => FieldGuess {
                title: first.to_string(),
                pi_name: String::new(),
                year,
            },
            [] => FieldGuess { year, ..FieldGuess::default() },
        }
    }
}

/// 第一个 19xx/20xx
pub fn extract_year(text: &str) -> Option<i32> {
    YEAR.find(text).and_then(|m| m.as_str().parse().ok())
}

/// "Last FM, Last FM." -> "Last FM"
pub fn first_author(line: &str) -> String {
    let before_period = line.split('.').next().unwrap_or_default();
    let before_comma = before_period.split(',').next().unwrap_or_default();
    before_comma.trim().to_string()
}
