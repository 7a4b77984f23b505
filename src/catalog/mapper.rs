use serde_json::Value;

use crate::config::ColumnAliases;
use crate::storage::{ExtractedRow, ProjectRecord};

pub const UNTITLED: &str = "Untitled";
pub const UNSPECIFIED_TOPIC: &str = "Unspecified";

/// 表格行 -> 项目记录，按别名顺序取第一个非空列
#[derive(Debug, Clone, Default)]
pub struct RowMapper {
    aliases: ColumnAliases,
}

impl RowMapper {
    pub fn new(aliases: ColumnAliases) -> Self {
        Self { aliases }
    }

    pub fn map_row(&self, row: &ExtractedRow, next_id: u64) -> ProjectRecord {
        let a = &self.aliases;
        ProjectRecord {
            id: next_id,
            title: first_present(row, &a.title).unwrap_or_else(|| UNTITLED.to_string()),
            pi_name: first_present(row, &a.pi_name).unwrap_or_default(),
            institution: first_present(row, &a.institution).unwrap_or_default(),
            topic: first_present(row, &a.topic).unwrap_or_else(|| UNSPECIFIED_TOPIC.to_string()),
            year: first_present(row, &a.year).as_deref().and_then(parse_year),
            description: first_present(row, &a.description).unwrap_or_default(),
            source_url: None,
        }
    }
}

fn first_present(row: &ExtractedRow, aliases: &[String]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|alias| row.get(alias).and_then(cell_text))
        .find(|v| !v.is_empty())
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 只有全是 ASCII 数字的值才算年份
fn parse_year(raw: &str) -> Option<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> ExtractedRow {
        match value {
            Value::Object(map) => map,
            _ => panic!("row must be an object"),
        }
    }

    #[test]
    fn project_title_and_year_are_mapped() {
        let mapper = RowMapper::default();
        let record = mapper.map_row(&row(json!({"Project Title": "X", "Year": "2020"})), 4);
        assert_eq!(record.id, 4);
        assert_eq!(record.title, "X");
        assert_eq!(record.year, Some(2020));
        assert_eq!(record.institution, "");
        assert_eq!(record.topic, "Unspecified");
        assert_eq!(record.pi_name, "");
        assert_eq!(record.description, "");
        assert_eq!(record.source_url, None);
    }

    #[test]
    fn non_numeric_year_is_null() {
        let record = RowMapper::default().map_row(&row(json!({"Year": "circa 1999"})), 1);
        assert_eq!(record.year, None);
        assert_eq!(record.title, "Untitled");
    }

    #[test]
    fn first_non_empty_alias_wins() {
        let record = RowMapper::default().map_row(
            &row(json!({
                "Title": "",
                "title": "lower",
                "Project Title": "later",
                "Principal Investigator": "Dr. Chen",
                "Org": "MIT",
                "Research Area": "Plant Biology",
                "Abstract": "growth chambers",
                "Notes": "ignored"
            })),
            1,
        );
        assert_eq!(record.title, "lower");
        assert_eq!(record.pi_name, "Dr. Chen");
        assert_eq!(record.institution, "MIT");
        assert_eq!(record.topic, "Plant Biology");
        assert_eq!(record.description, "growth chambers");
    }

    #[test]
    fn numeric_cells_are_accepted() {
        let record = RowMapper::default().map_row(&row(json!({"title": "T", "year": 2021})), 1);
        assert_eq!(record.year, Some(2021));

        let record = RowMapper::default().map_row(&row(json!({"Year": "-2021"})), 1);
        assert_eq!(record.year, None);
    }

    #[test]
    fn custom_aliases_are_used() {
        let aliases = ColumnAliases {
            topic: vec!["Area".to_string()],
            ..ColumnAliases::default()
        };
        let record = RowMapper::new(aliases).map_row(&row(json!({"Area": "Radiation", "Topic": "x"})), 1);
        assert_eq!(record.topic, "Radiation");
    }
}
