// src/analyzer/heuristic.rs
use crate::analyzer::{AnalysisError, AnalysisRequest, ContentAnalyzer};
use chrono::NaiveDate;
use serde_yaml_ng::{Mapping, Value};

/// Offline analyzer that fills in the mandatory fields from what the note
/// itself says: title, creation date, type and a placeholder tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicAnalyzer {
    today: NaiveDate,
    note_type: String,
    default_tag: String,
}

impl HeuristicAnalyzer {
    #[inline]
    pub fn new(today: NaiveDate, note_type: impl Into<String>, default_tag: impl Into<String>) -> Self {
        Self {
            today,
            note_type: note_type.into(),
            default_tag: default_tag.into(),
        }
    }
}

fn list(item: &str) -> Value {
    Value::Sequence(vec![Value::String(item.to_owned())])
}

impl ContentAnalyzer for HeuristicAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalysisError> {
        let mut fields = Mapping::new();
        fields.insert("title".into(), list(&request.title_hint));
        fields.insert(
            "date_created_at".into(),
            Value::String(self.today.format("%Y-%m-%d").to_string()),
        );
        fields.insert("type".into(), list(&self.note_type));
        fields.insert("tags".into(), list(&self.default_tag));

        Ok(serde_yaml_ng::to_string(&fields)?)
    }
}
