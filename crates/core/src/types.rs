use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{template::TemplateSuggestion, timeline::CaptionSegment};

/// Primary key as stored. The store hands back integers or strings depending
/// on the table, so both are accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => RecordId(n.to_string()),
            RawId::Text(s) => RecordId(s),
        }
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId(n.to_string())
    }
}

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: RecordId,
    #[serde(rename = "question_statement")]
    pub statement: String,
    #[serde(default)]
    pub options: Option<BTreeMap<String, serde_json::Value>>,
    pub solution: String,
    pub topic_id: RecordId,
}

impl Question {
    /// Options flattened to `label: value` pairs, in label order.
    pub fn option_pairs(&self) -> Vec<String> {
        let Some(options) = &self.options else {
            return Vec::new();
        };

        options
            .iter()
            .map(|(label, value)| match value {
                serde_json::Value::String(text) => format!("{}: {}", label, text),
                other => format!("{}: {}", label, other),
            })
            .collect()
    }
}

/// `{id}` projection of a subject, unit or topic row.
#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyNode {
    pub id: RecordId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoData {
    pub script: String,
    pub voice_over_text: String,
    pub captions: Vec<CaptionSegment>,
    pub template_suggestion: TemplateSuggestion,
    pub total_conceptual_duration: f64,
    #[serde(rename = "murf_tts_api_key")]
    pub tts_api_key: Option<String>,
    pub exam_name: String,
    pub question_count: usize,
}
