#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use quizreel_core::{
    QuizReelError, Result,
    provider::ScriptGenerator,
    store::{Query, RecordStore},
};
use serde_json::{Value, json};

/// In-memory store answering by table name and recording every query.
#[derive(Default)]
pub struct FakeStore {
    tables: HashMap<&'static str, Vec<Value>>,
    failing_table: Option<&'static str>,
    pub queries: Mutex<Vec<Query>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, table: &'static str, rows: Vec<Value>) -> Self {
        self.tables.insert(table, rows);
        self
    }

    pub fn failing_on(mut self, table: &'static str) -> Self {
        self.failing_table = Some(table);
        self
    }

    pub fn queried_tables(&self) -> Vec<&'static str> {
        self.queries.lock().unwrap().iter().map(|q| q.table).collect()
    }

    pub fn recorded(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }

    /// One course with one subject, unit and topic holding `questions`.
    pub fn single_branch(questions: Vec<Value>) -> Self {
        Self::new()
            .with_rows("exams", vec![json!({ "id": 1, "name": "Joint Entrance Examination" })])
            .with_rows("subjects", vec![json!({ "id": 10 })])
            .with_rows("units", vec![json!({ "id": 20 })])
            .with_rows("topics", vec![json!({ "id": 30 })])
            .with_rows("new_questions", questions)
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn fetch(&self, query: &Query) -> Result<Vec<Value>> {
        self.queries.lock().unwrap().push(query.clone());
        if self.failing_table == Some(query.table) {
            return Err(QuizReelError::LookupFailed {
                table: query.table.to_string(),
                reason: "status 503 Service Unavailable: upstream down".to_string(),
            });
        }
        Ok(self.tables.get(query.table).cloned().unwrap_or_default())
    }
}

/// Generator that returns a canned script (or error) and keeps the prompts it saw.
pub struct FakeGenerator {
    script: std::result::Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn returning(script: &str) -> Self {
        Self {
            script: Ok(script.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            script: Err(reason.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ScriptGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .clone()
            .map_err(|reason| QuizReelError::GenerationFailed { reason })
    }
}

pub fn question_row(id: i64, statement: &str, solution: &str) -> Value {
    json!({
        "id": id,
        "question_statement": statement,
        "options": { "a": "1", "b": "2" },
        "solution": solution,
        "topic_id": 30,
    })
}
