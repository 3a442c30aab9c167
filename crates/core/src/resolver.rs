//! Course → subjects → units → topics → questions.
//!
//! The store has no multi-level join, so each level is a batched
//! "foreign key in this id set" lookup narrowed by the level above it. An
//! empty level ends resolution right there with no further lookups.

use std::collections::BTreeSet;

use crate::{
    error::Result,
    store::{Query, RecordStore, fetch_records},
    types::{HierarchyNode, Question, RecordId},
};

/// One containment level: the table and the column pointing at its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyStage {
    pub table: &'static str,
    pub parent_column: &'static str,
}

pub const SUBJECTS: HierarchyStage = HierarchyStage {
    table: "subjects",
    parent_column: "course_id",
};
pub const UNITS: HierarchyStage = HierarchyStage {
    table: "units",
    parent_column: "subject_id",
};
pub const TOPICS: HierarchyStage = HierarchyStage {
    table: "topics",
    parent_column: "unit_id",
};
pub const QUESTIONS: HierarchyStage = HierarchyStage {
    table: "new_questions",
    parent_column: "topic_id",
};

async fn child_ids<S: RecordStore + ?Sized>(
    store: &S,
    stage: HierarchyStage,
    query: Query,
) -> Result<BTreeSet<RecordId>> {
    let nodes: Vec<HierarchyNode> = fetch_records(store, &query).await?;
    let ids: BTreeSet<RecordId> = nodes.into_iter().map(|node| node.id).collect();
    tracing::debug!(table = stage.table, found = ids.len(), "hierarchy stage resolved");
    Ok(ids)
}

/// All questions under `course_id`, in the order the final lookup returns them.
pub async fn resolve_questions<S: RecordStore + ?Sized>(
    store: &S,
    course_id: &RecordId,
) -> Result<Vec<Question>> {
    let subject_ids = child_ids(
        store,
        SUBJECTS,
        Query::new(SUBJECTS.table, "id").eq(SUBJECTS.parent_column, course_id.clone()),
    )
    .await?;

    let mut parent_ids = subject_ids;
    for stage in [UNITS, TOPICS] {
        if parent_ids.is_empty() {
            tracing::info!(%course_id, stopped_before = stage.table, "empty hierarchy level");
            return Ok(Vec::new());
        }
        let query = Query::new(stage.table, "id").is_in(stage.parent_column, parent_ids);
        parent_ids = child_ids(store, stage, query).await?;
    }

    if parent_ids.is_empty() {
        tracing::info!(%course_id, stopped_before = QUESTIONS.table, "empty hierarchy level");
        return Ok(Vec::new());
    }

    let query = Query::new(QUESTIONS.table, "*").is_in(QUESTIONS.parent_column, parent_ids);
    let questions: Vec<Question> = fetch_records(store, &query).await?;
    tracing::info!(%course_id, questions = questions.len(), "questions resolved");

    Ok(questions)
}
