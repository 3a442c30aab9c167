use crate::{
    error::Result,
    store::{Query, RecordStore, fetch_records},
    types::{Course, Exam, RecordId},
};

#[derive(serde::Deserialize)]
struct ExamName {
    name: String,
}

pub async fn list_exams<S: RecordStore + ?Sized>(store: &S) -> Result<Vec<Exam>> {
    fetch_records(store, &Query::new("exams", "id,name").order_by("name")).await
}

pub async fn list_courses<S: RecordStore + ?Sized>(
    store: &S,
    exam_id: &RecordId,
) -> Result<Vec<Course>> {
    let query = Query::new("courses", "id,name")
        .eq("exam_id", exam_id.clone())
        .order_by("name");
    fetch_records(store, &query).await
}

/// Name of the exam, or `None` when no record matches.
pub async fn exam_name<S: RecordStore + ?Sized>(
    store: &S,
    exam_id: &RecordId,
) -> Result<Option<String>> {
    let query = Query::new("exams", "name").eq("id", exam_id.clone());
    let rows: Vec<ExamName> = fetch_records(store, &query).await?;
    Ok(rows.into_iter().next().map(|row| row.name))
}
