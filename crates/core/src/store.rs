//! Record store access.
//!
//! The store only answers flat, single-table queries with equality and
//! "column is in this set" filters. [`PostgrestStore`] speaks that dialect over
//! HTTP; tests substitute in-memory fakes through [`RecordStore`].

use std::collections::BTreeSet;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config::Settings,
    error::{QuizReelError, Result},
    types::RecordId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq {
        column: &'static str,
        value: RecordId,
    },
    In {
        column: &'static str,
        values: BTreeSet<RecordId>,
    },
}

impl Filter {
    fn to_param(&self) -> (String, String) {
        match self {
            Filter::Eq { column, value } => {
                (column.to_string(), format!("eq.{}", quote_value(value.as_str())))
            }
            Filter::In { column, values } => {
                let joined = values
                    .iter()
                    .map(|v| quote_value(v.as_str()))
                    .collect::<Vec<_>>()
                    .join(",");
                (column.to_string(), format!("in.({})", joined))
            }
        }
    }
}

/// Double-quote values that would otherwise break PostgREST filter syntax.
fn quote_value(value: &str) -> String {
    let reserved = value
        .chars()
        .any(|c| matches!(c, ',' | '(' | ')' | '"' | ':') || c.is_whitespace());
    if reserved {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub table: &'static str,
    pub select: &'static str,
    pub filters: Vec<Filter>,
    pub order: Option<&'static str>,
}

impl Query {
    pub fn new(table: &'static str, select: &'static str) -> Self {
        Self {
            table,
            select,
            filters: Vec::new(),
            order: None,
        }
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<RecordId>) -> Self {
        self.filters.push(Filter::Eq {
            column,
            value: value.into(),
        });
        self
    }

    pub fn is_in(mut self, column: &'static str, values: BTreeSet<RecordId>) -> Self {
        self.filters.push(Filter::In { column, values });
        self
    }

    pub fn order_by(mut self, column: &'static str) -> Self {
        self.order = Some(column);
        self
    }

    /// Query-string pairs in PostgREST form.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select.to_string())];
        params.extend(self.filters.iter().map(Filter::to_param));
        if let Some(order) = self.order {
            params.push(("order".to_string(), order.to_string()));
        }
        params
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Run one query. Exactly one attempt; no retries.
    async fn fetch(&self, query: &Query) -> Result<Vec<serde_json::Value>>;
}

/// Fetch and decode rows into `T`.
pub async fn fetch_records<T, S>(store: &S, query: &Query) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    let rows = store.fetch(query).await?;
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| QuizReelError::MalformedRecord {
                table: query.table.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Supabase-style REST endpoint (`{base_url}/rest/v1/{table}`).
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl PostgrestStore {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    /// Fails with `MissingConfig` before any request when credentials are absent.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let url = settings.require_supabase_url()?;
        let key = settings.require_supabase_anon_key()?;
        Self::new(url, key)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

#[async_trait]
impl RecordStore for PostgrestStore {
    async fn fetch(&self, query: &Query) -> Result<Vec<serde_json::Value>> {
        let lookup_failed = |reason: String| QuizReelError::LookupFailed {
            table: query.table.to_string(),
            reason,
        };

        tracing::debug!(table = query.table, params = ?query.to_params(), "store query");

        let response = self
            .client
            .get(self.table_url(query.table))
            .query(&query.to_params())
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| lookup_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(lookup_failed(format!("status {}: {}", status, body)));
        }

        response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| lookup_failed(format!("invalid response body: {}", e)))
    }
}
