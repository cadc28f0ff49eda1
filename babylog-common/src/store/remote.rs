//! Remote multi-tenant store backed by a PostgREST-style REST table
//!
//! One table holds every user's records; the `user_id` column (the session
//! identity) is the only multi-tenancy boundary. Every operation filters or
//! tags rows with the current identity and fails with `NotAuthenticated`
//! before any network call when no session identity exists.

use crate::config::RemoteConfig;
use crate::identity::Session;
use crate::schema::{self, LogRecord};
use crate::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

const TABLE: &str = "logs";

/// Persisted row layout: the full record as an opaque document plus the
/// indexed sort key and partition key.
#[derive(Debug, Serialize, Deserialize)]
struct LogRow {
    id: String,
    date: String,
    content: Value,
    user_id: String,
    updated_at: String,
}

/// REST-backed record store scoped by the current session identity
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    session: Arc<Session>,
}

impl RemoteStore {
    pub fn new(config: RemoteConfig, session: Arc<Session>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.key,
            session,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn identity(&self) -> Result<String> {
        self.session.identity().ok_or(Error::NotAuthenticated)
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.table_url())
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Remote(format!("{}: {}", status, body)))
        }
    }

    /// All records for the current identity, normalized, `date` descending
    /// (server-side order).
    pub async fn list(&self) -> Result<Vec<LogRecord>> {
        let identity = self.identity()?;

        let user_filter = format!("eq.{}", identity);
        let response = self
            .request(reqwest::Method::GET)
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "date.desc"),
            ])
            .send()
            .await?;
        let rows: Vec<LogRow> = Self::check(response).await?.json().await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut record = schema::normalize(Some(&row.content));
                // The row key is authoritative over whatever the document says
                record.id = row.id;
                record
            })
            .collect())
    }

    /// Insert-or-replace keyed by `id`, tagged with the current identity.
    pub async fn upsert(&self, record: LogRecord) -> Result<LogRecord> {
        let identity = self.identity()?;
        let row = LogRow {
            id: record.id.clone(),
            date: record.date.clone(),
            content: serde_json::to_value(&record)?,
            user_id: identity,
            updated_at: Utc::now().to_rfc3339(),
        };

        let response = self
            .request(reqwest::Method::POST)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[row])
            .send()
            .await?;
        Self::check(response).await?;

        Ok(record)
    }

    /// Delete by `id` within the current identity partition; deleting an
    /// absent id is success (the server deletes zero rows).
    pub async fn remove(&self, id: &str) -> Result<()> {
        let identity = self.identity()?;

        let id_filter = format!("eq.{}", id);
        let user_filter = format!("eq.{}", identity);
        let response = self
            .request(reqwest::Method::DELETE)
            .query(&[
                ("id", id_filter.as_str()),
                ("user_id", user_filter.as_str()),
            ])
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }

    /// Store every record under a freshly generated `id` as one bulk upsert
    /// call; failure aborts the entire batch server-side.
    pub async fn bulk_import(&self, records: Vec<LogRecord>) -> Result<()> {
        let identity = self.identity()?;
        let now = Utc::now().to_rfc3339();

        let rows = records
            .into_iter()
            .map(|mut record| {
                record.id = Uuid::new_v4().to_string();
                Ok(LogRow {
                    id: record.id.clone(),
                    date: record.date.clone(),
                    content: serde_json::to_value(&record)?,
                    user_id: identity.clone(),
                    updated_at: now.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let response = self
            .request(reqwest::Method::POST)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&rows)
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn unauthenticated_store(dir: &TempDir) -> RemoteStore {
        let session = Arc::new(Session::load(dir.path().join("session")));
        RemoteStore::new(
            RemoteConfig {
                url: "http://127.0.0.1:9".to_string(),
                key: "test-key".to_string(),
            },
            session,
        )
    }

    #[tokio::test]
    async fn operations_fail_before_network_without_identity() {
        let dir = TempDir::new().unwrap();
        let store = unauthenticated_store(&dir);

        // The endpoint is unreachable, so these can only fail this way if
        // the identity check happens before any network call.
        assert!(matches!(store.list().await, Err(Error::NotAuthenticated)));
        assert!(matches!(
            store.upsert(LogRecord::default()).await,
            Err(Error::NotAuthenticated)
        ));
        assert!(matches!(
            store.remove("anything").await,
            Err(Error::NotAuthenticated)
        ));
        assert!(matches!(
            store.bulk_import(vec![LogRecord::default()]).await,
            Err(Error::NotAuthenticated)
        ));
    }
}
