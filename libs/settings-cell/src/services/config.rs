use anyhow::Result;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Method,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::SupabaseClient;

use crate::models::{ConfigEntry, ConfigUpsert};

/// Generic key/value rows backing the console's settings screen.
pub struct ConfigStore {
    supabase: SupabaseClient,
}

impl ConfigStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn list(&self) -> Result<Vec<ConfigEntry>> {
        debug!("Fetching config rows");

        let rows: Vec<ConfigEntry> = self.supabase.request(
            Method::GET,
            "/rest/v1/config?select=*&order=key.asc",
            None,
            None,
        ).await?;

        Ok(rows)
    }

    /// `None` for a missing key and for an empty stored value.
    pub async fn get_value(&self, key: &str) -> Result<Option<String>> {
        debug!("Fetching config value: {}", key);

        let path = format!("/rest/v1/config?select=*&key=eq.{}", urlencoding::encode(key));
        let rows: Vec<ConfigEntry> = self.supabase.request(Method::GET, &path, None, None).await?;

        Ok(rows
            .into_iter()
            .next()
            .map(|row| row.value)
            .filter(|value| !value.is_empty()))
    }

    pub async fn upsert(&self, key: &str, value: &str, description: Option<&str>) -> Result<()> {
        self.upsert_many(&[ConfigUpsert {
            key: key.to_string(),
            value: value.to_string(),
            description: description.map(str::to_string),
        }]).await
    }

    /// Inserts or merges on `key` in a single request.
    pub async fn upsert_many(&self, rows: &[ConfigUpsert]) -> Result<()> {
        debug!("Upserting {} config rows", rows.len());

        if rows.is_empty() {
            return Ok(());
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_static("resolution=merge-duplicates"),
        );

        let body: Value = json!(rows);
        self.supabase.execute(
            Method::POST,
            "/rest/v1/config?on_conflict=key",
            None,
            Some(body),
            Some(headers),
        ).await
    }
}
