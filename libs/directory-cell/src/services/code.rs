use anyhow::Result;
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use shared_database::SupabaseClient;

#[derive(Debug, Deserialize)]
struct CodeRow {
    code: String,
}

/// Code following `last`: `DOC-0041` -> `DOC-0042`, nothing -> `DOC-0001`.
pub fn next_code(prefix: &str, last: Option<&str>) -> String {
    let last_number = last
        .and_then(|code| code.split('-').nth(1))
        .and_then(|digits| digits.parse::<u32>().ok())
        .unwrap_or(0);

    format!("{}-{:04}", prefix, last_number + 1)
}

/// Reads the highest existing code of `table` and returns the next one.
pub async fn generate_code(supabase: &SupabaseClient, prefix: &str, table: &str) -> Result<String> {
    let path = format!("/rest/v1/{}?select=code&order=code.desc&limit=1", table);
    let rows: Vec<CodeRow> = supabase.request(Method::GET, &path, None, None).await?;

    let code = next_code(prefix, rows.first().map(|row| row.code.as_str()));
    debug!("Generated code {} for {}", code, table);
    Ok(code)
}
