use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// PostgreSQL SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION_CODE: &str = "23503";

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Unique constraint violated: {message}")]
    UniqueViolation { message: String },

    #[error("Referenced by other records: {message}")]
    ForeignKeyViolation { message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error body returned by PostgREST on a failed request.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl DatabaseError {
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<PostgrestErrorBody>(body).ok();
        let code = parsed.as_ref().and_then(|b| b.code.as_deref());
        let message = parsed
            .as_ref()
            .and_then(|b| b.message.clone())
            .unwrap_or_else(|| body.to_string());

        match code {
            Some(UNIQUE_VIOLATION_CODE) => return DatabaseError::UniqueViolation { message },
            Some(FOREIGN_KEY_VIOLATION_CODE) => return DatabaseError::ForeignKeyViolation { message },
            _ if status == StatusCode::CONFLICT => return DatabaseError::UniqueViolation { message },
            _ => {}
        }

        match status.as_u16() {
            401 | 403 => DatabaseError::Auth(message),
            404 => DatabaseError::NotFound(message),
            other => DatabaseError::Api { status: other, message },
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DatabaseError::UniqueViolation { .. })
    }
}
