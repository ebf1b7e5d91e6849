//! Remote persistence over the PostgREST API of a Supabase project.
//!
//! [`supabase::SupabaseStore`] is the `remote` backend. This module holds
//! the response handling shared by all its calls: status checks, decoding
//! and the translation of PostgREST error bodies into [`StoreError`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use momentum::api::{supabase::SupabaseStore, SupabaseConfig};
//!
//! let config = SupabaseConfig {
//!     url: "https://project.supabase.co".to_string(),
//!     anon_key: "public-anon-key".to_string(),
//!     access_token: None,
//! };
//! let store = SupabaseStore::new(&config);
//! ```

use crate::libs::error::{StoreError, StoreResult};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod supabase;

pub use supabase::SupabaseConfig;

/// PostgREST code for "a single row was requested but none matched".
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Error body returned by PostgREST for a failed request.
#[derive(Debug, Deserialize)]
pub struct PostgrestError {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

/// Maps a non-success response body to a [`StoreError`].
///
/// `what` names the addressed record for `NotFound`.
pub(crate) fn rejection(status: u16, body: &str, what: &str) -> StoreError {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) if err.code.as_deref() == Some(NO_ROWS_CODE) => StoreError::NotFound(what.to_string()),
        Ok(err) => {
            let mut message = err.message.unwrap_or_else(|| format!("HTTP {status}"));
            if let Some(details) = err.details.filter(|details| !details.is_empty()) {
                message = format!("{message} ({details})");
            }
            StoreError::Rejected { status, message }
        }
        Err(_) => StoreError::Rejected {
            status,
            message: body.trim().to_string(),
        },
    }
}

/// Checks the status and decodes the body as `T`.
pub(crate) async fn expect_json<T: DeserializeOwned>(response: Response, what: &str) -> StoreResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(rejection(status.as_u16(), &body, what));
    }
    if body.trim().is_empty() {
        return Err(StoreError::Empty(what.to_string()));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Checks the status and discards the body.
pub(crate) async fn expect_success(response: Response, what: &str) -> StoreResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await?;
    Err(rejection(status.as_u16(), &body, what))
}
