mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use tracing::debug;

use crate::error::{NeoError, Result};

/// Maximum number of bytes of an error response body kept in [`NeoError::Status`].
const MAX_ERROR_BODY: usize = 500;

/// Issues a GET through `client` and returns the body of a successful response.
///
/// # Errors
///
/// Transport failures surface as [`NeoError::Http`]; any non-2xx status
/// (rate limiting, a rejected date range) as [`NeoError::Status`].
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let url = url
        .parse::<reqwest::Url>()
        .map_err(|e| NeoError::InvalidUrl(format!("{url}: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(NeoError::Status {
            status: status.as_u16(),
            body: truncate_to_bytes(&body, MAX_ERROR_BODY).to_string(),
        });
    }

    let bytes = resp.bytes().await?;
    debug!(bytes = bytes.len(), "Response body received");
    Ok(bytes.to_vec())
}

/// Cuts `text` to at most `max` bytes without splitting a UTF-8 character.
fn truncate_to_bytes(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
