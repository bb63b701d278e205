use std::time::Duration;

use crate::error::LoadError;

/// Fetch a remote CSV document.
///
/// Connection failures, timeouts and non-2xx responses all map to
/// [`LoadError::Unreachable`].
pub fn fetch(url: &str, timeout: Duration) -> Result<Vec<u8>, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;

    tracing::debug!(url, ?timeout, "fetching remote dataset");
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Unreachable(format!(
            "{url} returned HTTP {status}"
        )));
    }

    let bytes = resp.bytes()?;
    tracing::debug!(bytes = bytes.len(), "remote dataset fetched");
    Ok(bytes.to_vec())
}
