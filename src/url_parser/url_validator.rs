use tracing::error;

use crate::error::UrlError;

/// Validates that there is something left to parse
///
/// This is the only shape check the parser makes. Missing scheme, host, port
/// or path are filled in from defaults rather than rejected.
pub fn validate_url(url: &str) -> Result<(), UrlError> {
    if url.is_empty() {
        error!("Received empty URL");
        return Err(UrlError::EmptyInput);
    }
    Ok(())
}
