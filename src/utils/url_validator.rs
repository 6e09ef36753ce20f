//! Destination URL validation.
//!
//! Destinations are stored exactly as submitted (minus surrounding whitespace);
//! this module only decides whether they are acceptable.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Please enter a URL to shorten")]
    Empty,

    #[error("Please enter a valid URL: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates a destination URL and returns its trimmed form.
///
/// # Rules
///
/// 1. Surrounding whitespace is ignored
/// 2. Must not be empty
/// 3. Must parse as an absolute URL
/// 4. Only `http` and `https` are allowed (rejects `javascript:`, `data:`, `file:` ...)
/// 5. Must have a host
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     validate_destination_url("  https://example.com/a?b=c  ").unwrap(),
///     "https://example.com/a?b=c"
/// );
/// assert!(validate_destination_url("ftp://example.com").is_err());
/// ```
pub fn validate_destination_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed.to_string())
}
