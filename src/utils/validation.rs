use crate::utils::error::{QkamuraError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QkamuraError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(QkamuraError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// Validates that a scheme/host flag pair forms a usable http(s) endpoint.
pub fn validate_endpoint(field_name: &str, scheme: &str, host: &str) -> Result<()> {
    let url_str = format!("{}://{}/", scheme, host);
    match Url::parse(&url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(QkamuraError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str,
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(QkamuraError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str,
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}
