//! URL handling for the gateway address.
//!
//! Base URLs arrive from the CLI, the environment, or the config file, with
//! or without trailing slashes. Endpoint paths are always joined through
//! [`construct_api_url`] so the final URL never carries a double slash.

/// Normalize a base URL by removing trailing slashes.
///
/// # Examples
///
/// ```
/// use relaychat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path.
///
/// # Examples
///
/// ```
/// use relaychat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8000", "api/selector"),
///     "http://localhost:8000/api/selector"
/// );
/// assert_eq!(
///     construct_api_url("http://localhost:8000/", "/api/target"),
///     "http://localhost:8000/api/target"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_any_number_of_trailing_slashes() {
        assert_eq!(normalize_base_url("http://gateway:8000"), "http://gateway:8000");
        assert_eq!(normalize_base_url("http://gateway:8000/"), "http://gateway:8000");
        assert_eq!(normalize_base_url("http://gateway:8000///"), "http://gateway:8000");
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn join_never_produces_double_slashes() {
        assert_eq!(
            construct_api_url("http://gateway:8000", "api/selector"),
            "http://gateway:8000/api/selector"
        );
        assert_eq!(
            construct_api_url("http://gateway:8000/", "api/selector"),
            "http://gateway:8000/api/selector"
        );
        assert_eq!(
            construct_api_url("http://gateway:8000", "/api/target"),
            "http://gateway:8000/api/target"
        );
        assert_eq!(
            construct_api_url("http://gateway:8000///", "///api/target"),
            "http://gateway:8000/api/target"
        );
    }
}
