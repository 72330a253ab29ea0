//! API constants for the Dreaming external time service

/// Production base URL for the Dreaming API
pub const DEFAULT_API_URL: &str = "https://app.dreaming.com/.netlify/functions";

/// User agent sent on every request
pub const USER_AGENT: &str = "dreaming-cli/0.1";

/// Standard headers for Dreaming requests
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// Build the external time endpoint URL
pub fn external_time_endpoint(base_url: &str) -> String {
    format!("{}/externalTime", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        assert_eq!(
            external_time_endpoint("https://host/fns/"),
            "https://host/fns/externalTime"
        );
        assert_eq!(
            external_time_endpoint("https://host/fns"),
            "https://host/fns/externalTime"
        );
    }
}
