// HTTP connection: hosts, credentials, URL building and error mapping

use hosted_search_core::error::{Result, SearchError};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

pub const APPLICATION_ID_HEADER: &str = "x-algolia-application-id";
pub const API_KEY_HEADER: &str = "x-algolia-api-key";

/// Connection parameters of the REST adapter
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub application_id: String,
    pub api_key: String,
    /// Host serving searches and reads
    pub read_host: Url,
    /// Host serving mutations
    pub write_host: Url,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl HttpSettings {
    /// Settings pointing at the default hosts of `application_id`
    pub fn new(application_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let application_id = application_id.into();
        let read_host = parse_host(&format!("https://{application_id}-dsn.algolia.net"))?;
        let write_host = parse_host(&format!("https://{application_id}.algolia.net"))?;
        Ok(Self {
            application_id,
            api_key: api_key.into(),
            read_host,
            write_host,
            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(30),
        })
    }
}

/// Parse a base URL given in configuration
pub fn parse_host(host: &str) -> Result<Url> {
    let url = Url::parse(host).map_err(|e| SearchError::Config(format!("Invalid host {host}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(SearchError::Config(format!("Invalid host {host}: not a base URL")));
    }
    Ok(url)
}

/// Build the shared client with credential headers set once
pub fn create_client(settings: &HttpSettings) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(APPLICATION_ID_HEADER, header_value(&settings.application_id)?);
    headers.insert(API_KEY_HEADER, header_value(&settings.api_key)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| SearchError::Config(format!("Failed to create HTTP client: {e}")))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| SearchError::Config("Credentials contain invalid header characters".to_string()))
}

/// `base` + percent-encoded `segments` + query pairs
pub fn endpoint(base: &Url, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| SearchError::Config(format!("Invalid host {base}: not a base URL")))?
        .pop_if_empty()
        .extend(segments);
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Error of a non-2xx response, using the `message` of the JSON body when present
pub fn api_error(status: StatusCode, body: &[u8]) -> SearchError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());
    SearchError::api(status.as_u16(), message)
}

/// Failures below the HTTP layer
pub fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Transport(format!("Request timed out: {err}"))
    } else if err.is_connect() {
        SearchError::Transport(format!("Connection failed: {err}"))
    } else if err.is_decode() {
        SearchError::Transport(format!("Invalid response body: {err}"))
    } else {
        SearchError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hosts() {
        let settings = HttpSettings::new("APPID", "key").unwrap();
        assert_eq!(settings.read_host.as_str(), "https://appid-dsn.algolia.net/");
        assert_eq!(settings.write_host.as_str(), "https://appid.algolia.net/");
        assert_eq!(settings.read_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let base = parse_host("https://example.test").unwrap();
        let url = endpoint(
            &base,
            &["1", "indexes", "my index/1", "settings"],
            &[("forwardToReplicas", "true".to_string())],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/1/indexes/my%20index%2F1/settings?forwardToReplicas=true"
        );
    }

    #[test]
    fn test_invalid_host_is_a_config_error() {
        assert!(matches!(parse_host("not a url"), Err(SearchError::Config(_))));
        assert!(matches!(parse_host("mailto:someone"), Err(SearchError::Config(_))));
    }

    #[test]
    fn test_api_error_prefers_json_message() {
        let err = api_error(
            StatusCode::NOT_FOUND,
            br#"{"message":"ObjectID does not exist","status":404}"#,
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("ObjectID does not exist"));

        let err = api_error(StatusCode::BAD_GATEWAY, b"upstream down");
        assert!(matches!(err, SearchError::Api { status: 502, ref message } if message == "upstream down"));
    }
}
