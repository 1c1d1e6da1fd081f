use catalog::RegionLabel;
use layers::GeoPin;
use reqwest::Client;
use serde::de::DeserializeOwned;
use streaming::PinQuery;

pub const REGIONS_PATH: &str = "/api/v1/lookup/regions";

#[derive(Debug)]
pub enum ApiError {
    /// Non-2xx answer.
    Status {
        status: u16,
        status_text: String,
        body: String,
    },
    /// The request never got an answer.
    Network(reqwest::Error),
    Decode(serde_json::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Status {
                status,
                status_text,
                ..
            } => write!(f, "API error: {status} {status_text}"),
            ApiError::Network(err) => write!(f, "network error: {err}"),
            ApiError::Decode(err) => write!(f, "invalid response body: {err}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Status { .. } => None,
            ApiError::Network(err) => Some(err),
            ApiError::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_bytes(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, ?params, "GET");
        let resp = self.http.get(&url).query(params).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let bytes = self.get_bytes(path, params).await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }

    pub async fn fetch_pins(&self, query: &PinQuery) -> Result<Vec<GeoPin>, ApiError> {
        let bytes = self.get_bytes(query.path(), &query.query_pairs()).await?;
        streaming::decode_pins(&bytes).map_err(ApiError::Decode)
    }

    pub async fn fetch_region_labels(&self) -> Result<Vec<RegionLabel>, ApiError> {
        self.get_json(REGIONS_PATH, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiClient, ApiError};

    #[test]
    fn url_joins_without_double_slash() {
        let c = ApiClient::new("http://localhost:8080/");
        assert_eq!(
            c.url("/api/v1/map/pins"),
            "http://localhost:8080/api/v1/map/pins"
        );
    }

    #[test]
    fn status_error_reads_like_the_response() {
        let err = ApiError::Status {
            status: 404,
            status_text: "Not Found".into(),
            body: "{}".into(),
        };
        assert_eq!(err.to_string(), "API error: 404 Not Found");
    }
}
