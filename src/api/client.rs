use bytes::Bytes;
use reqwest::{header, Client};
use thiserror::Error;

use super::models::ApiConfig;
use crate::domain::DownloadRequest;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Server responded with status {0}")]
    Status(u16),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// The form posted on every activation.
    pub fn download_request(&self) -> DownloadRequest {
        DownloadRequest::new(self.config.field_value.clone())
    }

    /// POST the form to the download endpoint and return the raw body.
    /// The body is not inspected; whatever the server sends is the payload.
    pub async fn request_download(&self, request: &DownloadRequest) -> Result<Bytes> {
        tracing::debug!(endpoint = %self.config.endpoint, name = %request.name, "posting download request");

        let response = self
            .http
            .post(self.config.endpoint.clone())
            .header(header::ACCEPT, OCTET_STREAM)
            .form(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use url::Url;

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        let endpoint = Url::parse(&format!("{}/DPR/download", server.url())).unwrap();
        ApiClient::new(ApiConfig::new(endpoint))
    }

    #[tokio::test]
    async fn test_posts_name_field_and_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/DPR/download")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::UrlEncoded("name".into(), "testdata".into()))
            .with_status(200)
            .with_header("content-type", "octet/stream")
            .with_body([0x01u8, 0x02, 0x03])
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let body = client
            .request_download(&client.download_request())
            .await
            .unwrap();

        assert_eq!(body.as_ref(), &[0x01, 0x02, 0x03]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/DPR/download")
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .request_download(&client.download_request())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Status(500)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_request_error() {
        let endpoint = Url::parse("http://127.0.0.1:9/download").unwrap();
        let client = ApiClient::new(ApiConfig::new(endpoint));
        let err = client
            .request_download(&client.download_request())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::RequestError(_)));
    }
}
