use std::time::Duration;

use anyhow::Context;
use reqwest::Client;

use crate::config::ServiceConfig;

use super::{CollectionLogSource, FetchError, FetchOutcome};

/// HTTP source for the collection log service.
///
/// Request shape:
///     GET {base_url}{member}
///
/// No authentication, no query parameters. The client is built
/// once and reused for the whole run.
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(cfg: &ServiceConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));

        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
        })
    }

    fn url_for(&self, member: &str) -> String {
        format!("{}{}", self.base_url, member)
    }
}

#[async_trait::async_trait]
impl CollectionLogSource for HttpSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, member: &str) -> Result<FetchOutcome, FetchError> {
        let response = self
            .client
            .get(self.url_for(member))
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Ok(FetchOutcome::Rejected(status.as_u16()));
        }

        let body = response.text().await.map_err(FetchError::Body)?;
        Ok(FetchOutcome::Document(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(base_url: String) -> ServiceConfig {
        ServiceConfig {
            base_url,
            timeout_secs: Some(5),
        }
    }

    #[tokio::test]
    async fn success_returns_the_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collectionlog/user/Zezima"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"collection_log":{}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let source =
            HttpSource::new(&service(format!("{}/collectionlog/user/", server.uri()))).unwrap();

        let outcome = source.fetch("Zezima").await.unwrap();
        assert_eq!(
            outcome,
            FetchOutcome::Document(r#"{"collection_log":{}}"#.to_string())
        );
    }

    #[tokio::test]
    async fn non_success_status_is_rejected_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source =
            HttpSource::new(&service(format!("{}/collectionlog/user/", server.uri()))).unwrap();

        let outcome = source.fetch("nobody").await.unwrap();
        assert_eq!(outcome, FetchOutcome::Rejected(404));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) is not served on loopback in the test environment
        let source = HttpSource::new(&service("http://127.0.0.1:9/user/".to_string())).unwrap();

        let err = source.fetch("Zezima").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn identifier_is_appended_to_the_base_url() {
        let source = HttpSource::new(&ServiceConfig::default()).unwrap();
        assert_eq!(
            source.url_for("Lynx Titan"),
            "https://api.collectionlog.net/collectionlog/user/Lynx Titan"
        );
    }
}
