//! HTTP client for the character API

use marvel_protocol::{
    ApiErrorBody, Character, CharacterDataWrapper, ImageVariant, ListCharactersQuery,
    MAX_PAGE_SIZE,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use validator::Validate;

use crate::auth::RequestSigner;
use crate::config::ClientConfig;
use crate::error::{ExplorerError, Result};

/// Base HTTP client: one GET per call, status and body decoding
#[derive(Debug, Clone)]
pub struct BaseClient {
    client: Client,
    config: ClientConfig,
}

impl BaseClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut client_builder = Client::builder().timeout(Duration::from_secs(config.timeout));

        if !config.use_proxy {
            client_builder = client_builder.no_proxy();
        }

        let client = client_builder.build()?;

        Ok(Self { client, config })
    }

    pub async fn get<R>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        tracing::debug!(endpoint, "GET request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;
        let status = response.status();
        let response_text = response.text().await?;

        tracing::debug!(endpoint, status = status.as_u16(), bytes = response_text.len(), "GET response");

        if !status.is_success() {
            let error_message = serde_json::from_str::<ApiErrorBody>(&response_text)
                .ok()
                .and_then(|body| body.describe())
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "Unknown API error".to_string());
            return Err(ExplorerError::api(status.as_u16(), error_message));
        }

        serde_json::from_str::<R>(&response_text)
            .map_err(|e| ExplorerError::invalid_response(format!("{} ({})", e, endpoint)))
    }
}

/// Operations the views need from the catalog service
///
/// Implemented by [`MarvelClient`] and by stubs in tests.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// One page of characters. Transport failures propagate.
    async fn list_characters(&self, query: &ListCharactersQuery) -> Result<CharacterDataWrapper>;

    /// A single character; `Ok(None)` when the server has no such record.
    async fn lookup_character(&self, id: i64) -> Result<Option<Character>>;

    /// Like [`CatalogApi::lookup_character`], but failures are logged and
    /// reported as absent.
    async fn get_character_by_id(&self, id: i64) -> Option<Character> {
        match self.lookup_character(id).await {
            Ok(character) => character,
            Err(e) => {
                tracing::warn!(id, error = %e, "Error fetching character");
                None
            }
        }
    }

    /// Up to a full page of characters whose name starts with `name_prefix`.
    /// Failures are logged and reported as an empty result.
    async fn search_characters(&self, name_prefix: &str) -> Vec<Character> {
        let mut query = ListCharactersQuery::new().limit(MAX_PAGE_SIZE);
        if !name_prefix.trim().is_empty() {
            query = query.name_starts_with(name_prefix);
        }

        match self.list_characters(&query).await {
            Ok(response) => response.into_results(),
            Err(e) => {
                tracing::warn!(name_prefix, error = %e, "Error searching characters");
                Vec::new()
            }
        }
    }

    fn resolve_image_url(&self, character: &Character, variant: ImageVariant) -> String {
        character.image_url(variant)
    }
}

/// Signed client for the public character API
#[derive(Debug, Clone)]
pub struct MarvelClient {
    base_client: BaseClient,
    signer: RequestSigner,
}

impl MarvelClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let signer = RequestSigner::new(config.credentials.clone())?;
        let base_client = BaseClient::new(config)?;
        Ok(Self {
            base_client,
            signer,
        })
    }

    /// Fresh auth parameters followed by the endpoint's own parameters
    fn signed_query(&self, params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        let mut query = self.signer.sign().query_pairs().to_vec();
        query.extend(params);
        query
    }
}

impl CatalogApi for MarvelClient {
    async fn list_characters(&self, query: &ListCharactersQuery) -> Result<CharacterDataWrapper> {
        query.validate()?;

        let params = self.signed_query(query.query_pairs());
        self.base_client.get("/characters", &params).await
    }

    async fn lookup_character(&self, id: i64) -> Result<Option<Character>> {
        let params = self.signed_query(Vec::new());
        let endpoint = format!("/characters/{}", id);

        match self
            .base_client
            .get::<CharacterDataWrapper>(&endpoint, &params)
            .await
        {
            Ok(response) => Ok(response.into_results().into_iter().next()),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::tests::utils::{character, envelope_json};
    use mockito::{Matcher, Server, ServerGuard};

    fn client_for(server: &ServerGuard) -> MarvelClient {
        let config = ClientConfig::builder()
            .base_url(server.url())
            .timeout(5)
            .use_proxy(false)
            .credentials(Credentials::new("pub", "priv"))
            .build()
            .unwrap();
        MarvelClient::new(config).unwrap()
    }

    fn auth_matchers() -> Vec<Matcher> {
        vec![
            Matcher::UrlEncoded("apikey".into(), "pub".into()),
            Matcher::Regex(r"ts=\d+".into()),
            Matcher::Regex(r"hash=[0-9a-f]{32}".into()),
        ]
    }

    #[tokio::test]
    async fn test_list_characters_default_window() {
        let mut server = Server::new_async().await;
        let mut matchers = auth_matchers();
        matchers.push(Matcher::UrlEncoded("limit".into(), "20".into()));
        matchers.push(Matcher::UrlEncoded("offset".into(), "0".into()));

        let mock = server
            .mock("GET", "/characters")
            .match_query(Matcher::AllOf(matchers))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope_json(&[character(1, "Spider-Man"), character(2, "Iron Man")]))
            .expect(1)
            .create_async()
            .await;

        let response = client_for(&server)
            .list_characters(&ListCharactersQuery::new())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.data.count, 2);
        let names: Vec<_> = response.data.results.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Spider-Man", "Iron Man"]);
    }

    #[tokio::test]
    async fn test_list_characters_propagates_transport_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/characters")
            .match_query(Matcher::Any)
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code": 409, "status": "You must provide a hash."}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .list_characters(&ListCharactersQuery::new())
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(err.is_transport_error());
        assert_eq!(err.status(), Some(409));
        assert!(err.to_string().contains("You must provide a hash."));
    }

    #[tokio::test]
    async fn test_list_characters_rejects_malformed_body() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/characters")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data": {"results": [{"id": 1}]}}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .list_characters(&ListCharactersQuery::new())
            .await
            .unwrap_err();
        assert!(err.is_transport_error());
    }

    #[tokio::test]
    async fn test_list_characters_validates_before_sending() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/characters")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = client_for(&server)
            .list_characters(&ListCharactersQuery::new().limit(500))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(!err.is_transport_error());
    }

    #[tokio::test]
    async fn test_get_character_by_id_empty_results_is_absent() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/characters/42")
            .match_query(Matcher::AllOf(auth_matchers()))
            .with_status(200)
            .with_body(envelope_json(&[]))
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(client.get_character_by_id(42).await.is_none());
        assert!(client.lookup_character(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_character_by_id_returns_first_result() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/characters/7")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(envelope_json(&[character(7, "Thor")]))
            .create_async()
            .await;

        let found = client_for(&server).get_character_by_id(7).await.unwrap();
        assert_eq!(found.id, 7);
        assert_eq!(found.name, "Thor");
    }

    #[tokio::test]
    async fn test_lookup_distinguishes_not_found_from_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/characters/404")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"code": 404, "status": "We couldn't find that character"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/characters/500")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(client.lookup_character(404).await.unwrap().is_none());
        assert!(client.lookup_character(500).await.unwrap_err().is_transport_error());
        assert!(client.get_character_by_id(500).await.is_none());
    }

    #[tokio::test]
    async fn test_search_characters_uses_full_page() {
        let mut server = Server::new_async().await;
        let mut matchers = auth_matchers();
        matchers.push(Matcher::UrlEncoded("limit".into(), "100".into()));
        matchers.push(Matcher::UrlEncoded("nameStartsWith".into(), "Spi".into()));

        let mock = server
            .mock("GET", "/characters")
            .match_query(Matcher::AllOf(matchers))
            .with_status(200)
            .with_body(envelope_json(&[character(1, "Spider-Man")]))
            .create_async()
            .await;

        let results = client_for(&server).search_characters("Spi").await;
        mock.assert_async().await;
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_search_characters_failure_is_empty() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/characters")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        assert!(client_for(&server).search_characters("Spi").await.is_empty());
    }

    #[tokio::test]
    async fn test_each_request_is_signed_afresh() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/characters")
            .match_query(Matcher::AllOf(auth_matchers()))
            .with_status(200)
            .with_body(envelope_json(&[]))
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server);
        client.list_characters(&ListCharactersQuery::new()).await.unwrap();
        client.list_characters(&ListCharactersQuery::new()).await.unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn test_resolve_image_url() {
        let server_url = "http://127.0.0.1:1";
        let config = ClientConfig::builder()
            .base_url(server_url)
            .use_proxy(false)
            .credentials(Credentials::new("pub", "priv"))
            .build()
            .unwrap();
        let client = MarvelClient::new(config).unwrap();

        let mut hero = character(1, "Hulk");
        hero.thumbnail.path = "http://x/y".to_string();
        hero.thumbnail.extension = "jpg".to_string();
        assert_eq!(
            client.resolve_image_url(&hero, ImageVariant::PortraitXlarge),
            "http://x/y/portrait_xlarge.jpg"
        );
    }
}
