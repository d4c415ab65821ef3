//! Reqwest-backed catalog source.
//!
//! Owns transport details only: URL construction, status mapping and JSON
//! decoding into the wire shapes of [`super::dto`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::dto::{ListingPage, RawPokemon, ResourceRef, TypeMembership};
use super::PokemonSource;
use crate::config::PokedexConfig;
use crate::errors::{PokedexResult, SourceError, SourceResult};

/// Catalog source that performs HTTP GET requests against one API root.
#[derive(Debug, Clone)]
pub struct HttpPokemonSource {
    client: Client,
    base_url: Url,
}

impl HttpPokemonSource {
    /// Build a source with an explicit request timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration, user_agent: &str) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &PokedexConfig) -> PokedexResult<Self> {
        let base_url = config.api_url()?;
        Ok(Self::new(
            base_url,
            config.request_timeout(),
            &config.user_agent,
        )?)
    }

    fn listing_url(&self, limit: u32, offset: u32) -> SourceResult<Url> {
        let mut url = self.endpoint(&["pokemon"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> SourceResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                SourceError::InvalidRequest(format!("base URL {} cannot have a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> SourceResult<T> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, url.as_str(), body.as_ref()));
        }

        serde_json::from_slice(body.as_ref())
            .map_err(|e| SourceError::Decode(format!("{url}: {e}")))
    }
}

#[async_trait]
impl PokemonSource for HttpPokemonSource {
    async fn list_page(&self, limit: u32, offset: u32) -> SourceResult<Vec<ResourceRef>> {
        let page: ListingPage = self.get_json(self.listing_url(limit, offset)?).await?;
        Ok(page.results)
    }

    async fn type_members(&self, type_name: &str) -> SourceResult<Vec<ResourceRef>> {
        let type_name = type_name.trim().to_ascii_lowercase();
        if type_name.is_empty() {
            return Err(SourceError::InvalidRequest(
                "type name must not be blank".to_string(),
            ));
        }
        let membership: TypeMembership = self
            .get_json(self.endpoint(&["type", &type_name])?)
            .await?;
        Ok(membership
            .pokemon
            .into_iter()
            .map(|member| member.pokemon)
            .collect())
    }

    async fn fetch_detail(&self, reference: &ResourceRef) -> SourceResult<RawPokemon> {
        let url = Url::parse(&reference.url).map_err(|e| {
            SourceError::InvalidRequest(format!("bad detail URL for {}: {e}", reference.name))
        })?;
        self.get_json(url).await
    }

    async fn fetch_by_id(&self, id: u32) -> SourceResult<RawPokemon> {
        self.get_json(self.endpoint(&["pokemon", &id.to_string()])?)
            .await
    }
}

fn map_transport_error(error: reqwest::Error) -> SourceError {
    SourceError::Transport(error.to_string())
}

fn map_status_error(status: StatusCode, url: &str, body: &[u8]) -> SourceError {
    match status {
        StatusCode::NOT_FOUND => SourceError::NotFound(url.to_string()),
        _ => SourceError::Status {
            status: status.as_u16(),
            message: body_preview(body),
        },
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn source(base: &str) -> HttpPokemonSource {
        HttpPokemonSource::new(
            Url::parse(base).unwrap(),
            Duration::from_secs(1),
            "pokedex-test",
        )
        .unwrap()
    }

    #[rstest]
    #[case::no_trailing_slash("https://pokeapi.co/api/v2")]
    #[case::trailing_slash("https://pokeapi.co/api/v2/")]
    fn test_builds_listing_and_detail_urls(#[case] base: &str) {
        let source = source(base);
        assert_eq!(
            source.listing_url(20, 40).unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon?limit=20&offset=40"
        );
        assert_eq!(
            source.endpoint(&["pokemon", "25"]).unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon/25"
        );
        assert_eq!(
            source.endpoint(&["type", "fire"]).unwrap().as_str(),
            "https://pokeapi.co/api/v2/type/fire"
        );
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, "NotFound")]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "Status")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Status")]
    fn test_maps_http_statuses(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, "https://x/pokemon/0", b"Not Found");
        match expected {
            "NotFound" => assert!(matches!(error, SourceError::NotFound(_))),
            "Status" => assert!(
                matches!(error, SourceError::Status { status: code, .. } if code == status.as_u16())
            ),
            _ => panic!("unsupported test expectation: {expected}"),
        }
    }

    #[test]
    fn test_body_preview_is_compacted_and_truncated() {
        assert_eq!(body_preview(b"  service \n unavailable "), "service unavailable");
        let long = "x".repeat(300);
        let preview = body_preview(long.as_bytes());
        assert_eq!(preview.len(), 123);
        assert!(preview.ends_with("..."));
    }

    #[tokio::test]
    async fn test_blank_type_name_is_rejected_before_any_request() {
        let result = source("https://pokeapi.co/api/v2").type_members("  ").await;
        assert!(matches!(result, Err(SourceError::InvalidRequest(_))));
    }
}
