//! Access to the remote Pokemon catalog.

pub mod dto;
pub mod http;

use async_trait::async_trait;

use crate::errors::SourceResult;
pub use dto::{RawPokemon, ResourceRef};
pub use http::HttpPokemonSource;

/// The three endpoints the catalog needs from a remote data source.
///
/// Implementations only move bytes and decode them into wire shapes; they
/// never normalize, filter or retry.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    /// One page of item references from the listing endpoint.
    async fn list_page(&self, limit: u32, offset: u32) -> SourceResult<Vec<ResourceRef>>;

    /// Every member reference of a type, in remote order.
    async fn type_members(&self, type_name: &str) -> SourceResult<Vec<ResourceRef>>;

    /// Full item behind a reference handed out by a listing.
    async fn fetch_detail(&self, reference: &ResourceRef) -> SourceResult<RawPokemon>;

    /// Full item by numeric id.
    async fn fetch_by_id(&self, id: u32) -> SourceResult<RawPokemon>;
}
