//! Pokemon catalog: normalization, named views and the list view-model.

pub mod aggregator;
pub mod normalize;
pub mod state;
pub mod view;

#[cfg(test)]
pub(crate) mod tests;

pub use aggregator::PokemonAggregator;
pub use normalize::normalize;
pub use state::{CatalogRequest, CatalogState, RequestToken, FILTER_ALL, FILTER_OPTIONS};
pub use view::{ViewKind, LEGENDARY_IDS};
