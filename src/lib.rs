// In: src/lib.rs

//! Pokedex Catalog Client
//!
//! Browses the public Pokemon REST catalog with concurrent batch fetching,
//! and keeps a mock login session and a user profile in key-value storage.
//! Shared by the `pokedex` command line tool and the `pokedex-mcp` server.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod app;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod interface;
pub mod source;
pub mod storage;
pub mod stores;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `pokedex` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the shared view models.
pub use schema::{
    movie_genre_color, type_color, Pokemon, PokemonType, StatValue, UserProfile, MOVIE_GENRES,
};

// --- From this crate's modules (`src/`) ---

// Application context and configuration.
pub use app::Pokedex;
pub use config::PokedexConfig;

// Catalog queries.
pub use catalog::{
    normalize, CatalogRequest, CatalogState, PokemonAggregator, RequestToken, ViewKind,
    LEGENDARY_IDS,
};

// Remote access and persistence seams.
pub use source::{HttpPokemonSource, PokemonSource, RawPokemon, ResourceRef};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use stores::{LoginOutcome, ProfileStore, SessionStore, Subscription};

// Crate-specific error and result types.
pub use errors::{
    ConfigError, NormalizeError, PokedexError, PokedexResult, SourceError, SourceResult,
    StorageError,
};
