// Pokedex Schema - Shared type definitions
// This crate contains the view models that are shared between the catalog
// library, the command line front end and the MCP server.

// Re-export the main types
pub use pokemon::*;
pub use pokemon_types::*;
pub use profile::*;

pub mod pokemon;
pub mod pokemon_types;
pub mod profile;
