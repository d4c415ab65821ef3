//! List page view-model.
//!
//! Requests are tagged with a sequence token when they start. Only the most
//! recently started request may update the collections; a slower, older
//! batch that settles afterwards is discarded.

use schema::Pokemon;
use tracing::{debug, error};

use super::view::ViewKind;
use crate::config::DEFAULT_PAGE_SIZE;
use crate::errors::PokedexResult;

/// Filter value meaning "no type filter".
pub const FILTER_ALL: &str = "all";

/// Filters offered above the list.
pub const FILTER_OPTIONS: [&str; 7] = [
    FILTER_ALL, "fire", "water", "grass", "electric", "psychic", "dragon",
];

/// What a list request is for, which decides how its result is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    /// Reload the current page of the general listing.
    Reload,
    /// Switch the type filter; [`FILTER_ALL`] reloads the listing.
    Filter(String),
    /// Fetch the next page and append it.
    LoadMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Apply {
    Replace,
    ReplaceFiltered,
    Append,
}

/// Handle for one in-flight list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    seq: u64,
    apply: Apply,
}

#[derive(Debug, Clone)]
pub struct CatalogState {
    pub pokemons: Vec<Pokemon>,
    pub filtered: Vec<Pokemon>,
    pub filter: String,
    pub offset: u32,
    pub limit: u32,
    pub loading: bool,
    pub selected: Option<Pokemon>,
    latest: u64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogState {
    pub fn new(limit: u32) -> Self {
        Self {
            pokemons: Vec::new(),
            filtered: Vec::new(),
            filter: FILTER_ALL.to_string(),
            offset: 0,
            limit: limit.max(1),
            loading: false,
            selected: None,
            latest: 0,
        }
    }

    /// Starts a request, returning its token and the query to run.
    ///
    /// Any request started earlier becomes stale.
    pub fn begin(&mut self, request: CatalogRequest) -> (RequestToken, ViewKind) {
        let (apply, kind) = match request {
            CatalogRequest::Reload => (Apply::Replace, self.page_view()),
            CatalogRequest::Filter(filter) => {
                let filter = filter.trim().to_lowercase();
                if filter.is_empty() || filter == FILTER_ALL {
                    self.filter = FILTER_ALL.to_string();
                    (Apply::Replace, self.page_view())
                } else {
                    self.filter = filter.clone();
                    (Apply::ReplaceFiltered, ViewKind::ByType(filter))
                }
            }
            CatalogRequest::LoadMore => {
                self.offset = self.offset.saturating_add(self.limit);
                (Apply::Append, self.page_view())
            }
        };

        self.latest += 1;
        self.loading = true;
        let token = RequestToken {
            seq: self.latest,
            apply,
        };
        debug!(seq = token.seq, view = %kind, "list request started");
        (token, kind)
    }

    /// Applies a settled request. Returns `false` when the token is stale and
    /// the result was discarded.
    pub fn complete(&mut self, token: RequestToken, result: PokedexResult<Vec<Pokemon>>) -> bool {
        if token.seq != self.latest {
            debug!(seq = token.seq, latest = self.latest, "discarding stale list result");
            return false;
        }

        self.loading = false;
        match result {
            Ok(batch) => match token.apply {
                Apply::Replace => {
                    self.pokemons = batch.clone();
                    self.filtered = batch;
                }
                Apply::ReplaceFiltered => self.filtered = batch,
                Apply::Append => {
                    self.pokemons.extend(batch.iter().cloned());
                    self.filtered.extend(batch);
                }
            },
            Err(err) => error!(seq = token.seq, error = %err, "list request failed"),
        }
        true
    }

    /// Opens the detail panel for a listed Pokemon.
    pub fn select(&mut self, id: u32) -> Option<&Pokemon> {
        self.selected = self
            .filtered
            .iter()
            .chain(self.pokemons.iter())
            .find(|pokemon| pokemon.id == id)
            .cloned();
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn page_view(&self) -> ViewKind {
        ViewKind::All {
            limit: self.limit,
            offset: self.offset,
        }
    }
}
