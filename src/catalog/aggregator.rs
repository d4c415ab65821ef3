//! Fan-out/join over the remote source.
//!
//! Every batch issues all of its detail requests at once and waits for each
//! of them to settle. Results come back in request order; entries whose
//! request or normalization failed are dropped and logged.

use futures::future::join_all;
use schema::Pokemon;
use std::cmp::Reverse;
use tracing::{debug, warn};

use super::normalize::normalize;
use super::view::{
    ViewKind, LEGENDARY_IDS, POPULAR_LIMIT, SEARCH_DEFAULT_LIMIT, SEARCH_NAME_WINDOW,
    STRONGEST_SAMPLE, TYPE_MEMBER_LIMIT,
};
use crate::errors::{PokedexError, PokedexResult};
use crate::source::{PokemonSource, ResourceRef};

pub struct PokemonAggregator<S> {
    source: S,
}

impl<S: PokemonSource> PokemonAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs the query named by `kind`.
    ///
    /// Fails only when the listing, type-membership or single-item request
    /// fails; per-item failures inside a batch shrink the result instead.
    pub async fn fetch_view(&self, kind: &ViewKind) -> PokedexResult<Vec<Pokemon>> {
        debug!(view = %kind, "fetching view");
        match kind {
            ViewKind::All { limit, offset } => self.paginated(*limit, *offset).await,
            ViewKind::ByType(type_name) => self.by_type(type_name).await,
            ViewKind::ById(id) => self.by_id(*id).await.map(|pokemon| vec![pokemon]),
            ViewKind::Strongest { limit } => self.strongest(*limit).await,
            ViewKind::Popular => self.popular().await,
            ViewKind::Legendary => self.legendary().await,
        }
    }

    pub async fn paginated(&self, limit: u32, offset: u32) -> PokedexResult<Vec<Pokemon>> {
        let references = self.source.list_page(limit, offset).await?;
        Ok(self.fetch_references(&references).await)
    }

    pub async fn by_type(&self, type_name: &str) -> PokedexResult<Vec<Pokemon>> {
        let mut references = self.source.type_members(type_name).await?;
        if references.len() > TYPE_MEMBER_LIMIT {
            debug!(
                type_name,
                members = references.len(),
                "truncating type membership"
            );
            references.truncate(TYPE_MEMBER_LIMIT);
        }
        Ok(self.fetch_references(&references).await)
    }

    pub async fn by_id(&self, id: u32) -> PokedexResult<Pokemon> {
        let raw = self.source.fetch_by_id(id).await?;
        Ok(normalize(raw)?)
    }

    /// The `limit` items with the highest stat totals among the first
    /// [`STRONGEST_SAMPLE`] of the listing. Ties keep listing order.
    pub async fn strongest(&self, limit: u32) -> PokedexResult<Vec<Pokemon>> {
        let mut sample = self.paginated(STRONGEST_SAMPLE, 0).await?;
        // sort_by_key is stable
        sample.sort_by_key(|pokemon| Reverse(pokemon.total_stats()));
        sample.truncate(limit as usize);
        Ok(sample)
    }

    pub async fn popular(&self) -> PokedexResult<Vec<Pokemon>> {
        self.paginated(POPULAR_LIMIT, 0).await
    }

    /// The curated legendary set in [`LEGENDARY_IDS`] order. Never fails;
    /// unreachable entries are left out.
    pub async fn legendary(&self) -> PokedexResult<Vec<Pokemon>> {
        let requests = LEGENDARY_IDS.iter().map(|&id| async move {
            match self.by_id(id).await {
                Ok(pokemon) => Some(pokemon),
                Err(error) => {
                    warn!(id, %error, "dropping legendary entry");
                    None
                }
            }
        });
        Ok(join_all(requests).await.into_iter().flatten().collect())
    }

    /// Avatar picker search.
    ///
    /// A blank term offers the first [`SEARCH_DEFAULT_LIMIT`] items. A term
    /// starting with a positive number (`"25"`, `"25abc"`, `"1.5"`) looks up
    /// that id and is empty when it does not resolve. Anything else matches
    /// names case-insensitively within the first [`SEARCH_NAME_WINDOW`] items.
    pub async fn search(&self, term: &str) -> PokedexResult<Vec<Pokemon>> {
        let term = term.trim();
        if term.is_empty() {
            return self.paginated(SEARCH_DEFAULT_LIMIT, 0).await;
        }

        match leading_id(term) {
            Some(Some(id)) => match self.by_id(id).await {
                Ok(pokemon) => Ok(vec![pokemon]),
                Err(error) => {
                    debug!(id, %error, "search by id found nothing");
                    Ok(Vec::new())
                }
            },
            // a number past the id range can never resolve
            Some(None) => Ok(Vec::new()),
            None => {
                let needle = term.to_lowercase();
                let window = self.paginated(SEARCH_NAME_WINDOW, 0).await?;
                Ok(window
                    .into_iter()
                    .filter(|pokemon| pokemon.name.to_lowercase().contains(&needle))
                    .collect())
            }
        }
    }

    async fn fetch_references(&self, references: &[ResourceRef]) -> Vec<Pokemon> {
        let requests = references.iter().map(|reference| async move {
            let outcome = match self.source.fetch_detail(reference).await {
                Ok(raw) => normalize(raw).map_err(PokedexError::from),
                Err(error) => Err(PokedexError::from(error)),
            };
            outcome
                .map_err(|error| warn!(name = %reference.name, %error, "dropping catalog entry"))
                .ok()
        });

        let settled = join_all(requests).await;
        let issued = settled.len();
        let pokemons: Vec<Pokemon> = settled.into_iter().flatten().collect();
        debug!(issued, kept = pokemons.len(), "batch settled");
        pokemons
    }
}

/// The positive number a search term starts with, after an optional `+`.
///
/// `None` means the term is a name; `Some(None)` means it starts with a
/// positive number too large to be an id.
fn leading_id(term: &str) -> Option<Option<u32>> {
    let unsigned = term.strip_prefix('+').unwrap_or(term);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.trim_start_matches('0').is_empty() {
        return None;
    }
    Some(digits.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::leading_id;
    use rstest::rstest;

    #[rstest]
    #[case::plain("25", Some(Some(25)))]
    #[case::trailing_letters("25abc", Some(Some(25)))]
    #[case::decimal("1.5", Some(Some(1)))]
    #[case::plus_sign("+7", Some(Some(7)))]
    #[case::leading_zeros("007", Some(Some(7)))]
    #[case::too_large("99999999999", Some(None))]
    #[case::zero("0", None)]
    #[case::negative("-5", None)]
    #[case::name("pika", None)]
    #[case::digits_after_letters("mew2", None)]
    fn test_leading_id(#[case] term: &str, #[case] expected: Option<Option<u32>>) {
        assert_eq!(leading_id(term), expected);
    }
}
