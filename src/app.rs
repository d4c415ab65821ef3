//! The application context shared by the front ends.

use schema::{Pokemon, UserProfile};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

use crate::catalog::{CatalogRequest, CatalogState, PokemonAggregator, ViewKind};
use crate::config::PokedexConfig;
use crate::errors::PokedexResult;
use crate::source::{HttpPokemonSource, PokemonSource};
use crate::storage::{FileStore, KeyValueStore};
use crate::stores::{ProfileStore, SessionStore};

/// Catalog, profile and session services wired to one storage backend.
///
/// Built once at start-up and passed by reference to whatever front end
/// drives it; it lives as long as the application does.
pub struct Pokedex<S = HttpPokemonSource> {
    catalog: PokemonAggregator<S>,
    profile: ProfileStore,
    session: SessionStore,
}

impl Pokedex<HttpPokemonSource> {
    /// Wires the HTTP source and the file store described by `config`.
    pub fn from_config(config: &PokedexConfig) -> PokedexResult<Self> {
        config.validate()?;
        let source = HttpPokemonSource::from_config(config)?;
        let storage_dir = config.resolved_storage_dir();
        info!(base_url = %config.base_url, storage = %storage_dir.display(), "pokedex ready");
        Ok(Self::new(source, Arc::new(FileStore::new(storage_dir))))
    }
}

impl<S: PokemonSource> Pokedex<S> {
    pub fn new(source: S, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog: PokemonAggregator::new(source),
            profile: ProfileStore::new(Arc::clone(&storage)),
            session: SessionStore::new(storage),
        }
    }

    pub fn catalog(&self) -> &PokemonAggregator<S> {
        &self.catalog
    }

    pub fn profile(&self) -> &ProfileStore {
        &self.profile
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Runs a catalog view for a logged-in user.
    pub async fn view(&self, kind: &ViewKind) -> PokedexResult<Vec<Pokemon>> {
        self.session.require_auth()?;
        self.catalog.fetch_view(kind).await
    }

    /// Runs a list-page request against `page`.
    ///
    /// The page lock is only held while the request starts and while its
    /// result is applied, so several requests may be in flight at once; the
    /// most recently started one wins. Returns `Ok(false)` when this request
    /// was overtaken and its result discarded.
    pub async fn browse(
        &self,
        page: &Mutex<CatalogState>,
        request: CatalogRequest,
    ) -> PokedexResult<bool> {
        self.session.require_auth()?;
        let (token, kind) = lock_page(page).begin(request);

        let result = self.catalog.fetch_view(&kind).await;
        let failure = result.as_ref().err().cloned();

        let applied = lock_page(page).complete(token, result);
        match failure {
            Some(error) if applied => Err(error),
            _ => {
                if !applied {
                    debug!(view = %kind, "list request overtaken");
                }
                Ok(applied)
            }
        }
    }

    pub async fn search(&self, term: &str) -> PokedexResult<Vec<Pokemon>> {
        self.session.require_auth()?;
        self.catalog.search(term).await
    }

    /// Uses the artwork of Pokemon `id` as the profile avatar.
    pub async fn select_avatar(&self, id: u32) -> PokedexResult<UserProfile> {
        self.session.require_auth()?;
        let pokemon = self.catalog.by_id(id).await?;
        Ok(self.profile.update(|profile| profile.avatar = pokemon.image)?)
    }

    /// Label for the navigation bar: the nickname while logged in.
    pub fn greeting(&self) -> Option<String> {
        self.session
            .is_authenticated()
            .then(|| self.profile.get().nickname)
    }
}

fn lock_page(page: &Mutex<CatalogState>) -> MutexGuard<'_, CatalogState> {
    page.lock().unwrap_or_else(PoisonError::into_inner)
}
