use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::{SourceError, SourceResult};
use crate::source::dto::{RawArtwork, RawNamed, RawOtherSprites, RawSprites, RawStat, RawTypeSlot};
use crate::source::{PokemonSource, RawPokemon, ResourceRef};

const STAT_NAMES: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

/// Builds a well-formed raw item whose six stats are all `stat_each`.
pub fn raw_pokemon(id: u32, name: &str, type_name: &str, stat_each: u32) -> RawPokemon {
    RawPokemon {
        id: Some(id),
        name: Some(name.to_string()),
        height: Some(id),
        weight: Some(id * 10),
        sprites: Some(RawSprites {
            front_default: Some(format!("https://img.example/{id}.png")),
            other: Some(RawOtherSprites {
                official_artwork: Some(RawArtwork {
                    front_default: Some(format!("https://img.example/art/{id}.png")),
                }),
            }),
        }),
        types: vec![RawTypeSlot {
            type_ref: Some(RawNamed {
                name: type_name.to_string(),
            }),
        }],
        stats: Some(
            STAT_NAMES
                .iter()
                .map(|stat| RawStat {
                    base_stat: Some(stat_each),
                    stat: Some(RawNamed {
                        name: stat.to_string(),
                    }),
                })
                .collect(),
        ),
    }
}

fn reference(id: u32) -> ResourceRef {
    ResourceRef::new(format!("pokemon-{id}"), format!("fake://pokemon/{id}"))
}

/// In-memory catalog with scripted failures and per-item latency.
///
/// Tracks how many detail requests are in flight at once so tests can tell
/// a concurrent batch from a sequential one.
#[derive(Default)]
pub struct FakeSource {
    listing: Vec<u32>,
    types: HashMap<String, Vec<u32>>,
    items: HashMap<u32, RawPokemon>,
    failing: HashSet<u32>,
    delays: HashMap<u32, Duration>,
    listing_down: bool,
    detail_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item to the end of the general listing.
    pub fn with_item(mut self, raw: RawPokemon) -> Self {
        let id = raw.id.unwrap_or_default();
        self.listing.push(id);
        self.items.insert(id, raw);
        self
    }

    /// Adds `count` items with ids `1..=count`; item `n` has every stat `n`.
    pub fn with_generated(mut self, count: u32) -> Self {
        for id in 1..=count {
            self = self.with_item(raw_pokemon(id, &format!("mon{id}"), "normal", id));
        }
        self
    }

    /// Registers an item that is reachable by id but not part of the listing.
    pub fn with_hidden_item(mut self, raw: RawPokemon) -> Self {
        let id = raw.id.unwrap_or_default();
        self.items.insert(id, raw);
        self
    }

    pub fn with_type(mut self, type_name: &str, members: Vec<u32>) -> Self {
        self.types.insert(type_name.to_string(), members);
        self
    }

    pub fn failing(mut self, id: u32) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn delayed(mut self, id: u32, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    pub fn listing_down(mut self) -> Self {
        self.listing_down = true;
        self
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn detail(&self, id: u32) -> SourceResult<RawPokemon> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .delays
            .get(&id)
            .copied()
            .unwrap_or(Duration::from_millis(1));
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&id) {
            return Err(SourceError::Transport(format!("connection reset for {id}")));
        }
        self.items
            .get(&id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("fake://pokemon/{id}")))
    }
}

#[async_trait]
impl PokemonSource for FakeSource {
    async fn list_page(&self, limit: u32, offset: u32) -> SourceResult<Vec<ResourceRef>> {
        if self.listing_down {
            return Err(SourceError::Status {
                status: 503,
                message: "listing unavailable".to_string(),
            });
        }
        Ok(self
            .listing
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|&id| reference(id))
            .collect())
    }

    async fn type_members(&self, type_name: &str) -> SourceResult<Vec<ResourceRef>> {
        self.types
            .get(type_name)
            .map(|members| members.iter().map(|&id| reference(id)).collect())
            .ok_or_else(|| SourceError::NotFound(format!("fake://type/{type_name}")))
    }

    async fn fetch_detail(&self, reference: &ResourceRef) -> SourceResult<RawPokemon> {
        let id = reference
            .url
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
            .ok_or_else(|| SourceError::InvalidRequest(reference.url.clone()))?;
        self.detail(id).await
    }

    async fn fetch_by_id(&self, id: u32) -> SourceResult<RawPokemon> {
        self.detail(id).await
    }
}
