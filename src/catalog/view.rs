use std::fmt;

/// Type listings are cut to this many members before detail fetching.
pub const TYPE_MEMBER_LIMIT: usize = 20;

/// Size of the sample the strongest ranking is computed over.
pub const STRONGEST_SAMPLE: u32 = 50;

/// The popular view is the first page of the remote ordering.
pub const POPULAR_LIMIT: u32 = 20;

/// Items offered when a search term is blank.
pub const SEARCH_DEFAULT_LIMIT: u32 = 50;

/// Name searches scan the first generation only.
pub const SEARCH_NAME_WINDOW: u32 = 151;

/// The curated legendary set, in display order.
pub const LEGENDARY_IDS: [u32; 20] = [
    144, 145, 146, 150, 151, 243, 244, 245, 249, 250, 251, 377, 378, 379, 380, 381, 382, 383, 384,
    385,
];

/// A named catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// One page of the general listing.
    All { limit: u32, offset: u32 },
    /// The first [`TYPE_MEMBER_LIMIT`] members of a type.
    ByType(String),
    /// A single item.
    ById(u32),
    /// The `limit` highest stat totals among the first [`STRONGEST_SAMPLE`].
    Strongest { limit: u32 },
    Popular,
    Legendary,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::All { limit, offset } => write!(f, "all (limit {limit}, offset {offset})"),
            ViewKind::ByType(type_name) => write!(f, "type {type_name}"),
            ViewKind::ById(id) => write!(f, "#{id}"),
            ViewKind::Strongest { limit } => write!(f, "strongest {limit}"),
            ViewKind::Popular => write!(f, "popular"),
            ViewKind::Legendary => write!(f, "legendary"),
        }
    }
}
