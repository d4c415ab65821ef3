use crate::pokemon_types::DEFAULT_TYPE_COLOR;
use serde::{Deserialize, Serialize};

/// Avatar assigned to a fresh profile: the default sprite of Pokemon #25.
pub const DEFAULT_AVATAR: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png";

/// Movie genres a user may pick as preferences, with their badge colours.
pub const MOVIE_GENRES: [(&str, &str); 9] = [
    ("Action", "#C03028"),
    ("Adventure", "#78C850"),
    ("Comedy", "#F8D030"),
    ("Drama", "#705898"),
    ("Fantasy", "#7038F8"),
    ("Horror", "#705848"),
    ("Romance", "#EE99AC"),
    ("SciFi", "#6890F0"),
    ("Thriller", "#A040A0"),
];

pub fn movie_genre_color(genre: &str) -> &'static str {
    MOVIE_GENRES
        .iter()
        .find(|(name, _)| *name == genre)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_TYPE_COLOR)
}

/// The single user profile persisted between runs.
///
/// Stored as JSON with camelCase keys. The favourite lists behave as sets
/// only through [`UserProfile::toggle_favorite_type`] and
/// [`UserProfile::toggle_movie_genre`]; nothing else deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub nickname: String,
    pub email: String,
    pub avatar: String,
    pub favorite_types: Vec<String>,
    pub favorite_movie_genres: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            nickname: "iptdevs".to_string(),
            email: "iptdevs@pokemon.com".to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
            favorite_types: Vec::new(),
            favorite_movie_genres: Vec::new(),
        }
    }
}

impl UserProfile {
    /// Adds the type if absent, removes it otherwise. Returns whether the
    /// type is selected afterwards.
    pub fn toggle_favorite_type(&mut self, type_name: &str) -> bool {
        toggle(&mut self.favorite_types, type_name)
    }

    pub fn toggle_movie_genre(&mut self, genre: &str) -> bool {
        toggle(&mut self.favorite_movie_genres, genre)
    }

    pub fn is_type_selected(&self, type_name: &str) -> bool {
        self.favorite_types.iter().any(|t| t == type_name)
    }

    pub fn is_movie_genre_selected(&self, genre: &str) -> bool {
        self.favorite_movie_genres.iter().any(|g| g == genre)
    }
}

fn toggle(values: &mut Vec<String>, value: &str) -> bool {
    match values.iter().position(|v| v == value) {
        Some(index) => {
            values.remove(index);
            false
        }
        None => {
            values.push(value.to_string());
            true
        }
    }
}
