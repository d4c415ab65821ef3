//! Text rendering shared by the command line tool and the MCP server.
//!
//! Every function here is pure: it takes already-fetched data and returns
//! the text a front end should show.

use schema::{movie_genre_color, type_color, Pokemon, PokemonType, UserProfile, MOVIE_GENRES};

use crate::catalog::{CatalogState, ViewKind, FILTER_ALL, FILTER_OPTIONS};
use crate::errors::{PokedexError, PokedexResult, SourceError};
use crate::stores::LoginOutcome;

/// Renders a list of Pokemon cards under a heading.
pub fn display_pokemon_list(title: &str, pokemons: &[Pokemon]) -> String {
    let mut output = format!("--- {} ({}) ---\n", title, pokemons.len());
    if pokemons.is_empty() {
        output.push_str("No Pokemon to show.\n");
        return output;
    }
    for pokemon in pokemons {
        output.push_str(&format!(
            " {}  total {}\n",
            pokemon,
            pokemon.total_stats()
        ));
    }
    output
}

/// Renders the detail panel of one Pokemon.
pub fn display_pokemon_detail(pokemon: &Pokemon) -> String {
    let badges: Vec<String> = pokemon
        .types
        .iter()
        .map(|t| format!("{} {}", t, type_color(t)))
        .collect();
    format!(
        "--- Pokemon Details ---\n{:#}\nBadges: {}\n",
        pokemon,
        badges.join(", ")
    )
}

/// Renders the outcome of a catalog view, turning failures into messages a
/// user can act on.
pub fn render_view(kind: &ViewKind, result: &PokedexResult<Vec<Pokemon>>) -> String {
    match (kind, result) {
        (ViewKind::ById(_), Ok(pokemons)) if pokemons.len() == 1 => {
            display_pokemon_detail(&pokemons[0])
        }
        (_, Ok(pokemons)) => display_pokemon_list(&view_title(kind), pokemons),
        (_, Err(error)) => describe_error(kind, error),
    }
}

/// Renders the browsable list page: the filter bar, the visible list and
/// the open detail panel, if any.
pub fn display_catalog_page(state: &CatalogState) -> String {
    let bar: Vec<String> = FILTER_OPTIONS
        .iter()
        .map(|option| {
            if *option == state.filter {
                format!("[{}]", option)
            } else {
                option.to_string()
            }
        })
        .collect();

    let title = if state.filter == FILTER_ALL {
        format!("Pokemon 1-{}", state.offset.saturating_add(state.limit))
    } else {
        format!("{} type", state.filter)
    };

    let mut output = format!("Filters: {}\n", bar.join(" "));
    output.push_str(&display_pokemon_list(&title, &state.filtered));
    if let Some(selected) = &state.selected {
        output.push_str(&display_pokemon_detail(selected));
    }
    output
}

fn view_title(kind: &ViewKind) -> String {
    match kind {
        ViewKind::All { offset, .. } if *offset == 0 => "Pokemon".to_string(),
        ViewKind::All { limit, offset } => format!(
            "Pokemon {}-{}",
            offset.saturating_add(1),
            offset.saturating_add(*limit)
        ),
        ViewKind::ByType(type_name) => format!("{} type", type_name),
        ViewKind::ById(id) => format!("Pokemon #{}", id),
        ViewKind::Strongest { limit } => format!("Top {} by total stats", limit),
        ViewKind::Popular => "Popular".to_string(),
        ViewKind::Legendary => "Legendary".to_string(),
    }
}

pub fn describe_error(kind: &ViewKind, error: &PokedexError) -> String {
    match error {
        PokedexError::NotAuthenticated => "You need to log in first.".to_string(),
        PokedexError::Source(SourceError::NotFound(_)) => match kind {
            ViewKind::ById(id) => format!("Pokemon #{} was not found.", id),
            ViewKind::ByType(type_name) => format!("The type '{}' was not found.", type_name),
            _ => "Nothing was found.".to_string(),
        },
        other => format!("Could not load {}: {}", view_title(kind).to_lowercase(), other),
    }
}

/// Renders the user profile with its preferences.
pub fn display_profile(profile: &UserProfile) -> String {
    let mut output = String::from("--- Profile ---\n");
    output.push_str(&format!("Nickname: {}\n", profile.nickname));
    output.push_str(&format!("Email:    {}\n", profile.email));
    output.push_str(&format!("Avatar:   {}\n", profile.avatar));

    output.push_str("Favourite types: ");
    if profile.favorite_types.is_empty() {
        output.push_str("none\n");
    } else {
        let types: Vec<String> = profile
            .favorite_types
            .iter()
            .map(|t| format!("{} ({})", t, type_color(t)))
            .collect();
        output.push_str(&format!("{}\n", types.join(", ")));
    }

    output.push_str("Favourite movie genres: ");
    if profile.favorite_movie_genres.is_empty() {
        output.push_str("none\n");
    } else {
        let genres: Vec<String> = profile
            .favorite_movie_genres
            .iter()
            .map(|g| format!("{} ({})", g, movie_genre_color(g)))
            .collect();
        output.push_str(&format!("{}\n", genres.join(", ")));
    }
    output
}

/// Lists every type with its colour, marking the user's favourites.
pub fn display_type_palette(profile: &UserProfile) -> String {
    let mut output = String::from("--- Types ---\n");
    for name in PokemonType::all_names() {
        let marker = if profile.is_type_selected(name) { " *" } else { "" };
        output.push_str(&format!(" {:<10} {}{}\n", name, type_color(name), marker));
    }
    output
}

/// Lists every movie genre with its colour, marking the user's favourites.
pub fn display_movie_genres(profile: &UserProfile) -> String {
    let mut output = String::from("--- Movie genres ---\n");
    for (genre, color) in MOVIE_GENRES {
        let marker = if profile.is_movie_genre_selected(genre) {
            " *"
        } else {
            ""
        };
        output.push_str(&format!(" {:<10} {}{}\n", genre, color, marker));
    }
    output
}

pub fn display_login_outcome(outcome: LoginOutcome) -> &'static str {
    match outcome {
        LoginOutcome::Authenticated => "Welcome back! You are now logged in.",
        LoginOutcome::MissingCredentials => "Please enter both a username and a password.",
        LoginOutcome::InvalidCredentials => "Incorrect credentials.",
    }
}

/// Describes the result of toggling a preference.
pub fn display_toggle(kind: &str, value: &str, selected: bool) -> String {
    if selected {
        format!("Added '{}' to your favourite {}.", value, kind)
    } else {
        format!("Removed '{}' from your favourite {}.", value, kind)
    }
}
