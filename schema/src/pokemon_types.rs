use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Colour used for any type or genre name the palette does not know.
pub const DEFAULT_TYPE_COLOR: &str = "#A8A878";

/// The eighteen elemental types reported by the remote catalog.
///
/// Pokemon keep their types as plain strings so that unknown names coming
/// from the remote side survive normalization; this enum is the palette and
/// vocabulary used for filters and profile preferences.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl PokemonType {
    /// Badge colour for this type as a `#RRGGBB` string.
    pub fn color(self) -> &'static str {
        use PokemonType::*;

        match self {
            Normal => "#A8A878",
            Fighting => "#C03028",
            Flying => "#A890F0",
            Poison => "#A040A0",
            Ground => "#E0C068",
            Rock => "#B8A038",
            Bug => "#A8B820",
            Ghost => "#705898",
            Steel => "#B8B8D0",
            Fire => "#F08030",
            Water => "#6890F0",
            Grass => "#78C850",
            Electric => "#F8D030",
            Psychic => "#F85888",
            Ice => "#98D8D8",
            Dragon => "#7038F8",
            Dark => "#705848",
            Fairy => "#EE99AC",
        }
    }

    /// All type names in palette order, lowercase.
    pub fn all_names() -> Vec<&'static str> {
        PokemonType::iter().map(|t| t.into()).collect()
    }
}

/// Colour for a type given by name, falling back to [`DEFAULT_TYPE_COLOR`].
pub fn type_color(name: &str) -> &'static str {
    PokemonType::from_str(name)
        .map(PokemonType::color)
        .unwrap_or(DEFAULT_TYPE_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_round_trip_through_strum() {
        for pokemon_type in PokemonType::iter() {
            let name = pokemon_type.to_string();
            assert_eq!(name, pokemon_type.as_ref());
            assert_eq!(PokemonType::from_str(&name), Ok(pokemon_type));
        }
        assert_eq!(PokemonType::all_names().len(), 18);
    }

    #[test]
    fn test_type_color_lookup() {
        assert_eq!(type_color("fire"), "#F08030");
        assert_eq!(type_color("Water"), "#6890F0");
        assert_eq!(type_color("fairy"), "#EE99AC");
        assert_eq!(type_color("shadow"), DEFAULT_TYPE_COLOR);
    }
}
