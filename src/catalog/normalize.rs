use schema::{Pokemon, StatValue};

use crate::errors::NormalizeError;
use crate::source::dto::{RawPokemon, RawSprites};

/// Converts one raw remote item into the catalog view model.
///
/// Pure and deterministic. Fails when `id`, `name`, the sprite block or the
/// stat list is missing, or when a stat or type entry lacks its name.
pub fn normalize(raw: RawPokemon) -> Result<Pokemon, NormalizeError> {
    let id = raw.id.ok_or_else(|| missing("id"))?;
    let name = raw
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| missing("name"))?;
    let sprites = raw.sprites.ok_or_else(|| missing("sprites"))?;
    let raw_stats = raw.stats.ok_or_else(|| missing("stats"))?;

    let types = raw
        .types
        .into_iter()
        .map(|slot| {
            slot.type_ref
                .map(|named| named.name)
                .ok_or_else(|| missing("types[].type.name"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let stats = raw_stats
        .into_iter()
        .map(|entry| -> Result<StatValue, NormalizeError> {
            let name = entry.stat.ok_or_else(|| missing("stats[].stat.name"))?.name;
            let value = entry.base_stat.ok_or_else(|| missing("stats[].base_stat"))?;
            Ok(StatValue { name, value })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Pokemon {
        id,
        name,
        image: pick_image(sprites),
        types,
        height: raw.height.unwrap_or_default(),
        weight: raw.weight.unwrap_or_default(),
        stats,
    })
}

// Official artwork first, then the default sprite; empty when neither exists.
fn pick_image(sprites: RawSprites) -> String {
    sprites
        .other
        .and_then(|other| other.official_artwork)
        .and_then(|artwork| artwork.front_default)
        .filter(|url| !url.is_empty())
        .or(sprites.front_default)
        .unwrap_or_default()
}

fn missing(field: &str) -> NormalizeError {
    NormalizeError::MalformedResponse(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::dto::{RawArtwork, RawNamed, RawOtherSprites, RawStat, RawTypeSlot};
    use pretty_assertions::assert_eq;

    fn named(name: &str) -> Option<RawNamed> {
        Some(RawNamed {
            name: name.to_string(),
        })
    }

    fn raw_bulbasaur(artwork: Option<&str>) -> RawPokemon {
        RawPokemon {
            id: Some(1),
            name: Some("bulbasaur".to_string()),
            height: Some(7),
            weight: Some(69),
            sprites: Some(RawSprites {
                front_default: Some("https://img.example/1.png".to_string()),
                other: Some(RawOtherSprites {
                    official_artwork: Some(RawArtwork {
                        front_default: artwork.map(str::to_string),
                    }),
                }),
            }),
            types: vec![
                RawTypeSlot {
                    type_ref: named("grass"),
                },
                RawTypeSlot {
                    type_ref: named("poison"),
                },
            ],
            stats: Some(vec![
                RawStat {
                    base_stat: Some(45),
                    stat: named("hp"),
                },
                RawStat {
                    base_stat: Some(49),
                    stat: named("attack"),
                },
            ]),
        }
    }

    #[test]
    fn test_maps_fields_in_remote_order() {
        let pokemon = normalize(raw_bulbasaur(Some("https://img.example/art/1.png"))).unwrap();

        assert_eq!(
            pokemon,
            Pokemon {
                id: 1,
                name: "bulbasaur".to_string(),
                image: "https://img.example/art/1.png".to_string(),
                types: vec!["grass".to_string(), "poison".to_string()],
                height: 7,
                weight: 69,
                stats: vec![StatValue::new("hp", 45), StatValue::new("attack", 49)],
            }
        );
    }

    #[test]
    fn test_is_deterministic() {
        let raw = raw_bulbasaur(Some("https://img.example/art/1.png"));
        assert_eq!(normalize(raw.clone()), normalize(raw));
    }

    #[test]
    fn test_image_falls_back_to_default_sprite() {
        let null_artwork = normalize(raw_bulbasaur(None)).unwrap();
        assert_eq!(null_artwork.image, "https://img.example/1.png");

        let mut raw = raw_bulbasaur(None);
        if let Some(sprites) = raw.sprites.as_mut() {
            sprites.other = None;
        }
        assert_eq!(normalize(raw).unwrap().image, "https://img.example/1.png");
    }

    #[test]
    fn test_missing_required_fields_are_malformed() {
        let mut no_id = raw_bulbasaur(None);
        no_id.id = None;
        let mut no_name = raw_bulbasaur(None);
        no_name.name = None;
        let mut empty_name = raw_bulbasaur(None);
        empty_name.name = Some(String::new());
        let mut no_sprites = raw_bulbasaur(None);
        no_sprites.sprites = None;
        let mut no_stats = raw_bulbasaur(None);
        no_stats.stats = None;
        let mut no_base_stat = raw_bulbasaur(None);
        if let Some(stats) = no_base_stat.stats.as_mut() {
            stats[0].base_stat = None;
        }
        let mut unnamed_type = raw_bulbasaur(None);
        unnamed_type.types[1].type_ref = None;

        let cases = [
            ("id", no_id),
            ("name", no_name),
            ("name", empty_name),
            ("sprites", no_sprites),
            ("stats", no_stats),
            ("stats[].base_stat", no_base_stat),
            ("types[].type.name", unnamed_type),
        ];

        for (field, raw) in cases {
            assert_eq!(
                normalize(raw),
                Err(NormalizeError::MalformedResponse(field.to_string())),
                "missing {field} should be reported"
            );
        }
    }

    #[test]
    fn test_missing_body_measurements_default_to_zero() {
        let mut raw = raw_bulbasaur(None);
        raw.height = None;
        raw.weight = None;
        let pokemon = normalize(raw).unwrap();
        assert_eq!((pokemon.height, pokemon.weight), (0, 0));
    }
}
