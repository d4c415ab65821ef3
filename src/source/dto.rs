//! Wire shapes of the remote catalog's JSON documents.
//!
//! Fields the normalizer must validate are `Option` so that a missing field
//! surfaces as a malformed-item error rather than a decode failure of the
//! whole body.

use serde::Deserialize;

/// A `{name, url}` pointer returned by listing and type endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRef {
    pub name: String,
    pub url: String,
}

impl ResourceRef {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// `GET /pokemon?limit=&offset=`
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    pub results: Vec<ResourceRef>,
}

/// `GET /type/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct TypeMembership {
    pub pokemon: Vec<TypeMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeMember {
    pub pokemon: ResourceRef,
}

/// `GET /pokemon/{id}` and every detail URL handed out by listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawPokemon {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub sprites: Option<RawSprites>,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
    pub stats: Option<Vec<RawStat>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<RawOtherSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawOtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<RawArtwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawArtwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub type_ref: Option<RawNamed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawStat {
    pub base_stat: Option<u32>,
    pub stat: Option<RawNamed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawNamed {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_remote_detail_document() {
        let body = r#"{
            "id": 6,
            "name": "charizard",
            "height": 17,
            "weight": 905,
            "base_experience": 267,
            "sprites": {
                "front_default": "https://img.example/6.png",
                "other": {
                    "official-artwork": { "front_default": "https://img.example/art/6.png" },
                    "home": { "front_default": null }
                }
            },
            "types": [
                { "slot": 1, "type": { "name": "fire", "url": "https://x/type/10/" } },
                { "slot": 2, "type": { "name": "flying", "url": "https://x/type/3/" } }
            ],
            "stats": [
                { "base_stat": 78, "effort": 0, "stat": { "name": "hp", "url": "https://x/stat/1/" } }
            ]
        }"#;

        let raw: RawPokemon = serde_json::from_str(body).unwrap();
        assert_eq!(raw.id, Some(6));
        assert_eq!(raw.types.len(), 2);
        let artwork = raw
            .sprites
            .and_then(|s| s.other)
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default);
        assert_eq!(artwork.as_deref(), Some("https://img.example/art/6.png"));
    }

    #[test]
    fn test_decodes_listing_and_type_documents() {
        let listing: ListingPage = serde_json::from_str(
            r#"{"count": 1302, "next": null, "previous": null,
                "results": [{"name": "bulbasaur", "url": "https://x/pokemon/1/"}]}"#,
        )
        .unwrap();
        assert_eq!(listing.results[0], ResourceRef::new("bulbasaur", "https://x/pokemon/1/"));

        let membership: TypeMembership = serde_json::from_str(
            r#"{"id": 10, "name": "fire",
                "pokemon": [{"slot": 1, "pokemon": {"name": "charmander", "url": "https://x/pokemon/4/"}}]}"#,
        )
        .unwrap();
        assert_eq!(membership.pokemon[0].pokemon.name, "charmander");
    }
}
