use serde::{Deserialize, Serialize};
use std::fmt;

/// One named base stat of a Pokemon, in remote order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatValue {
    pub name: String,
    pub value: u32,
}

impl StatValue {
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The catalog view model of a single Pokemon.
///
/// Built once by the normalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Official artwork URL, or the default sprite when no artwork exists.
    pub image: String,
    pub types: Vec<String>,
    /// Decimetres, as reported by the remote catalog.
    pub height: u32,
    /// Hectograms, as reported by the remote catalog.
    pub weight: u32,
    pub stats: Vec<StatValue>,
}

impl Pokemon {
    /// Sum of every base stat value.
    pub fn total_stats(&self) -> u32 {
        self.stats.iter().map(|stat| stat.value).sum()
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // --- 1. Name and catalog number ---
            writeln!(f, "{} (#{:03})", self.name, self.id)?;
            writeln!(f, "--------------------")?;

            // --- 2. Types and body ---
            writeln!(f, "Type(s): {}", self.types.join(" / "))?;
            writeln!(
                f,
                "Height: {:.1} m   Weight: {:.1} kg",
                f64::from(self.height) / 10.0,
                f64::from(self.weight) / 10.0
            )?;
            writeln!(f, "Image: {}", self.image)?;
            writeln!(f, "--------------------")?;

            // --- 3. Base stats ---
            writeln!(f, "Base Stats:")?;
            const LABEL_WIDTH: usize = 16;
            for stat in &self.stats {
                writeln!(f, "{:<LABEL_WIDTH$} : {}", stat.name, stat.value)?;
            }
            write!(f, "{:<LABEL_WIDTH$} : {}", "total", self.total_stats())
        } else {
            write!(f, "#{:03} {} [{}]", self.id, self.name, self.types.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu() -> Pokemon {
        Pokemon {
            id: 25,
            name: "pikachu".to_string(),
            image: "https://img.example/25.png".to_string(),
            types: vec!["electric".to_string()],
            height: 4,
            weight: 60,
            stats: vec![
                StatValue::new("hp", 35),
                StatValue::new("attack", 55),
                StatValue::new("speed", 90),
            ],
        }
    }

    #[test]
    fn test_total_stats_sums_every_stat() {
        assert_eq!(pikachu().total_stats(), 180);
        let empty = Pokemon {
            stats: Vec::new(),
            ..pikachu()
        };
        assert_eq!(empty.total_stats(), 0);
    }

    #[test]
    fn test_display_card_and_detail() {
        let pokemon = pikachu();
        assert_eq!(pokemon.to_string(), "#025 pikachu [electric]");

        let detail = format!("{:#}", pokemon);
        assert!(detail.starts_with("pikachu (#025)"));
        assert!(detail.contains("Height: 0.4 m   Weight: 6.0 kg"));
        assert!(detail.ends_with("total            : 180"));
    }
}
