use super::{Allele, Color, Variant};
use crate::error::ConfigError;

use serde::{Deserialize, Serialize};

/// The color pairs that trait values are drawn from
///
/// Each pair is one trait with two versions (alleles). Founder couple `k`
/// gets pair `k`, so a 4-generation run with 8 founders needs 4 pairs.
///
/// The same palette is stored in the pedigree and used by the renderers,
/// which keeps the engine's value space and the drawing colors in sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pairs: Vec<(Color, Color)>,
}

/// The four classic pairs: black/white, red/green, blue/orange, yellow/purple
impl Default for Palette {
    fn default() -> Self {
        Self {
            pairs: vec![
                (Color::rgb(0x00, 0x00, 0x00), Color::rgb(0xff, 0xff, 0xff)),
                (Color::rgb(0xff, 0x00, 0x00), Color::rgb(0x00, 0x80, 0x00)),
                (Color::rgb(0x00, 0x00, 0xff), Color::rgb(0xff, 0xa5, 0x00)),
                (Color::rgb(0xff, 0xff, 0x00), Color::rgb(0x80, 0x00, 0x80)),
            ],
        }
    }
}

impl Palette {
    pub fn new(pairs: Vec<(Color, Color)>) -> Self {
        Self { pairs }
    }

    /// Number of color pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pair(&self, index: usize) -> Option<(Color, Color)> {
        self.pairs.get(index).copied()
    }

    /// Look up the drawing color of a trait value
    ///
    /// Returns `None` when the allele refers to a pair this palette doesn't have.
    pub fn color(&self, allele: Allele) -> Option<Color> {
        let (first, second) = self.pair(allele.pair as usize)?;
        Some(match allele.variant {
            Variant::First => first,
            Variant::Second => second,
        })
    }

    /// Check that `needed` pairs are available
    pub fn require_pairs(&self, needed: usize) -> Result<(), ConfigError> {
        if self.pairs.len() < needed {
            return Err(ConfigError::PaletteTooSmall {
                needed,
                available: self.pairs.len(),
            });
        }
        Ok(())
    }

    /// Parse a palette from JSON: `{"pairs": [["#000000", "#ffffff"], ...]}`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_has_four_pairs() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 4);
        assert_eq!(
            palette.pair(1),
            Some((Color::rgb(255, 0, 0), Color::rgb(0, 128, 0)))
        );
        assert!(palette.pair(4).is_none());
    }

    #[test]
    fn test_color_lookup() {
        let palette = Palette::default();
        assert_eq!(
            palette.color(Allele::new(2, Variant::Second)),
            Some(Color::rgb(255, 165, 0))
        );
        assert_eq!(palette.color(Allele::new(9, Variant::First)), None);
    }

    #[test]
    fn test_require_pairs() {
        let palette = Palette::default();
        assert!(palette.require_pairs(4).is_ok());
        assert_eq!(
            palette.require_pairs(5),
            Err(ConfigError::PaletteTooSmall {
                needed: 5,
                available: 4
            })
        );
    }

    #[test]
    fn test_from_json() {
        let palette = Palette::from_json(r##"{"pairs": [["#111", "#eeeeee"]]}"##).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(
            palette.pair(0),
            Some((Color::rgb(0x11, 0x11, 0x11), Color::rgb(0xee, 0xee, 0xee)))
        );
    }

    #[test]
    fn test_from_json_rejects_bad_color() {
        let err = Palette::from_json(r##"{"pairs": [["black", "#ffffff"]]}"##);
        assert!(err.is_err());
    }
}
