// This file declares the genes module and its submodules
//
// - color: a single RGB color
// - palette: the color pairs trait values come from
// - grid: the 8x8 grid of trait values every individual carries

use serde::{Deserialize, Serialize};

mod color;
mod grid;
mod palette;

// Re-export so users can write `genetic_inheritance::genes::TraitGrid`
pub use color::Color;
pub use grid::{TraitGrid, GRID_CELLS, GRID_SIDE};
pub use palette::Palette;

/// Which of the two versions of a trait a cell carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    First,
    Second,
}

/// One trait value: a color pair plus which side of the pair
///
/// Alleles are tiny `Copy` values, so grids can copy them from parent to
/// child without any cloning or borrowing gymnastics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allele {
    /// Index into the palette's pairs
    pub pair: u8,
    pub variant: Variant,
}

impl Allele {
    pub const fn new(pair: u8, variant: Variant) -> Self {
        Self { pair, variant }
    }
}
