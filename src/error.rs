// Error types for the inheritance engine and the renderers
//
// **Rust Concept: thiserror**
// `#[derive(Error)]` generates the `std::error::Error` and `Display` impls
// from the `#[error("...")]` attributes, so each variant carries its own message.

use thiserror::Error;

use crate::pedigree::IndividualId;

/// A request that can never produce a valid pedigree
///
/// These are caught before any individual is created (and before any random
/// number is drawn), so a failed request leaves nothing half-built behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("number of generations must be between {min} and {max}, got {requested}")]
    GenerationCount { requested: u32, min: u32, max: u32 },

    #[error("palette has {available} color pairs but {needed} founder couples need one each")]
    PaletteTooSmall { needed: usize, available: usize },

    #[error("invalid color {0:?}: expected #rrggbb or #rgb")]
    InvalidColor(String),

    #[error("unknown founder mode {0:?}: expected \"random\" or \"solid\"")]
    UnknownFounderMode(String),
}

/// Errors raised while building a pedigree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InheritanceError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Couples are always generation-mates; anything else breaks the row layout
    #[error("cannot pair {a} (generation {generation_a}) with {b} (generation {generation_b})")]
    MismatchedGenerations {
        a: IndividualId,
        generation_a: usize,
        b: IndividualId,
        generation_b: usize,
    },

    #[error("individual {0} is not part of this pedigree")]
    UnknownIndividual(IndividualId),

    /// Every child has two distinct parents
    #[error("cannot pair {0} with itself")]
    SelfPairing(IndividualId),
}

/// The layout and the pedigree disagree
///
/// This never comes from user input: it means the layout was computed for a
/// different pedigree, or was edited after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("layout has no placement for individual {0}")]
    MissingPlacement(IndividualId),

    #[error("individual {child} refers to parent {parent}, which has no placement")]
    DanglingParent {
        child: IndividualId,
        parent: IndividualId,
    },

    #[error("layout places {placed} individuals but the pedigree has {individuals}")]
    PlacementCount { placed: usize, individuals: usize },

    #[error("layout has {rows} generation rows but the pedigree has {generations}")]
    RowCount { rows: usize, generations: usize },

    #[error("individual {id} carries color pair {pair}, which the palette doesn't have")]
    MissingColor { id: IndividualId, pair: u8 },
}
