// Import types we need
use crate::error::{ConfigError, InheritanceError};
use crate::genes::{Allele, Palette, TraitGrid, Variant};
use crate::pedigree::{IndividualId, Pedigree};

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use std::str::FromStr;

/// Fewest generations a pedigree can show (founders and their child)
pub const MIN_GENERATIONS: u32 = 2;

/// Most generations a pedigree can show (8 founders down to 1 child)
pub const MAX_GENERATIONS: u32 = 4;

/// How the founders' grids are filled
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FounderMode {
    /// Every cell is a coin flip between the two colors of the founder's pair
    #[default]
    Random,

    /// Founder `2k` is all first color of pair `k`, founder `2k + 1` all
    /// second color, so every cell of a descendant shows which founder it came from
    Solid,
}

impl FromStr for FounderMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(FounderMode::Random),
            "solid" => Ok(FounderMode::Solid),
            _ => Err(ConfigError::UnknownFounderMode(s.to_string())),
        }
    }
}

/// Parameters controlling one simulation run
///
/// **Rust Concept: Default trait**
/// `InheritanceParams { generations: 4, ..Default::default() }` overrides
/// one field and keeps sensible values for the rest.
#[derive(Clone, Debug)]
pub struct InheritanceParams {
    /// Generation levels to build, 2 to 4
    pub generations: u32,

    /// Seed for the random stream; `None` draws a fresh seed from the OS
    pub seed: Option<u64>,

    pub founder_mode: FounderMode,

    /// Color pairs for the founders (one pair per founder couple)
    pub palette: Palette,
}

impl Default for InheritanceParams {
    fn default() -> Self {
        Self {
            generations: 3,
            seed: None,
            founder_mode: FounderMode::Random,
            palette: Palette::default(),
        }
    }
}

impl InheritanceParams {
    /// Shorthand for the default parameters with a given generation count
    pub fn with_generations(generations: u32) -> Self {
        Self {
            generations,
            ..Self::default()
        }
    }

    /// Check the request and return the number of founders it needs
    pub fn validate(&self) -> Result<usize, ConfigError> {
        if !(MIN_GENERATIONS..=MAX_GENERATIONS).contains(&self.generations) {
            return Err(ConfigError::GenerationCount {
                requested: self.generations,
                min: MIN_GENERATIONS,
                max: MAX_GENERATIONS,
            });
        }

        let founders = founder_count(self.generations);
        self.palette.require_pairs(founders / 2)?;
        Ok(founders)
    }

    /// The single random stream a run draws from
    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Founders needed for a pedigree of `generations` levels
///
/// Every couple has exactly one child, so each generation is half the one
/// before and the last generation is a single individual: 2, 4 or 8 founders.
pub fn founder_count(generations: u32) -> usize {
    1 << generations.saturating_sub(1)
}

/// Build a pedigree with default parameters (random founders, fresh seed)
pub fn build_pedigree(generations: u32) -> Result<Pedigree, InheritanceError> {
    Pedigree::build(&InheritanceParams::with_generations(generations))
}

// Breeding methods for Pedigree
//
// **Rust Concept: Multiple impl blocks**
// `pedigree.rs` defines the data and its accessors; this block adds the
// operations that create individuals. Both extend the same type.
impl Pedigree {
    /// Build a complete pedigree
    ///
    /// Random numbers are consumed in a fixed order, which is what makes a
    /// seeded run reproducible:
    /// 1. founders in order, cells 0..63 each (solid founders draw nothing)
    /// 2. each later generation in order, couples in pairing order, cells 0..63
    ///
    /// Nothing is built (and nothing is drawn) if the parameters are invalid.
    pub fn build(params: &InheritanceParams) -> Result<Pedigree, InheritanceError> {
        let founders = params.validate()?;
        let mut rng = params.rng();
        let mut pedigree = Pedigree::new(params.palette.clone());

        for i in 0..founders {
            // Couple k shares pair k
            let pair = (i / 2) as u8;
            match params.founder_mode {
                FounderMode::Random => {
                    pedigree.create_founder(pair, &mut rng);
                }
                FounderMode::Solid => {
                    let variant = if i % 2 == 0 {
                        Variant::First
                    } else {
                        Variant::Second
                    };
                    pedigree.create_solid_founder(Allele::new(pair, variant));
                }
            }
        }
        debug!("created {} founders ({:?})", founders, params.founder_mode);

        for generation in 1..params.generations as usize {
            // Copy the ids out so we can add children while walking the couples
            let parents = pedigree.generation(generation - 1).to_vec();

            // Sequential pairing: (0, 1), (2, 3), ... each couple has one child
            for couple in parents.chunks_exact(2) {
                pedigree.combine(couple[0], couple[1], &mut rng)?;
            }
            debug!(
                "generation {}: {} children from {} parents",
                generation,
                pedigree.generation(generation).len(),
                parents.len()
            );
        }

        info!(
            "built pedigree: {} generations, {} individuals",
            pedigree.generation_count(),
            pedigree.len()
        );
        Ok(pedigree)
    }

    /// Add a founder whose cells are coin flips between the two colors of `pair`
    pub fn create_founder(&mut self, pair: u8, rng: &mut impl Rng) -> IndividualId {
        let grid = TraitGrid::random_founder(pair, rng);
        self.push(0, None, grid)
    }

    /// Add a founder whose cells all hold `allele`
    pub fn create_solid_founder(&mut self, allele: Allele) -> IndividualId {
        self.push(0, None, TraitGrid::solid(allele))
    }

    /// Add the child of two generation-mates
    ///
    /// The two parents must be different individuals of the same generation.
    /// The child lands in the generation right below its parents. Each of its
    /// 64 cells is copied from `parent_a` or `parent_b` by its own coin flip.
    pub fn combine(
        &mut self,
        parent_a: IndividualId,
        parent_b: IndividualId,
        rng: &mut impl Rng,
    ) -> Result<IndividualId, InheritanceError> {
        if parent_a == parent_b {
            return Err(InheritanceError::SelfPairing(parent_a));
        }

        let a = self
            .get(parent_a)
            .ok_or(InheritanceError::UnknownIndividual(parent_a))?;
        let b = self
            .get(parent_b)
            .ok_or(InheritanceError::UnknownIndividual(parent_b))?;

        if a.generation() != b.generation() {
            return Err(InheritanceError::MismatchedGenerations {
                a: parent_a,
                generation_a: a.generation(),
                b: parent_b,
                generation_b: b.generation(),
            });
        }

        let generation = a.generation() + 1;
        let grid = TraitGrid::combine(a.grid(), b.grid(), rng);
        Ok(self.push(generation, Some((parent_a, parent_b)), grid))
    }
}
