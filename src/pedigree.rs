// Import the grid and palette types every individual is made of
use crate::genes::{Palette, TraitGrid};

// Serialization support for pedigree dumps
use serde::Serialize;

use std::fmt;

/// Stable identifier of an individual: its index in the pedigree's arena
///
/// **Rust Concept: Newtype pattern**
/// Wrapping `usize` in a struct means an id can't be mixed up with a
/// generation index or a cell position, even though all three are numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IndividualId(usize);

impl IndividualId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for IndividualId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One person in the family tree
///
/// Parents are stored as ids into the same pedigree rather than as owned or
/// shared pointers, so there are no reference cycles and no lifetimes to
/// thread through the renderers.
///
/// All fields are private: once an individual exists it never changes.
#[derive(Clone, Debug, Serialize)]
pub struct Individual {
    id: IndividualId,

    /// 0 for founders, 1 for their children, and so on
    generation: usize,

    /// `None` for founders, `Some((a, b))` for everyone else
    parents: Option<(IndividualId, IndividualId)>,

    grid: TraitGrid,
}

impl Individual {
    pub fn id(&self) -> IndividualId {
        self.id
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn parents(&self) -> Option<(IndividualId, IndividualId)> {
        self.parents
    }

    pub fn grid(&self) -> &TraitGrid {
        &self.grid
    }

    pub fn is_founder(&self) -> bool {
        self.parents.is_none()
    }
}

/// Every individual of one simulation run, grouped by generation
///
/// The pedigree owns all individuals (the arena) plus the order of ids inside
/// each generation. That order is the pairing order: ids `2k` and `2k + 1`
/// of a generation are a couple.
#[derive(Clone, Debug, Serialize)]
pub struct Pedigree {
    individuals: Vec<Individual>,
    generations: Vec<Vec<IndividualId>>,
    palette: Palette,
}

impl Pedigree {
    /// An empty pedigree that will draw its values from `palette`
    pub fn new(palette: Palette) -> Self {
        Self {
            individuals: Vec::new(),
            generations: Vec::new(),
            palette,
        }
    }

    /// Add an individual to the arena and to its generation's row
    ///
    /// Only the builders in `inheritance` call this; they have already
    /// checked the parent references.
    pub(crate) fn push(
        &mut self,
        generation: usize,
        parents: Option<(IndividualId, IndividualId)>,
        grid: TraitGrid,
    ) -> IndividualId {
        let id = IndividualId(self.individuals.len());
        self.individuals.push(Individual {
            id,
            generation,
            parents,
            grid,
        });

        if self.generations.len() <= generation {
            self.generations.resize_with(generation + 1, Vec::new);
        }
        self.generations[generation].push(id);

        id
    }

    /// Look up an individual by id
    pub fn get(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.get(id.0)
    }

    /// All individuals in creation order
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Number of generation levels
    pub fn generation_count(&self) -> usize {
        self.generations.len()
    }

    /// Ids of one generation in pairing order (empty if out of range)
    pub fn generation(&self, index: usize) -> &[IndividualId] {
        self.generations
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over the generations, founders first
    pub fn generations(&self) -> impl Iterator<Item = &[IndividualId]> + '_ {
        self.generations.iter().map(Vec::as_slice)
    }

    pub fn founders(&self) -> &[IndividualId] {
        self.generation(0)
    }

    /// Everyone who has parents
    pub fn descendants(&self) -> impl Iterator<Item = &Individual> + '_ {
        self.individuals.iter().filter(|i| !i.is_founder())
    }

    /// The palette trait values index into
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Pretty-printed JSON of the whole pedigree
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
