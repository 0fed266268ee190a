// Import the random number generator trait from the rand crate
use rand::Rng;
// Grids are exported in pedigree dumps, never read back
use serde::Serialize;

use super::{Allele, Variant};

/// Cells along one side of a grid
pub const GRID_SIDE: usize = 8;

/// Trait positions per individual (8x8)
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

/// One individual's genetic makeup: 64 trait values in row-major order
///
/// Position `row * GRID_SIDE + col` holds the value for that cell.
///
/// **Rust Concept: Encapsulation**
/// The `cells` field is private and every constructor produces exactly
/// `GRID_CELLS` values, so no code outside this module can build a grid of the
/// wrong size or change a grid after it was made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraitGrid {
    cells: Vec<Allele>,
}

impl TraitGrid {
    /// A founder grid with every cell drawn from one color pair
    ///
    /// Each of the 64 cells is an independent fair coin flip between the
    /// pair's first and second value. Cells are drawn in position order.
    pub fn random_founder(pair: u8, rng: &mut impl Rng) -> Self {
        let cells = (0..GRID_CELLS)
            .map(|_| {
                let variant = if rng.gen_bool(0.5) {
                    Variant::First
                } else {
                    Variant::Second
                };
                Allele::new(pair, variant)
            })
            .collect();

        Self { cells }
    }

    /// A grid where every cell holds the same value
    pub fn solid(allele: Allele) -> Self {
        Self {
            cells: vec![allele; GRID_CELLS],
        }
    }

    /// Build a child grid from two parent grids
    ///
    /// For every position a separate coin is flipped: heads copies
    /// `parent_a`'s value at that position, tails copies `parent_b`'s.
    /// That's 64 independent trials, not one flip for the whole grid,
    /// so a child usually carries pieces of both parents.
    pub fn combine(parent_a: &TraitGrid, parent_b: &TraitGrid, rng: &mut impl Rng) -> Self {
        // `.zip()` pairs up cells at the same position in both parents
        let cells = parent_a
            .cells
            .iter()
            .zip(&parent_b.cells)
            .map(|(&a, &b)| if rng.gen_bool(0.5) { a } else { b })
            .collect();

        Self { cells }
    }

    /// Value at a grid coordinate
    ///
    /// # Panics
    /// Panics if `row` or `col` is `GRID_SIDE` or larger
    pub fn get(&self, row: usize, col: usize) -> Allele {
        assert!(row < GRID_SIDE && col < GRID_SIDE, "cell ({row}, {col}) is outside the grid");
        self.cells[row * GRID_SIDE + col]
    }

    /// All 64 values in position order
    pub fn cells(&self) -> &[Allele] {
        &self.cells
    }

    /// Iterate over `(row, col, value)` triples in position order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Allele)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &allele)| (i / GRID_SIDE, i % GRID_SIDE, allele))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_founder_has_64_cells_from_its_pair() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = TraitGrid::random_founder(3, &mut rng);

        assert_eq!(grid.cells().len(), GRID_CELLS);
        assert!(grid.cells().iter().all(|a| a.pair == 3));
    }

    #[test]
    fn test_founder_uses_both_values() {
        // 64 fair flips landing all on one side has probability 2^-63
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = TraitGrid::random_founder(0, &mut rng);

        let firsts = grid.cells().iter().filter(|a| a.variant == Variant::First).count();
        assert!(firsts > 0 && firsts < GRID_CELLS);
    }

    #[test]
    fn test_solid_grid() {
        let allele = Allele::new(1, Variant::Second);
        let grid = TraitGrid::solid(allele);
        assert!(grid.cells().iter().all(|&a| a == allele));
    }

    #[test]
    fn test_combine_copies_parent_values_position_by_position() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mom = TraitGrid::random_founder(0, &mut rng);
        let dad = TraitGrid::random_founder(1, &mut rng);
        let child = TraitGrid::combine(&mom, &dad, &mut rng);

        for (i, &value) in child.cells().iter().enumerate() {
            assert!(
                value == mom.cells()[i] || value == dad.cells()[i],
                "position {i} holds a value neither parent has there"
            );
        }
    }

    #[test]
    fn test_combine_flips_per_position() {
        // Solid parents make the source of each cell visible.
        // A single flip for the whole grid would give 0 or 64 cells from mom.
        let mom = TraitGrid::solid(Allele::new(0, Variant::First));
        let dad = TraitGrid::solid(Allele::new(0, Variant::Second));

        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..20 {
            let child = TraitGrid::combine(&mom, &dad, &mut rng);
            let from_mom = child.cells().iter().filter(|a| a.variant == Variant::First).count();
            assert!(from_mom > 0 && from_mom < GRID_CELLS, "got {from_mom} cells from mom");
        }
    }

    #[test]
    fn test_same_seed_same_child() {
        let mom = TraitGrid::solid(Allele::new(0, Variant::First));
        let dad = TraitGrid::solid(Allele::new(1, Variant::Second));

        let a = TraitGrid::combine(&mom, &dad, &mut ChaCha8Rng::seed_from_u64(5));
        let b = TraitGrid::combine(&mom, &dad, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let grid = TraitGrid::random_founder(2, &mut rng);

        let triples: Vec<_> = grid.iter().collect();
        assert_eq!(triples.len(), GRID_CELLS);
        assert_eq!((triples[9].0, triples[9].1), (1, 1));
        assert_eq!(triples[9].2, grid.get(1, 1));
        assert_eq!(triples[63].2, grid.get(7, 7));
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds_panics() {
        TraitGrid::solid(Allele::new(0, Variant::First)).get(8, 0);
    }
}
