// Import the pedigree we are laying out
use crate::error::RenderError;
use crate::genes::GRID_SIDE;
use crate::pedigree::{IndividualId, Pedigree};

use log::debug;
use serde::Serialize;

use std::collections::BTreeMap;

/// Geometry knobs for the diagram, in SVG user units
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Side length of one trait cell
    pub cell_size: f64,

    /// Horizontal gap between neighbouring blocks in the widest row
    pub block_spacing: f64,

    /// Distance from one generation row to the next
    pub row_height: f64,

    /// Where a block starts inside its row (room for labels and the legend)
    pub row_top_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            block_spacing: 120.0,
            row_height: 220.0,
            row_top_offset: 70.0,
        }
    }
}

impl LayoutConfig {
    /// Side length of a whole 8x8 block
    pub fn block_size(&self) -> f64 {
        self.cell_size * GRID_SIDE as f64
    }

    /// Horizontal room one block takes in a row, gap included
    pub fn slot_width(&self) -> f64 {
        self.block_size() + self.block_spacing
    }
}

/// Where one individual's block goes: top-left corner plus cell size
///
/// **Rust Concept: Copy types**
/// `Placement` is three `f64`s, so it derives `Copy`: passing one around
/// copies the bytes and leaves the original usable, no `.clone()` needed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub cell_size: f64,
}

impl Placement {
    pub fn block_size(&self) -> f64 {
        self.cell_size * GRID_SIDE as f64
    }

    /// Middle of the bottom edge, where descent lines leave a parent
    pub fn bottom_center(&self) -> (f64, f64) {
        (self.x + self.block_size() / 2.0, self.y + self.block_size())
    }

    /// Middle of the top edge, where descent lines reach a child
    pub fn top_center(&self) -> (f64, f64) {
        (self.x + self.block_size() / 2.0, self.y)
    }
}

/// The computed position of every block plus the canvas size
///
/// A `BTreeMap` keeps iteration in id order, so rendering the same layout
/// twice produces byte-identical output.
///
/// **Rust Concept: Private fields with public accessors**
/// `placements` is private: callers read it through `placement()` and
/// `placements()`, so the only way to fill a layout is `Layout::compute`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,

    /// Top of each generation row, founders first
    pub row_tops: Vec<f64>,

    placements: BTreeMap<IndividualId, Placement>,
}

impl Layout {
    /// Lay out a pedigree with the given geometry
    ///
    /// - every generation gets its own row, founders at the top
    /// - founders sit in equal slots, left to right in pairing order
    /// - each child is centered under the midpoint of its two parents
    /// - a left-to-right sweep then pushes blocks right until neighbours
    ///   are at least one slot apart, so nothing overlaps
    pub fn compute(pedigree: &Pedigree, config: &LayoutConfig) -> Layout {
        let slot = config.slot_width();
        let block = config.block_size();
        let margin = config.block_spacing / 2.0;

        let mut placements: BTreeMap<IndividualId, Placement> = BTreeMap::new();
        let mut row_tops = Vec::with_capacity(pedigree.generation_count());
        let mut widest_row = 0;
        let mut right_edge: f64 = 0.0;

        for (generation, row) in pedigree.generations().enumerate() {
            let top = generation as f64 * config.row_height;
            let y = top + config.row_top_offset;
            row_tops.push(top);
            widest_row = widest_row.max(row.len());

            let mut previous_x: Option<f64> = None;
            for (slot_index, &id) in row.iter().enumerate() {
                // Default: the next free slot (founders, or a child whose
                // parents weren't placed for some reason)
                let mut x = margin + slot_index as f64 * slot;

                let parents = pedigree.get(id).and_then(|i| i.parents());
                if let Some((a, b)) = parents {
                    if let (Some(pa), Some(pb)) = (placements.get(&a), placements.get(&b)) {
                        x = (pa.x + pb.x) / 2.0;
                    }
                }

                if let Some(prev) = previous_x {
                    x = x.max(prev + slot);
                }
                previous_x = Some(x);
                right_edge = right_edge.max(x + block + margin);

                placements.insert(
                    id,
                    Placement {
                        x,
                        y,
                        cell_size: config.cell_size,
                    },
                );
            }
        }

        let width = (widest_row as f64 * slot).max(right_edge);
        let height = pedigree.generation_count() as f64 * config.row_height;
        debug!(
            "layout: {} blocks on a {}x{} canvas",
            placements.len(),
            width,
            height
        );

        Layout {
            width,
            height,
            row_tops,
            placements,
        }
    }

    pub fn placement(&self, id: IndividualId) -> Option<&Placement> {
        self.placements.get(&id)
    }

    /// All placements in id order
    pub fn placements(&self) -> impl Iterator<Item = (IndividualId, &Placement)> + '_ {
        self.placements.iter().map(|(&id, p)| (id, p))
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Make sure this layout was computed for `pedigree`
    ///
    /// Every individual and every parent it refers to must have a placement,
    /// and the layout must not place anyone or draw any row beyond that.
    /// Renderers call this before drawing anything, so a layout computed for
    /// a different pedigree fails loudly instead of producing a broken picture.
    ///
    /// **Rust Concept: Early return with `?`**
    /// Callers write `layout.check(pedigree)?;` as their first line, and the
    /// first mismatch found here becomes their error too.
    pub fn check(&self, pedigree: &Pedigree) -> Result<(), RenderError> {
        // Parent links first: a placed child pointing at an unplaced parent
        // is reported as such, not as the parent merely missing
        for individual in pedigree.individuals() {
            if let Some((a, b)) = individual.parents() {
                for parent in [a, b] {
                    let known = pedigree.get(parent).is_some();
                    if !known || !self.placements.contains_key(&parent) {
                        return Err(RenderError::DanglingParent {
                            child: individual.id(),
                            parent,
                        });
                    }
                }
            }
        }

        for individual in pedigree.individuals() {
            if !self.placements.contains_key(&individual.id()) {
                return Err(RenderError::MissingPlacement(individual.id()));
            }
        }

        // Everyone is placed; anything more belongs to some other pedigree
        if self.placements.len() != pedigree.len() {
            return Err(RenderError::PlacementCount {
                placed: self.placements.len(),
                individuals: pedigree.len(),
            });
        }
        if self.row_tops.len() != pedigree.generation_count() {
            return Err(RenderError::RowCount {
                rows: self.row_tops.len(),
                generations: pedigree.generation_count(),
            });
        }
        Ok(())
    }

    /// Drop one placement, for tests that need a layout with a hole in it
    #[cfg(test)]
    pub(crate) fn remove(&mut self, id: IndividualId) -> Option<Placement> {
        self.placements.remove(&id)
    }
}

/// Lay out a pedigree with the default geometry
pub fn layout(pedigree: &Pedigree) -> Layout {
    Layout::compute(pedigree, &LayoutConfig::default())
}
