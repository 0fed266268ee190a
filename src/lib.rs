// Library root for the genetic inheritance visualizer
//
// This file is the entry point for the library crate (genetic_inheritance)
// Data flows one way through the modules:
//   genes + pedigree + inheritance  ->  layout  ->  svg / raster

// Trait values, palettes and the 8x8 grid
pub mod genes;

// Error types shared by the engine and the renderers
pub mod error;

// Inheritance engine
pub mod pedigree;
pub mod inheritance;

// Rendering
pub mod layout;
pub mod svg;
pub mod raster;

// Re-export commonly used types at the library root for convenience
// This allows users to write:
//   use genetic_inheritance::Pedigree;
// instead of:
//   use genetic_inheritance::pedigree::Pedigree;
pub use error::{ConfigError, InheritanceError, RenderError};
pub use genes::{Allele, Color, Palette, TraitGrid, Variant, GRID_CELLS, GRID_SIDE};
pub use inheritance::{build_pedigree, FounderMode, InheritanceParams, MAX_GENERATIONS, MIN_GENERATIONS};
pub use layout::{layout, Layout, LayoutConfig, Placement};
pub use pedigree::{Individual, IndividualId, Pedigree};
pub use raster::render_png;
pub use svg::render;
