// Raster preview of a laid-out pedigree
//
// Draws the same picture as the SVG renderer into an RGBA image, which is
// handy for quick previews and for tests that want to look at actual pixels.
// Text labels are left out (imageproc needs a font file for those).

use crate::error::RenderError;
use crate::genes::{Allele, Variant, GRID_SIDE};
use crate::layout::{Layout, Placement};
use crate::pedigree::Pedigree;

// Image types from the image crate
use image::{Rgba, RgbaImage};

// Drawing functions from imageproc
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use log::info;

use std::collections::BTreeSet;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Render the pedigree to an image the size of the layout's canvas
///
/// Fails exactly like [`crate::svg::render`] when the layout doesn't match
/// the pedigree.
///
/// **Rust Concept: Returning owned data**
/// The image is created here and handed to the caller, who decides whether
/// to save it, inspect pixels, or drop it. Nothing is written to disk.
pub fn render_png(pedigree: &Pedigree, layout: &Layout) -> Result<RgbaImage, RenderError> {
    layout.check(pedigree)?;

    let width = layout.width.ceil().max(1.0) as u32;
    let height = layout.height.ceil().max(1.0) as u32;
    let mut img = RgbaImage::from_pixel(width, height, PAPER);

    draw_legend(&mut img, pedigree);

    // Connectors first, blocks on top
    for child in pedigree.descendants() {
        let id = child.id();
        let to = layout
            .placement(id)
            .ok_or(RenderError::MissingPlacement(id))?;
        if let Some((a, b)) = child.parents() {
            for parent in [a, b] {
                let from = layout
                    .placement(parent)
                    .ok_or(RenderError::DanglingParent { child: id, parent })?;
                let (x1, y1) = from.bottom_center();
                let (x2, y2) = to.top_center();
                draw_line_segment_mut(&mut img, (x1 as f32, y1 as f32), (x2 as f32, y2 as f32), INK);
            }
        }
    }

    for individual in pedigree.individuals() {
        let id = individual.id();
        let placement = layout
            .placement(id)
            .ok_or(RenderError::MissingPlacement(id))?;

        for (row, col, allele) in individual.grid().iter() {
            let color = pedigree
                .palette()
                .color(allele)
                .ok_or(RenderError::MissingColor { id, pair: allele.pair })?;
            draw_filled_rect_mut(&mut img, cell_rect(placement, row, col), Rgba(color.to_rgba()));
        }
        draw_grid(&mut img, placement);
    }

    info!("rendered {}x{} preview image", width, height);
    Ok(img)
}

/// The pixel rectangle covered by one cell
fn cell_rect(placement: &Placement, row: usize, col: usize) -> Rect {
    let x = (placement.x + col as f64 * placement.cell_size).round() as i32;
    let y = (placement.y + row as f64 * placement.cell_size).round() as i32;
    let size = placement.cell_size.round().max(1.0) as u32;
    Rect::at(x, y).of_size(size, size)
}

fn draw_grid(img: &mut RgbaImage, placement: &Placement) {
    let block = placement.block_size() as f32;
    let (x0, y0) = (placement.x as f32, placement.y as f32);

    for i in 1..GRID_SIDE {
        let offset = (i as f64 * placement.cell_size) as f32;
        draw_line_segment_mut(img, (x0 + offset, y0), (x0 + offset, y0 + block), INK);
        draw_line_segment_mut(img, (x0, y0 + offset), (x0 + block, y0 + offset), INK);
    }

    let size = placement.block_size().round().max(1.0) as u32;
    let outline = Rect::at(placement.x.round() as i32, placement.y.round() as i32).of_size(size, size);
    draw_hollow_rect_mut(img, outline, INK);
}

fn draw_legend(img: &mut RgbaImage, pedigree: &Pedigree) {
    let pairs: BTreeSet<u8> = pedigree
        .founders()
        .iter()
        .filter_map(|&id| pedigree.get(id))
        .flat_map(|founder| founder.grid().cells().iter().map(|a| a.pair))
        .collect();

    let mut x = 8;
    for pair in pairs {
        for variant in [Variant::First, Variant::Second] {
            if let Some(color) = pedigree.palette().color(Allele::new(pair, variant)) {
                let swatch = Rect::at(x, 8).of_size(12, 12);
                draw_filled_rect_mut(img, swatch, Rgba(color.to_rgba()));
                draw_hollow_rect_mut(img, swatch, INK);
                x += 16;
            }
        }
    }
}
