// SVG output for a laid-out pedigree
//
// The document is assembled as a plain `String`: every element is one
// `format!` call, so the markup you see here is exactly what ends up in the file.

use crate::error::RenderError;
use crate::genes::{Allele, Color, Variant, GRID_SIDE};
use crate::layout::{Layout, Placement};
use crate::pedigree::{Individual, Pedigree};

use log::info;

use std::collections::BTreeSet;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const INK: &str = "#000000";
const PAPER: &str = "#ffffff";

/// Legend swatch side and the gap after it
const SWATCH_SIZE: f64 = 12.0;
const SWATCH_STEP: f64 = 16.0;

/// Render a complete, self-contained SVG document
///
/// The layout is checked against the pedigree first; a missing placement or a
/// parent without a placement is an error and nothing is rendered.
///
/// Output contains, in drawing order:
/// - a white background
/// - a legend with one swatch per color of every pair in use
/// - one label per generation row
/// - the descent lines (two per child, one from each parent)
/// - one `<g class="individual">` per individual with its 64 cells and grid lines
///
/// **Rust Concept: Result instead of panics**
/// A layout that doesn't match the pedigree is a bug in the caller, but it's
/// still reported as `Err(RenderError)` so the binary can print it and exit
/// cleanly instead of unwinding halfway through writing a file.
pub fn render(pedigree: &Pedigree, layout: &Layout) -> Result<String, RenderError> {
    layout.check(pedigree)?;

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"{SVG_NAMESPACE}\" version=\"1.1\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = layout.width,
        h = layout.height,
    ));
    svg.push_str(&format!(
        "  <title>Genetic inheritance over {} generations</title>\n",
        pedigree.generation_count()
    ));
    svg.push_str(&format!(
        "  <rect class=\"background\" x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{PAPER}\"/>\n",
        layout.width, layout.height
    ));

    render_legend(&mut svg, pedigree);
    render_labels(&mut svg, layout);

    // Lines go under the blocks so a block is never crossed by its own connector
    let mut lines = 0;
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
                render_descent(&mut svg, from, to);
                lines += 1;
            }
        }
    }

    for individual in pedigree.individuals() {
        let placement = layout
            .placement(individual.id())
            .ok_or(RenderError::MissingPlacement(individual.id()))?;
        render_individual(&mut svg, pedigree, individual, placement)?;
    }

    svg.push_str("</svg>\n");

    info!(
        "rendered SVG: {} individuals, {} descent lines, {} bytes",
        pedigree.len(),
        lines,
        svg.len()
    );
    Ok(svg)
}

/// Name of a generation row, counted up from the youngest
pub fn generation_label(generations_above_youngest: usize) -> String {
    match generations_above_youngest {
        0 => "Child".to_string(),
        1 => "Parents".to_string(),
        2 => "Grandparents".to_string(),
        n => format!("{}grandparents", "Great-".repeat(n - 2)),
    }
}

fn render_legend(svg: &mut String, pedigree: &Pedigree) {
    // Pairs actually carried by the founders (descendants can't add new ones)
    let pairs: BTreeSet<u8> = pedigree
        .founders()
        .iter()
        .filter_map(|&id| pedigree.get(id))
        .flat_map(|founder| founder.grid().cells().iter().map(|a| a.pair))
        .collect();

    svg.push_str("  <g class=\"legend\">\n");
    let mut x = 8.0;
    for pair in pairs {
        for variant in [Variant::First, Variant::Second] {
            let allele = Allele::new(pair, variant);
            if let Some(color) = pedigree.palette().color(allele) {
                svg.push_str(&format!(
                    "    <rect class=\"swatch\" x=\"{x}\" y=\"8\" width=\"{SWATCH_SIZE}\" height=\"{SWATCH_SIZE}\" fill=\"{color}\" stroke=\"{INK}\" stroke-width=\"0.5\"><title>pair {pair} {}</title></rect>\n",
                    variant_name(variant),
                ));
                x += SWATCH_STEP;
            }
        }
    }
    svg.push_str("  </g>\n");
}

fn render_labels(svg: &mut String, layout: &Layout) {
    let rows = layout.row_tops.len();
    for (index, top) in layout.row_tops.iter().enumerate() {
        let label = generation_label(rows - 1 - index);
        svg.push_str(&format!(
            "  <text class=\"generation-label\" x=\"8\" y=\"{}\" font-family=\"sans-serif\" font-size=\"14\" fill=\"{INK}\">{}</text>\n",
            top + 48.0,
            escape_xml(&label)
        ));
    }
}

/// One line from the bottom of a parent's block to the top of the child's
fn render_descent(svg: &mut String, parent: &Placement, child: &Placement) {
    let (x1, y1) = parent.bottom_center();
    let (x2, y2) = child.top_center();
    svg.push_str(&format!(
        "  <line class=\"descent\" x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{INK}\" stroke-width=\"1\"/>\n"
    ));
}

fn render_individual(
    svg: &mut String,
    pedigree: &Pedigree,
    individual: &Individual,
    placement: &Placement,
) -> Result<(), RenderError> {
    let id = individual.id();
    let cell = placement.cell_size;

    svg.push_str(&format!(
        "  <g class=\"individual\" id=\"individual-{}\" data-generation=\"{}\" transform=\"translate({},{})\">\n",
        id.index(),
        individual.generation(),
        placement.x,
        placement.y
    ));

    let role = match individual.parents() {
        None => "founder".to_string(),
        Some((a, b)) => format!("child of {a} and {b}"),
    };
    svg.push_str(&format!(
        "    <title>{}</title>\n",
        escape_xml(&format!("{id}, generation {}, {role}", individual.generation() + 1))
    ));

    for (row, col, allele) in individual.grid().iter() {
        let color: Color = pedigree
            .palette()
            .color(allele)
            .ok_or(RenderError::MissingColor { id, pair: allele.pair })?;
        svg.push_str(&format!(
            "    <rect class=\"cell\" x=\"{}\" y=\"{}\" width=\"{cell}\" height=\"{cell}\" fill=\"{color}\"/>\n",
            col as f64 * cell,
            row as f64 * cell
        ));
    }

    svg.push_str(&format!(
        "    <path class=\"grid\" d=\"{}\" fill=\"none\" stroke=\"{INK}\" stroke-width=\"1\"/>\n",
        grid_path(placement.block_size(), cell)
    ));
    svg.push_str("  </g>\n");
    Ok(())
}

/// Outline plus the seven inner lines in each direction
fn grid_path(block: f64, cell: f64) -> String {
    let mut d = format!("M0,0H{block}V{block}H0Z");
    for i in 1..GRID_SIDE {
        let offset = i as f64 * cell;
        d.push_str(&format!("M{offset},0V{block}M0,{offset}H{block}"));
    }
    d
}

fn variant_name(variant: Variant) -> &'static str {
    match variant {
        Variant::First => "first",
        Variant::Second => "second",
    }
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genes::{Palette, GRID_CELLS};
    use crate::inheritance::{FounderMode, InheritanceParams};
    use crate::layout::{layout, LayoutConfig};

    fn pedigree(generations: u32) -> Pedigree {
        let params = InheritanceParams {
            generations,
            seed: Some(42),
            ..InheritanceParams::default()
        };
        Pedigree::build(&params).unwrap()
    }

    /// Split the document into the bodies of the individual groups
    fn individual_groups(svg: &str) -> Vec<&str> {
        svg.split("<g class=\"individual\"")
            .skip(1)
            .map(|rest| &rest[..rest.find("</g>").unwrap()])
            .collect()
    }

    #[test]
    fn test_two_generation_scenario() {
        let pedigree = pedigree(2);
        let layout = layout(&pedigree);
        let svg = render(&pedigree, &layout).unwrap();

        // 2 founders + 1 child, 64 cells each
        let groups = individual_groups(&svg);
        assert_eq!(groups.len(), 3);
        for group in &groups {
            assert_eq!(group.matches("<rect").count(), GRID_CELLS);
        }

        // One line from each parent to the child
        assert_eq!(svg.matches("<line").count(), 2);

        // Canvas is two rows tall
        let row_height = LayoutConfig::default().row_height;
        assert!(svg.contains(&format!("height=\"{}\"", 2.0 * row_height)));
    }

    #[test]
    fn test_counts_for_every_depth() {
        for generations in 2..=4 {
            let pedigree = pedigree(generations);
            let svg = render(&pedigree, &layout(&pedigree)).unwrap();

            assert_eq!(individual_groups(&svg).len(), pedigree.len());
            assert_eq!(svg.matches("class=\"cell\"").count(), pedigree.len() * GRID_CELLS);
            assert_eq!(
                svg.matches("<line").count(),
                pedigree.descendants().count() * 2
            );
        }
    }

    #[test]
    fn test_document_root() {
        let pedigree = pedigree(3);
        let layout = layout(&pedigree);
        let svg = render(&pedigree, &layout).unwrap();

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg "));
        assert!(svg.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains(&format!("viewBox=\"0 0 {} {}\"", layout.width, layout.height)));
        assert!(svg.trim_end().ends_with("</svg>"));

        // Self-contained: no links to anything outside the document
        assert!(!svg.contains("href"));
        assert!(!svg.contains("url("));
    }

    #[test]
    fn test_tags_are_balanced() {
        let pedigree = pedigree(4);
        let svg = render(&pedigree, &layout(&pedigree)).unwrap();

        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert_eq!(svg.matches("<title>").count(), svg.matches("</title>").count());
        assert_eq!(svg.matches("<text ").count(), svg.matches("</text>").count());
        assert_eq!(svg.matches("<svg ").count(), 1);
        assert_eq!(svg.matches("</svg>").count(), 1);
    }

    #[test]
    fn test_cells_use_palette_colors() {
        let params = InheritanceParams {
            generations: 2,
            seed: Some(1),
            founder_mode: FounderMode::Solid,
            ..InheritanceParams::default()
        };
        let pedigree = Pedigree::build(&params).unwrap();
        let svg = render(&pedigree, &layout(&pedigree)).unwrap();
        let groups = individual_groups(&svg);

        // Solid founders of pair 0: black and white
        assert_eq!(groups[0].matches("fill=\"#000000\"").count(), GRID_CELLS);
        assert_eq!(groups[1].matches("fill=\"#ffffff\"").count(), GRID_CELLS);

        // The child only carries those two colors
        let cells = groups[2].matches("class=\"cell\"").count();
        let black_or_white = groups[2].matches("fill=\"#000000\"").count()
            + groups[2].matches("fill=\"#ffffff\"").count();
        assert_eq!(cells, GRID_CELLS);
        assert_eq!(black_or_white, GRID_CELLS);
    }

    #[test]
    fn test_legend_has_a_swatch_per_color_in_use() {
        let pedigree = pedigree(4);
        let svg = render(&pedigree, &layout(&pedigree)).unwrap();

        // 8 founders use 4 pairs: 8 colors
        assert_eq!(svg.matches("class=\"swatch\"").count(), 8);
        for (first, second) in (0..4).filter_map(|i| Palette::default().pair(i)) {
            assert!(svg.contains(&format!("fill=\"{first}\" stroke")));
            assert!(svg.contains(&format!("fill=\"{second}\" stroke")));
        }
    }

    #[test]
    fn test_generation_labels() {
        assert_eq!(generation_label(0), "Child");
        assert_eq!(generation_label(1), "Parents");
        assert_eq!(generation_label(2), "Grandparents");
        assert_eq!(generation_label(3), "Great-grandparents");
        assert_eq!(generation_label(4), "Great-Great-grandparents");

        let pedigree = pedigree(4);
        let svg = render(&pedigree, &layout(&pedigree)).unwrap();
        assert_eq!(svg.matches("class=\"generation-label\"").count(), 4);
        assert!(svg.contains(">Great-grandparents</text>"));
        assert!(svg.contains(">Child</text>"));
    }

    #[test]
    fn test_missing_individual_is_an_error() {
        let pedigree = pedigree(3);
        let mut layout = layout(&pedigree);
        let youngest = pedigree.generation(2)[0];
        layout.remove(youngest);

        assert_eq!(
            render(&pedigree, &layout),
            Err(RenderError::MissingPlacement(youngest))
        );
    }

    #[test]
    fn test_dangling_parent_is_an_error() {
        let pedigree = pedigree(2);
        let mut layout = layout(&pedigree);
        let founder = pedigree.founders()[0];
        layout.remove(founder);

        assert_eq!(
            render(&pedigree, &layout),
            Err(RenderError::DanglingParent {
                child: pedigree.generation(1)[0],
                parent: founder,
            })
        );
    }

    #[test]
    fn test_layout_from_other_pedigree_is_rejected() {
        let small = pedigree(2);
        let large = pedigree(3);
        assert!(render(&large, &layout(&small)).is_err());
    }

    #[test]
    fn test_layout_of_larger_pedigree_is_rejected() {
        // The other direction: all of the small pedigree is placed, plus extras
        let small = pedigree(2);
        let large = pedigree(3);

        assert_eq!(
            render(&small, &layout(&large)),
            Err(RenderError::PlacementCount {
                placed: 7,
                individuals: 3
            })
        );
    }

    #[test]
    fn test_same_input_same_output() {
        let pedigree = pedigree(3);
        let layout = layout(&pedigree);
        assert_eq!(render(&pedigree, &layout), render(&pedigree, &layout));
    }

    #[test]
    fn test_grid_path_has_outline_and_inner_lines() {
        let d = grid_path(80.0, 10.0);
        assert!(d.starts_with("M0,0H80V80H0Z"));
        assert_eq!(d.matches('M').count(), 1 + 2 * (GRID_SIDE - 1));
        assert!(d.contains("M70,0V80M0,70H80"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
