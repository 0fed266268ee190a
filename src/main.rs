// Import the clap Parser derive macro for CLI argument parsing
use clap::Parser;

// Import our library types
use genetic_inheritance::{
    layout, render, render_png, FounderMode, InheritanceParams, Palette, Pedigree,
    MAX_GENERATIONS, MIN_GENERATIONS,
};

use log::info;

// Import standard library modules
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Genetic Inheritance Visualizer - watch traits pass down a family tree
///
/// Every person is an 8x8 grid of colored cells. Each child cell is copied
/// from one parent or the other by its own coin flip, and the whole family
/// is saved as an SVG diagram.
#[derive(Parser)]
#[command(name = "genetic-inheritance")]
#[command(about = "Simulate and draw genetic inheritance over 2-4 generations", long_about = None)]
#[command(version)]
struct Args {
    /// Number of generations to show (2-4)
    ///
    /// If left out, you'll be asked for it interactively.
    #[arg(short, long)]
    generations: Option<u32>,

    /// Random seed for a reproducible family
    ///
    /// The same seed and generation count always give the same diagram.
    #[arg(short, long)]
    seed: Option<u64>,

    /// How founders are colored (random or solid)
    ///
    /// - random: each cell is a coin flip between the two colors of a pair
    /// - solid: each founder is a single color, so every cell shows its origin
    #[arg(short, long, default_value = "random")]
    founders: String,

    /// JSON palette file: {"pairs": [["#000000", "#ffffff"], ...]}
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Output SVG file
    ///
    /// Defaults to genetic_inheritance_<N>gen_<timestamp>.svg
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also save a PNG preview to this path
    #[arg(long)]
    png: Option<PathBuf>,

    /// Also save the pedigree (grids and parents) as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

/// Main entry point for the CLI application
fn main() {
    // RUST_LOG=debug shows per-generation detail; info is the default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Build the family, render it, and write the requested files
fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    println!("\nGenetic Inheritance Visualization Generator");
    println!("==========================================");

    let generations = match args.generations {
        Some(n) => n,
        None => prompt_generations(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let founder_mode: FounderMode = args.founders.parse()?;

    let palette = match &args.palette {
        Some(path) => {
            info!("loading palette from {}", path.display());
            Palette::from_json(&fs::read_to_string(path)?)?
        }
        None => Palette::default(),
    };

    let params = InheritanceParams {
        generations,
        seed: args.seed,
        founder_mode,
        palette,
    };

    // Step 1: simulate inheritance
    let pedigree = Pedigree::build(&params)?;

    // Step 2: lay out and render
    let layout = layout(&pedigree);
    let svg = render(&pedigree, &layout)?;

    // Step 3: write the files
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_file_name(generations)));
    fs::write(&output, svg)?;

    if let Some(path) = &args.png {
        render_png(&pedigree, &layout)?.save(path)?;
        println!("PNG preview: {}", path.display());
    }

    if let Some(path) = &args.json {
        fs::write(path, pedigree.to_json()?)?;
        println!("Pedigree data: {}", path.display());
    }

    println!(
        "\nYour {}-generation genetic inheritance diagram has been created!",
        generations
    );
    println!("File generated: {}", output.display());
    println!("\nEach cell of a child was inherited from one parent or the other");
    println!("by its own coin flip. Open the SVG file in any web browser to view it.");

    Ok(())
}

/// Ask for the generation count until a number in range is entered
///
/// Returns an error only if input runs out before a valid answer.
fn prompt_generations(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<u32, Box<dyn std::error::Error>> {
    loop {
        write!(
            output,
            "\nEnter number of generations ({}-{}): ",
            MIN_GENERATIONS, MAX_GENERATIONS
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err("no generation count given".into());
        }

        match line.trim().parse::<u32>() {
            Ok(n) if (MIN_GENERATIONS..=MAX_GENERATIONS).contains(&n) => return Ok(n),
            Ok(_) => writeln!(
                output,
                "Please enter a number between {} and {}.",
                MIN_GENERATIONS, MAX_GENERATIONS
            )?,
            Err(_) => writeln!(output, "Please enter a valid number.")?,
        }
    }
}

/// genetic_inheritance_3gen_2024-05-01_14-30-00.svg
fn default_file_name(generations: u32) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("genetic_inheritance_{}gen_{}.svg", generations, timestamp)
}
