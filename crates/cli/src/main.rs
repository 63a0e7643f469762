//! Morpho CLI - mathematical morphology on image files

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use morpho_algorithms::distance::compute_distance;
use morpho_algorithms::hitormiss::fast_skiz;
use morpho_algorithms::labelling::label;
use morpho_algorithms::morphology::{
    black_top_hat, closing, dilate, erode, gradient, opening, white_top_hat, StructuringElement,
};
use morpho_algorithms::point::{compute_range, compute_volume, threshold};
use morpho_algorithms::reconstruction::{build, dual_build};
use morpho_algorithms::segmentation::{enhanced_waterfalls, marker_controlled_watershed};
use morpho_core::io::{read_image, read_image_3d, write_image};
use morpho_core::{Context, Depth, Edge, Grid, Image, Volume};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "morpho")]
#[command(author, version, about = "Mathematical morphology on packed images", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Sampling grid: square, hexagonal (default: square)
    #[arg(short, long, global = true)]
    grid: Option<Grid>,

    /// Value of pixels outside the frame: empty or filled (default: filled)
    #[arg(short, long, global = true)]
    edge: Option<Edge>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about an image file
    Info {
        /// Input image
        input: PathBuf,
    },
    /// Binary image of the pixels within [low, high]
    Threshold {
        /// Input 8 or 32-bit image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[arg(long)]
        low: u32,
        #[arg(long)]
        high: u32,
    },
    /// Erosion by the full neighborhood of the grid
    Erode {
        /// Input image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Number of unit erosions
        #[arg(short, long, default_value = "1")]
        size: usize,
    },
    /// Dilation by the full neighborhood of the grid
    Dilate {
        /// Input image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        /// Number of unit dilations
        #[arg(short, long, default_value = "1")]
        size: usize,
    },
    /// Opening (erosion then dilation), removes small bright features
    Open {
        /// Input image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[arg(short, long, default_value = "1")]
        size: usize,
    },
    /// Closing (dilation then erosion), removes small dark features
    Close {
        /// Input image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[arg(short, long, default_value = "1")]
        size: usize,
    },
    /// Morphological gradient (dilation - erosion)
    Gradient {
        /// Input image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[arg(short, long, default_value = "1")]
        size: usize,
    },
    /// Top-hat: image minus its opening, or closing minus image with --black
    TopHat {
        /// Input image
        input: PathBuf,
        /// Output file
        output: PathBuf,
        #[arg(short, long, default_value = "1")]
        size: usize,
        /// Black top-hat instead of white
        #[arg(long)]
        black: bool,
    },
    /// Geodesic reconstruction of a marker under a mask
    Build {
        /// Mask image
        mask: PathBuf,
        /// Marker image, same size and depth as the mask
        marker: PathBuf,
        /// Output file
        output: PathBuf,
        /// Reconstruction by erosion instead of dilation
        #[arg(long)]
        dual: bool,
    },
    /// Label the connected components of a binary image
    Label {
        /// Input binary image
        input: PathBuf,
        /// Output file (32-bit labels)
        output: PathBuf,
    },
    /// Distance of each foreground pixel to the background
    Distance {
        /// Input binary image
        input: PathBuf,
        /// Output file (32-bit distances)
        output: PathBuf,
    },
    /// Watershed lines of a relief from binary markers
    Watershed {
        /// Relief (8 or 32-bit)
        relief: PathBuf,
        /// Binary markers
        markers: PathBuf,
        /// Output file (lines at the maximum value)
        output: PathBuf,
    },
    /// Skeleton by zones of influence of binary particles
    Skiz {
        /// Input binary image
        input: PathBuf,
        /// Output file
        output: PathBuf,
    },
    /// Enhanced waterfalls hierarchy of a relief
    Waterfalls {
        /// Relief (8 or 32-bit)
        relief: PathBuf,
        /// Output file (contours valued by hierarchy level)
        output: PathBuf,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

fn spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

fn read(path: &Path) -> Result<Image> {
    let pb = spinner("Reading image...")?;
    let image =
        read_image(path).with_context(|| format!("Failed to read {}", path.display()))?;
    pb.finish_and_clear();
    info!(
        "Input: {} x {}, {}-bit",
        image.width(),
        image.height(),
        image.depth().bits()
    );
    Ok(image)
}

fn write(image: &Image, path: &Path) -> Result<()> {
    let pb = spinner("Writing output...")?;
    write_image(path, image).context("Failed to write output")?;
    pb.finish_and_clear();
    Ok(())
}

fn done(name: &str, path: &Path, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

/// Run `op` on a copy of `input` and save the result.
fn run<F>(name: &str, input: &Path, output: &Path, op: F) -> Result<()>
where
    F: FnOnce(&Image, &mut Image) -> morpho_core::Result<()>,
{
    let image = read(input)?;
    let mut out = image.clone();
    let start = Instant::now();
    op(&image, &mut out).with_context(|| format!("{} failed", name))?;
    let elapsed = start.elapsed();
    write(&out, output)?;
    done(name, output, elapsed);
    Ok(())
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let mut ctx = Context::new();
    if let Some(grid) = cli.grid {
        ctx.set_default_grid(grid);
    }
    if let Some(edge) = cli.edge {
        ctx.set_default_edge(edge);
    }
    let grid = ctx.default_grid(2)?;
    let edge = ctx.default_edge();
    let se = StructuringElement::full(grid);
    debug!("grid {}, edge {:?}", grid, edge);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let image = read_image_3d(&input).context("Failed to read image")?;
            let (w, h, l) = image.size();
            let (min, max) = compute_range(&image)?;
            println!("File: {}", input.display());
            println!("Dimensions: {} x {} x {} ({} pixels)", w, h, l, image.pixel_count());
            println!("Depth: {} bits", image.depth().bits());
            println!("\nStatistics:");
            println!("  Min: {}", min);
            println!("  Max: {}", max);
            println!("  Volume: {}", compute_volume(&image)?);
        }

        // ── Point ────────────────────────────────────────────────────
        Commands::Threshold {
            input,
            output,
            low,
            high,
        } => {
            let image = read(&input)?;
            let mut out = image.blank_like(Depth::Binary)?;
            let start = Instant::now();
            threshold(&image, low, high, &mut out).context("Failed to threshold")?;
            let elapsed = start.elapsed();
            write(&out, &output)?;
            done("Threshold", &output, elapsed);
        }

        // ── Morphology ───────────────────────────────────────────────
        Commands::Erode {
            input,
            output,
            size,
        } => run("Erode", &input, &output, |a, out| {
            erode(a, out, size, &se, edge)
        })?,

        Commands::Dilate {
            input,
            output,
            size,
        } => run("Dilate", &input, &output, |a, out| {
            dilate(a, out, size, &se, Edge::Empty)
        })?,

        Commands::Open {
            input,
            output,
            size,
        } => run("Opening", &input, &output, |a, out| {
            opening(a, out, size, &se, edge)
        })?,

        Commands::Close {
            input,
            output,
            size,
        } => run("Closing", &input, &output, |a, out| {
            closing(a, out, size, &se, edge)
        })?,

        Commands::Gradient {
            input,
            output,
            size,
        } => run("Gradient", &input, &output, |a, out| {
            gradient(a, out, size, &se)
        })?,

        Commands::TopHat {
            input,
            output,
            size,
            black,
        } => run("Top-hat", &input, &output, |a, out| {
            if black {
                black_top_hat(a, out, size, &se)
            } else {
                white_top_hat(a, out, size, &se)
            }
        })?,

        // ── Reconstruction ───────────────────────────────────────────
        Commands::Build {
            mask,
            marker,
            output,
            dual,
        } => {
            let mask = read(&mask)?;
            let mut out = read(&marker)?;
            let start = Instant::now();
            if dual {
                dual_build(&mask, &mut out, grid).context("Failed to reconstruct")?;
            } else {
                build(&mask, &mut out, grid).context("Failed to reconstruct")?;
            }
            let elapsed = start.elapsed();
            write(&out, &output)?;
            done("Reconstruction", &output, elapsed);
        }

        // ── Labelling and distance ───────────────────────────────────
        Commands::Label { input, output } => {
            let image = read(&input)?;
            let mut out = image.blank_like(Depth::Long)?;
            let start = Instant::now();
            let count = label(&image, &mut out, grid).context("Failed to label")?;
            let elapsed = start.elapsed();
            info!("{} components", count);
            write(&out, &output)?;
            done("Labels", &output, elapsed);
        }

        Commands::Distance { input, output } => {
            let image = read(&input)?;
            let mut out = image.blank_like(Depth::Long)?;
            let start = Instant::now();
            compute_distance(&image, &mut out, grid, edge).context("Failed to compute distance")?;
            let elapsed = start.elapsed();
            write(&out, &output)?;
            done("Distance", &output, elapsed);
        }

        // ── Segmentation ─────────────────────────────────────────────
        Commands::Watershed {
            relief,
            markers,
            output,
        } => {
            let relief = read(&relief)?;
            let markers = read(&markers)?;
            let mut out = relief.blank_like(relief.depth())?;
            let start = Instant::now();
            let count = marker_controlled_watershed(&relief, &markers, &mut out, grid)
                .context("Failed to compute watershed")?;
            let elapsed = start.elapsed();
            info!("{} markers", count);
            write(&out, &output)?;
            done("Watershed", &output, elapsed);
        }

        Commands::Skiz { input, output } => run("SKIZ", &input, &output, |a, out| {
            fast_skiz(a, out, grid)
        })?,

        Commands::Waterfalls { relief, output } => {
            let relief = read(&relief)?;
            let mut out = relief.blank_like(relief.depth())?;
            let start = Instant::now();
            let levels =
                enhanced_waterfalls(&relief, &mut out, grid).context("Failed to compute waterfalls")?;
            let elapsed = start.elapsed();
            info!("{} hierarchy levels", levels);
            write(&out, &output)?;
            done("Waterfalls", &output, elapsed);
        }
    }

    Ok(())
}
