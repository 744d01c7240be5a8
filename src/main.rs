use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::info;

use world_generator::ascii;
use world_generator::config::{self, WorldConfig};
use world_generator::error::WorldGenError;
use world_generator::export;
use world_generator::world;

#[derive(Parser, Debug)]
#[command(name = "world_generator")]
#[command(about = "Generate stylized world maps as colored text or PNG images")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the map as an ANSI-colored glyph grid on stdout
    Ascii {
        /// Map width in cells (defaults to the terminal width)
        #[arg(long)]
        width: Option<usize>,

        /// Map height in cells (defaults to the terminal height)
        #[arg(long)]
        height: Option<usize>,

        /// Master seed (random if not specified)
        #[arg(long)]
        seed: Option<u64>,

        /// Noise scale (lower = larger landmasses)
        #[arg(long, default_value_t = config::DEFAULT_SCALE)]
        scale: f64,
    },
    /// Write the map as a PNG image
    Graphics {
        /// Map width in cells
        #[arg(long, default_value_t = config::DEFAULT_WIDTH)]
        width: usize,

        /// Map height in cells
        #[arg(long, default_value_t = config::DEFAULT_HEIGHT)]
        height: usize,

        /// Master seed (random if not specified)
        #[arg(long)]
        seed: Option<u64>,

        /// Noise scale (lower = larger landmasses)
        #[arg(long, default_value_t = config::DEFAULT_SCALE)]
        scale: f64,

        /// Output image path
        #[arg(long, default_value = "world.png")]
        output: PathBuf,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), WorldGenError> {
    match cli.command {
        Command::Ascii {
            width,
            height,
            seed,
            scale,
        } => {
            let (width, height) = resolve_dimensions(width, height);
            let config = WorldConfig::new(width, height, resolve_seed(seed), scale)?;
            let map = world::generate(&config);
            print!("{}", ascii::render(&map));
            Ok(())
        }
        Command::Graphics {
            width,
            height,
            seed,
            scale,
            output,
        } => {
            let config = WorldConfig::new(width, height, resolve_seed(seed), scale)?;
            let map = world::generate(&config);
            export::save_png(&map, &output)?;
            println!("Saved image to {}", output.display());
            Ok(())
        }
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let seed = rand::random();
        info!("using random seed {}", seed);
        seed
    })
}

/// Fill missing dimensions from the terminal, falling back to the configured
/// defaults when the terminal cannot be probed.
fn resolve_dimensions(width: Option<usize>, height: Option<usize>) -> (usize, usize) {
    if let (Some(w), Some(h)) = (width, height) {
        return (w, h);
    }
    let (term_width, term_height) = match crossterm::terminal::size() {
        Ok((w, h)) => (w as usize, h as usize),
        Err(_) => (config::DEFAULT_WIDTH, config::DEFAULT_HEIGHT),
    };
    // Leave one terminal row free for the shell prompt.
    (
        width.unwrap_or(term_width.max(1)),
        height.unwrap_or(term_height.saturating_sub(1).max(1)),
    )
}
