//! Seamstress CLI - export sewing patterns from UV-unwrapped meshes.
//!
//! Usage:
//!   seamstress export <mesh> [-o out.svg] [-m auto|seam|off] [-f svg|png|json]
//!   seamstress info <mesh> [--json]
//!   seamstress detect <mesh> [-o marked.json]
//!
//! Set `RUST_LOG` or pass `-v`/`-vv` for log output on stderr.

mod cli;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use seamstress::{AlignmentMarkers, FileFormat};

use cli::export::ExportArgs;

#[derive(Parser)]
#[command(name = "seamstress")]
#[command(author, version, about = "Sewing pattern export for UV-unwrapped meshes", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the UV layout as a sewing pattern
    Export {
        /// Input mesh file (.obj or .json)
        input: PathBuf,

        /// Output file (default: <mesh name>.<format> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Which alignment markers to draw
        #[arg(short, long, value_enum)]
        markers: Option<MarkerMode>,

        /// Output format (default: from the output extension, else SVG)
        #[arg(short, long, value_enum)]
        format: Option<OutputKind>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Square canvas side in pixels
        #[arg(short, long, conflicts_with_all = ["width", "height"])]
        size: Option<u32>,

        /// YAML export settings; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also write the mesh (with detected seams) as JSON
        #[arg(long)]
        save_mesh: Option<PathBuf>,
    },

    /// Display mesh and UV island information
    Info {
        /// Input mesh file
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect sewing seams and list them
    Detect {
        /// Input mesh file
        input: PathBuf,

        /// Write the mesh with seams marked (.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MarkerMode {
    /// Outlines only
    Off,
    /// Markers on wire edges already marked as seams
    Seam,
    /// Detect sewing edges, mark them, then draw markers
    Auto,
}

impl From<MarkerMode> for AlignmentMarkers {
    fn from(mode: MarkerMode) -> Self {
        match mode {
            MarkerMode::Off => AlignmentMarkers::Off,
            MarkerMode::Seam => AlignmentMarkers::Seam,
            MarkerMode::Auto => AlignmentMarkers::Auto,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    /// SVG document
    Svg,
    /// Raster image on a white background
    Png,
    /// Pixel-space draw list
    Json,
}

impl From<OutputKind> for FileFormat {
    fn from(kind: OutputKind) -> Self {
        match kind {
            OutputKind::Svg => FileFormat::Svg,
            OutputKind::Png => FileFormat::Png,
            OutputKind::Json => FileFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise the `-v` count picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Export {
            input,
            output,
            markers,
            format,
            width,
            height,
            size,
            config,
            save_mesh,
        } => {
            let args = ExportArgs {
                input,
                output,
                config,
                save_mesh,
                overrides: cli::config::Overrides {
                    markers: markers.map(Into::into),
                    format: format.map(Into::into),
                    width: size.or(width),
                    height: size.or(height),
                },
            };
            cli::cmd_export(&args)?;
        }

        Commands::Info { input, json } => {
            cli::cmd_info(&input, json)?;
        }

        Commands::Detect { input, output } => {
            cli::cmd_detect(&input, output.as_deref())?;
        }
    }

    Ok(())
}
