//! Export command implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use seamstress::{
    DrawList, ExportConfig, FileFormat, default_output_path, export_pattern, load_mesh,
    output_path, save_mesh, to_svg,
};

use super::config::{Overrides, load_config};
use super::render::write_png;

/// Everything the export command needs.
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub save_mesh: Option<PathBuf>,
    pub overrides: Overrides,
}

/// Settings precedence: flags, then the output extension (format only),
/// then the config file, then defaults.
pub fn resolve_config(args: &ExportArgs) -> Result<ExportConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ExportConfig::default(),
    };

    if args.overrides.format.is_none() {
        let from_extension = args
            .output
            .as_deref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(FileFormat::from_name);
        if let Some(format) = from_extension {
            config.format = format;
        }
    }

    args.overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

pub fn cmd_export(args: &ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    let start = Instant::now();

    let mut mesh = load_mesh(&args.input)?;
    let list = export_pattern(&mut mesh, &config)?;

    let out = match &args.output {
        Some(path) => output_path(path, config.format),
        None => default_output_path(&args.input, mesh.name(), config.format),
    };
    if same_file(&out, &args.input) {
        return Err(format!("refusing to overwrite input mesh {}", args.input.display()).into());
    }

    write_pattern(&list, config.format, &out)?;

    if let Some(mesh_path) = &args.save_mesh {
        save_mesh(&mesh, mesh_path)?;
        eprintln!("Wrote: {}", mesh_path.display());
    }

    let stats = list.stats();
    info!("Export took {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
    eprintln!(
        "Wrote: {} ({}x{}, {} pieces, {} markers)",
        out.display(),
        list.width,
        list.height,
        stats.pieces,
        stats.markers
    );
    Ok(())
}

/// Write a draw list in the given format.
pub fn write_pattern(list: &DrawList, format: FileFormat, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        FileFormat::Svg => {
            fs::write(path, to_svg(list)?)?;
        }
        FileFormat::Png => {
            write_png(&to_svg(list)?, list.width, list.height, path)?;
        }
        FileFormat::Json => {
            fs::write(path, serde_json::to_string_pretty(list)?)?;
        }
    }
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
