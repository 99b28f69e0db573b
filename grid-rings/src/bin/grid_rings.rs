//! Declination ring analysis of pointing-model grid files
//!
//! Converts every calibration point of a `.grd` grid to declination and
//! hour angle, groups the points into declination rings, reports hour-angle
//! spacing per ring and fits ring population against cos(dec).
//!
//! Set `RUST_LOG=debug` for per-stage counts.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use grid_rings::report::{write_json, write_points, write_report};
use grid_rings::{AnalysisConfig, GridFile, RingAnalysis};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "grid_rings",
    about = "Finds declination rings in pointing-model calibration grids",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Cluster a grid into rings and print ring statistics and the power-law fit
    Analyze {
        /// Grid file (.grd)
        grid: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Print the analysis as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print every calibration point in equatorial coordinates
    Points {
        /// Grid file (.grd)
        grid: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Write the calibration points of a grid (slew-only points removed) to a new grid file
    Export {
        /// Source grid file (.grd)
        grid: PathBuf,

        /// Destination grid file
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON file with analysis parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Observer latitude in degrees (overrides the config file)
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Ring membership threshold in degrees (overrides the config file)
    #[arg(long)]
    threshold: Option<f64>,
}

impl ConfigArgs {
    fn resolve(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load_from_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(latitude) = self.latitude {
            config.observer_latitude_deg = latitude;
        }
        if let Some(threshold) = self.threshold {
            config.ring_threshold_deg = threshold;
        }
        log::debug!("Analysis config: {config:?}");
        Ok(config)
    }
}

fn analyze(path: &Path, config: &AnalysisConfig) -> Result<RingAnalysis> {
    RingAnalysis::from_grid_file(path, config)
        .with_context(|| format!("failed to analyze {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Analyze { grid, config, json } => {
            let analysis = analyze(&grid, &config.resolve()?)?;
            if json {
                write_json(&mut out, &analysis)?;
            } else {
                write_report(&mut out, &analysis)?;
            }
        }

        Commands::Points { grid, config } => {
            let analysis = analyze(&grid, &config.resolve()?)?;
            write_points(&mut out, &analysis.points)?;
        }

        Commands::Export { grid, output } => {
            let source = GridFile::read(&grid)
                .with_context(|| format!("failed to read {}", grid.display()))?;
            let retained = GridFile::new(
                source
                    .points
                    .iter()
                    .copied()
                    .filter(grid_rings::filter::is_calibration_point)
                    .collect(),
            );
            retained
                .save(&output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            writeln!(
                out,
                "Wrote {} of {} points to {}",
                retained.points.len(),
                source.points.len(),
                output.display()
            )?;
        }
    }

    out.flush()?;
    Ok(())
}
