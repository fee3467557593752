use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use ukpopmap::palette::PaletteKind;
use ukpopmap::render::{self, BarsRequest, MapRequest};
use ukpopmap::selection::{AgeGroup, Gender, Year};
use ukpopmap::{OutputFormat, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "ukpopmap")]
#[command(about = "Render UK population density maps and bar charts from CSV data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Choropleth map of population density by Local Authority District
    Map {
        #[arg(long, value_enum, default_value = "2022")]
        year: Year,
        #[arg(long, value_enum, default_value = "both")]
        gender: Gender,
        #[arg(long, value_enum, default_value = "all")]
        age_group: AgeGroup,
        /// Colour ramp for the density fill
        #[arg(long, value_enum, default_value = "magma")]
        palette: PaletteKind,
        /// Boundary GeoJSON file (defaults to the LAD file inside the data directory)
        #[arg(long)]
        boundaries: Option<PathBuf>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Bar chart of population by single year of age
    Bars {
        #[arg(long, value_enum, default_value = "2022")]
        year: Year,
        #[arg(long, value_enum, default_value = "both")]
        gender: Gender,
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Directory holding the CSV and GeoJSON inputs
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    #[arg(long, default_value_t = 1024)]
    width: u32,
    #[arg(long, default_value_t = 800)]
    height: u32,
    #[arg(long, value_enum, default_value = "png")]
    format: OutputFormat,
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl CommonArgs {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            height: self.height,
            format: self.format,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Map {
            year,
            gender,
            age_group,
            palette,
            boundaries,
            common,
        } => {
            let req = MapRequest {
                year,
                gender,
                age_group,
                palette,
            };
            let bytes = render::render_map(
                &common.data_dir,
                boundaries.as_deref(),
                &req,
                &common.render_options(),
            )
            .context("Failed to render map")?;
            write_output(common.output.as_deref(), &bytes)
        }
        Command::Bars {
            year,
            gender,
            common,
        } => {
            let req = BarsRequest { year, gender };
            let bytes = render::render_bars(&common.data_dir, &req, &common.render_options())
                .context("Failed to render bar chart")?;
            write_output(common.output.as_deref(), &bytes)
        }
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => fs::write(path, bytes)
            .with_context(|| format!("Failed to write output to '{}'", path.display())),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(bytes)
                .context("Failed to write output to stdout")?;
            handle.flush().context("Failed to flush stdout")
        }
    }
}
