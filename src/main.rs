use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use gamma_sky_viz::app;
use gamma_sky_viz::data::{loader, transform};
use gamma_sky_viz::ui::plot::{render_figure, FigureOptions};
use gamma_sky_viz::SkyError;

/// Visualizes the gamma skies produced by gamma_sky.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// H5 file created by gamma_sky
    #[arg(value_name = "GAMMA_SKY_FILE")]
    gamma_sky_file: PathBuf,

    /// Index of the energy
    #[arg(allow_negative_numbers = true)]
    energy_index: i64,

    /// Save the plot instead of showing it
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Create a logarithmic plot
    #[arg(long)]
    log: bool,

    /// Figure width in pixels
    #[arg(long, default_value_t = FigureOptions::default().width)]
    width: u32,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(SkyError::EnergyIndexOutOfRange { index, .. }) = e.downcast_ref::<SkyError>() {
                println!("error: invalid energy index \"{index}\".");
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let bin = loader::read_data(&args.gamma_sky_file, args.energy_index)
        .with_context(|| format!("reading {}", args.gamma_sky_file.display()))?;
    let map = transform::to_display_units(bin, args.log);
    let figure = render_figure(&map, &FigureOptions { width: args.width })
        .context("rendering the sky map")?;

    match &args.save {
        Some(path) => figure
            .save(path)
            .with_context(|| format!("saving {}", path.display()))?,
        None => app::show(figure).map_err(|e| anyhow!("sky map window failed: {e}"))?,
    }
    Ok(())
}
