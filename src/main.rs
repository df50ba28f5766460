use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use favicon_renderer::{RenderError, RenderProfile, SourceImage, render};

#[derive(Parser)]
#[command(
    name = "favicon-renderer",
    about = "Render an image into favicon-sized PNGs and an icons.zip bundle"
)]
struct Cli {
    /// Source image (PNG, JPEG or SVG)
    input: PathBuf,

    /// Directory to write icon<size>.png and icons.zip into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// JSON render profile to start from; other flags override it
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Target sizes in pixels (comma-separated)
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<u32>>,

    /// Corner radius as a percentage of the icon size
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    radius: Option<u8>,

    /// Background color as CSS hex, e.g. "#ffffff"
    #[arg(long, conflicts_with = "transparent")]
    background: Option<String>,

    /// Leave the background transparent
    #[arg(long)]
    transparent: bool,

    /// Skip writing icons.zip
    #[arg(long)]
    no_zip: bool,

    /// Print the <link rel="icon"> tags for the written files
    #[arg(long)]
    snippet: bool,
}

impl Cli {
    fn resolve_profile(&self) -> Result<RenderProfile, RenderError> {
        let mut profile = match &self.profile {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                RenderProfile::from_json(&json).map_err(|e| {
                    RenderError::InvalidConfig(format!("{}: {e}", path.display()))
                })?
            }
            None => RenderProfile::new(),
        };
        if let Some(sizes) = &self.sizes {
            profile = profile.with_sizes(sizes.clone());
        }
        if let Some(radius) = self.radius {
            profile = profile.with_corner_radius(radius);
        }
        if let Some(background) = &self.background {
            profile = profile.with_background(background.clone());
        }
        if self.transparent {
            profile = profile.with_transparent();
        }
        Ok(profile)
    }
}

fn run(cli: &Cli) -> Result<(), RenderError> {
    let config = cli.resolve_profile()?.to_config()?;
    let source = SourceImage::from_path(&cli.input)?;
    let output = render(&source, &config)?;

    let written = output.write_to_dir(&cli.output, !cli.no_zip)?;
    for path in &written {
        info!("wrote {}", path.display());
    }

    if cli.snippet {
        println!("{}", output.favicon_links().html_snippet(""));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
