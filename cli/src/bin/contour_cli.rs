use clap::{Parser, Subcommand};
use cli::{load_image, run_extraction, ExtractionConfig};
use color_eyre::eyre::Result;
use edge_contours::{ContourSource, FileViewer, NullViewer};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract external contours from a single image
    Extract {
        /// Path to the input image
        #[arg(short, long)]
        image: PathBuf,
        /// Weak-edge cutoff for Canny
        #[arg(long, default_value = "100")]
        low: f32,
        /// Strong-edge cutoff for Canny
        #[arg(long, default_value = "200")]
        high: f32,
        /// Side of the square closing kernel (positive, odd)
        #[arg(short, long, default_value = "5")]
        kernel: u32,
        /// Edge map that feeds contour extraction: closed or edges
        #[arg(long, default_value = "closed")]
        source: ContourSource,
        /// Directory receiving the stage images
        #[arg(short, long, default_value = "contour_stages")]
        output_dir: PathBuf,
        /// Skip writing stage images
        #[arg(long)]
        no_display: bool,
        /// Print the contour summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Extract contours using a TOML or JSON configuration file
    Process {
        /// Path to the configuration file
        #[arg(short, long)]
        config: PathBuf,
        /// Print the contour summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            image,
            low,
            high,
            kernel,
            source,
            output_dir,
            no_display,
            json,
        } => {
            let config = ExtractionConfig {
                image_path: image,
                low_threshold: low,
                high_threshold: high,
                kernel_size: kernel,
                contour_source: source,
                output_dir: (!no_display).then_some(output_dir),
            };
            extract(&config, json)?;
        }
        Commands::Process { config, json } => {
            let config = ExtractionConfig::from_file(&config)?;
            info!("Configuration: {:?}", config);
            extract(&config, json)?;
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&ExtractionConfig::schema())?);
        }
    }

    Ok(())
}

fn extract(config: &ExtractionConfig, json: bool) -> Result<()> {
    let image = load_image(&config.image_path)?;

    let contours = match &config.output_dir {
        Some(dir) => {
            let mut viewer = FileViewer::new(dir);
            let contours = run_extraction(config, &image, &mut viewer)?;
            info!("Stage images written to {:?}", viewer.dir());
            contours
        }
        None => run_extraction(config, &image, &mut NullViewer)?,
    };

    if json {
        println!("{}", contours.to_json()?);
    }

    info!("✅ Found {} contours", contours.contours.len());
    Ok(())
}
