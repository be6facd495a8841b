use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use transport_catalogue::input::Dataset;
use transport_catalogue::map;
use transport_catalogue::request;
use transport_catalogue::settings::RenderSettings;
use transport_catalogue::svg::{Renderer, SvgRenderer};

#[derive(Parser, Debug)]
#[command(version, about = "Transit network statistics and schematic maps")]
struct Args {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a JSON request document
    Query {
        /// Request document, stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Response document, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Draw a CSV dataset as an SVG map
    Render {
        /// Directory with stops.csv, distances.csv and buses.csv
        #[arg(short, long)]
        dataset: PathBuf,

        /// JSON file with render settings
        #[arg(short, long)]
        settings: PathBuf,

        /// SVG output, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("transport_catalogue={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", level);
}

fn writer(path: Option<&PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    match args.command {
        Command::Query { input, output } => {
            let out = writer(output.as_ref())?;
            match input {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    request::process(BufReader::new(file), out)?;
                }
                None => request::process(io::stdin().lock(), out)?,
            }
        }
        Command::Render {
            dataset,
            settings,
            output,
        } => {
            let catalogue = Dataset::from_dir(&dataset)
                .and_then(Dataset::into_catalogue)
                .with_context(|| format!("loading dataset {}", dataset.display()))?;

            let settings: RenderSettings = serde_json::from_reader(BufReader::new(
                File::open(&settings)
                    .with_context(|| format!("opening {}", settings.display()))?,
            ))?;

            let directives = map::compose(&catalogue, &settings)?;
            info!(directives = directives.len(), "Rendering map");

            let mut out = writer(output.as_ref())?;
            out.write_all(SvgRenderer::default().render(&directives).as_bytes())?;
            out.flush()?;
        }
    }

    Ok(())
}
