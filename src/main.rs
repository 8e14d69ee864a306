use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use lessonmark::{Config, DocumentCache, Error, Format};

#[derive(Parser)]
#[command(name = "lessonmark")]
#[command(about = "Segment lesson text into typed blocks")]
struct Cli {
    /// Input lesson file (reads stdin when absent or `-`)
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format, overriding the config file
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Config file
    #[arg(short, long, default_value = "lessonmark.toml")]
    config: PathBuf,

    /// Do not attach inline runs to prose blocks
    #[arg(long)]
    no_runs: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut config = Config::load(&cli.config)?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.no_runs {
        config.output.runs = false;
    }

    let text = read_input(cli.input.as_deref())?;
    let mut cache = DocumentCache::new();
    let doc = cache.get(&text);
    log::info!("segmented {} blocks", doc.len());

    let rendered = lessonmark::render(&doc, &config)?;

    match cli.output {
        Some(path) => {
            fs::write(&path, rendered).map_err(|source| Error::WriteOutput {
                path: path.clone(),
                source,
            })?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered.trim_end()).map_err(|source| Error::WriteOutput {
                path: PathBuf::from("-"),
                source,
            })?;
        }
    }
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String, Error> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| Error::ReadInput {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => io::read_to_string(io::stdin()).map_err(|source| Error::ReadInput {
            path: PathBuf::from("-"),
            source,
        }),
    }
}
