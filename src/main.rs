extern crate pretty_logger;
#[macro_use] extern crate log;
use log::LogLevelFilter;

mod config;
mod gallery;
mod prompt;
mod service;
mod shelf;

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use url::Url;
use config::{Config, SERVER_ENV};
use shelf::{error::Error, Shelf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true, help="Image service base url")]
    server: Option<Url>,

    #[arg(short, long, global = true, help="Print debug logs")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List uploaded images
    List,
    /// Show one image
    Show {
        #[arg(short, long, help="Image id")]
        id: String,
    },
    /// Upload an image file
    Upload {
        #[arg(short, long, help="Image file to upload")]
        file: PathBuf,
    },
    /// Delete an image
    Delete {
        #[arg(short, long, help="Image id")]
        id: String,

        #[arg(short, long, help="Do not ask for confirmation")]
        yes: bool,
    },
    /// Download an image
    Download {
        #[arg(short, long, help="Image id")]
        id: String,

        #[arg(short, long, help="Destination file, defaults to the image filename")]
        output: Option<PathBuf>,
    },
    /// Check that the image service is up
    Health,
    /// Browse, upload and delete images interactively
    Browse,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    let level = if cli.verbose { LogLevelFilter::Debug } else { LogLevelFilter::Info };
    pretty_logger::init_level(level)
        .map_err(|err| Error::ShelfError(format!("Could not set up logging: {:?}", err)))?;

    let config = Config::load()?
        .with_overrides(std::env::var(SERVER_ENV).ok(), cli.server.clone())?;
    let command = match cli.command {
        Some(command) => command,
        None => return Ok(()),
    };
    let assume_yes = !config.confirm_delete || matches!(command, Commands::Delete { yes: true, .. });
    let mut shelf = Shelf::new(&config, assume_yes);

    let result = match command {
        Commands::List => shelf.list().await,
        Commands::Show { id } => shelf.show(&id).await,
        Commands::Upload { file } => shelf.upload(&file).await,
        Commands::Delete { id, .. } => shelf.delete(&id).await,
        Commands::Download { id, output } => shelf.download(&id, output).await,
        Commands::Health => shelf.health().await,
        Commands::Browse => shelf.browse().await,
    };
    match result {
        Err(Error::FlowError(err)) => {
            debug!("{}", err);
            std::process::exit(1);
        },
        other => other,
    }
}
