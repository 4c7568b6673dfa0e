//! `mognet` — extract Final Fantasy IX archives to a directory tree

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, info};

use mognet_formats::{image, pack};

mod sink;

use sink::DirectorySink;

#[derive(Parser)]
#[command(
    name = "mognet",
    about = "Extractor for Final Fantasy IX disc images and databases",
    version,
    author,
    long_about = "Decodes the FF9.IMG disc-image archive and the .ff9db database \
                  format and writes every contained object as an individual file \
                  under the output directory."
)]
struct Cli {
    /// Set the logging level
    #[arg(short, long, value_enum, default_value = "info")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a disc image (FF9.IMG)
    Image {
        /// Path to the disc image
        input: PathBuf,
        /// Directory the extracted objects are written under
        output: PathBuf,
    },

    /// Extract a database file (*.ff9db)
    Db {
        /// Path to the database file
        input: PathBuf,
        /// Directory the extracted objects are written under
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Image { input, output } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let mut sink = DirectorySink::new(output);
            image::extract_image(&data, &mut sink)
                .with_context(|| format!("failed to extract {}", input.display()))?;
            info!(objects = sink.written(), "done");
        }
        Commands::Db { input, output } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let mut sink = DirectorySink::new(output);
            pack::extract_db(&data, &mut sink)
                .with_context(|| format!("failed to extract {}", input.display()))?;
            info!(objects = sink.written(), "done");
        }
    }

    Ok(())
}
