//! Recap CLI - In-depth summaries of YouTube videos and webpages
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use recap::{logging, ui, Config, DefaultPipeline, Stage};

#[derive(Parser)]
#[command(name = "recap")]
#[command(author, version, about = "TUI for in-depth summaries of YouTube videos and webpages", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to ./recap.toml or ~/.config/recap/recap.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a YouTube video or webpage by URL
    #[command(visible_alias = "summarize")]
    Summarise {
        /// URL to summarise
        url: String,
        /// Show raw extracted text instead of summary
        #[arg(long)]
        raw: bool,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // In the TUI, logs would tear the alternate screen unless explicitly requested
    let tui = cli.command.is_none();
    if !tui || logging::env_filter_requested() {
        logging::init_tracing(cli.verbose);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Summarise { url, raw }) => {
            let pipeline = DefaultPipeline::from_config(&config)?;
            if raw {
                print_raw(&pipeline, &url).await
            } else {
                summarise(&pipeline, &url).await
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "recap", &mut io::stdout());
            Ok(())
        }
        None => {
            if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
                anyhow::bail!("the TUI needs a terminal; use `recap summarise <URL>` instead");
            }
            let pipeline = DefaultPipeline::from_config(&config)?;
            ui::run(&pipeline).await?;
            Ok(())
        }
    }
}

async fn summarise(pipeline: &DefaultPipeline, url: &str) -> anyhow::Result<()> {
    let result = pipeline
        .run_with_progress(url, |stage| {
            let icon = match stage {
                Stage::Validating => "🔎",
                Stage::Fetching => "📥",
                Stage::Summarising => "🧠",
            };
            eprintln!("{} {}...", icon, stage.to_string().dimmed());
        })
        .await;

    match result {
        Ok(summary) => {
            println!("{}\n", format!("=== {} ({}) ===", summary.url, summary.source).bold());
            println!("{}", summary.text.trim());
            eprintln!(
                "\n{}",
                format!("{} words · {}", summary.word_count(), summary.model).dimmed()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e.user_message());
            std::process::exit(1);
        }
    }
}

async fn print_raw(pipeline: &DefaultPipeline, url: &str) -> anyhow::Result<()> {
    let documents = match pipeline.extract(url).await {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e.user_message());
            std::process::exit(1);
        }
    };

    for doc in &documents {
        let title = doc.title().or(doc.video_id()).unwrap_or("No title");
        println!("\n=== {} [{}] ===\n", title, doc.source());
        println!("{}", doc.text());
        println!("\n--- Extracted {} characters ---", doc.len());
    }
    Ok(())
}
