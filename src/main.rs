use anyhow::Result;
use clap::{Parser, Subcommand};
use news_importer::{Config, DEFAULT_DB_FILE, Filters};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "news-importer", version)]
#[command(about = "Import categories and news from a JSON file into SQLite", long_about = None)]
struct Cli {
    /// Only active categories
    #[arg(long = "only-active-cats", visible_alias = "ac", global = true)]
    only_active_cats: bool,

    /// Only active news
    #[arg(long = "only-active-news", visible_alias = "an", global = true)]
    only_active_news: bool,

    /// SQLite database file
    #[arg(long, env = "NEWS_IMPORTER_DB", default_value = DEFAULT_DB_FILE, global = true)]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Imports news from FILE_NAME
    Import {
        #[arg(value_name = "FILE_NAME")]
        file_name: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Status lines go to stdout, diagnostics to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let filters = Filters {
        only_active_categories: cli.only_active_cats,
        only_active_news: cli.only_active_news,
    };

    match cli.command {
        Command::Import { file_name } => {
            let config = Config::new(file_name)
                .with_database(cli.database)
                .with_filters(filters);

            let stdout = std::io::stdout();
            news_importer::run(&config, stdout.lock())?;
        }
    }

    Ok(())
}
