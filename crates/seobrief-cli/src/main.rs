mod research;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "seobrief")]
#[command(about = "Keyword and competitor research for SEO content briefs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Research a keyword list and print the derived insights
    Research {
        /// Comma-separated keywords; the first one is the primary keyword
        #[arg(long)]
        keywords: String,

        /// YAML or JSON file listing competitor pages
        #[arg(long)]
        competitors: Option<PathBuf>,

        /// Country database for both providers (defaults to `SEOBRIEF_COUNTRY`)
        #[arg(long)]
        country: Option<String>,

        /// Maximum related keywords to fetch (defaults to `SEOBRIEF_RELATED_LIMIT`)
        #[arg(long)]
        related_limit: Option<usize>,

        /// Skip the search-results lookup
        #[arg(long)]
        no_serp: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the effective configuration with credentials redacted
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// The full research bundle as JSON
    Json,
    /// Italian prompt sections ready for the generation step
    Sections,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = seobrief_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Research {
            keywords,
            competitors,
            country,
            related_limit,
            no_serp,
            format,
        }) => {
            let args = research::ResearchArgs {
                keywords,
                competitors,
                country,
                related_limit,
                no_serp,
                format,
            };
            research::run(&config, args).await?;
        }
        Some(Commands::Config) => println!("{config:#?}"),
        None => println!("nothing to do; try `seobrief research --help`"),
    }

    Ok(())
}
