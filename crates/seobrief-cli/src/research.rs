//! `research` command handler.

use std::path::PathBuf;

use anyhow::Context;

use seobrief_analysis::{render_sections, run_research, PipelineOptions, ResearchRequest};
use seobrief_core::{load_competitors, AppConfig};
use seobrief_providers::{KeywordMetricsClient, SerpClient};

use crate::OutputFormat;

#[derive(Debug)]
pub(crate) struct ResearchArgs {
    pub keywords: String,
    pub competitors: Option<PathBuf>,
    pub country: Option<String>,
    pub related_limit: Option<usize>,
    pub no_serp: bool,
    pub format: OutputFormat,
}

/// Pipeline options for a command invocation, starting from configuration.
pub(crate) fn options_for(config: &AppConfig, args: &ResearchArgs) -> PipelineOptions {
    let mut options = PipelineOptions::from_config(config);
    if let Some(limit) = args.related_limit {
        options.related_limit = limit;
    }
    options.serp = !args.no_serp;
    options
}

/// Run the pipeline for one keyword list and print the result to stdout.
///
/// # Errors
///
/// Returns an error if the competitors file cannot be loaded, a provider
/// client cannot be constructed, or the bundle cannot be serialized.
/// Provider failures during the run are logged and do not abort it.
pub(crate) async fn run(config: &AppConfig, args: ResearchArgs) -> anyhow::Result<()> {
    let competitors = match &args.competitors {
        Some(path) => load_competitors(path)
            .with_context(|| format!("loading competitors from {}", path.display()))?,
        None => Vec::new(),
    };

    let country = args
        .country
        .as_deref()
        .map_or_else(|| config.country.clone(), str::to_lowercase);
    let request = ResearchRequest::new(&args.keywords, &country, competitors);
    if request.primary_keyword().is_none() {
        anyhow::bail!("no keywords given; pass a comma-separated list to --keywords");
    }

    if config.semrush_api_key.is_none() {
        tracing::warn!("SEMRUSH_API_KEY not set; keyword metrics will be skipped");
    }
    if config.serper_api_key.is_none() {
        tracing::warn!("SERPER_API_KEY not set; search results will be skipped");
    }

    let metrics_client = KeywordMetricsClient::from_config(config)?;
    let serp_client = SerpClient::from_config(config)?;
    let options = options_for(config, &args);

    let bundle = run_research(&request, &options, &metrics_client, &serp_client).await;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bundle)?),
        OutputFormat::Sections => println!("{}", render_sections(&bundle).to_prompt_block()),
    }
    Ok(())
}
