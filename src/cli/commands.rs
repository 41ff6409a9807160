use crate::app::{AppContext, Result};
use crate::cli::RunArgs;
use crate::config::Config;
use crate::scraper::{ChromeBrowser, Orchestrator, RunSummary};
use crate::store::CsvSink;

/// Apply command line overrides on top of the loaded config
pub fn apply_overrides(config: &Config, args: &RunArgs) -> Result<Config> {
    let mut config = config.clone();

    if let Some(ref url) = args.url {
        config.search.url = url.clone();
    }
    if let Some(ref category) = args.category {
        config.search.category = Some(category.clone());
    }
    if let Some(ref subcategory) = args.subcategory {
        config.search.subcategory = Some(subcategory.clone());
    }
    if let Some(pages) = args.pages {
        config.search.page_limit = pages;
    }
    if let Some(ref dir) = args.output_dir {
        config.output.directory = dir.clone();
    }
    if args.headed {
        config.browser.headless = false;
    }

    config.validate()?;
    Ok(config)
}

pub async fn run(ctx: &AppContext, args: &RunArgs) -> Result<RunSummary> {
    let config = apply_overrides(&ctx.config, args)?;
    let sink = CsvSink::new(&config.output);

    println!(
        "Harvesting up to {} pages from {}",
        config.search.page_limit, config.search.url
    );

    let mut browser = ChromeBrowser::launch(config.browser.clone()).await?;
    let summary = Orchestrator::new(config).run(&mut browser, &sink).await?;

    println!(
        "Saved {} jobs to {} ({})",
        summary.records,
        summary.output.display(),
        summary.termination
    );
    Ok(summary)
}

pub fn show_config(ctx: &AppContext) -> Result<()> {
    println!("# {}", ctx.config_path.display());
    println!("{}", ctx.config.to_toml()?);
    Ok(())
}
