//! Site-Signals main entry point
//!
//! This is the command-line interface for the Site-Signals domain scanner.

use anyhow::Context;
use clap::Parser;
use site_signals::config::{load_config_with_hash, validate_domain_root, Config};
use site_signals::crawler::Orchestrator;
use site_signals::input::load_domains;
use site_signals::output::{print_summary, save_results, SkipLog};
use site_signals::render::{HttpRenderer, Renderer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Site-Signals: a per-domain site scanner
///
/// Site-Signals walks each domain from a CSV list, discovers same-site
/// subpages while respecting robots.txt, and reports cookies, forms and
/// embedded Google Maps found on every subpage.
#[derive(Parser, Debug)]
#[command(name = "site-signals")]
#[command(version = "1.0.0")]
#[command(about = "Scan domains for cookies, forms and embedded maps", long_about = None)]
struct Cli {
    /// CSV file with a `domain` column
    #[arg(value_name = "DOMAINS")]
    domains: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the results JSON (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate inputs and show what would be scanned without scanning
    #[arg(long)]
    dry_run: bool,

    /// Render pages in headless Chromium instead of plain HTTP
    #[cfg(feature = "browser")]
    #[arg(long)]
    browser: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;
    if let Some(dir) = &cli.output_dir {
        config.output.analysis_dir = dir.display().to_string();
    }

    tracing::info!("Loading domains from: {}", cli.domains.display());
    let domains = load_domains(&cli.domains)
        .with_context(|| format!("Failed to load domains from {}", cli.domains.display()))?;
    let domains = usable_domains(domains);
    tracing::info!("Loaded {} domains", domains.len());

    if cli.dry_run {
        handle_dry_run(&config, &domains);
        return Ok(());
    }

    let renderer = build_renderer(&cli, &config);
    handle_scan(config, renderer, &domains).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_signals=info,warn"),
            1 => EnvFilter::new("site_signals=debug,info"),
            2 => EnvFilter::new("site_signals=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or the defaults when none is given
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Drops domain entries that are not a scheme + host root
fn usable_domains(domains: Vec<String>) -> Vec<String> {
    domains
        .into_iter()
        .filter(|domain| match validate_domain_root(domain) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Skipping domain {:?}: {}", domain, e);
                false
            }
        })
        .collect()
}

/// Handles the --dry-run mode: shows what would be scanned
fn handle_dry_run(config: &Config, domains: &[String]) {
    println!("=== Site-Signals Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!(
        "  Max concurrent pages: {}",
        config.crawler.max_concurrent_pages
    );
    println!(
        "  Navigation timeout: {}ms",
        config.crawler.navigation_timeout_ms
    );
    println!("  Same-site rule: {:?}", config.crawler.same_site);

    println!("\nUser Agent:");
    println!("  Browser: {}", config.user_agent.browser);
    println!("  Robots agent: {}", config.user_agent.robots_agent);

    println!("\nOutput:");
    println!("  Analysis directory: {}", config.output.analysis_dir);
    println!("  Skip log: {}", config.output.skip_log_path);

    println!("\nDomains ({}):", domains.len());
    for domain in domains {
        println!("  - {}", domain);
    }

    println!("\n✓ Inputs are valid");
}

/// Picks the page renderer requested on the command line
fn build_renderer(cli: &Cli, config: &Config) -> Arc<dyn Renderer> {
    #[cfg(feature = "browser")]
    if cli.browser {
        tracing::info!("Rendering pages with headless Chromium");
        return Arc::new(site_signals::render::BrowserRenderer::new(config));
    }
    #[cfg(not(feature = "browser"))]
    let _ = cli;

    Arc::new(HttpRenderer::new(config))
}

/// Runs the scan, writes the results file and prints the summary
async fn handle_scan(
    config: Config,
    renderer: Arc<dyn Renderer>,
    domains: &[String],
) -> anyhow::Result<()> {
    let skip_log = SkipLog::open(&config.output.skip_log_path).with_context(|| {
        format!("Failed to open skip log {}", config.output.skip_log_path)
    })?;
    tracing::info!("Recording skipped pages in {}", skip_log.path().display());
    let analysis_dir = PathBuf::from(&config.output.analysis_dir);

    let orchestrator = Orchestrator::new(config, renderer, Arc::new(skip_log))
        .context("Failed to initialize scanner")?;

    let results = orchestrator.run(domains).await;

    let path = save_results(&results, &analysis_dir)
        .with_context(|| format!("Failed to write results to {}", analysis_dir.display()))?;

    print_summary(&results);
    println!("\nResults written to {}", path.display());

    Ok(())
}
