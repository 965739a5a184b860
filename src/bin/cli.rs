//! job-scraper CLI
//!
//! Extracts Workday job postings from saved or fetched pages and checks them
//! against the analysis backend.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use job_scraper::{
    config,
    error::{AppError, Result},
    extract::PageExtractor,
    models::{Config, ExtractionResult},
    report,
    services::{AnalysisSession, HttpBackend},
    utils::{self, http},
};
use scraper::Html;

/// job-scraper - Workday job posting extractor
#[derive(Parser, Debug)]
#[command(
    name = "job-scraper",
    version,
    about = "Extract Workday job postings and check them for visa sponsorship"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a job record from a saved HTML page
    Extract {
        /// Saved page
        file: PathBuf,

        /// Address the page was saved from (default: file:// URL of FILE)
        #[arg(long)]
        url: Option<String>,

        /// Print the result envelope as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download a job page and extract its record
    Fetch {
        /// Page address
        url: String,

        /// Print the result envelope as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract a job record and submit it for analysis
    Analyze {
        /// Saved page
        #[arg(required_unless_present = "fetch", conflicts_with = "fetch")]
        file: Option<PathBuf>,

        /// Address the saved page came from
        #[arg(long, requires = "file")]
        url: Option<String>,

        /// Download the page from this address instead
        #[arg(long)]
        fetch: Option<String>,

        /// Print the raw backend response as JSON
        #[arg(long)]
        json: bool,

        /// Follow up with a sponsorship-history lookup
        #[arg(long)]
        sponsorship: bool,
    },

    /// Submit plain job text to the free-text analysis endpoint
    AnalyzeText {
        /// File holding the job text
        file: PathBuf,

        /// Address the text came from
        #[arg(long, default_value = "")]
        url: String,
    },

    /// Look up a company's visa sponsorship history
    Sponsorship {
        /// Company name
        company: String,
    },

    /// Check that the backend is reachable
    Health,

    /// Validate the configuration file
    Validate,
}

/// Where a job page comes from.
enum PageSource {
    File { path: PathBuf, url: Option<String> },
    Remote(String),
}

/// Initialize logging based on verbosity flags.
fn init_logging(cli: &Cli, config: &Config) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        config.logging.level.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Read or download a page, returning it with its address.
async fn load_page(source: PageSource, config: &Config) -> Result<(Html, String)> {
    match source {
        PageSource::File { path, url } => {
            let html = tokio::fs::read_to_string(&path).await?;
            let url = match url {
                Some(url) => url,
                None => utils::file_url(&path)?,
            };
            log::info!("Loaded {} ({} bytes)", path.display(), html.len());
            Ok((Html::parse_document(&html), url))
        }
        PageSource::Remote(url) => {
            utils::parse_page_url(&url)?;
            let client = http::create_client(&config.backend)?;
            log::info!("Fetching {url}");
            let document = http::fetch_page(&client, &url).await?;
            Ok((document, url))
        }
    }
}

fn print_extraction(result: &ExtractionResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if result.is_success() {
        print!("{}", report::render_extraction(result));
    }
    match result {
        ExtractionResult::Success(record) => {
            log::info!("Extracted '{}'", record.job_title());
            Ok(())
        }
        ExtractionResult::Failure(reason) => Err(AppError::structure(reason.clone())),
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Command::Extract { file, url, json } => {
            let extractor = PageExtractor::new(config.extraction.clone())?;
            let (document, url) = load_page(PageSource::File { path: file, url }, &config).await?;
            print_extraction(&extractor.extract(&document, &url), json)?;
        }

        Command::Fetch { url, json } => {
            let extractor = PageExtractor::new(config.extraction.clone())?;
            let (document, url) = load_page(PageSource::Remote(url), &config).await?;
            print_extraction(&extractor.extract(&document, &url), json)?;
        }

        Command::Analyze {
            file,
            url,
            fetch,
            json,
            sponsorship,
        } => {
            let source = match (file, fetch) {
                (_, Some(remote)) => PageSource::Remote(remote),
                (Some(path), None) => PageSource::File { path, url },
                (None, None) => return Err(AppError::config("No page given")),
            };
            let (document, url) = load_page(source, &config).await?;

            let extractor = PageExtractor::new(config.extraction.clone())?;
            let session = AnalysisSession::new(extractor, HttpBackend::new(config.backend.clone())?);
            let outcome = session.analyze(&document, &url).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.analysis)?);
            } else {
                print!("{}", report::render_analysis(&outcome.analysis));
            }

            if sponsorship {
                if let Some(history) = session.lookup_for(&outcome).await? {
                    let company = outcome.company_query().unwrap_or_default();
                    println!();
                    print!("{}", report::render_sponsorship(company, &history));
                }
            }
        }

        Command::AnalyzeText { file, url } => {
            let text = tokio::fs::read_to_string(&file).await?;
            if text.trim().is_empty() {
                return Err(AppError::validation(format!("{} is empty", file.display())));
            }
            let backend = HttpBackend::new(config.backend.clone())?;
            let analysis = backend.analyze_text(&text, &url).await?;
            print!("{}", report::render_analysis(&analysis));
        }

        Command::Sponsorship { company } => {
            let extractor = PageExtractor::new(config.extraction.clone())?;
            let session = AnalysisSession::new(extractor, HttpBackend::new(config.backend.clone())?);
            let history = session.lookup_sponsorship(&company).await?;
            print!("{}", report::render_sponsorship(company.trim(), &history));
        }

        Command::Health => {
            let backend = HttpBackend::new(config.backend.clone())?;
            let health = backend.health().await?;
            log::info!("Backend at {}: {}", config.backend.base_url, health.status);
            if !health.message.is_empty() {
                println!("{}", health.message);
            }
        }

        Command::Validate => {
            // load_validated already ran; report what was accepted.
            log::info!("✓ Config OK");
            log::info!("    Backend: {}", config.backend.base_url);
            log::info!("    Platform: {}", config.extraction.platform);
            log::info!(
                "    Root container: [{}=\"{}\"]",
                config.extraction.attribute,
                config.extraction.root_id
            );
        }
    }

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = config::load_validated(&cli.config);
    let logging_config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&cli, &logging_config);

    let result = match loaded {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", report::render_error(&e));
            ExitCode::FAILURE
        }
    }
}
