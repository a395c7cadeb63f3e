use anyhow::{bail, Result};
use book_finder::models::{DownloadRequest, SearchQuery};
use book_finder::sources::{search_sources, Source, SourceRegistry};
use book_finder::utils::{format_search_results, HttpClient};
use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Finder - search and download public-domain books
#[derive(Parser, Debug)]
#[command(name = "book-finder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search Project Gutenberg and Open Library, download EPUBs by Gutenberg id", long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .multiple(true)
        .args(["title", "author", "download"])
))]
struct Cli {
    /// Book title to search for
    #[arg(long, short)]
    title: Option<String>,

    /// Author name to search for
    #[arg(long, short)]
    author: Option<String>,

    /// Source to search
    #[arg(long, short, value_enum, default_value_t = SourceArg::All, conflicts_with = "download")]
    source: SourceArg,

    /// Download the EPUB for a Project Gutenberg id
    #[arg(long, short, value_name = "ID", conflicts_with_all = ["title", "author", "source"])]
    download: Option<String>,

    /// Directory where downloads are saved
    #[arg(long, default_value = "downloads")]
    output_dir: PathBuf,

    /// Maximum number of results per source
    #[arg(long, short, default_value_t = 10)]
    max_results: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Enable verbose logging (-v, -vv for more)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,
}

/// Available catalog sources
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SourceArg {
    #[value(name = "gutenberg")]
    Gutenberg,
    #[value(name = "openlibrary")]
    OpenLibrary,
    #[value(name = "all")]
    All,
}

impl SourceArg {
    /// Source ids to query, in the fixed order results are merged
    fn ids(self) -> &'static [&'static str] {
        match self {
            SourceArg::Gutenberg => &["gutenberg"],
            SourceArg::OpenLibrary => &["openlibrary"],
            SourceArg::All => &["gutenberg", "openlibrary"],
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_finder={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = HttpClient::with_timeout(Duration::from_secs(cli.timeout));
    let registry = SourceRegistry::new(client);

    if let Some(book_id) = &cli.download {
        run_download(&cli, &registry, book_id).await
    } else {
        run_search(&cli, &registry).await
    }
}

async fn run_search(cli: &Cli, registry: &SourceRegistry) -> Result<()> {
    let mut query = SearchQuery::new().max_results(cli.max_results);
    if let Some(title) = &cli.title {
        query = query.title(title);
    }
    if let Some(author) = &cli.author {
        query = query.author(author);
    }

    let sources: Vec<Arc<dyn Source>> = cli
        .source
        .ids()
        .iter()
        .map(|id| registry.get_required(id).cloned())
        .collect::<Result<_, _>>()?;

    let (responses, failures) = search_sources(&sources, &query).await;

    let mut epub_seen = false;
    for response in &responses {
        print!("{}", format_search_results(response));
        epub_seen |= response.books.iter().any(|b| b.has_epub());
    }

    for (source_id, err) in &failures {
        eprintln!("Error searching {}: {}", source_id, err);
    }

    if !failures.is_empty() {
        bail!("{} source(s) failed", failures.len());
    }

    if epub_seen && !cli.quiet {
        eprintln!("\nTo download a book: book-finder --download <ID>");
    }

    Ok(())
}

async fn run_download(cli: &Cli, registry: &SourceRegistry, book_id: &str) -> Result<()> {
    let src = registry.get_required("gutenberg")?;

    // Announce what is being downloaded; metadata failures never abort the download
    match src.get_by_id(book_id).await {
        Ok(book) => {
            if !cli.quiet {
                eprintln!("Downloading: {} by {}", book.title, book.authors);
            }
        }
        Err(e) => tracing::debug!(error = %e, "metadata lookup failed"),
    }

    let request = DownloadRequest::new(book_id, &cli.output_dir);
    let result = src.download(&request).await?;

    println!("Downloaded {} bytes to {}", result.bytes, result.path);
    Ok(())
}
