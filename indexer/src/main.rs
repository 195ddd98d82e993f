use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use vsm_core::config::{DEFAULT_ALPHA, DEFAULT_COLUMN_BLOCK, DEFAULT_STOPWORDS_FILE};
use vsm_core::persist::{save_model, IndexPaths};
use vsm_core::{build_model, load_or_build, BuildOptions, CorpusListing, SearchEngine, Stemming};

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query a TF-IDF vector space model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the model from a directory of plain-text documents, replacing any existing one
    Build {
        /// Corpus directory, one document per file
        #[arg(long)]
        corpus: PathBuf,
        /// Output index directory
        #[arg(long)]
        output: PathBuf,
        /// Whitespace-delimited stopword list (defaults to <output>/stopword_list.txt)
        #[arg(long)]
        stopwords: Option<PathBuf>,
        /// Columns allocated per matrix growth step
        #[arg(long, default_value_t = DEFAULT_COLUMN_BLOCK)]
        column_block: usize,
        /// Word normalizer: english or identity
        #[arg(long, default_value_t = Stemming::English)]
        stemmer: Stemming,
    },
    /// Rank documents for a query, building the model first if needed
    Search {
        /// Index directory
        #[arg(long)]
        index: PathBuf,
        /// Corpus directory, used for rebuilding and title lookup
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long)]
        stopwords: Option<PathBuf>,
        /// Minimum cosine similarity
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,
        /// Word normalizer: english or identity
        #[arg(long, default_value_t = Stemming::English)]
        stemmer: Stemming,
        /// Query text
        query: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { corpus, output, stopwords, column_block, stemmer } => {
            let stopwords = stopwords.unwrap_or_else(|| output.join(DEFAULT_STOPWORDS_FILE));
            build_index(&corpus, &output, &stopwords, column_block, stemmer)
        }
        Commands::Search { index, corpus, stopwords, alpha, stemmer, query } => {
            let stopwords = stopwords.unwrap_or_else(|| index.join(DEFAULT_STOPWORDS_FILE));
            search(&index, &corpus, &stopwords, alpha, stemmer, &query)
        }
    }
}

fn build_index(corpus: &Path, output: &Path, stopwords: &Path, column_block: usize, stemmer: Stemming) -> Result<()> {
    let normalizer = stemmer.normalizer();
    let model = build_model(corpus, stopwords, normalizer.as_ref(), BuildOptions { column_block })?;
    save_model(&IndexPaths::new(output), &model, normalizer.as_ref())?;
    tracing::info!(output = %output.display(), "index build complete");
    Ok(())
}

fn search(index: &Path, corpus: &Path, stopwords: &Path, alpha: f64, stemmer: Stemming, query: &str) -> Result<()> {
    let normalizer = stemmer.normalizer();
    let model = load_or_build(&IndexPaths::new(index), corpus, stopwords, normalizer.as_ref(), BuildOptions::default())?;
    let engine = SearchEngine::new(model, normalizer);
    let hits = engine.calculate(query, alpha);

    let listing = CorpusListing::scan(corpus)?;
    println!("{:>4}\t{:<20}\t{:<40}\t{}", "No.", "Document Name", "Document Title", "Score");
    if hits.is_empty() {
        println!("{:>4}\t{:<20}\t{:<40}\t{}", "-", "-", "-", "-");
    }
    for (rank, hit) in hits.iter().enumerate() {
        let name = listing.file_name(hit.doc_id).unwrap_or_default();
        let title = listing.title(hit.doc_id)?.unwrap_or_default();
        println!("{:>4}\t{:<20}\t{:<40}\t{:.4}", rank + 1, name, title, hit.score);
    }
    Ok(())
}
