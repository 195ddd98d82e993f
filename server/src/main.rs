use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;
use vsm_core::config::DEFAULT_STOPWORDS_FILE;
use vsm_core::persist::IndexPaths;
use vsm_core::{load_or_build, BuildOptions, CorpusListing, SearchEngine, Stemming};

#[derive(Parser)]
struct Args {
    /// Index directory path
    #[arg(long, default_value = "./files")]
    index: PathBuf,
    /// Corpus directory, used for rebuilding and title lookup
    #[arg(long, default_value = "./speech")]
    corpus: PathBuf,
    /// Stopword list (defaults to <index>/stopword_list.txt)
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Word normalizer: english or identity
    #[arg(long, default_value_t = Stemming::English)]
    stemmer: Stemming,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let normalizer = args.stemmer.normalizer();
    let stopwords = args.stopwords.clone().unwrap_or_else(|| args.index.join(DEFAULT_STOPWORDS_FILE));
    let model = load_or_build(&IndexPaths::new(&args.index), &args.corpus, &stopwords, normalizer.as_ref(), BuildOptions::default())?;
    let corpus = CorpusListing::scan(&args.corpus)?;
    let app = build_app(SearchEngine::new(model, normalizer), corpus);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
