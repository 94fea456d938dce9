//! # askdoc CLI
//!
//! The `askdoc` binary serves the PDF question-answering pipeline over
//! HTTP or runs it once from the command line.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `askdoc serve` | Start the HTTP server (form + `POST /ask`) |
//! | `askdoc ask --file a.pdf "question"` | Answer one question from local PDFs |
//!
//! ## Configuration
//!
//! All settings come from the environment (a `.env` file is loaded if
//! present). `ASKDOC_API_KEY` is required; see `config` module docs for
//! the full list. A missing key fails at startup, not per request.
//!
//! ## Examples
//!
//! ```bash
//! ASKDOC_API_KEY=... askdoc serve
//! ASKDOC_API_KEY=... askdoc ask --file report.pdf "What were Q3 revenues?"
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use askdoc::config::Config;
use askdoc::embedding::HttpEmbeddingModel;
use askdoc::extract::PdfExtractor;
use askdoc::llm::HttpChatModel;
use askdoc::models::UploadedDocument;
use askdoc::pipeline::{PipelineOptions, QaPipeline};
use askdoc::server::run_server;

/// askdoc — retrieval-augmented question answering over PDF documents.
#[derive(Parser)]
#[command(
    name = "askdoc",
    about = "Ask natural-language questions about uploaded PDF documents",
    version
)]
struct Cli {
    /// Override the bind address for `serve` (default from ASKDOC_BIND).
    #[arg(long, global = true)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server with the single-page upload form.
    Serve,

    /// Answer a question from one or more local PDF files and print it.
    Ask {
        /// The question to answer.
        question: String,

        /// PDF file to read. Repeat for multiple documents.
        #[arg(long = "file", required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("configuration error")?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    init_tracing(&config);

    let pipeline = Arc::new(QaPipeline::new(
        Arc::new(PdfExtractor),
        Arc::new(HttpEmbeddingModel::new(&config.provider)?),
        Arc::new(HttpChatModel::new(&config.provider)?),
        PipelineOptions::from_config(&config),
    ));

    match cli.command {
        Commands::Serve => run_server(&config, pipeline).await,
        Commands::Ask { question, files } => {
            let mut documents = Vec::with_capacity(files.len());
            for path in &files {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                documents.push(UploadedDocument::new(filename, bytes));
            }
            let answer = pipeline.answer(&documents, &question).await?;
            println!("{}", answer);
            Ok(())
        }
    }
}

/// Install the global tracing subscriber. When call tracing is enabled the
/// default filter includes debug-level pipeline stages, and requests carry
/// the configured project label.
fn init_tracing(config: &Config) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if config.tracing.enabled {
        "askdoc=debug,info"
    } else {
        "askdoc=info,warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    if config.tracing.enabled {
        tracing::info!(project = %config.tracing.project, "call tracing enabled");
    }
}
