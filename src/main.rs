//! Grounder CLI
//!
//! Command-line interface for ingesting document collections and asking
//! grounded questions against them. Results are printed as JSON on
//! stdout; logs go to stderr.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use grounder_lib::{
    AnswerComposer, ChromaClient, ChromaIndex, Config, EmbeddingGateway, HashingEmbedder,
    Ingestor, OllamaEmbedder, OllamaGenerator, PlainTextExtractor, Retriever, VectorIndex,
    FEATURE_HASH_MODEL,
};

#[derive(Parser)]
#[command(name = "grounder")]
#[command(about = "Retrieval-grounded question answering over local document collections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest documents from a directory into a collection
    Ingest {
        /// Document root (default: DATA_DIR)
        #[arg(short, long)]
        root: Option<PathBuf>,
        /// Target collection (default: COLLECTION_NAME)
        #[arg(short, long)]
        collection: Option<String>,
    },
    /// Retrieve ranked evidence for a query without generating an answer
    Search {
        /// Query text
        query: String,
        /// Number of results
        #[arg(short = 'k', long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
        top_k: u32,
        /// Collection to search (default: COLLECTION_NAME)
        #[arg(short, long)]
        collection: Option<String>,
    },
    /// Ask a question grounded in a collection
    Query {
        /// Question text
        question: String,
        /// Number of evidence chunks
        #[arg(short = 'k', long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
        top_k: u32,
        /// Collection to search (default: COLLECTION_NAME)
        #[arg(short, long)]
        collection: Option<String>,
    },
    /// List collections with record counts
    Collections,
    /// Drop a collection and all its entries
    Drop {
        /// Collection name
        name: String,
    },
    /// Check index store connectivity
    Health,
}

#[derive(Serialize)]
struct ErrorOutput {
    error: String,
}

#[derive(Serialize)]
struct HealthOutput {
    status: String,
}

#[derive(Serialize)]
struct DropOutput {
    dropped: String,
}

fn build_embedder(config: &Config) -> Arc<dyn EmbeddingGateway> {
    if config.embedding_model == FEATURE_HASH_MODEL {
        Arc::new(HashingEmbedder::default())
    } else {
        Arc::new(OllamaEmbedder::new(&config.ollama_host, &config.embedding_model))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match run(cli.command, &config).await {
        Ok(json) => println!("{}", json),
        Err(e) => {
            let error = ErrorOutput { error: e.to_string() };
            println!("{}", serde_json::to_string(&error).unwrap_or_default());
            std::process::exit(1);
        }
    }
}

async fn run(command: Commands, config: &Config) -> anyhow::Result<String> {
    let index = Arc::new(ChromaIndex::new(ChromaClient::new(&config.chroma_url)));

    match command {
        Commands::Ingest { root, collection } => {
            let root = root.unwrap_or_else(|| config.data_dir.clone());
            let collection = collection.unwrap_or_else(|| config.collection.clone());

            let ingestor = Ingestor::new(
                Arc::new(PlainTextExtractor),
                build_embedder(config),
                index,
                config.chunker_config(),
            );
            let report = ingestor.ingest_dir(&root, &collection).await?;
            Ok(serde_json::to_string(&report)?)
        }

        Commands::Search { query, top_k, collection } => {
            let collection = collection.unwrap_or_else(|| config.collection.clone());
            let retriever = Retriever::new(build_embedder(config), index);
            let evidence = retriever.search(&query, top_k as usize, &collection).await?;
            Ok(serde_json::to_string(&evidence)?)
        }

        Commands::Query { question, top_k, collection } => {
            let collection = collection.unwrap_or_else(|| config.collection.clone());
            let retriever = Retriever::new(build_embedder(config), index);
            let evidence = retriever.search(&question, top_k as usize, &collection).await?;

            let generator = OllamaGenerator::new(
                &config.ollama_host,
                &config.ollama_model,
                Duration::from_secs(config.generate_timeout_secs),
            );
            let composer = AnswerComposer::new(Arc::new(generator));
            let grounded = composer.answer(&question, evidence).await?;
            Ok(serde_json::to_string(&grounded)?)
        }

        Commands::Collections => {
            let statuses = index.collections().await?;
            Ok(serde_json::to_string(&statuses)?)
        }

        Commands::Drop { name } => {
            index.drop_collection(&name).await?;
            Ok(serde_json::to_string(&DropOutput { dropped: name })?)
        }

        Commands::Health => {
            index.heartbeat().await?;
            Ok(serde_json::to_string(&HealthOutput { status: "ok".to_string() })?)
        }
    }
}
