use anyhow::Result;
use chistes_core::corpus::load_corpus;
use chistes_core::persist::{save_json, save_json_gz};
use chistes_core::{build_index, DocId, SearchEngine};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build, export and query the boolean inverted index of a joke corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a corpus file and export it as JSON
    Build {
        /// Corpus file, one `id : category | text` record per line
        corpus: PathBuf,
        /// Output JSON file
        #[arg(long, default_value = "indice_invertido.json")]
        out: PathBuf,
        /// Human-readable JSON (larger on disk)
        #[arg(long, default_value_t = false)]
        pretty: bool,
        /// Also write a gzip-compressed copy next to the output
        #[arg(long, default_value_t = false)]
        gzip: bool,
        /// Renumber documents 0..N-1 instead of keeping the corpus ids
        #[arg(long, default_value_t = false)]
        remap: bool,
    },
    /// Run one boolean query (AND, OR, NOT, parentheses) and print the hits
    Search {
        corpus: PathBuf,
        query: String,
        /// Number of hits to print
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Print the response as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Hit<'a> {
    docid: DocId,
    categoria: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    total: usize,
    results: Vec<Hit<'a>>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { corpus, out, pretty, gzip, remap } => {
            export_index(&corpus, &out, pretty, gzip, remap)
        }
        Commands::Search { corpus, query, top, json } => run_query(&corpus, &query, top, json),
    }
}

fn export_index(corpus: &Path, out: &Path, pretty: bool, gzip: bool, remap: bool) -> Result<()> {
    let docs = load_corpus(corpus, remap)?;
    let index = build_index(&docs);
    tracing::info!(num_docs = docs.len(), num_terms = index.num_terms(), "index built");

    save_json(&index, out, pretty)?;
    tracing::info!(path = %out.display(), "index saved");
    if gzip {
        let gz = save_json_gz(&index, out, pretty)?;
        tracing::info!(path = %gz.display(), "compressed index saved");
    }
    println!("Docs: {}", docs.len());
    println!("Vocabulary (unique terms): {}", index.num_terms());
    Ok(())
}

fn run_query(corpus: &Path, query: &str, top: usize, json: bool) -> Result<()> {
    let engine = SearchEngine::from_corpus_file(corpus, true)?;
    let hits = engine.search(query)?;
    let results: Vec<Hit> = hits
        .iter()
        .take(top)
        .filter_map(|&id| engine.document(id))
        .map(|d| Hit { docid: d.id, categoria: &d.category, text: &d.text })
        .collect();

    if json {
        let out = SearchOutput { query, total: hits.len(), results };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} hits for {query:?}", hits.len());
        for hit in results {
            println!("[{}] ({}) {}", hit.docid, hit.categoria, hit.text);
        }
    }
    Ok(())
}
