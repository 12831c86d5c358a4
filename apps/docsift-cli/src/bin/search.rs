use std::env;
use std::sync::Arc;

use docsift_core::config::{expand_path, Config, IndexConfig};
use docsift_core::types::{ResultSet, SearchFilters, SearchMode, SearchResponse};
use docsift_embed::get_default_provider;
use docsift_search::{HybridChunkStore, SearchService};
use docsift_text::TextChunkStore;
use docsift_vector::VectorChunkStore;

struct Args {
    query: String,
    mode: SearchMode,
    filters: SearchFilters,
    size: usize,
    dedup: bool,
}

fn parse_args() -> Args {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    let usage = format!(
        "Usage: {} \"<query>\" [--mode semantic|keyword|both] [--source S] [--section S] [--size N] [--no-dedup]",
        prog
    );
    if args.is_empty() {
        eprintln!("{}", usage);
        std::process::exit(1);
    }
    let query = args.remove(0);
    let mut parsed = Args {
        query,
        mode: SearchMode::Semantic,
        filters: SearchFilters::default(),
        size: 10,
        dedup: true,
    };
    let mut it = args.into_iter();
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--mode" => {
                parsed.mode = match it.next().as_deref() {
                    Some("semantic") => SearchMode::Semantic,
                    Some("keyword") => SearchMode::Keyword,
                    Some("both") => SearchMode::Both,
                    other => {
                        eprintln!("Unknown mode: {:?}\n{}", other, usage);
                        std::process::exit(1);
                    }
                };
            }
            "--source" => parsed.filters.source = it.next(),
            "--section" => parsed.filters.section = it.next(),
            "--size" => {
                parsed.size = it
                    .next()
                    .and_then(|s| s.parse().ok())
                    .filter(|n: &usize| *n > 0)
                    .unwrap_or_else(|| {
                        eprintln!("--size needs a positive integer\n{}", usage);
                        std::process::exit(1)
                    });
            }
            "--no-dedup" => parsed.dedup = false,
            _ => {
                eprintln!("Unknown flag: {}\n{}", flag, usage);
                std::process::exit(1);
            }
        }
    }
    parsed
}

fn print_set(label: &str, set: &ResultSet) {
    println!("\n{} ({} of {} results)", label, set.results.len(), set.total);
    for (rank, r) in set.results.iter().enumerate() {
        println!(
            "{:>2}. [{:>5.1}] {} — {} ({} / {}) chunk {}",
            rank + 1,
            r.normalized_score,
            r.doc_id,
            r.title,
            r.source,
            r.section,
            r.chunk_id
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load()?;
    let args = parse_args();

    let index_cfg: IndexConfig = config.get("data").unwrap_or_else(|_| IndexConfig {
        text_index_dir: "dev_data/indexes/tantivy".to_string(),
        vector_index_dir: "dev_data/indexes/lancedb".to_string(),
        table_name: "chunks".to_string(),
    });
    let text = TextChunkStore::open(expand_path(&index_cfg.text_index_dir))?;
    let vector =
        VectorChunkStore::open(expand_path(&index_cfg.vector_index_dir), &index_cfg.table_name)?;
    let embedder: Arc<dyn docsift_core::traits::EmbeddingProvider> =
        Arc::from(get_default_provider(&config.embedding())?);
    let service = SearchService::new(HybridChunkStore::new(text, vector), embedder);

    let response = service.search(&args.query, args.mode, &args.filters, args.size, args.dedup)?;
    match &response {
        SearchResponse::Single(set) => print_set("Results", set),
        SearchResponse::Pair { semantic, keyword } => {
            print_set("Semantic results", semantic);
            print_set("Keyword results", keyword);
        }
    }
    Ok(())
}
