use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use docsift_core::config::{expand_path, Config, IndexConfig};
use docsift_core::types::Chunk;
use docsift_embed::get_default_provider;
use docsift_text::TextIndexWriter;
use docsift_vector::VectorIndexWriter;

fn parse_args() -> PathBuf {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <chunks.jsonl | directory of .jsonl>", prog);
        std::process::exit(1);
    }
    PathBuf::from(args.remove(0))
}

fn load_chunks(path: &Path) -> anyhow::Result<Vec<Chunk>> {
    let mut files = Vec::new();
    if path.is_dir() {
        for entry in walkdir::WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "jsonl")
            {
                files.push(entry.path().to_path_buf());
            }
        }
        files.sort();
    } else {
        files.push(path.to_path_buf());
    }
    let mut chunks = Vec::new();
    for file in &files {
        println!("Reading {}", file.display());
        let reader = BufReader::new(File::open(file)?);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            chunks.push(serde_json::from_str::<Chunk>(&line)?);
        }
    }
    println!("Loaded {} chunks from {} file(s)", chunks.len(), files.len());
    Ok(chunks)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let input = parse_args();
    let chunks = load_chunks(&input)?;
    if chunks.is_empty() {
        println!("Nothing to index");
        return Ok(());
    }

    let index_cfg: IndexConfig = config.get("data").unwrap_or_else(|_| IndexConfig {
        text_index_dir: "dev_data/indexes/tantivy".to_string(),
        vector_index_dir: "dev_data/indexes/lancedb".to_string(),
        table_name: "chunks".to_string(),
    });
    let embed_cfg = config.embedding();

    println!("Embedding {} chunks...", chunks.len());
    let provider = get_default_provider(&embed_cfg)?;
    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let embeddings = provider.embed_many(&texts)?;

    let text_writer = TextIndexWriter::new(expand_path(&index_cfg.text_index_dir))?;
    let indexed = text_writer.index_chunks(&chunks)?;
    println!("✅ Tantivy: indexed {} chunks", indexed);

    let lancedb_path = expand_path(&index_cfg.vector_index_dir);
    let rt = tokio_runtime()?;
    rt.block_on(async {
        let writer =
            VectorIndexWriter::new(&lancedb_path, &index_cfg.table_name, embed_cfg.dim).await?;
        writer.index(&chunks, &embeddings).await
    })?;
    println!("✅ Ingest complete ({} chunks)", chunks.len());
    Ok(())
}

fn tokio_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}
