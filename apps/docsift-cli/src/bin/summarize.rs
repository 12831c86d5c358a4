use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use docsift_core::config::Config;
use docsift_core::types::DEFAULT_SUMMARY_SENTENCES;
use docsift_embed::get_default_provider;
use docsift_summarize::ExtractiveSummarizer;

struct Args {
    text_file: PathBuf,
    query: Option<String>,
    sentence_count: usize,
}

fn parse_args() -> Args {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    let usage = format!("Usage: {} <document.txt> [--query \"<query>\"] [--sentences N]", prog);
    if args.is_empty() {
        eprintln!("{}", usage);
        std::process::exit(1);
    }
    let mut parsed = Args {
        text_file: PathBuf::from(args.remove(0)),
        query: None,
        sentence_count: DEFAULT_SUMMARY_SENTENCES,
    };
    let mut it = args.into_iter();
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--query" => parsed.query = it.next(),
            "--sentences" => {
                parsed.sentence_count = it
                    .next()
                    .and_then(|s| s.parse().ok())
                    .filter(|n: &usize| *n > 0)
                    .unwrap_or_else(|| {
                        eprintln!("--sentences needs a positive integer\n{}", usage);
                        std::process::exit(1)
                    });
            }
            _ => {
                eprintln!("Unknown flag: {}\n{}", flag, usage);
                std::process::exit(1);
            }
        }
    }
    parsed
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load()?;
    let args = parse_args();

    let full_text = std::fs::read_to_string(&args.text_file)?;
    let doc_id = args
        .text_file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());

    let embedder: Arc<dyn docsift_core::traits::EmbeddingProvider> =
        Arc::from(get_default_provider(&config.embedding())?);
    let summarizer = ExtractiveSummarizer::new(embedder);
    let summary =
        summarizer.summarize(&doc_id, &full_text, args.query.as_deref(), args.sentence_count)?;

    println!("Summary of {}:", summary.doc_id);
    if let Some(q) = &summary.query_used {
        println!("(biased toward: {})", q);
    }
    for sentence in &summary.sentences {
        println!("  • {}", sentence);
    }
    Ok(())
}
