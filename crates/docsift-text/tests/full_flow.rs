use docsift_core::types::{Chunk, Origin, SearchFilters};
use docsift_text::{TextChunkStore, TextIndexWriter};
use tempfile::TempDir;

fn chunk(doc_id: &str, chunk_id: usize, title: &str, text: &str, source: &str, section: &str) -> Chunk {
    Chunk {
        doc_id: doc_id.to_string(),
        chunk_id,
        text: text.to_string(),
        full_text: format!("{} {}", title, text),
        title: title.to_string(),
        source: source.to_string(),
        section: section.to_string(),
        date: Some("2024-03-01".to_string()),
        page: Some(1),
    }
}

fn sample_chunks() -> Vec<Chunk> {
    vec![
        chunk(
            "rbi_001", 0,
            "Liquidity adjustment facility",
            "The standing deposit facility rate is adjusted by the monetary policy committee.",
            "rbi", "Notifications",
        ),
        chunk(
            "rbi_001", 1,
            "Liquidity adjustment facility",
            "Banks may place overnight deposits without collateral under the scheme.",
            "rbi", "Notifications",
        ),
        chunk(
            "tax_042", 0,
            "Advance tax payment deadlines",
            "Installments of advance tax are due in June, September, December and March.",
            "income_tax", "Circulars",
        ),
        chunk(
            "caqm_007", 0,
            "Air quality directions for winter",
            "Construction activity is restricted when the air quality index crosses the severe band. Liquidity is not mentioned in the title of this one.",
            "caqm", "Directions",
        ),
    ]
}

fn build_store(tmp: &TempDir) -> TextChunkStore {
    let index_dir = tmp.path().join("tantivy");
    let writer = TextIndexWriter::new(index_dir.clone()).expect("writer");
    let indexed = writer.index_chunks(&sample_chunks()).expect("index");
    assert_eq!(indexed, 4);
    TextChunkStore::open(index_dir).expect("store")
}

#[test]
fn keyword_search_ranks_and_tags_hits() {
    let tmp = TempDir::new().expect("tmpdir");
    let store = build_store(&tmp);

    let hits = store.search("deposit facility", 10, &SearchFilters::default()).expect("search");
    assert!(!hits.is_empty());
    for h in &hits {
        assert_eq!(h.origin, Origin::Keyword);
    }
    for pair in hits.windows(2) {
        assert!(pair[0].raw_score >= pair[1].raw_score, "store rank order is descending");
    }
    assert_eq!(hits[0].doc_id, "rbi_001");
    assert_eq!(hits[0].date.as_deref(), Some("2024-03-01"));
    assert_eq!(hits[0].page, Some(1));
}

#[test]
fn title_match_outranks_body_only_match() {
    let tmp = TempDir::new().expect("tmpdir");
    let store = build_store(&tmp);

    // "liquidity" appears in rbi_001's title and only in caqm_007's body.
    let hits = store.search("liquidity", 10, &SearchFilters::default()).expect("search");
    assert!(hits.len() >= 2);
    assert_eq!(hits[0].doc_id, "rbi_001");
}

#[test]
fn source_and_section_filters_restrict_results() {
    let tmp = TempDir::new().expect("tmpdir");
    let store = build_store(&tmp);

    let filters = SearchFilters { source: Some("income_tax".to_string()), section: None };
    let hits = store.search("tax deposit liquidity", 10, &filters).expect("search");
    assert!(!hits.is_empty());
    for h in &hits {
        assert_eq!(h.source, "income_tax");
    }

    let filters = SearchFilters {
        source: Some("rbi".to_string()),
        section: Some("Circulars".to_string()),
    };
    let hits = store.search("tax deposit liquidity", 10, &filters).expect("search");
    assert!(hits.is_empty(), "no rbi chunk lives in Circulars");
}

#[test]
fn query_syntax_characters_are_treated_as_plain_text() {
    let tmp = TempDir::new().expect("tmpdir");
    let store = build_store(&tmp);

    // Colons, unbalanced quotes and stray parens are ordinary user text,
    // not query syntax; they must search, not error.
    let hits = store
        .search("re: deposit facility", 10, &SearchFilters::default())
        .expect("colon query");
    assert!(!hits.is_empty());
    assert_eq!(hits[0].doc_id, "rbi_001");

    let hits = store
        .search("\"deposit facility", 10, &SearchFilters::default())
        .expect("unbalanced quote");
    assert!(!hits.is_empty());

    store
        .search("advance tax (deadlines", 10, &SearchFilters::default())
        .expect("stray paren");
}

#[test]
fn chunk_text_match_outranks_full_text_only_match() {
    let tmp = TempDir::new().expect("tmpdir");
    let index_dir = tmp.path().join("tantivy");
    // "moratorium" appears in doc_text's chunk text and only in
    // doc_full's parent-document full text.
    let mut in_text = chunk(
        "doc_text", 0,
        "Repayment schedules",
        "A moratorium on repayments applies for six months.",
        "rbi", "Circulars",
    );
    in_text.full_text = in_text.text.clone();
    let mut in_full = chunk(
        "doc_full", 0,
        "Annual report extract",
        "This chunk discusses capital adequacy ratios only.",
        "rbi", "Circulars",
    );
    in_full.full_text =
        "Elsewhere in the document a moratorium on repayments is mentioned once.".to_string();
    let writer = TextIndexWriter::new(index_dir.clone()).expect("writer");
    writer.index_chunks(&[in_text, in_full]).expect("index");
    let store = TextChunkStore::open(index_dir).expect("store");

    let hits = store.search("moratorium", 10, &SearchFilters::default()).expect("search");
    assert_eq!(hits.len(), 2, "both tiers match");
    assert_eq!(hits[0].doc_id, "doc_text", "chunk-text tier outranks full-text tier");
}

#[test]
fn no_match_means_empty_not_error() {
    let tmp = TempDir::new().expect("tmpdir");
    let store = build_store(&tmp);
    let hits = store.search("zymurgy", 10, &SearchFilters::default()).expect("search");
    assert!(hits.is_empty());
}
