use docsift_core::types::{Chunk, Origin, SearchResponse, ResultSet, ScoredResult, SummaryRequest};

fn result(doc: &str, chunk: usize, score: f32) -> ScoredResult {
    ScoredResult {
        doc_id: doc.to_string(),
        chunk_id: chunk,
        normalized_score: score,
        raw_score: score,
        origin: Origin::Keyword,
        text: String::new(),
        title: String::new(),
        source: String::new(),
        section: String::new(),
        date: None,
        page: None,
    }
}

#[test]
fn chunk_deserializes_with_optional_fields_absent() {
    let json = r#"{
        "doc_id": "rbi_2024_017",
        "chunk_id": 0,
        "text": "Scheduled banks shall maintain...",
        "title": "Master Direction on KYC",
        "source": "rbi",
        "section": "Notifications"
    }"#;
    let chunk: Chunk = serde_json::from_str(json).expect("chunk json");
    assert_eq!(chunk.doc_id, "rbi_2024_017");
    assert_eq!(chunk.chunk_id, 0);
    assert!(chunk.full_text.is_empty());
    assert!(chunk.date.is_none());
    assert!(chunk.page.is_none());
}

#[test]
fn summary_request_defaults_to_three_sentences() {
    let req: SummaryRequest = serde_json::from_str(r#"{"doc_id": "d1"}"#).expect("request json");
    assert_eq!(req.sentence_count, 3);
    assert!(req.query.is_none());
}

#[test]
fn search_response_variants_are_tagged() {
    let single = SearchResponse::Single(ResultSet { results: vec![result("d1", 0, 88.0)], total: 1 });
    let json = serde_json::to_string(&single).expect("serialize");
    assert!(json.contains(r#""shape":"single"#), "tag present in {json}");

    let pair = SearchResponse::Pair {
        semantic: ResultSet::default(),
        keyword: ResultSet::default(),
    };
    let json = serde_json::to_string(&pair).expect("serialize");
    assert!(json.contains(r#""shape":"pair"#));
    assert!(json.contains("semantic") && json.contains("keyword"));
}

#[test]
fn origin_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Origin::Semantic).expect("json"), r#""semantic""#);
    assert_eq!(serde_json::to_string(&Origin::Keyword).expect("json"), r#""keyword""#);
}
