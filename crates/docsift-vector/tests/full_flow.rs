use docsift_core::types::{Chunk, Origin, SearchFilters};
use docsift_vector::{VectorChunkStore, VectorIndexWriter};
use tempfile::TempDir;

const DIM: usize = 4;

fn chunk(doc_id: &str, chunk_id: usize, source: &str) -> Chunk {
    Chunk {
        doc_id: doc_id.to_string(),
        chunk_id,
        text: format!("text of {doc_id}:{chunk_id}"),
        full_text: String::new(),
        title: format!("title of {doc_id}"),
        source: source.to_string(),
        section: "Notifications".to_string(),
        date: None,
        page: None,
    }
}

fn index_fixture(db_path: &std::path::Path) {
    let chunks = vec![
        chunk("doc_a", 0, "rbi"),
        chunk("doc_b", 0, "rbi"),
        chunk("doc_c", 0, "caqm"),
    ];
    let embeddings = vec![
        vec![1.0, 0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0],
        vec![0.8, 0.6, 0.0, 0.0],
    ];
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    rt.block_on(async {
        let writer = VectorIndexWriter::new(db_path, "chunks", DIM).await.expect("writer");
        writer.index(&chunks, &embeddings).await.expect("index");
    });
}

#[test]
fn nearest_neighbor_order_and_scores() {
    let tmp = TempDir::new().expect("tmpdir");
    let db_path = tmp.path().join("lancedb");
    index_fixture(&db_path);

    let store = VectorChunkStore::open(db_path, "chunks").expect("store");
    let hits = store
        .search(&[1.0, 0.0, 0.0, 0.0], 3, &SearchFilters::default())
        .expect("search");
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].doc_id, "doc_a");
    assert_eq!(hits[0].origin, Origin::Semantic);
    assert!((hits[0].raw_score - 1.0).abs() < 1e-4, "identical vector scores ~1.0");
    for pair in hits.windows(2) {
        assert!(pair[0].raw_score >= pair[1].raw_score);
    }
    // doc_c (cos 0.8) ranks above doc_b (cos 0.0)
    assert_eq!(hits[1].doc_id, "doc_c");
}

#[test]
fn source_filter_is_pushed_down() {
    let tmp = TempDir::new().expect("tmpdir");
    let db_path = tmp.path().join("lancedb");
    index_fixture(&db_path);

    let store = VectorChunkStore::open(db_path, "chunks").expect("store");
    let filters = SearchFilters { source: Some("rbi".to_string()), section: None };
    let hits = store.search(&[0.8, 0.6, 0.0, 0.0], 3, &filters).expect("search");
    assert!(!hits.is_empty());
    for h in &hits {
        assert_eq!(h.source, "rbi");
    }
}
