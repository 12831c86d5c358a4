use docsift_core::config::EmbeddingConfig;
use docsift_core::traits::EmbeddingProvider;
use docsift_embed::get_default_provider;

fn fake_provider() -> Box<dyn EmbeddingProvider> {
    // Force fake embedder to avoid loading model weights
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");
    get_default_provider(&EmbeddingConfig::default()).expect("provider")
}

#[test]
fn fake_embedder_shapes_and_determinism() {
    let provider = fake_provider();
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = provider.embed_many(&texts).expect("embed_many");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 384, "embedding dim is 384");

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }
}

#[test]
fn empty_text_is_rejected_not_zeroed() {
    let provider = fake_provider();
    assert!(provider.embed("").is_err());
    assert!(provider.embed("   \n\t").is_err());

    // A batch containing one empty text fails as a whole
    let texts = vec!["fine".to_string(), " ".to_string()];
    assert!(provider.embed_many(&texts).is_err());
}

#[test]
fn embed_many_preserves_input_order() {
    let provider = fake_provider();
    let texts = vec!["alpha".to_string(), "bravo".to_string(), "charlie".to_string()];
    let batch = provider.embed_many(&texts).expect("embed_many");
    assert_eq!(batch.len(), 3);
    for (text, vec_from_batch) in texts.iter().zip(batch.iter()) {
        let single = provider.embed(text).expect("embed");
        assert_eq!(&single, vec_from_batch);
    }
}
