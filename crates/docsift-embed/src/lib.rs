//! Embedding providers: a local candle MiniLM encoder and a deterministic
//! hashing fake for tests. Both implement `docsift_core::traits::EmbeddingProvider`
//! and fail explicitly on empty input rather than returning a zero vector.

use anyhow::{anyhow, bail, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;

use docsift_core::config::EmbeddingConfig;
use docsift_core::traits::EmbeddingProvider;

pub mod device;
pub mod pool;
pub mod tokenize;

pub use pool::masked_mean_l2;

use device::select_device;
use tokenize::tokenize_on_device;

/// Sentence encoder backed by an all-MiniLM-class BERT checkpoint loaded
/// from local files (no network access at runtime).
pub struct LocalMiniLmEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dim: usize,
    max_len: usize,
}

impl LocalMiniLmEmbedder {
    pub fn new(cfg: &EmbeddingConfig) -> Result<Self> {
        let device = select_device();
        println!("🔄 Loading MiniLM model from local files...");
        let model_dir = resolve_model_dir(cfg.model_dir.as_deref())?;
        println!("📥 Loading tokenizer...");
        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;
        println!("📥 Loading model config...");
        let config_path = model_dir.join("config.json");
        let config: BertConfig = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;
        println!("📥 Loading model weights...");
        let dtype = DType::F32;
        let safetensors_path = model_dir.join("model.safetensors");
        let vb = if safetensors_path.exists() {
            unsafe { VarBuilder::from_mmaped_safetensors(&[safetensors_path], dtype, &device)? }
        } else {
            let weights_path = model_dir.join("pytorch_model.bin");
            let weights = candle_core::pickle::read_all(&weights_path)?;
            let weights_map: std::collections::HashMap<String, Tensor> = weights.into_iter().collect();
            VarBuilder::from_tensors(weights_map, dtype, &device)
        };
        println!("🔧 Loading model...");
        let model = BertModel::load(vb, &config)?;
        println!("✅ MiniLM model loaded successfully!");
        Ok(Self { model, tokenizer, device, dim: cfg.dim, max_len: cfg.max_len })
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let (input_ids, attention_mask) = tokenize_on_device(&self.tokenizer, text, self.max_len, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden_states = self.model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = masked_mean_l2(&hidden_states, &attention_mask)?;
        let emb: Vec<f32> = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        if emb.len() != self.dim {
            bail!("model produced dim {} but config says {}", emb.len(), self.dim);
        }
        if start.elapsed().as_millis() > 100 {
            println!("⚠️  Slow embedding");
        }
        Ok(emb)
    }
}

impl EmbeddingProvider for LocalMiniLmEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            bail!("cannot embed empty text");
        }
        self.encode(text)
    }

    fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for t in texts {
            out.push(self.embed(t)?);
        }
        Ok(out)
    }
}

/// Deterministic hashing embedder used in tests and offline development.
/// Token hashes scatter into a fixed-dim vector which is then L2-normalized.
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            bail!("cannot embed empty text");
        }
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.to_lowercase().hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }

    fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Build the configured provider. `APP_USE_FAKE_EMBEDDINGS=1` forces the
/// hashing fake so tests and dev tooling never load model weights.
pub fn get_default_provider(cfg: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        println!("🧪 Using HashingEmbedder");
        return Ok(Box::new(HashingEmbedder::new(cfg.dim)));
    }
    Ok(Box::new(LocalMiniLmEmbedder::new(cfg)?))
}

fn resolve_model_dir(configured: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = configured {
        let p = docsift_core::config::expand_path(dir);
        if p.exists() {
            println!("📦 Using configured model dir: {}", p.display());
            return Ok(p);
        }
    }
    if let Ok(dir) = std::env::var("APP_MODEL_DIR") {
        let p = PathBuf::from(&dir);
        if p.exists() {
            println!("📦 Using APP_MODEL_DIR: {}", p.display());
            return Ok(p);
        }
    }
    let root = Path::new("../models/all-MiniLM-L6-v2");
    if root.exists() {
        println!("📦 Using model dir: {}", root.display());
        return Ok(root.to_path_buf());
    }
    let legacy = Path::new("models/all-MiniLM-L6-v2");
    if legacy.exists() {
        println!("📦 Using legacy model dir: {}", legacy.display());
        return Ok(legacy.to_path_buf());
    }
    Err(anyhow!("Could not locate MiniLM model directory"))
}
