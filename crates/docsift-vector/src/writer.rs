use anyhow::Result;
use arrow_array::{FixedSizeListArray, Int32Array, RecordBatch, RecordBatchIterator, StringArray};
use indicatif::{ProgressBar, ProgressStyle};
use lancedb::{connect, Connection};
use std::path::Path;
use std::sync::Arc;

use docsift_core::types::Chunk;

use crate::schema::build_arrow_schema;

/// Batched writer for the chunk table. Embeddings are computed upstream
/// and must line up one-to-one with `chunks`.
pub struct VectorIndexWriter {
    pub(crate) db: Connection,
    pub(crate) table_name: String,
    dim: usize,
}

impl VectorIndexWriter {
    pub async fn new(db_path: &Path, table_name: &str, dim: usize) -> Result<Self> {
        let db = connect(db_path.to_string_lossy().as_ref()).execute().await?;
        Ok(Self { db, table_name: table_name.to_string(), dim })
    }

    pub async fn index(&self, chunks: &[Chunk], embeddings: &[Vec<f32>]) -> Result<()> {
        if chunks.is_empty() {
            println!("No chunks to index");
            return Ok(());
        }
        assert_eq!(chunks.len(), embeddings.len(), "chunks and embeddings length must match");
        println!("Indexing {} chunks into LanceDB table: {}", chunks.len(), self.table_name);
        let pb = ProgressBar::new(chunks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")
                .expect("progress template")
                .progress_chars("#>-"),
        );
        let batch_size = 1000usize;
        let mut processed = 0usize;
        for (batch_chunks, batch_embeddings) in
            chunks.chunks(batch_size).zip(embeddings.chunks(batch_size))
        {
            self.insert_batch(batch_chunks, batch_embeddings).await?;
            processed += batch_chunks.len();
            pb.set_position(processed as u64);
            pb.set_message(format!("Processed {} chunks", processed));
        }
        pb.finish_with_message("✅ LanceDB indexing completed!");
        println!("📊 Successfully indexed {} chunks into LanceDB", processed);
        Ok(())
    }

    async fn insert_batch(&self, chunks: &[Chunk], embeddings: &[Vec<f32>]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }
        let record_batch = self.to_record_batch(chunks, embeddings)?;
        let schema = record_batch.schema();
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(record_batch)].into_iter(), schema));
        if self.db.table_names().execute().await?.contains(&self.table_name) {
            self.db.open_table(&self.table_name).execute().await?.add(reader).execute().await?;
        } else {
            self.db.create_table(&self.table_name, reader).execute().await?;
        }
        Ok(())
    }

    fn to_record_batch(&self, chunks: &[Chunk], embeddings: &[Vec<f32>]) -> Result<RecordBatch> {
        let schema = build_arrow_schema(self.dim as i32);
        let mut doc_ids = Vec::new();
        let mut chunk_ids = Vec::new();
        let mut texts = Vec::new();
        let mut titles = Vec::new();
        let mut sources = Vec::new();
        let mut sections = Vec::new();
        let mut dates: Vec<Option<String>> = Vec::new();
        let mut pages: Vec<Option<i32>> = Vec::new();
        let mut vectors: Vec<Option<Vec<Option<f32>>>> = Vec::new();
        for (chunk, embedding) in chunks.iter().zip(embeddings.iter()) {
            doc_ids.push(chunk.doc_id.clone());
            chunk_ids.push(chunk.chunk_id as i32);
            texts.push(chunk.text.clone());
            titles.push(chunk.title.clone());
            sources.push(chunk.source.clone());
            sections.push(chunk.section.clone());
            dates.push(chunk.date.clone());
            pages.push(chunk.page.map(|p| p as i32));
            vectors.push(Some(embedding.iter().map(|&x| Some(x)).collect()));
        }
        let record_batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(doc_ids)),
                Arc::new(Int32Array::from(chunk_ids)),
                Arc::new(StringArray::from(texts)),
                Arc::new(StringArray::from(titles)),
                Arc::new(StringArray::from(sources)),
                Arc::new(StringArray::from(sections)),
                Arc::new(StringArray::from(dates)),
                Arc::new(Int32Array::from(pages)),
                Arc::new(FixedSizeListArray::from_iter_primitive::<arrow_array::types::Float32Type, _, _>(
                    vectors.into_iter(),
                    self.dim as i32,
                )),
            ],
        )?;
        Ok(record_batch)
    }
}
