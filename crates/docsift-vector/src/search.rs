use anyhow::Result;
use arrow_array::{Array, Float32Array, Int32Array, RecordBatch, StringArray};
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{connect, Connection, DistanceType};
use std::path::PathBuf;

use docsift_core::types::{Origin, RawHit, SearchFilters};

/// Dense side of the chunk store. Scores are cosine similarities
/// reconstructed from LanceDB's cosine distance (`1 - _distance`), so a
/// well-formed store yields raw scores in [0, 1].
pub struct VectorChunkStore {
    db: Connection,
    table_name: String,
    runtime: tokio::runtime::Runtime,
}

impl VectorChunkStore {
    pub fn open(db_path: PathBuf, table_name: &str) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let db = runtime
            .block_on(async { connect(db_path.to_string_lossy().as_ref()).execute().await })?;
        Ok(Self { db, table_name: table_name.to_string(), runtime })
    }

    pub fn search(&self, query_vec: &[f32], limit: usize, filters: &SearchFilters) -> Result<Vec<RawHit>> {
        self.runtime.block_on(self.search_async(query_vec, limit, filters))
    }

    async fn search_async(
        &self,
        query_vec: &[f32],
        limit: usize,
        filters: &SearchFilters,
    ) -> Result<Vec<RawHit>> {
        let table = self.db.open_table(&self.table_name).execute().await?;
        let mut query = table
            .vector_search(query_vec.to_vec())?
            .distance_type(DistanceType::Cosine)
            .limit(limit);
        if let Some(expr) = filter_expr(filters) {
            query = query.only_if(expr);
        }
        let mut stream = query.execute().await?;
        let mut hits = Vec::new();
        while let Some(batch) = stream.try_next().await? {
            for i in 0..batch.num_rows() {
                hits.push(hit_from_row(&batch, i)?);
            }
        }
        Ok(hits)
    }
}

fn filter_expr(filters: &SearchFilters) -> Option<String> {
    let mut clauses = Vec::new();
    if let Some(source) = &filters.source {
        clauses.push(format!("source = '{}'", source.replace('\'', "''")));
    }
    if let Some(section) = &filters.section {
        clauses.push(format!("section = '{}'", section.replace('\'', "''")));
    }
    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" AND "))
    }
}

fn hit_from_row(batch: &RecordBatch, i: usize) -> Result<RawHit> {
    let string_at = |name: &str| -> Result<String> {
        let col = batch
            .column_by_name(name)
            .and_then(|c| c.as_any().downcast_ref::<StringArray>())
            .ok_or_else(|| anyhow::anyhow!("missing column '{name}'"))?;
        Ok(col.value(i).to_string())
    };
    let date = batch
        .column_by_name("date")
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .and_then(|col| (!col.is_null(i)).then(|| col.value(i).to_string()));
    let page = batch
        .column_by_name("page")
        .and_then(|c| c.as_any().downcast_ref::<Int32Array>())
        .and_then(|col| (!col.is_null(i)).then(|| col.value(i) as u32));
    let chunk_id = batch
        .column_by_name("chunk_id")
        .and_then(|c| c.as_any().downcast_ref::<Int32Array>())
        .map(|col| col.value(i) as usize)
        .ok_or_else(|| anyhow::anyhow!("missing column 'chunk_id'"))?;
    let raw_score = batch
        .column_by_name("_distance")
        .and_then(|c| c.as_any().downcast_ref::<Float32Array>())
        .map(|col| 1.0 - col.value(i))
        .ok_or_else(|| anyhow::anyhow!("missing column '_distance'"))?;
    Ok(RawHit {
        doc_id: string_at("doc_id")?,
        chunk_id,
        raw_score,
        origin: Origin::Semantic,
        text: string_at("text")?,
        title: string_at("title")?,
        source: string_at("source")?,
        section: string_at("section")?,
        date,
        page,
    })
}
