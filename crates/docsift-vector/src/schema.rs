use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

/// Arrow schema for the chunk table. The embedding dimension comes from
/// the active `EmbeddingConfig`, never a crate constant, so tables built
/// for different models can coexist.
pub fn build_arrow_schema(dim: i32) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("doc_id", DataType::Utf8, false),
        Field::new("chunk_id", DataType::Int32, false),
        Field::new("text", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("source", DataType::Utf8, false),
        Field::new("section", DataType::Utf8, false),
        Field::new("date", DataType::Utf8, true),
        Field::new("page", DataType::Int32, true),
        Field::new(
            "vector",
            DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), dim),
            true,
        ),
    ]))
}
