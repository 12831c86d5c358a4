use anyhow::Result;
use std::path::PathBuf;
use tantivy::{Index, TantivyDocument};

use docsift_core::types::Chunk;

use crate::tantivy_utils::{build_schema, register_tokenizer};

/// Writes chunk documents into a fresh tantivy index. Re-creating the
/// index directory drops any previous contents.
pub struct TextIndexWriter {
    index: Index,
    doc_id_field: tantivy::schema::Field,
    chunk_id_field: tantivy::schema::Field,
    title_field: tantivy::schema::Field,
    text_field: tantivy::schema::Field,
    full_text_field: tantivy::schema::Field,
    source_field: tantivy::schema::Field,
    section_field: tantivy::schema::Field,
    date_field: tantivy::schema::Field,
    page_field: tantivy::schema::Field,
}

impl TextIndexWriter {
    pub fn new(index_dir: PathBuf) -> Result<Self> {
        let schema = build_schema();
        if index_dir.exists() {
            std::fs::remove_dir_all(&index_dir)?;
        }
        std::fs::create_dir_all(&index_dir)?;
        let index = Index::create_in_dir(&index_dir, schema.clone())?;
        register_tokenizer(&index);
        Ok(Self {
            doc_id_field: schema.get_field("doc_id")?,
            chunk_id_field: schema.get_field("chunk_id")?,
            title_field: schema.get_field("title")?,
            text_field: schema.get_field("text")?,
            full_text_field: schema.get_field("full_text")?,
            source_field: schema.get_field("source")?,
            section_field: schema.get_field("section")?,
            date_field: schema.get_field("date")?,
            page_field: schema.get_field("page")?,
            index,
        })
    }

    pub fn index_chunks(&self, chunks: &[Chunk]) -> Result<usize> {
        let mut index_writer = self.index.writer(50_000_000)?;
        for c in chunks {
            let mut doc = TantivyDocument::default();
            doc.add_text(self.doc_id_field, &c.doc_id);
            doc.add_u64(self.chunk_id_field, c.chunk_id as u64);
            doc.add_text(self.title_field, &c.title);
            doc.add_text(self.text_field, &c.text);
            doc.add_text(self.full_text_field, &c.full_text);
            doc.add_text(self.source_field, &c.source);
            doc.add_text(self.section_field, &c.section);
            if let Some(date) = &c.date {
                doc.add_text(self.date_field, date);
            }
            if let Some(page) = c.page {
                doc.add_u64(self.page_field, u64::from(page));
            }
            index_writer.add_document(doc)?;
        }
        index_writer.commit()?;
        Ok(chunks.len())
    }
}
