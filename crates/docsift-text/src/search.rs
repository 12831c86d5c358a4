use anyhow::Result;
use std::path::PathBuf;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{IndexRecordOption, Value};
use tantivy::{Index, TantivyDocument, Term};

use docsift_core::types::{Origin, RawHit, SearchFilters};

/// Keyword side of the chunk store: BM25 over title, chunk text and
/// document full text, with title weighted above chunk text above full
/// text so thematically central matches outrank incidental occurrences.
pub struct TextChunkStore {
    index: Index,
    searcher: tantivy::Searcher,
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

const TITLE_BOOST: f32 = 3.0;
const TEXT_BOOST: f32 = 2.0;

impl TextChunkStore {
    pub fn open(index_dir: PathBuf) -> Result<Self> {
        let index = Index::open_in_dir(&index_dir)?;
        crate::tantivy_utils::register_tokenizer(&index);
        let reader = index.reader()?;
        let searcher = reader.searcher();
        let schema = index.schema();
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
            searcher,
        })
    }

    pub fn search(&self, query_text: &str, limit: usize, filters: &SearchFilters) -> Result<Vec<RawHit>> {
        let mut query_parser = QueryParser::for_index(
            &self.index,
            vec![self.title_field, self.text_field, self.full_text_field],
        );
        query_parser.set_field_boost(self.title_field, TITLE_BOOST);
        query_parser.set_field_boost(self.text_field, TEXT_BOOST);
        // Lenient parse: user text is plain language, not tantivy syntax.
        // Stray colons, quotes or parens degrade to term matches instead
        // of failing the request.
        let (parsed, _syntax_errors) = query_parser.parse_query_lenient(query_text);
        let query = self.with_filters(parsed, filters);

        let top_docs = self.searcher.search(&query, &TopDocs::with_limit(limit))?;
        let mut hits = Vec::new();
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = self.searcher.doc(doc_address)?;
            hits.push(self.to_hit(&doc, score));
        }
        Ok(hits)
    }

    fn with_filters(&self, parsed: Box<dyn Query>, filters: &SearchFilters) -> Box<dyn Query> {
        if filters.is_empty() {
            return parsed;
        }
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = vec![(Occur::Must, parsed)];
        if let Some(source) = &filters.source {
            let term = Term::from_field_text(self.source_field, source);
            clauses.push((Occur::Must, Box::new(TermQuery::new(term, IndexRecordOption::Basic))));
        }
        if let Some(section) = &filters.section {
            let term = Term::from_field_text(self.section_field, section);
            clauses.push((Occur::Must, Box::new(TermQuery::new(term, IndexRecordOption::Basic))));
        }
        Box::new(BooleanQuery::new(clauses))
    }

    fn to_hit(&self, doc: &TantivyDocument, score: f32) -> RawHit {
        let text_of = |field| {
            doc.get_first(field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        RawHit {
            doc_id: text_of(self.doc_id_field),
            chunk_id: doc
                .get_first(self.chunk_id_field)
                .and_then(|v| v.as_u64())
                .unwrap_or_default() as usize,
            raw_score: score,
            origin: Origin::Keyword,
            text: text_of(self.text_field),
            title: text_of(self.title_field),
            source: text_of(self.source_field),
            section: text_of(self.section_field),
            date: doc.get_first(self.date_field).and_then(|v| v.as_str()).map(str::to_string),
            page: doc
                .get_first(self.page_field)
                .and_then(|v| v.as_u64())
                .map(|p| p as u32),
        }
    }
}
