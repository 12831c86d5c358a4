use tantivy::schema::{
    IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, StopWordFilter, TextAnalyzer};
use tantivy::Index;

/// Index schema for chunk documents. `title`, `text` and `full_text` are
/// tokenized for BM25 ranking; `source` and `section` are raw terms so
/// they can be used as exact filters. `full_text` is indexed but not
/// stored into hits.
pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    let _doc_id_field = schema_builder.add_text_field("doc_id", STRING | STORED);
    let _chunk_id_field = schema_builder.add_u64_field("chunk_id", STORED);
    let text_field_indexing = TextFieldIndexing::default()
        .set_tokenizer("text_with_stopwords")
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let text_options = TextOptions::default()
        .set_indexing_options(text_field_indexing.clone())
        .set_stored();
    let _title_field = schema_builder.add_text_field("title", text_options.clone());
    let _text_field = schema_builder.add_text_field("text", text_options);
    let full_text_options = TextOptions::default().set_indexing_options(text_field_indexing);
    let _full_text_field = schema_builder.add_text_field("full_text", full_text_options);
    let _source_field = schema_builder.add_text_field("source", STRING | STORED);
    let _section_field = schema_builder.add_text_field("section", STRING | STORED);
    let _date_field = schema_builder.add_text_field("date", STRING | STORED);
    let _page_field = schema_builder.add_u64_field("page", STORED);
    schema_builder.build()
}

pub fn register_tokenizer(index: &Index) {
    let stop_words = vec![
        "a","an","and","are","as","at","be","by","for","from","has","he","in","is","it","its","of","on","that","the","to","was","will","with","or","but","not","this","these","they","them","their","there","then","than","so","if","when","where","why","how","what","which","who","whom","whose","can","could","should","would","may","might","must","shall","do","does","did","have","had","having",
    ];
    let tokenizer = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(StopWordFilter::remove(stop_words.into_iter().map(|s| s.to_string())))
        .build();
    index.tokenizers().register("text_with_stopwords", tokenizer);
}
