// SPDX-License-Identifier: MIT OR Apache-2.0

//! BM25 search over field names using an in-memory tantivy index
//!
//! # Schema
//!
//! | Field | Options | Source |
//! |-------|---------|--------|
//! | `id` | `INDEXED \| STORED` u64 | record id, used for deletes and hit lookup |
//! | `field_name` | `TEXT` with the label tokenizer | record field name |
//!
//! Every mutation commits and reloads the reader, so a document is visible
//! to `search` as soon as the call returns and gone as soon as `remove`
//! returns. A failed mutation rolls the writer back.
//!
//! Queries are never parsed as query syntax: a label such as `Phone *` is run
//! through the same analyzer as the indexed names and becomes a disjunction
//! of its terms.

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, Value, INDEXED, STORED,
};
use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter,
    TextAnalyzer, TokenStream,
};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tracing::{debug, warn};

const TOKENIZER_NAME: &str = "answerbank_label";

/// Labels are short; one indexing thread with the minimum arena is plenty.
const WRITER_THREADS: usize = 1;
const WRITER_HEAP_BYTES: usize = 20_000_000;

/// Tokens longer than this are dropped (pasted URLs, base64 noise).
const MAX_TOKEN_LEN: usize = 40;

/// Filler words common in form labels ("What is your email?").
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "at", "be", "by", "do", "does", "for", "from", "have", "how", "i",
    "if", "in", "is", "it", "me", "my", "of", "on", "or", "please", "the", "this", "to", "what",
    "when", "where", "which", "who", "why", "with", "you", "your",
];

/// A ranked lexical hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexicalHit {
    pub id: u64,
    /// BM25 relevance.
    pub score: f32,
}

#[derive(Debug, Clone, Copy)]
struct SchemaFields {
    id: Field,
    field_name: Field,
}

fn build_schema() -> (Schema, SchemaFields) {
    let mut builder = Schema::builder();
    let id = builder.add_u64_field("id", INDEXED | STORED);
    let name_options = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(TOKENIZER_NAME)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    );
    let field_name = builder.add_text_field("field_name", name_options);
    (builder.build(), SchemaFields { id, field_name })
}

/// `SimpleTokenizer` -> drop long tokens -> lowercase -> stop words -> English stemmer.
fn build_tokenizer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .filter(LowerCaser)
        .filter(StopWordFilter::remove(
            STOP_WORDS.iter().map(|w| (*w).to_string()),
        ))
        .filter(Stemmer::new(Language::English))
        .build()
}

/// Inverted index over record field names.
pub struct LexicalIndex {
    analyzer: TextAnalyzer,
    fields: SchemaFields,
    reader: IndexReader,
    writer: IndexWriter,
}

impl std::fmt::Debug for LexicalIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexicalIndex")
            .field("num_docs", &self.num_docs())
            .finish_non_exhaustive()
    }
}

impl LexicalIndex {
    /// Create an empty RAM-backed index.
    pub fn in_memory() -> tantivy::Result<Self> {
        let (schema, fields) = build_schema();
        let index = Index::create_in_ram(schema);
        let analyzer = build_tokenizer();
        index.tokenizers().register(TOKENIZER_NAME, analyzer.clone());

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        let writer: IndexWriter = index.writer_with_num_threads(WRITER_THREADS, WRITER_HEAP_BYTES)?;

        Ok(Self {
            analyzer,
            fields,
            reader,
            writer,
        })
    }

    /// Committed document count.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Index `field_name` under `id`, replacing any document with that id.
    pub fn upsert(&mut self, id: u64, field_name: &str) -> tantivy::Result<()> {
        self.apply(|writer, fields| stage_upsert(writer, fields, id, field_name))
    }

    /// Remove the document with `id`, if any.
    pub fn remove(&mut self, id: u64) -> tantivy::Result<()> {
        self.apply(|writer, fields| {
            writer.delete_term(Term::from_field_u64(fields.id, id));
            Ok(())
        })
    }

    /// Replace the whole index content with `docs` in a single commit.
    pub fn rebuild<'a, I>(&mut self, docs: I) -> tantivy::Result<()>
    where
        I: IntoIterator<Item = (u64, &'a str)>,
    {
        self.apply(|writer, fields| {
            writer.delete_all_documents()?;
            for (id, field_name) in docs {
                stage_upsert(writer, fields, id, field_name)?;
            }
            Ok(())
        })
    }

    /// Run staged writer operations and commit them, or roll everything back.
    fn apply<F>(&mut self, stage: F) -> tantivy::Result<()>
    where
        F: FnOnce(&IndexWriter, &SchemaFields) -> tantivy::Result<()>,
    {
        let staged = stage(&self.writer, &self.fields);
        let committed = staged.and_then(|()| self.writer.commit().map(|_| ()));
        if let Err(err) = committed {
            if let Err(rollback_err) = self.writer.rollback() {
                warn!(error = %rollback_err, "lexical index rollback failed");
            }
            return Err(err);
        }
        self.reader.reload()
    }

    /// All documents sharing at least one token with `query`, best first.
    pub fn search(&self, query: &str) -> tantivy::Result<Vec<LexicalHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();
        let num_docs = usize::try_from(searcher.num_docs()).unwrap_or(usize::MAX);
        if num_docs == 0 {
            return Ok(Vec::new());
        }

        let terms = self.query_terms(query);
        if terms.is_empty() {
            debug!(query, "label has no searchable terms");
            return Ok(Vec::new());
        }
        let clauses: Vec<(Occur, Box<dyn Query>)> = terms
            .into_iter()
            .map(|term| {
                let query: Box<dyn Query> =
                    Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
                (Occur::Should, query)
            })
            .collect();
        let label_query = BooleanQuery::new(clauses);

        let top_docs = searcher.search(&label_query, &TopDocs::with_limit(num_docs))?;
        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address)?;
            match doc.get_first(self.fields.id).and_then(|v| v.as_u64()) {
                Some(id) => hits.push(LexicalHit { id, score }),
                None => debug!("lexical document without id, skipping"),
            }
        }

        debug!(query, hits = hits.len(), "lexical search completed");
        Ok(hits)
    }

    /// Distinct analyzed terms of `query`, in first-seen order.
    fn query_terms(&self, query: &str) -> Vec<Term> {
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(query);
        let mut texts: Vec<String> = Vec::new();
        while stream.advance() {
            let text = &stream.token().text;
            if !texts.contains(text) {
                texts.push(text.clone());
            }
        }
        texts
            .iter()
            .map(|text| Term::from_field_text(self.fields.field_name, text))
            .collect()
    }
}

fn stage_upsert(
    writer: &IndexWriter,
    fields: &SchemaFields,
    id: u64,
    field_name: &str,
) -> tantivy::Result<()> {
    writer.delete_term(Term::from_field_u64(fields.id, id));
    let mut doc = TantivyDocument::default();
    doc.add_u64(fields.id, id);
    doc.add_text(fields.field_name, field_name);
    writer.add_document(doc)?;
    Ok(())
}
