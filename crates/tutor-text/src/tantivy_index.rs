use std::collections::{HashMap, HashSet};

use tantivy::collector::DocSetCollector;
use tantivy::query::{BooleanQuery, FuzzyTermQuery, Occur, Query, RegexQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::{doc, DocAddress, Index, IndexReader, Searcher, TantivyDocument, Term};
use tracing::{debug, info, warn};

use tutor_core::error::{Error, Result};
use tutor_core::traits::FuzzyIndexer;
use tutor_core::types::{rank_matches, Corpus, MatchOptions, RankedMatch};

use crate::tantivy_utils::{build_schema, register_tokenizer};
use crate::terms::query_terms;

// Levenshtein automata are only built up to this distance.
const MAX_FUZZY_DISTANCE: usize = 2;
// Term distance when a term only hits through a typo, a prefix or an infix.
const LOOSE_TERM_DISTANCE: f64 = 0.5;

pub struct TantivyFuzzyIndex {
	reader: IndexReader,
	position_field: Field,
	title_field: Field,
	text_field: Field,
	options: MatchOptions,
}

fn index_err(e: impl std::fmt::Display) -> Error { Error::Index(e.to_string()) }

impl TantivyFuzzyIndex {
	fn exact_query(&self, term: &str) -> BooleanQuery {
		let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
		for field in [self.title_field, self.text_field] {
			let t = Term::from_field_text(field, term);
			clauses.push((Occur::Should, Box::new(TermQuery::new(t, IndexRecordOption::Basic))));
		}
		BooleanQuery::new(clauses)
	}

	/// Tokens starting with `term` give or take the edit budget (this also
	/// covers whole-token typos), plus tokens containing `term` verbatim.
	fn loose_query(&self, term: &str) -> tantivy::Result<BooleanQuery> {
		#[allow(clippy::cast_possible_truncation)]
		let distance = self.options.max_edits(term.chars().count()).min(MAX_FUZZY_DISTANCE) as u8;
		let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
		for field in [self.title_field, self.text_field] {
			let t = Term::from_field_text(field, term);
			clauses.push((Occur::Should, Box::new(FuzzyTermQuery::new_prefix(t, distance, true))));
			// query terms are alphanumeric, nothing to escape
			let infix = RegexQuery::from_pattern(&format!(".*{term}.*"), field)?;
			clauses.push((Occur::Should, Box::new(infix)));
		}
		Ok(BooleanQuery::new(clauses))
	}

	fn position_of(
		&self,
		searcher: &Searcher,
		addr: DocAddress,
	) -> tantivy::Result<Option<usize>> {
		let doc: TantivyDocument = searcher.doc(addr)?;
		#[allow(clippy::cast_possible_truncation)]
		let position = doc
			.get_first(self.position_field)
			.and_then(|v| v.as_u64())
			.map(|p| p as usize);
		Ok(position)
	}

	fn try_search(&self, terms: &[String]) -> tantivy::Result<Vec<RankedMatch>> {
		let searcher = self.reader.searcher();
		// doc -> (matched terms, summed distance of the matched terms)
		let mut hits: HashMap<DocAddress, (usize, f64)> = HashMap::new();
		for term in terms {
			let exact: HashSet<DocAddress> =
				searcher.search(&self.exact_query(term), &DocSetCollector)?;
			let loose: HashSet<DocAddress> =
				searcher.search(&self.loose_query(term)?, &DocSetCollector)?;
			for addr in exact.union(&loose) {
				let d = if exact.contains(addr) { 0.0 } else { LOOSE_TERM_DISTANCE };
				let entry = hits.entry(*addr).or_insert((0, 0.0));
				entry.0 += 1;
				entry.1 += d;
			}
		}

		#[allow(clippy::cast_precision_loss)]
		let term_count = terms.len() as f64;
		let mut matches = Vec::with_capacity(hits.len());
		for (addr, (matched, matched_distance)) in hits {
			if !self.options.enough_terms(matched, terms.len()) {
				continue;
			}
			let Some(position) = self.position_of(&searcher, addr)? else { continue };
			#[allow(clippy::cast_precision_loss)]
			let unmatched = (terms.len() - matched) as f64;
			let distance = (matched_distance + unmatched) / term_count;
			matches.push(RankedMatch { position, distance });
		}
		rank_matches(&mut matches);
		Ok(matches)
	}
}

impl FuzzyIndexer for TantivyFuzzyIndex {
	fn build(corpus: &Corpus, options: &MatchOptions) -> Result<Self> {
		options.validate()?;
		let schema = build_schema();
		let index = Index::create_in_ram(schema.clone());
		register_tokenizer(&index);
		let position_field = schema.get_field("position").map_err(index_err)?;
		let title_field = schema.get_field("title").map_err(index_err)?;
		let text_field = schema.get_field("text").map_err(index_err)?;

		let mut index_writer = index.writer_with_num_threads(1, 15_000_000).map_err(index_err)?;
		for (position, chunk) in corpus.iter().enumerate() {
			let doc = doc!(
				position_field => position as u64,
				title_field => chunk.title.clone(),
				text_field => chunk.text.clone(),
			);
			index_writer.add_document(doc).map_err(index_err)?;
		}
		index_writer.commit().map_err(index_err)?;
		let reader = index.reader().map_err(index_err)?;
		info!(chunks = corpus.len(), "built tantivy fuzzy index");
		Ok(Self { reader, position_field, title_field, text_field, options: *options })
	}

	fn search(&self, query: &str) -> Vec<RankedMatch> {
		let terms = query_terms(query, self.options.min_term_len);
		if terms.is_empty() {
			return Vec::new();
		}
		match self.try_search(&terms) {
			Ok(matches) => {
				debug!(query, terms = terms.len(), hits = matches.len(), "tantivy fuzzy search");
				matches
			}
			Err(e) => {
				warn!(error = %e, "tantivy fuzzy search failed");
				Vec::new()
			}
		}
	}
}
