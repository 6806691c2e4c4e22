//! Query term extraction shared by both backends.

pub const STOP_WORDS: &[&str] = &[
	"a","an","and","are","as","at","be","by","for","from","has","he","in","is","it","its","of",
	"on","that","the","to","was","will","with","or","but","not","this","these","they","them",
	"their","there","then","than","so","if","when","where","why","how","what","which","who",
	"whom","whose","can","could","should","would","may","might","must","shall","do","does",
	"did","have","had","having",
];

/// Conversational words students wrap questions in. Dropped from queries
/// only; indexed text keeps them.
pub const QUERY_FILLER: &[&str] = &[
	"i","me","my","you","your","we","us","our","tell","about","explain","please","give",
	"describe","define","know","want","need","some","something","anything","more",
	"understand","mean","means","meaning","learn",
];

pub fn is_stop_word(term: &str) -> bool { STOP_WORDS.contains(&term) }

pub fn is_query_filler(term: &str) -> bool { QUERY_FILLER.contains(&term) }

/// Lowercased alphanumeric terms of `query`, stop words, filler words and
/// terms shorter than `min_len` chars removed, duplicates dropped (first
/// occurrence kept).
pub fn query_terms(query: &str, min_len: usize) -> Vec<String> {
	let mut terms: Vec<String> = Vec::new();
	for raw in query.split(|c: char| !c.is_alphanumeric()) {
		if raw.is_empty() { continue; }
		let term = raw.to_lowercase();
		if term.chars().count() < min_len || is_stop_word(&term) || is_query_filler(&term) {
			continue;
		}
		if !terms.contains(&term) { terms.push(term); }
	}
	terms
}
