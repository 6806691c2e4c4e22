//! Flattens the curriculum tree and help list into one ordered chunk list.
//!
//! Order: every subchapter contributes its explanation, then each definition,
//! then its summary; help topics follow in source order. Source defects never
//! fail the build: blank names are replaced by positional labels so every
//! chunk keeps a non-empty title, and missing ids fall back to positions.

use tracing::{info, warn};

use crate::source::{Chapter, CurriculumDoc, HelpTopic, Subchapter};
use crate::types::{Chunk, Corpus};

pub const DEFINITION_SUFFIX: &str = " (Definition)";
pub const SUMMARY_SUFFIX: &str = " (Summary)";
const HELP_FALLBACK_TITLE: &str = "Help";

/// Build the corpus. Call once at startup and share the result by reference.
pub fn build(curriculum: &CurriculumDoc, help: &[HelpTopic]) -> Corpus {
    let mut chunks = flatten_curriculum(curriculum);
    let curriculum_count = chunks.len();
    chunks.extend(flatten_help(help));
    info!(
        curriculum_chunks = curriculum_count,
        help_chunks = chunks.len() - curriculum_count,
        "built offline corpus"
    );
    Corpus::from_chunks(chunks)
}

pub fn flatten_curriculum(doc: &CurriculumDoc) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for (ci, chapter) in doc.chapters.iter().enumerate() {
        let chapter_name = label_or(&chapter.name, || format!("Chapter {}", ci + 1));
        let chapter_ref = ref_or(chapter.id.as_deref(), ci);
        for (si, sub) in chapter.subchapters.iter().enumerate() {
            let sub_name = label_or(&sub.name, || format!("Section {}", si + 1));
            let sub_ref = ref_or(sub.id.as_deref(), si);
            flatten_subchapter(
                &mut chunks,
                &format!("{chapter_name} - {sub_name}"),
                &chapter_ref,
                &sub_ref,
                sub,
            );
        }
        warn_if_unnamed(chapter, ci);
    }
    chunks
}

fn flatten_subchapter(
    out: &mut Vec<Chunk>,
    title: &str,
    chapter_ref: &str,
    sub_ref: &str,
    sub: &Subchapter,
) {
    let make = |title: String, text: &str| {
        Chunk::curriculum(title, text.to_string(), chapter_ref.to_string(), sub_ref.to_string())
    };
    out.push(make(title.to_string(), &sub.explanation));
    for definition in &sub.definitions {
        out.push(make(format!("{title}{DEFINITION_SUFFIX}"), definition));
    }
    out.push(make(format!("{title}{SUMMARY_SUFFIX}"), &sub.summary));
}

pub fn flatten_help(topics: &[HelpTopic]) -> Vec<Chunk> {
    topics
        .iter()
        .map(|t| {
            let title = label_or(&t.topic, || HELP_FALLBACK_TITLE.to_string());
            Chunk::help(title, t.content.clone())
        })
        .collect()
}

fn label_or(name: &str, fallback: impl FnOnce() -> String) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() { fallback() } else { trimmed.to_string() }
}

fn ref_or(id: Option<&str>, position: usize) -> String {
    id.map_or_else(|| (position + 1).to_string(), str::to_string)
}

fn warn_if_unnamed(chapter: &Chapter, position: usize) {
    if chapter.name.trim().is_empty() {
        warn!(chapter = position + 1, "chapter has no name, using positional label");
    }
    let unnamed = chapter.subchapters.iter().filter(|s| s.name.trim().is_empty()).count();
    if unnamed > 0 {
        warn!(
            chapter = position + 1,
            unnamed,
            "subchapters without a name, using positional labels"
        );
    }
}
