//! Bundled content sources: the curriculum tree and the help-topic list.
//!
//! Parsing is lenient about missing or `null` fields (they become empty
//! strings and lists) but strict about unreadable files and invalid JSON,
//! which are startup failures for the host.

use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::corpus;
use crate::error::{Error, Result};
use crate::types::Corpus;

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Ids show up as strings or bare numbers in the content files.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurriculumDoc {
    #[serde(default, deserialize_with = "null_as_default")]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chapter {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", alias = "title", alias = "chapterName")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default", alias = "subChapters")]
    pub subchapters: Vec<Subchapter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subchapter {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", alias = "title")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_points: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HelpTopic {
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

// Both files ship either as a bare array or wrapped in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum CurriculumFile {
    Chapters(Vec<Chapter>),
    Doc(CurriculumDoc),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HelpFile {
    Topics(Vec<HelpTopic>),
    Wrapped {
        #[serde(default, deserialize_with = "null_as_default", alias = "helpTopics")]
        topics: Vec<HelpTopic>,
    },
}

/// Parsed, not yet flattened, content sources.
#[derive(Debug, Clone, Default)]
pub struct CorpusSources {
    pub curriculum: CurriculumDoc,
    pub help: Vec<HelpTopic>,
}

impl CorpusSources {
    /// Load sources from disk. `curriculum_path` may be a single JSON file or
    /// a directory whose `*.json` files are read in sorted path order and
    /// concatenated chapter-wise.
    pub fn load(curriculum_path: &Path, help_path: &Path) -> Result<Self> {
        let curriculum = if curriculum_path.is_dir() {
            let mut doc = CurriculumDoc::default();
            for file in list_json_files(curriculum_path) {
                doc.chapters.extend(read_curriculum(&file)?.chapters);
            }
            doc
        } else {
            read_curriculum(curriculum_path)?
        };
        let help = parse_help(&read_source(help_path)?).map_err(|e| source_error(help_path, e))?;
        info!(
            chapters = curriculum.chapters.len(),
            help_topics = help.len(),
            "loaded content sources"
        );
        Ok(Self { curriculum, help })
    }

    /// Parse sources already held in memory, e.g. via `include_str!`.
    pub fn from_json(curriculum: &str, help: &str) -> Result<Self> {
        let curriculum = parse_curriculum(curriculum).map_err(|e| Error::Source {
            path: "<curriculum>".to_string(),
            message: e.to_string(),
        })?;
        let help = parse_help(help).map_err(|e| Error::Source {
            path: "<help>".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { curriculum, help })
    }

    pub fn into_corpus(self) -> Corpus { corpus::build(&self.curriculum, &self.help) }
}

fn parse_curriculum(json: &str) -> serde_json::Result<CurriculumDoc> {
    Ok(match serde_json::from_str::<CurriculumFile>(json)? {
        CurriculumFile::Chapters(chapters) => CurriculumDoc { chapters },
        CurriculumFile::Doc(doc) => doc,
    })
}

fn parse_help(json: &str) -> serde_json::Result<Vec<HelpTopic>> {
    Ok(match serde_json::from_str::<HelpFile>(json)? {
        HelpFile::Topics(topics) | HelpFile::Wrapped { topics } => topics,
    })
}

fn read_curriculum(path: &Path) -> Result<CurriculumDoc> {
    let doc = parse_curriculum(&read_source(path)?).map_err(|e| source_error(path, e))?;
    debug!(path = %path.display(), chapters = doc.chapters.len(), "parsed curriculum file");
    Ok(doc)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| source_error(path, e))
}

fn source_error(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Source { path: path.display().to_string(), message: e.to_string() }
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}
