use std::fs;
use tempfile::TempDir;

use tutor_core::config::{Backend, Config};
use tutor_core::corpus;
use tutor_core::error::Error;
use tutor_core::source::CorpusSources;
use tutor_core::types::ChunkKind;

const CURRICULUM: &str = r#"{
  "chapters": [
    {
      "id": "ch-food",
      "name": "Food",
      "subchapters": [
        {
          "id": "sources",
          "name": "Sources of Food",
          "explanation": "Plants use sunlight to make food.",
          "definitions": ["Herbivore: eats plants", "Carnivore: eats animals"],
          "keyPoints": ["Plants are producers"],
          "summary": "Food comes from plants and animals.",
          "examples": ["Rice", "Milk"]
        },
        {
          "id": "cooking",
          "name": "Cooking",
          "explanation": "Heat changes food.",
          "summary": "Cooking makes food safe."
        }
      ]
    },
    {
      "id": 7,
      "name": "Magnets",
      "subchapters": [
        {
          "name": "Poles",
          "explanation": "Every magnet has two poles.",
          "definitions": null,
          "summary": null
        }
      ]
    }
  ]
}"#;

const HELP: &str = r#"[
  { "topic": "Quizzes", "content": "Open the Quiz tab to test yourself." },
  { "topic": "Notebook", "content": "Your notes are saved offline." }
]"#;

fn sources() -> CorpusSources { CorpusSources::from_json(CURRICULUM, HELP).expect("parse sources") }

#[test]
fn subchapter_yields_definitions_plus_two_chunks() {
    let corpus = sources().into_corpus();
    // (2 + 2) + (0 + 2) + (0 + 2) curriculum chunks, then 2 help chunks
    assert_eq!(corpus.count_kind(ChunkKind::Curriculum), 8);
    assert_eq!(corpus.count_kind(ChunkKind::Help), 2);
    assert_eq!(corpus.len(), 10);
}

#[test]
fn curriculum_chunks_follow_explanation_definitions_summary_order() {
    let corpus = sources().into_corpus();
    let titles: Vec<&str> = corpus.iter().take(4).map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Food - Sources of Food",
            "Food - Sources of Food (Definition)",
            "Food - Sources of Food (Definition)",
            "Food - Sources of Food (Summary)",
        ]
    );
    assert_eq!(corpus[0].text, "Plants use sunlight to make food.");
    assert_eq!(corpus[1].text, "Herbivore: eats plants");
    assert_eq!(corpus[2].text, "Carnivore: eats animals");
    for chunk in corpus.iter().take(4) {
        assert_eq!(chunk.chapter_ref.as_deref(), Some("ch-food"));
        assert_eq!(chunk.subchapter_ref.as_deref(), Some("sources"));
    }
}

#[test]
fn help_chunks_come_last_in_input_order() {
    let corpus = sources().into_corpus();
    let help: Vec<_> = corpus.iter().filter(|c| c.kind == ChunkKind::Help).collect();
    assert_eq!(help[0].title, "Quizzes");
    assert_eq!(help[1].title, "Notebook");
    assert_eq!(help[1].text, "Your notes are saved offline.");
    assert!(help.iter().all(|c| c.chapter_ref.is_none() && c.subchapter_ref.is_none()));
    assert_eq!(corpus[corpus.len() - 2].title, "Quizzes");
}

#[test]
fn missing_and_null_fields_degrade_to_empty() {
    let corpus = sources().into_corpus();
    let poles: Vec<_> = corpus.iter().filter(|c| c.title.starts_with("Magnets - Poles")).collect();
    assert_eq!(poles.len(), 2, "null definitions are treated as an empty list");
    assert_eq!(poles[1].title, "Magnets - Poles (Summary)");
    assert_eq!(poles[1].text, "");
    // numeric chapter id and positional subchapter ref
    assert_eq!(poles[0].chapter_ref.as_deref(), Some("7"));
    assert_eq!(poles[0].subchapter_ref.as_deref(), Some("1"));
}

#[test]
fn blank_names_get_positional_titles() {
    let curriculum = r#"[{ "subchapters": [{ "explanation": "x" }] }]"#;
    let help = r#"{ "topics": [{ "content": "orphan" }] }"#;
    let corpus = CorpusSources::from_json(curriculum, help).expect("parse").into_corpus();
    assert_eq!(corpus[0].title, "Chapter 1 - Section 1");
    assert_eq!(corpus[2].title, "Help");
    assert!(corpus.iter().all(|c| !c.title.is_empty()));
}

#[test]
fn flatten_is_deterministic() {
    let s = sources();
    let a = corpus::build(&s.curriculum, &s.help);
    let b = corpus::build(&s.curriculum, &s.help);
    assert_eq!(a.chunks(), b.chunks());
}

#[test]
fn load_reads_curriculum_directory_in_sorted_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("curriculum");
    fs::create_dir_all(&dir).unwrap();
    let light = r#"[{ "name": "Light", "subchapters": [{ "name": "Mirrors" }] }]"#;
    let food = r#"[{ "name": "Food", "subchapters": [{ "name": "Sources" }] }]"#;
    fs::write(dir.join("b_class7.json"), light).unwrap();
    fs::write(dir.join("a_class6.json"), food).unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();
    let help_path = tmp.path().join("help.json");
    fs::write(&help_path, HELP).unwrap();

    let loaded = CorpusSources::load(&dir, &help_path).expect("load");
    let names: Vec<&str> = loaded.curriculum.chapters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Light"]);
    assert_eq!(loaded.help.len(), 2);
}

#[test]
fn load_surfaces_invalid_json_as_source_error() {
    let tmp = TempDir::new().unwrap();
    let curriculum = tmp.path().join("curriculum.json");
    let help = tmp.path().join("help.json");
    fs::write(&curriculum, "{ not json").unwrap();
    fs::write(&help, HELP).unwrap();

    match CorpusSources::load(&curriculum, &help) {
        Err(Error::Source { path, .. }) => assert!(path.ends_with("curriculum.json")),
        other => panic!("expected source error, got {other:?}"),
    }
    assert!(CorpusSources::load(&tmp.path().join("missing.json"), &help).is_err());
}

#[test]
fn config_merges_env_file_over_base_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[search]\nthreshold = 0.25\nbackend = \"tantivy\"\n\
         [data]\nhelp_path = \"content/help.json\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("config.test.toml"), "[search]\nthreshold = 0.35\n").unwrap();

    let config = Config::load_from(tmp.path(), "test").expect("config");
    let settings = config.settings().expect("settings");
    assert!((settings.search.threshold - 0.35).abs() < 1e-9);
    assert_eq!(settings.search.backend, Backend::Tantivy);
    assert_eq!(settings.search.min_term_len, 3, "unset keys keep defaults");
    assert!((settings.search.min_term_share - 0.5).abs() < 1e-9);
    assert_eq!(settings.fallback.preview_chars, 160);
    assert_eq!(config.resolve(&settings.data.help_path), tmp.path().join("content/help.json"));
    let threshold: f64 = config.get("search.threshold").expect("get");
    assert!((threshold - 0.35).abs() < 1e-9);
}

#[test]
fn config_rejects_out_of_range_threshold() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[search]\nthreshold = 2.0\n").unwrap();
    assert!(Config::load_from(tmp.path(), "test").is_err());
}

#[test]
fn config_rejects_zero_term_share() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[search]\nmin_term_share = 0.0\n").unwrap();
    assert!(Config::load_from(tmp.path(), "test").is_err());
}
