use std::env;

use tutor_cli::{init_logging, startup, take_overrides};
use tutor_core::types::ChunkKind;

// Inspect the flattened offline corpus.
// Usage:
//   tutor-corpus [--dump] [--curriculum PATH] [--help-file PATH]

fn main() -> anyhow::Result<()> {
    init_logging();
    let (overrides, rest) = take_overrides(env::args().skip(1).collect())?;
    let mut dump = false;
    for arg in &rest {
        match arg.as_str() {
            "--dump" => dump = true,
            s => {
                eprintln!("Unknown argument: {}", s);
                std::process::exit(2);
            }
        }
    }
    let startup = startup(&overrides)?;
    let sources = startup.load_sources()?;
    let chapters = sources.curriculum.chapters.len();
    let subchapters: usize = sources.curriculum.chapters.iter().map(|c| c.subchapters.len()).sum();
    let corpus = sources.into_corpus();

    println!("Offline corpus\n==============");
    println!("Curriculum: {}", startup.curriculum_path.display());
    println!("Help      : {}", startup.help_path.display());
    println!("Chapters: {}  Subchapters: {}", chapters, subchapters);
    println!(
        "Chunks: {} curriculum + {} help = {}",
        corpus.count_kind(ChunkKind::Curriculum),
        corpus.count_kind(ChunkKind::Help),
        corpus.len()
    );

    if dump {
        for chunk in &corpus {
            println!("{}", serde_json::to_string(chunk)?);
        }
    }
    Ok(())
}
