use std::env;

use tutor_cli::{init_logging, startup, take_overrides};
use tutor_fallback::RESULT_LIMIT;

// One-shot offline search.
// Usage:
//   tutor-search <query...> [--backend approx|tantivy] [--threshold 0.3]
//                [--curriculum PATH] [--help-file PATH]

fn main() -> anyhow::Result<()> {
    init_logging();
    let (overrides, rest) = take_overrides(env::args().skip(1).collect())?;
    if let Some(flag) = rest.iter().find(|a| a.starts_with("--")) {
        eprintln!("Unknown flag: {}", flag);
        std::process::exit(2);
    }
    let query = rest.join(" ");
    if query.trim().is_empty() {
        eprintln!(
            "Usage: tutor-search <query> [--backend approx|tantivy] [--threshold N] \
             [--curriculum PATH] [--help-file PATH]"
        );
        std::process::exit(1);
    }

    let startup = startup(&overrides)?;
    let service = startup.build_service()?;
    println!("Offline search\n==============");
    let search = &startup.settings.search;
    println!(
        "Query: {} (backend {:?}, threshold {}, top {})\n",
        query, search.backend, search.threshold, RESULT_LIMIT
    );

    let results = service.query(&query);
    if results.is_empty() {
        println!("No offline content found.");
        return Ok(());
    }
    for (i, chunk) in results.iter().enumerate() {
        println!("{:>2}. [{:?}] {}\n    {}", i + 1, chunk.kind, chunk.title, chunk.text);
    }
    Ok(())
}
