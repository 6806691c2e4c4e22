use std::env;
use std::io::{self, BufRead, Write};

use tutor_cli::{init_logging, startup, take_overrides};
use tutor_core::traits::RemoteAssistant;
use tutor_fallback::{ChatResponder, Connectivity, FallbackMessage, Reply};

// Interactive offline tutor chat. Each line is answered from local content.
// Usage:
//   tutor-chat [--backend approx|tantivy] [--threshold N] [--curriculum PATH] [--help-file PATH]

struct NoRemote;

impl RemoteAssistant for NoRemote {
    fn ask(&self, _message: &str) -> anyhow::Result<String> {
        anyhow::bail!("no remote tutor configured")
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let (overrides, rest) = take_overrides(env::args().skip(1).collect())?;
    if let Some(arg) = rest.first() {
        eprintln!("Unknown argument: {}", arg);
        std::process::exit(2);
    }
    let startup = startup(&overrides)?;
    let service = startup.build_service()?;
    let chat = ChatResponder::new(&service, NoRemote, startup.settings.fallback.preview_chars);

    println!(
        "Offline tutor ({} chunks). Type a question, or 'quit' to exit.",
        service.corpus().len()
    );
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 { break; }
        let line = line.trim();
        if line.is_empty() { continue; }
        if line == "quit" || line == "exit" { break; }
        match chat.respond(line, Connectivity::Offline) {
            Reply::Remote(answer) => println!("{}\n", answer),
            Reply::Offline(FallbackMessage::Found(text)) => println!("{}\n", text),
            Reply::Offline(FallbackMessage::NothingFound) => {
                println!(
                    "I couldn't find anything about that in your offline lessons. \
                     Try other words, or reconnect to ask the online tutor.\n"
                );
            }
        }
    }
    Ok(())
}
