use tutor_core::types::Chunk;

const INTRO: &str =
    "I can't reach the online tutor right now, but here is what I found in your offline lessons:";

/// Offline reply for the chat. `NothingFound` is distinct from a service
/// failure; the caller picks its own wording for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackMessage {
    Found(String),
    NothingFound,
}

pub fn compose_fallback(results: &[&Chunk], preview_chars: usize) -> FallbackMessage {
    if results.is_empty() {
        return FallbackMessage::NothingFound;
    }
    let mut message = String::from(INTRO);
    for chunk in results {
        message.push_str("\n• ");
        message.push_str(&chunk.title);
        let preview = preview(&chunk.text, preview_chars);
        if !preview.is_empty() {
            message.push_str(": ");
            message.push_str(&preview);
        }
    }
    FallbackMessage::Found(message)
}

// Collapses whitespace and cuts at a char boundary.
fn preview(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_results_are_nothing_found() {
        assert_eq!(compose_fallback(&[], 80), FallbackMessage::NothingFound);
    }

    #[test]
    fn one_bullet_per_result() {
        let a = Chunk::help("Quizzes".to_string(), "Open the quiz tab.".to_string());
        let b = Chunk::help("Notebook".to_string(), String::new());
        let FallbackMessage::Found(text) = compose_fallback(&[&a, &b], 80) else {
            panic!("expected found")
        };
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "• Quizzes: Open the quiz tab.");
        assert_eq!(lines[2], "• Notebook");
    }

    #[test]
    fn long_text_is_truncated_on_char_boundary() {
        assert_eq!(preview("héllo   wörld again", 11), "héllo wörld…");
        assert_eq!(preview("short", 11), "short");
    }
}
