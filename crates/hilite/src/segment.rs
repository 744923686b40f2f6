//! Sentence segmentation
//!
//! A sentence ends at `.`, `!` or `?` followed by whitespace. The
//! punctuation stays with its sentence and the whitespace run is dropped.

use std::sync::LazyLock;

use regex::Regex;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence boundary pattern"));

/// Split text into trimmed, non-blank sentences
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_END.find_iter(text) {
        // Punctuation is one ASCII byte
        push_sentence(&mut sentences, &text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_punctuation() {
        assert_eq!(
            split_sentences("One. Two! Three? Four"),
            vec!["One.", "Two!", "Three?", "Four"]
        );
    }

    #[test]
    fn test_split_needs_whitespace() {
        assert_eq!(split_sentences("Version 1.5 is out.Really"), vec!["Version 1.5 is out.Really"]);
        assert_eq!(split_sentences("Wait...  what?\n\tYes."), vec!["Wait...", "what?", "Yes."]);
    }

    #[test]
    fn test_split_drops_blanks() {
        assert!(split_sentences("   \n ").is_empty());
        assert_eq!(split_sentences("  Leading space. "), vec!["Leading space."]);
        assert_eq!(split_sentences("Ünïcode ok. Ñext"), vec!["Ünïcode ok.", "Ñext"]);
    }
}
