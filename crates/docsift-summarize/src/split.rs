//! Sentence boundary detection. Punctuation-based splitting is a known
//! weak spot (abbreviations, decimal numbers), so the strategy is a
//! trait with one default implementation and can be swapped without
//! touching scoring.

/// A candidate sentence with its position in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub position: usize,
    pub text: String,
}

pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<Sentence>;
}

/// Splits on runs of sentence-terminal punctuation (`.` `!` `?`) followed
/// by whitespace, or at end of input. Whitespace-only fragments are
/// dropped; fragments shorter than `min_chars` are dropped too when a
/// floor is configured.
#[derive(Debug, Clone, Default)]
pub struct PunctuationSplitter {
    min_chars: usize,
}

impl PunctuationSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Floor on sentence length in characters, for sources whose
    /// extraction artifacts produce stray short fragments.
    pub fn with_min_chars(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl SentenceSplitter for PunctuationSplitter {
    fn split(&self, text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            current.push(c);
            if matches!(c, '.' | '!' | '?') {
                // Consume the rest of the punctuation run ("?!", "...")
                while let Some(&next) = chars.peek() {
                    if matches!(next, '.' | '!' | '?') {
                        current.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if chars.peek().is_none_or(|next| next.is_whitespace()) {
                    push_sentence(&mut sentences, &mut current, self.min_chars);
                }
            }
        }
        push_sentence(&mut sentences, &mut current, self.min_chars);
        sentences
    }
}

fn push_sentence(sentences: &mut Vec<Sentence>, current: &mut String, min_chars: usize) {
    let trimmed = current.trim();
    if !trimmed.is_empty() && trimmed.chars().count() >= min_chars {
        sentences.push(Sentence { position: sentences.len(), text: trimmed.to_string() });
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(sentences: &[Sentence]) -> Vec<&str> {
        sentences.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let splitter = PunctuationSplitter::new();
        let out = splitter.split("First rule. Second rule! Third rule? Done");
        assert_eq!(texts(&out), vec!["First rule.", "Second rule!", "Third rule?", "Done"]);
        for (i, s) in out.iter().enumerate() {
            assert_eq!(s.position, i);
        }
    }

    #[test]
    fn punctuation_runs_stay_with_their_sentence() {
        let splitter = PunctuationSplitter::new();
        let out = splitter.split("Really?! Yes. Fine.");
        assert_eq!(texts(&out), vec!["Really?!", "Yes.", "Fine."]);

        // An ellipsis is one boundary, not three
        let out = splitter.split("Wait... done.");
        assert_eq!(texts(&out), vec!["Wait...", "done."]);
    }

    #[test]
    fn decimal_numbers_do_not_break_sentences() {
        let splitter = PunctuationSplitter::new();
        let out = splitter.split("The rate is 6.5 percent. It was revised.");
        assert_eq!(texts(&out), vec!["The rate is 6.5 percent.", "It was revised."]);
    }

    #[test]
    fn whitespace_only_fragments_are_dropped() {
        let splitter = PunctuationSplitter::new();
        assert!(splitter.split("   \n\t ").is_empty());
        let out = splitter.split("One.   .  Two.");
        assert_eq!(texts(&out), vec!["One.", ".", "Two."]);
    }

    #[test]
    fn min_chars_floor_filters_short_fragments() {
        let splitter = PunctuationSplitter::with_min_chars(5);
        let out = splitter.split("Ok. A much longer sentence here.");
        assert_eq!(texts(&out), vec!["A much longer sentence here."]);
    }
}
