use unicode_segmentation::UnicodeSegmentation;

/// Splits text into sentences and sentences into word tokens.
pub trait Tokenizer {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Word tokens of one sentence; punctuation tokens may be included.
    fn words<'a>(&self, sentence: &'a str) -> Vec<&'a str>;
}

/// Unicode (UAX #29) sentence and word boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .collect()
    }

    fn words<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        let mut words = Vec::new();
        for token in sentence
            .split_word_bounds()
            .filter(|token| !token.trim().is_empty())
        {
            match split_clitic(token) {
                Some((head, clitic)) => {
                    words.push(head);
                    words.push(clitic);
                }
                None => words.push(token),
            }
        }
        words
    }
}

/// One sentence per line. Used for caption tracks that carry no punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTokenizer;

impl Tokenizer for LineTokenizer {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    fn words<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        UnicodeTokenizer.words(sentence)
    }
}

const CLITICS: &[&str] = &[
    "n't", "n’t", "'s", "’s", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'d", "’d", "'m", "’m",
];

/// `"don't"` -> `("do", "n't")`, `"It's"` -> `("It", "'s")`.
fn split_clitic(token: &str) -> Option<(&str, &str)> {
    CLITICS.iter().find_map(|clitic| {
        let split = token.len().checked_sub(clitic.len())?;
        if split == 0 {
            return None;
        }
        let tail = token.get(split..)?;
        tail.eq_ignore_ascii_case(clitic)
            .then(|| (&token[..split], tail))
    })
}

/// True when `text` contains any sentence-ending punctuation.
pub fn has_sentence_terminator(text: &str) -> bool {
    text.contains(['.', '!', '?', '。', '！', '？'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences_are_trimmed() {
        let sentences = UnicodeTokenizer.sentences("Hello there.  How are you? Fine!");
        assert_eq!(sentences, vec!["Hello there.", "How are you?", "Fine!"]);
    }

    #[test]
    fn test_words_keep_punctuation_tokens() {
        let words = UnicodeTokenizer.words("Rust, really fast.");
        assert_eq!(words, vec!["Rust", ",", "really", "fast", "."]);
    }

    #[test]
    fn test_contractions_split_off_clitics() {
        let words = UnicodeTokenizer.words("It's fine, don't worry; you’re right.");
        assert_eq!(
            words,
            vec!["It", "'s", "fine", ",", "do", "n't", "worry", ";", "you", "’re", "right", "."]
        );
    }

    #[test]
    fn test_bare_clitic_is_not_split() {
        assert_eq!(split_clitic("'s"), None);
        assert_eq!(split_clitic("CAN'T"), Some(("CA", "N'T")));
    }

    #[test]
    fn test_line_tokenizer_treats_lines_as_sentences() {
        let sentences = LineTokenizer.sentences("so today we\n\n  talk about rust  \n");
        assert_eq!(sentences, vec!["so today we", "talk about rust"]);
    }

    #[test]
    fn test_sentence_terminator_detection() {
        assert!(has_sentence_terminator("Done. Next"));
        assert!(!has_sentence_terminator("so today we talk about rust"));
    }

    #[test]
    fn test_empty_text() {
        assert!(UnicodeTokenizer.sentences("   ").is_empty());
    }
}
