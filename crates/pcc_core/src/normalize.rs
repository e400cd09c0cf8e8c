/// Collapse every whitespace run (spaces, tabs, newlines) to a single space
/// and trim the ends. Scraped policy pages arrive with heavy markup noise;
/// indexing and retrieval both assume this normalized form.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap `text` at `max_words` whitespace-separated tokens. Used as a prompt
/// size guard before the evaluation request is assembled.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.to_string();
    }
    words[..max_words].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_text_collapses_whitespace_and_trims() {
        assert_eq!(
            clean_text("  We   collect\n\nyour \t email.  "),
            "We collect your email."
        );
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \n \t "), "");
    }

    #[test]
    fn truncate_words_keeps_short_text_untouched() {
        let text = "one two three";
        assert_eq!(truncate_words(text, 5), text);
        assert_eq!(truncate_words(text, 3), text);
    }

    #[test]
    fn truncate_words_cuts_at_word_boundary() {
        assert_eq!(truncate_words("one two three four", 2), "one two");
    }
}
