use lazy_static::lazy_static;
use regex::{Matches, Regex};

lazy_static! {
    // A letter, then letters or apostrophes, then a letter.
    static ref CANDIDATE_WORD: Regex = Regex::new(r"\p{L}[\p{L}']+\p{L}").unwrap();
}

/// A candidate word and the char offset where it starts in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t> {
    pub text: &'t str,
    pub start: usize,
}

/// Lazy sequence of candidate words, see [`scan`].
pub struct Tokens<'t> {
    text: &'t str,
    matches: Matches<'static, 't>,
    byte_pos: usize,
    char_pos: usize,
}

impl<'t> Iterator for Tokens<'t> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let found = self.matches.next()?;

        self.char_pos += self.text[self.byte_pos..found.start()].chars().count();
        self.byte_pos = found.start();

        Some(Token {
            text: found.as_str(),
            start: self.char_pos,
        })
    }
}

/// Scan `text` for candidate words. Offsets are counted in chars.
pub fn scan(text: &str) -> Tokens<'_> {
    Tokens {
        text,
        matches: CANDIDATE_WORD.find_iter(text),
        byte_pos: 0,
        char_pos: 0,
    }
}

/// Drop a trailing possessive `'s`.
pub fn strip_possessive(word: &str) -> &str {
    let bytes = word.as_bytes();
    let len = bytes.len();
    if len > 2 && bytes[len - 2] == b'\'' && bytes[len - 1].eq_ignore_ascii_case(&b's') {
        &word[..len - 2]
    } else {
        word
    }
}

/// Split an identifier, path or parameter list into its alphabetic runs.
pub fn split_name(name: &str) -> impl Iterator<Item = &str> {
    name.split(|ch: char| !ch.is_alphabetic())
        .filter(|part| !part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<(&str, usize)> {
        scan(text).map(|token| (token.text, token.start)).collect()
    }

    #[test]
    fn test_scan_sentence() {
        assert_eq!(
            words("Hello, this class has real gud spelling!"),
            vec![
                ("Hello", 0),
                ("this", 7),
                ("class", 12),
                ("has", 18),
                ("real", 22),
                ("gud", 27),
                ("spelling", 31),
            ]
        );
    }

    #[test]
    fn test_scan_keeps_contractions() {
        assert_eq!(words("doesn't"), vec![("doesn't", 0)]);
        assert_eq!(words("'quoted'"), vec![("quoted", 1)]);
        assert_eq!(words("other's"), vec![("other's", 0)]);
    }

    #[test]
    fn test_scan_skips_short_words() {
        assert_eq!(words("a an be it"), vec![]);
    }

    #[test]
    fn test_scan_does_not_split_on_case_but_on_underscore() {
        assert_eq!(words("gud_method"), vec![("gud", 0), ("method", 4)]);
        assert_eq!(words("CamelCase"), vec![("CamelCase", 0)]);
    }

    #[test]
    fn test_scan_counts_chars_not_bytes() {
        assert_eq!(words("Marvin Gülker über"), vec![("Marvin", 0), ("Gülker", 7), ("über", 14)]);
        assert_eq!(words("Володя"), vec![("Володя", 0)]);
    }

    #[test]
    fn test_strip_possessive() {
        assert_eq!(strip_possessive("other's"), "other");
        assert_eq!(strip_possessive("OTHER'S"), "OTHER");
        assert_eq!(strip_possessive("doesn't"), "doesn't");
        assert_eq!(strip_possessive("class"), "class");
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("funkify_thingus").collect::<Vec<_>>(), vec!["funkify", "thingus"]);
        assert_eq!(split_name("Foo::BarBaz").collect::<Vec<_>>(), vec!["Foo", "BarBaz"]);
        assert_eq!(split_name("(baz, hoge)").collect::<Vec<_>>(), vec!["baz", "hoge"]);
        assert_eq!(split_name("Володя").collect::<Vec<_>>(), vec!["Володя"]);
        assert!(split_name("<=>").next().is_none());
        assert!(split_name("").next().is_none());
    }
}
