use crate::error::Error;
use anyhow::{Context, Result};
use fst::{Automaton, IntoStreamer, Set, SetBuilder, Streamer};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

/// Languages that work without an installed `.dict` file.
pub const EMBEDDED_LANGUAGES: &[&str] = &["en_US", "en_GB"];

/// Lowercase word set for one natural language.
pub struct Dictionary {
    set: Set<Vec<u8>>,
}

impl Dictionary {
    /// Load the dictionary for `language`, failing when it is not installed.
    pub fn load(language: &str) -> crate::Result<Self> {
        if let Ok(dict_path) = Self::get_dictionary_path(language) {
            if dict_path.exists() {
                return Ok(Self::load_from_path(&dict_path)?);
            }
        }

        if EMBEDDED_LANGUAGES.contains(&language) {
            return Ok(Self::from_words(Self::get_basic_wordlist())?);
        }

        Err(Error::UnknownLanguage(language.to_string()))
    }

    /// Load dictionary from a specific path (useful for testing)
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;

        let reader = BufReader::new(file);
        let set = Set::new(reader.bytes().collect::<Result<Vec<_>, _>>()?)
            .context("Failed to parse dictionary")?;

        Ok(Self { set })
    }

    /// Build an in-memory dictionary; words are lowercased.
    pub fn from_words<I>(words: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut sorted_words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().to_lowercase())
            .collect();
        sorted_words.sort();
        sorted_words.dedup();

        let set = Set::from_iter(sorted_words).context("Failed to build dictionary")?;
        Ok(Self { set })
    }

    /// Check if word exists in dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Get all words with a given prefix
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let mut stream = self
            .set
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                results.push(word);
            }
        }

        results
    }

    /// Up to `limit` words accepted by `keep`, in lexical order. Streams the
    /// set and stops early instead of collecting every word.
    pub fn first_words_where<F>(&self, limit: usize, keep: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let mut words = Vec::new();
        let mut stream = self.set.stream();

        while words.len() < limit {
            let Some(key) = stream.next() else {
                break;
            };
            if let Ok(word) = std::str::from_utf8(key) {
                if keep(word) {
                    words.push(word.to_string());
                }
            }
        }

        words
    }

    /// Build dictionary from word list
    pub fn build_from_words(words: &[String], output_path: &Path) -> Result<()> {
        let mut sorted_words: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        sorted_words.sort();
        sorted_words.dedup();

        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;

        let writer = BufWriter::new(file);
        let mut builder = SetBuilder::new(writer).context("Failed to create FST builder")?;

        for word in sorted_words {
            builder
                .insert(word.as_bytes())
                .context("Failed to insert word into dictionary")?;
        }

        builder.finish().context("Failed to finalize dictionary")?;

        Ok(())
    }

    /// Languages with a compiled `.dict` file plus the embedded ones, sorted.
    pub fn installed_languages() -> Result<Vec<String>> {
        let mut languages: Vec<String> =
            EMBEDDED_LANGUAGES.iter().map(|l| l.to_string()).collect();

        if let Some(data_dir) = crate::config::Config::data_dir() {
            if data_dir.exists() {
                for entry in fs::read_dir(&data_dir)? {
                    let path = entry?.path();
                    if path.extension().and_then(|s| s.to_str()) != Some("dict") {
                        continue;
                    }
                    if let Some(language) = path.file_stem().and_then(|s| s.to_str()) {
                        languages.push(language.to_string());
                    }
                }
            }
        }

        languages.sort();
        languages.dedup();
        Ok(languages)
    }

    pub fn get_dictionary_path(language: &str) -> Result<PathBuf> {
        let data_dir = crate::config::Config::data_dir().context("Failed to get data directory")?;

        Ok(data_dir.join(format!("{}.dict", language)))
    }

    /// Bootstrap word list used until a real dictionary is built with
    /// `docspell dict build`.
    fn get_basic_wordlist() -> Vec<&'static str> {
        vec![
            "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not",
            "on", "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from",
            "they", "we", "say", "her", "she", "or", "an", "will", "my", "one", "all", "would",
            "there", "their", "what", "so", "up", "out", "if", "about", "who", "get", "which",
            "go", "me", "when", "make", "can", "like", "time", "no", "just", "him", "know",
            "take", "people", "into", "year", "your", "good", "some", "could", "them", "see",
            "other", "than", "then", "now", "look", "only", "come", "its", "over", "think",
            "also", "back", "after", "use", "two", "how", "our", "work", "first", "well", "way",
            "even", "new", "want", "because", "any", "these", "give", "day", "most", "us", "is",
            "are", "was", "were", "has", "had", "does", "doesn't", "don't", "isn't", "can't",
            "won't", "here", "each", "more", "returns", "return", "given", "used", "uses",
            "hello", "world", "real", "perfect", "spelling", "text", "line", "proper", "comment",
            "comments", "file", "files", "name", "names", "value", "values", "default",
            // Programming terms
            "function", "class", "classes", "module", "modules", "method", "methods",
            "variable", "string", "integer", "boolean", "array", "list", "hash", "object",
            "parameter", "parameters", "argument", "arguments", "block", "constant",
            "attribute", "include", "alias", "import", "export", "callback", "error",
            "exception", "test", "debug", "compile", "build", "deploy", "version",
            "configuration", "documentation", "generator", "option", "options", "report",
        ]
    }
}
