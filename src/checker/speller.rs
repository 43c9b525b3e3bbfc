use crate::checker::dictionary::Dictionary;
use crate::checker::suggestions;
use crate::Config;
use anyhow::Context;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Shortest word accepted as part of a run-together compound.
const RUN_TOGETHER_MIN: usize = 3;
/// Most words a run-together compound may consist of.
const RUN_TOGETHER_LIMIT: usize = 8;

/// Word validity and suggestions for one natural language.
pub trait SpellingEngine {
    fn check(&self, word: &str) -> bool;

    /// Ranked corrections, best first. May be empty.
    fn suggest(&self, word: &str) -> Vec<String>;

    /// Accept `word` until the engine is dropped.
    fn add_to_session(&mut self, word: &str);

    /// Accept `word` and remember it in the personal word list on the next
    /// [`save_all_word_lists`](SpellingEngine::save_all_word_lists).
    fn add_to_personal(&mut self, word: &str);

    fn save_all_word_lists(&mut self) -> anyhow::Result<()>;
}

/// Spelling engine backed by an fst word set plus session and personal words.
pub struct FstSpeller {
    language: String,
    dictionary: Dictionary,
    session: HashSet<String>,
    personal: HashSet<String>,
    unsaved: Vec<String>,
    personal_path: Option<PathBuf>,
    run_together: bool,
    max_suggestions: usize,
}

impl FstSpeller {
    /// Load the dictionary for the configured language and the personal word list.
    pub fn new(config: &Config) -> crate::Result<Self> {
        let dictionary = Dictionary::load(&config.language)?;

        let mut speller = Self::with_dictionary(&config.language, dictionary)
            .run_together(config.run_together)
            .max_suggestions(config.max_suggestions);

        if let Some(path) = &config.personal_dictionary {
            speller.load_personal(path)?;
        }

        Ok(speller)
    }

    pub fn with_dictionary(language: &str, dictionary: Dictionary) -> Self {
        Self {
            language: language.to_string(),
            dictionary,
            session: HashSet::new(),
            personal: HashSet::new(),
            unsaved: Vec::new(),
            personal_path: None,
            run_together: true,
            max_suggestions: 5,
        }
    }

    pub fn run_together(mut self, enabled: bool) -> Self {
        self.run_together = enabled;
        self
    }

    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Read the personal word list at `path`; new personal words are appended to it.
    pub fn load_personal(&mut self, path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read personal dictionary: {}", path.display()))?;
            for line in content.lines() {
                let word = line.trim();
                if !word.is_empty() && !word.starts_with('#') {
                    self.personal.insert(word.to_string());
                }
            }
            debug!(path = %path.display(), words = self.personal.len(), "loaded personal word list");
        }

        self.personal_path = Some(path.to_path_buf());
        Ok(())
    }

    fn is_known(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        let variants = case_variants(word);

        if variants.contains(&lower) && self.dictionary.contains(&lower) {
            return true;
        }

        variants
            .iter()
            .any(|variant| self.session.contains(variant) || self.personal.contains(variant))
    }

    /// Whether `word` splits into known words of at least [`RUN_TOGETHER_MIN`] chars.
    fn is_compound(&self, word: &str) -> bool {
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();
        let chars = bounds.len() - 1;

        if chars < RUN_TOGETHER_MIN * 2 {
            return false;
        }

        // parts[i]: fewest known words covering the first i chars
        let mut parts = vec![usize::MAX; chars + 1];
        parts[0] = 0;

        for end in RUN_TOGETHER_MIN..=chars {
            for start in 0..=end - RUN_TOGETHER_MIN {
                if parts[start] >= RUN_TOGETHER_LIMIT {
                    continue;
                }
                if self.is_known(&word[bounds[start]..bounds[end]]) {
                    parts[end] = parts[end].min(parts[start] + 1);
                }
            }
        }

        (2..=RUN_TOGETHER_LIMIT).contains(&parts[chars])
    }
}

impl SpellingEngine for FstSpeller {
    fn check(&self, word: &str) -> bool {
        self.is_known(word) || (self.run_together && self.is_compound(word))
    }

    fn suggest(&self, word: &str) -> Vec<String> {
        let extra: Vec<&str> = self
            .session
            .iter()
            .chain(self.personal.iter())
            .map(String::as_str)
            .collect();

        let found = suggestions::generate(word, &self.dictionary, &extra, self.max_suggestions);

        if word.chars().next().map_or(false, char::is_uppercase) {
            found.iter().map(|suggestion| capitalize(suggestion)).collect()
        } else {
            found
        }
    }

    fn add_to_session(&mut self, word: &str) {
        if !word.is_empty() {
            self.session.insert(word.to_string());
        }
    }

    fn add_to_personal(&mut self, word: &str) {
        if !word.is_empty() && self.personal.insert(word.to_string()) {
            self.unsaved.push(word.to_string());
        }
    }

    fn save_all_word_lists(&mut self) -> anyhow::Result<()> {
        let Some(path) = &self.personal_path else {
            return Ok(());
        };
        if self.unsaved.is_empty() {
            return Ok(());
        }

        let mut content = if path.exists() {
            fs::read_to_string(path)?
        } else {
            String::new()
        };
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        for word in self.unsaved.drain(..) {
            content.push_str(&format!("{}\n", word));
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write personal dictionary: {}", path.display()))?;
        Ok(())
    }
}

/// Spellings `word` may match: itself, plus lowercase for capitalized or
/// all-caps words, plus title case for all-caps words.
fn case_variants(word: &str) -> Vec<String> {
    let mut variants = vec![word.to_string()];

    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return variants;
    };
    let rest = chars.as_str();

    let all_upper = word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase);
    let title = first.is_uppercase() && !rest.chars().any(char::is_uppercase);

    if all_upper || title {
        variants.push(word.to_lowercase());
    }
    if all_upper && !rest.is_empty() {
        variants.push(format!("{}{}", first, rest.to_lowercase()));
    }

    variants
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
