pub mod dictionary;
pub mod location;
pub mod seeder;
pub mod speller;
pub mod suggestions;
pub mod tokenizer;

use crate::cli::output::suggestion_text;
use crate::model::{Comment, DocTree, FileLocation};
use crate::{ItemReport, Misspelling, Report, ReportEntry, SourcePosition};
use location::LocationResolver;
use speller::SpellingEngine;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Rows shown in the summary at the end of a report.
pub const TOP_MISSPELLINGS: usize = 10;

/// How often each misspelled word was seen during a run.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn record(&mut self, word: &str) {
        *self.counts.entry(word.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Up to `limit` words, most frequent first, ties in word order.
    pub fn ranked(&self, limit: usize) -> Vec<(String, usize)> {
        let mut order: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(word, count)| (word.clone(), *count))
            .collect();
        order.sort_by(|(a_word, a_count), (b_word, b_count)| {
            b_count.cmp(a_count).then_with(|| a_word.cmp(b_word))
        });
        order.truncate(limit);
        order
    }
}

/// One spell-checking run over a documentation tree.
///
/// Owns everything that lives for the run: the speller with its session
/// words, the per-file source cache and the frequency table.
pub struct Spellcheck<S: SpellingEngine> {
    speller: S,
    resolver: LocationResolver,
    misspellings: FrequencyTable,
}

impl<S: SpellingEngine> Spellcheck<S> {
    pub fn new(speller: S, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            speller,
            resolver: LocationResolver::new(source_dir),
            misspellings: FrequencyTable::default(),
        }
    }

    pub fn speller_mut(&mut self) -> &mut S {
        &mut self.speller
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.misspellings
    }

    /// Add the default words and every name in `tree` to the session dictionary.
    pub fn setup_dictionary(&mut self, tree: &DocTree) {
        seeder::seed(&mut self.speller, tree);
    }

    /// Misspelled words of `comment` in order of appearance.
    pub fn find_misspelled(&mut self, comment: &Comment) -> Vec<Misspelling> {
        let mut report = Vec::new();

        if comment.is_empty() {
            return report;
        }

        for token in tokenizer::scan(comment.text()) {
            let word = tokenizer::strip_possessive(token.text);

            if self.speller.check(word) {
                continue;
            }

            let offset = if token.start == 0 { 0 } else { token.start + 1 };

            self.misspellings.record(word);
            report.push(Misspelling {
                word: word.to_string(),
                offset,
            });
        }

        report
    }

    /// Report block for one documentation item, `None` when it has nothing
    /// to report. Items without a name (files) get an `In <file>:` header.
    pub fn misspellings_for(
        &mut self,
        name: Option<&str>,
        comment: &Comment,
        file: &FileLocation,
    ) -> crate::Result<Option<ItemReport>> {
        if comment.is_empty() {
            return Ok(None);
        }

        let misspelled = self.find_misspelled(comment);

        if misspelled.is_empty() {
            return Ok(None);
        }

        let header = match name {
            Some(name) => format!("{} in {}:", name, file.full_name()),
            None => format!("In {}:", file.full_name()),
        };

        let mut entries = Vec::with_capacity(misspelled.len());

        for Misspelling { word, offset } in misspelled {
            let suggestions = self.speller.suggest(&word);
            let suggestion_text = suggestion_text(comment.text(), &word, offset, &suggestions)?;

            let location = self
                .resolver
                .locate(comment.text(), offset, file)?
                .map(|(line, column)| SourcePosition {
                    path: file.absolute_name.clone(),
                    line,
                    column,
                });

            entries.push(ReportEntry {
                word,
                offset,
                location,
                suggestions,
                suggestion_text,
            });
        }

        Ok(Some(ItemReport { header, entries }))
    }

    /// Seed the dictionary from `tree`, then check every item in tree order.
    pub fn generate(&mut self, tree: &DocTree) -> crate::Result<Report> {
        self.setup_dictionary(tree);

        let mut items = Vec::new();

        for item in tree.items() {
            let name = item.header_name();
            let report = self.misspellings_for(name.as_deref(), item.comment(), item.file())?;
            items.extend(report);
        }

        debug!(
            items = items.len(),
            words = self.misspellings.counts.len(),
            "spell check finished"
        );

        Ok(Report {
            items,
            top_misspellings: self.misspellings.ranked(TOP_MISSPELLINGS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::dictionary::Dictionary;
    use crate::checker::speller::FstSpeller;
    use crate::model::{Alias, ClassModule, CommentLocation, Method, ModuleKind, TopLevel};
    use crate::VIA_INCLUDE;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TEXT: &str = "Hello, this class has real gud spelling!";

    const WORDS: &[&str] = &[
        "hello", "this", "class", "has", "real", "spelling", "doesn't", "quoted", "other",
        "method", "perfect", "good", "marvin", "you", "did",
    ];

    fn spellcheck() -> Spellcheck<FstSpeller> {
        let dictionary = Dictionary::from_words(WORDS).unwrap();
        let speller = FstSpeller::with_dictionary("en_US", dictionary);
        Spellcheck::new(speller, "/")
    }

    fn source_file() -> (NamedTempFile, FileLocation) {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# {}", TEXT).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "# funkify thingus").unwrap();
        file.flush().unwrap();

        let location = FileLocation::new(file.path().to_str().unwrap());
        (file, location)
    }

    fn misspelled(sc: &mut Spellcheck<FstSpeller>, text: &str) -> Vec<(String, usize)> {
        sc.find_misspelled(&Comment::new(text))
            .into_iter()
            .map(|m| (m.word, m.offset))
            .collect()
    }

    #[test]
    fn test_find_misspelled() {
        let mut sc = spellcheck();
        assert_eq!(misspelled(&mut sc, TEXT), vec![("gud".to_string(), 28)]);
    }

    #[test]
    fn test_find_misspelled_quote() {
        let mut sc = spellcheck();

        assert!(misspelled(&mut sc, "doesn't").is_empty());
        assert!(misspelled(&mut sc, "'quoted'").is_empty());
        assert!(misspelled(&mut sc, "other's").is_empty());
        assert!(sc.frequencies().is_empty());
    }

    #[test]
    fn test_find_misspelled_reports_stripped_possessive() {
        let mut sc = spellcheck();
        assert_eq!(misspelled(&mut sc, "real gud's"), vec![("gud".to_string(), 6)]);
    }

    #[test]
    fn test_find_misspelled_underscore() {
        let mut sc = spellcheck();
        assert_eq!(misspelled(&mut sc, "gud_method"), vec![("gud".to_string(), 0)]);
    }

    #[test]
    fn test_find_misspelled_utf_8() {
        let mut sc = spellcheck();
        sc.speller_mut().add_to_session("Gülker");

        assert!(misspelled(&mut sc, "Marvin Gülker").is_empty());
    }

    #[test]
    fn test_find_misspelled_empty_comment() {
        let mut sc = spellcheck();

        assert!(misspelled(&mut sc, "").is_empty());
        assert!(sc.frequencies().is_empty());
    }

    #[test]
    fn test_find_misspelled_counts_every_occurrence() {
        let mut sc = spellcheck();
        misspelled(&mut sc, "gud gud");
        misspelled(&mut sc, TEXT);

        assert_eq!(sc.frequencies().count("gud"), 3);
    }

    #[test]
    fn test_misspellings_for() {
        let (_file, location) = source_file();
        let mut sc = spellcheck();

        let report = sc
            .misspellings_for(Some("class Object"), &Comment::new(TEXT), &location)
            .unwrap()
            .unwrap();

        assert_eq!(report.header, format!("class Object in {}:", location.full_name()));
        assert_eq!(report.entries.len(), 1);

        let entry = &report.entries[0];
        assert_eq!(entry.word, "gud");
        let position = entry.location.as_ref().unwrap();
        assert_eq!((position.line, position.column), (0, 31));
        assert!(entry.suggestion_text.starts_with("\"...has real \x1b[1;31mgud\x1b[m"));
    }

    #[test]
    fn test_misspellings_for_file_header() {
        let (_file, location) = source_file();
        let mut sc = spellcheck();

        let report = sc
            .misspellings_for(None, &Comment::new(TEXT), &location)
            .unwrap()
            .unwrap();

        assert_eq!(report.header, format!("In {}:", location.full_name()));
    }

    #[test]
    fn test_misspellings_for_empty() {
        let (_file, location) = source_file();
        let mut sc = spellcheck();

        let report = sc
            .misspellings_for(Some("class Object"), &Comment::new(""), &location)
            .unwrap();
        assert!(report.is_none());

        let comment = Comment::new("perfect spelling");
        let report = sc
            .misspellings_for(Some("class Object"), &comment, &location)
            .unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn test_misspellings_for_unresolved_location() {
        let (_file, location) = source_file();
        let mut sc = spellcheck();

        let comment = Comment::new("you did real gud");
        let report = sc
            .misspellings_for(Some("Object alias old new"), &comment, &location)
            .unwrap()
            .unwrap();

        assert!(report.entries[0].location.is_none());
        assert_eq!(report.lines()[2], VIA_INCLUDE);
    }

    #[test]
    fn test_generate_seeds_and_ranks() {
        let (_file, location) = source_file();
        let mut sc = spellcheck();

        let mut object = ClassModule::new(ModuleKind::Class, "Object");
        object.comments.push(CommentLocation {
            comment: Comment::new(TEXT),
            file: location.clone(),
        });
        object.methods.push(Method {
            name: "funkify_thingus".to_string(),
            singleton: false,
            params: None,
            block_params: None,
            comment: Comment::new(format!("{}\nfunkify thingus", TEXT)),
            file: location.clone(),
        });
        object.aliases.push(Alias {
            old_name: "old".to_string(),
            new_name: "new".to_string(),
            comment: Comment::new("you did real gud wurk"),
            file: location.clone(),
        });

        let tree = DocTree {
            modules: vec![object],
            files: vec![TopLevel::new(location.clone())],
        };

        let report = sc.generate(&tree).unwrap();

        let headers: Vec<_> = report.items.iter().map(|item| item.header.as_str()).collect();
        assert_eq!(
            headers,
            vec![
                format!("class Object in {}:", location.full_name()),
                format!("Object#funkify_thingus in {}:", location.full_name()),
                format!("Object alias old new in {}:", location.full_name()),
            ]
        );
        assert_eq!(
            report.top_misspellings,
            vec![("gud".to_string(), 3), ("wurk".to_string(), 1)]
        );
    }

    #[test]
    fn test_generate_continues_after_unresolved_location() {
        let (_file, location) = source_file();
        let mut sc = spellcheck();

        let mut object = ClassModule::new(ModuleKind::Class, "Object");
        object.aliases.push(Alias {
            old_name: "old".to_string(),
            new_name: "new".to_string(),
            comment: Comment::new("you did real gud"),
            file: location.clone(),
        });

        let mut zed = ClassModule::new(ModuleKind::Class, "Zed");
        zed.comments.push(CommentLocation {
            comment: Comment::new(TEXT),
            file: location.clone(),
        });

        let tree = DocTree {
            modules: vec![object, zed],
            files: vec![],
        };

        let report = sc.generate(&tree).unwrap();

        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].lines()[2], VIA_INCLUDE);
        assert_eq!(
            report.items[1].header,
            format!("class Zed in {}:", location.full_name())
        );
        assert_eq!(
            report.items[1].lines()[2],
            format!("{}:0:31", location.absolute_name)
        );
        assert_eq!(report.top_misspellings, vec![("gud".to_string(), 2)]);
    }

    #[test]
    fn test_generate_missing_backing_file_is_fatal() {
        let mut sc = spellcheck();
        let mut tree = DocTree::default();
        tree.files.push(TopLevel {
            location: FileLocation::new("/nonexistent/docspell/README.rdoc"),
            comment: Comment::new(TEXT),
        });

        assert!(matches!(
            sc.generate(&tree),
            Err(crate::Error::UnreadableSource { .. })
        ));
    }

    #[test]
    fn test_frequency_table_ranking() {
        let mut table = FrequencyTable::default();
        for word in ["zed", "abc", "gud", "gud", "zed", "wurk"] {
            table.record(word);
        }

        assert_eq!(
            table.ranked(3),
            vec![
                ("gud".to_string(), 2),
                ("zed".to_string(), 2),
                ("abc".to_string(), 1),
            ]
        );
    }
}
