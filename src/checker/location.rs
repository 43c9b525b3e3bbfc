use crate::error::Error;
use crate::model::FileLocation;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Maps comment offsets back to lines and columns of the file they came from.
///
/// A comment may be stitched together from several places (aliases,
/// includes, inherited documentation), so the comment text is matched line by
/// line against the physical file instead of trusting offsets.
pub struct LocationResolver {
    source_dir: PathBuf,
    cache: HashMap<PathBuf, String>,
}

impl LocationResolver {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            cache: HashMap::new(),
        }
    }

    /// Zero-based `(line, column)` of the char at `offset` in `text`, where
    /// the column points just past it. `None` when no line of the backing
    /// file contains the text leading up to the offset.
    pub fn locate(
        &mut self,
        text: &str,
        offset: usize,
        file: &FileLocation,
    ) -> crate::Result<Option<(usize, usize)>> {
        let offset_byte = byte_index(text, offset);
        let line_start = text[..offset_byte].rfind('\n').map_or(0, |pos| pos + 1);
        let fragment = &text[line_start..byte_index(text, offset + 1)];

        if fragment.is_empty() {
            return Ok(None);
        }

        let content = self.source(file)?;

        for (index, line) in content.lines().enumerate() {
            if let Some(pos) = line.find(fragment) {
                let column = line[..pos].chars().count() + fragment.chars().count();
                return Ok(Some((index, column)));
            }
        }

        debug!(file = %file.absolute_name, offset, "no physical line matches comment text");
        Ok(None)
    }

    fn source(&mut self, file: &FileLocation) -> crate::Result<&str> {
        let path = self.source_dir.join(&file.absolute_name);

        if !self.cache.contains_key(&path) {
            debug!(path = %path.display(), "reading backing file");
            let content = fs::read_to_string(&path).map_err(|source| Error::UnreadableSource {
                path: path.clone(),
                source,
            })?;
            self.cache.insert(path.clone(), content);
        }

        Ok(&self.cache[&path])
    }
}

/// Byte index of the char at `chars`, clamped to the end of `text`.
fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TEXT: &str = "Hello, this class has real gud spelling!";

    fn source_file(lines: &[&str]) -> (NamedTempFile, FileLocation) {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();

        let location = FileLocation::new(file.path().to_str().unwrap());
        (file, location)
    }

    #[test]
    fn test_locate_later_line() {
        let (_file, location) = source_file(&[
            "##",
            "# Here is some text with proper spelling",
            "#",
            &format!("# {}", TEXT),
        ]);
        let text = format!("Here is some text with proper spelling\n\n{}", TEXT);
        let offset = text[..text.find("gud").unwrap()].chars().count();

        let mut resolver = LocationResolver::new("/");
        assert_eq!(resolver.locate(&text, offset, &location).unwrap(), Some((3, 30)));
    }

    #[test]
    fn test_locate_first_line() {
        let (_file, location) = source_file(&[&format!("# {}", TEXT)]);

        let mut resolver = LocationResolver::new("/");
        assert_eq!(resolver.locate(TEXT, 27, &location).unwrap(), Some((0, 30)));
    }

    #[test]
    fn test_locate_counts_chars() {
        let (_file, location) = source_file(&["# Grüße aus Köln, gud"]);
        let text = "Grüße aus Köln, gud";

        let mut resolver = LocationResolver::new("/");
        assert_eq!(resolver.locate(text, 16, &location).unwrap(), Some((0, 19)));
    }

    #[test]
    fn test_locate_unresolved() {
        let (_file, location) = source_file(&["# something else entirely"]);

        let mut resolver = LocationResolver::new("/");
        assert_eq!(resolver.locate(TEXT, 27, &location).unwrap(), None);
    }

    #[test]
    fn test_locate_missing_file_is_fatal() {
        let location = FileLocation::new("/nonexistent/docspell/lib.rb");

        let mut resolver = LocationResolver::new("/");
        let err = resolver.locate(TEXT, 27, &location).unwrap_err();
        assert!(matches!(err, Error::UnreadableSource { .. }));
        assert!(err.to_string().contains("/nonexistent/docspell/lib.rb"));
    }

    #[test]
    fn test_locate_relative_to_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib.rb"), format!("# {}\n", TEXT)).unwrap();

        let mut resolver = LocationResolver::new(dir.path());
        let location = FileLocation::new("lib.rb");
        assert_eq!(resolver.locate(TEXT, 27, &location).unwrap(), Some((0, 30)));
    }

    #[test]
    fn test_file_contents_are_cached() {
        let (file, location) = source_file(&[&format!("# {}", TEXT)]);

        let mut resolver = LocationResolver::new("/");
        assert!(resolver.locate(TEXT, 27, &location).unwrap().is_some());

        file.close().unwrap();
        assert!(resolver.locate(TEXT, 27, &location).unwrap().is_some());
    }
}
