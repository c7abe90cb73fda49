//! Word list loading and normalization.
//!
//! A word list file holds one candidate word per line. Lines are trimmed;
//! blank lines and lines containing anything but ASCII letters are skipped
//! (grid cells hold single letters, and uppercase ASCII keeps byte offsets
//! equal to character offsets, which the overlap checks index by). Words are
//! uppercased, sorted, and deduplicated.

use std::io;

/// An in-memory list of candidate words.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    /// Normalized words: uppercase ASCII, sorted, unique.
    pub words: Vec<String>,
}

impl WordList {
    /// Parse word list text.
    #[must_use]
    pub fn parse_from_str(content: &str) -> Self {
        let mut words: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && line.bytes().all(|b| b.is_ascii_alphabetic()))
            .map(str::to_ascii_uppercase)
            .collect();
        words.sort_unstable();
        words.dedup();
        Self { words }
    }

    /// Read and parse a word list file.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] (with the path in the message) if the file
    /// cannot be read. An empty or all-skipped file is not an error; the
    /// resulting empty list simply makes every non-trivial puzzle
    /// unsatisfiable.
    pub fn load_from_path(path: &str) -> io::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| io::Error::new(e.kind(), format!("word list file '{path}': {e}")))?;
        Ok(Self::parse_from_str(&content))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uppercases_and_sorts() {
        let list = WordList::parse_from_str("cat\nAnd\nDOG\n");
        assert_eq!(list.words, vec!["AND", "CAT", "DOG"]);
    }

    #[test]
    fn test_parse_skips_blanks_and_non_alphabetic() {
        let list = WordList::parse_from_str("cat\n\n  \nit's\nnon-word\nok word\ndog\n");
        assert_eq!(list.words, vec!["CAT", "DOG"]);
    }

    #[test]
    fn test_parse_trims_and_dedups() {
        let list = WordList::parse_from_str("  cat  \nCAT\ncat\n");
        assert_eq!(list.words, vec!["CAT"]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_empty_input_is_empty_list() {
        assert!(WordList::parse_from_str("").is_empty());
    }
}
