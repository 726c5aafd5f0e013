//! Occurrence indexes answer "is this name mentioned anywhere?".

/// Presence oracle consulted by the dead-code detector. The excerpt
/// implementation below is a substring test; a reference graph could
/// implement the same trait.
pub trait OccurrenceIndex {
    fn contains(&self, name: &str) -> bool;
}

/// A bounded excerpt of source lines (imports, usages, component tags),
/// searched by plain substring.
///
/// Only the first `max_lines` lines are kept. Names that are referenced only
/// past the cap read as unreferenced, and names that appear by coincidence
/// (inside a longer identifier, a comment, a string) read as referenced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcerptIndex {
    text: String,
    lines: usize,
    truncated: bool,
}

impl ExcerptIndex {
    pub fn from_lines<I, S>(lines: I, max_lines: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for line in lines {
            if index.lines >= max_lines {
                index.truncated = true;
                break;
            }
            index.text.push_str(line.as_ref());
            index.text.push('\n');
            index.lines += 1;
        }
        index
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Whether input was dropped because of the line cap.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl OccurrenceIndex for ExcerptIndex {
    fn contains(&self, name: &str) -> bool {
        !name.is_empty() && self.text.contains(name)
    }
}
