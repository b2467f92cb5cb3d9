/// Characters that separate words on a line.
pub const WORD_SEPARATORS: [char; 4] = [',', ' ', '\t', ';'];

#[inline]
fn is_separator(ch: char) -> bool {
    WORD_SEPARATORS.contains(&ch)
}

/// Split a line into words, numbering them from 1.
///
/// Runs of separators collapse, so positions count emitted words only:
/// `"cat dog, cat"` yields `cat@1`, `dog@2`, `cat@3`. Each word is trimmed
/// of surrounding whitespace; words left empty are dropped.
pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens {
        words: line.split(is_separator as fn(char) -> bool),
        position: 0,
    }
}

/// Iterator returned by [`tokenize`]
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    words: std::str::Split<'a, fn(char) -> bool>,
    position: u32,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (&'a str, u32);

    fn next(&mut self) -> Option<Self::Item> {
        for raw in self.words.by_ref() {
            let word = raw.trim();
            if word.is_empty() {
                continue;
            }
            // Ends the line rather than wrapping past u32::MAX words
            self.position = self.position.checked_add(1)?;
            return Some((word, self.position));
        }
        None
    }
}

/// Number of words [`tokenize`] would yield, without the u32 position limit
pub fn word_count(line: &str) -> usize {
    line.split(is_separator)
        .filter(|raw| !raw.trim().is_empty())
        .count()
}
