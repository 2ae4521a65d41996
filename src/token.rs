//! Token records and the capability every page format provides.

/// One word-like unit extracted from a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Raw token content, not trimmed.
    pub text: String,
    /// Whether this token is the last one on its source line.
    pub is_last_on_line: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, is_last_on_line: bool) -> Self {
        Self {
            text: text.into(),
            is_last_on_line,
        }
    }

    /// A token that does not end its line.
    pub fn word(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    /// A token that ends its line.
    pub fn line_end(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }
}

/// Something that can produce a page's tokens in source order.
///
/// Each call to [`TokenSource::tokens`] starts a fresh, finite pass over the
/// page, so a source can be evaluated more than once.
pub trait TokenSource {
    /// Iterate over the page's tokens in order.
    fn tokens(&self) -> Box<dyn Iterator<Item = Token> + '_>;
}

impl TokenSource for [Token] {
    fn tokens(&self) -> Box<dyn Iterator<Item = Token> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl TokenSource for Vec<Token> {
    fn tokens(&self) -> Box<dyn Iterator<Item = Token> + '_> {
        self.as_slice().tokens()
    }
}
