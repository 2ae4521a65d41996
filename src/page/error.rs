use thiserror::Error;

/// A page that could not be turned into tokens.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("failed to read page: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed page markup: {0}")]
    Markup(#[from] roxmltree::Error),
    #[error("no {0} element found in page")]
    MissingElement(&'static str),
}
