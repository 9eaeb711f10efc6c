//! Error types for the resolver crate

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no home directory for the current user")]
    NoHome,

    #[error("unmatched quote in {input:?}")]
    UnmatchedQuote { input: String },
}
