use std::num::ParseIntError;

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::list::ListError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid number {token:?}: {source}")]
    Parse {
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    List(#[from] ListError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("readline error: {0}")]
    Readline(#[from] ReadlineError),
}

impl Error {
    // ParseIntError does not carry the offending text, so keep it alongside.
    pub fn parse(token: &str, source: ParseIntError) -> Self {
        Error::Parse {
            token: token.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_the_token() {
        let source = "abc".parse::<i32>().unwrap_err();
        let err = Error::parse("abc", source);
        assert!(err.to_string().starts_with("invalid number \"abc\""));
    }

    #[test]
    fn list_error_is_transparent() {
        let err: Error = ListError::IndexOutOfRange { index: 4, len: 2 }.into();
        assert_eq!(
            err.to_string(),
            "index 4 is out of range for a list of length 2"
        );
    }
}
