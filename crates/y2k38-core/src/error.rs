use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownPolicy(String),
    UnknownVariant(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownPolicy(name) => {
                write!(f, "unknown policy '{name}' (expected 'days' or 'years')")
            }
            ParseError::UnknownVariant(name) => {
                write!(f, "unknown variant '{name}' (expected 'terminal' or 'card')")
            }
        }
    }
}

impl std::error::Error for ParseError {}
