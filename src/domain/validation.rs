use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidUrl { input: String },
    ZeroAmount,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { input } => write!(f, "invalid callback url: {input}"),
            Self::ZeroAmount => write!(f, "amount must be at least 1"),
        }
    }
}

impl std::error::Error for ValidationError {}
