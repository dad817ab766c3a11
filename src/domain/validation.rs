use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    InvalidFormat {
        field: &'static str,
        expected: &'static str,
        input: String,
    },
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        actual: u32,
    },
    InvalidPhoneNumber {
        input: String,
    },
    InvalidUrl {
        field: &'static str,
        input: String,
    },
    MissingDestination,
    Malformed {
        field: &'static str,
        index: usize,
        reason: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidFormat {
                field,
                expected,
                input,
            } => write!(f, "invalid {field}: {input:?} (expected {expected})"),
            Self::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(
                f,
                "{field} out of range: {actual} (expected {min}..={max})"
            ),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { field, input } => write!(f, "invalid {field} URL: {input}"),
            Self::MissingDestination => write!(
                f,
                "destination network requires both 'mcc' and 'mnc', or 'phoneNumber'"
            ),
            Self::Malformed {
                field,
                index,
                reason,
            } => write!(f, "malformed {field} entry at index {index}: {reason}"),
        }
    }
}

impl std::error::Error for ValidationError {}
