use std::fmt;

/// Errors raised while configuring route guards.
///
/// Both kinds surface during route registration. Nothing in this crate
/// fails while a request is being handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Human-readable message explaining the error
    pub message: String,
}

impl Error {
    /// Creates a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A condition name was requested that the registry does not know.
    pub fn unknown_condition(name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownCondition {
                name: name.to_string(),
            },
            format!("no guard registered for condition '{}'", name),
        )
    }

    /// A flat extension list could not be split into name/factory pairs.
    pub fn malformed_extension(len: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedExtension { len }, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

/// The kind of guard configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested condition is not registered
    UnknownCondition {
        /// The condition name that failed to resolve
        name: String,
    },
    /// A bulk extension was not a sequence of name/factory pairs
    MalformedExtension {
        /// Number of items supplied to the extension call
        len: usize,
    },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnknownCondition { name } => write!(f, "Unknown condition '{}'", name),
            ErrorKind::MalformedExtension { len } => {
                write!(f, "Malformed extension ({} items)", len)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_condition_names_the_condition() {
        let err = Error::unknown_condition("admin");
        assert_eq!(
            err.kind,
            ErrorKind::UnknownCondition {
                name: "admin".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Unknown condition 'admin': no guard registered for condition 'admin'"
        );
    }

    #[test]
    fn malformed_extension_reports_length() {
        let err = Error::malformed_extension(3, "odd number of items");
        assert_eq!(err.kind, ErrorKind::MalformedExtension { len: 3 });
        assert!(err.to_string().starts_with("Malformed extension (3 items)"));
    }
}
