//! The error type shared by the core and the backends.

/// An error raised while loading resources or talking to the backend.
#[derive(Debug)]
pub enum Error {
    /// A resource could not be fetched (network, HTTP status or timeout).
    ResourceLoad { url: String, msg: String },
    /// A resource was fetched but its content is malformed.
    Parse { url: String, msg: String },
    /// The detail page was opened for an unknown attraction.
    MissingEntity { id: String },
    /// The detail page was opened without an attraction id.
    MissingId,
    /// A backend API call failed.
    BackendError {
        msg: String,
        err: Option<Box<dyn std::error::Error>>,
    },
}

impl Error {
    /// Build a `BackendError` without a source error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Error::BackendError {
            msg: msg.into(),
            err: None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ResourceLoad { url, msg } => {
                write!(f, "Could not load {:?}: {}", url, msg)?;
            }
            Error::Parse { url, msg } => {
                write!(f, "Malformed content in {:?}: {}", url, msg)?;
            }
            Error::MissingEntity { id } => {
                write!(f, "No attraction with id {:?}", id)?;
            }
            Error::MissingId => {
                write!(f, "No attraction id given")?;
            }
            Error::BackendError { msg, err } => {
                if let Some(err) = err {
                    write!(f, "{}: {}", msg, err.to_string())?;
                } else {
                    write!(f, "{}", msg)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
