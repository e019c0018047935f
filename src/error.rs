use std::fmt;

/// Errors produced by the network engine and its data-handling front ends.
#[derive(Debug)]
pub enum Error {
    /// A network build was requested before any examples were accumulated.
    InsufficientData,
    /// An example's input or output vector length disagrees with the
    /// accumulator's established dimensions.
    DimensionMismatch(String),
    /// A matrix, parameter vector, or training set has a shape incompatible
    /// with what an operation requires.
    ShapeMismatch(String),
    /// A matrix text file has a missing header or an inconsistent row.
    MalformedMatrixFile(String),
    /// Raw example bytes could not be decoded as an image.
    ImageDecode(String),
    Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InsufficientData => {
                write!(f, "no examples have been accumulated; cannot build a network")
            }
            Error::DimensionMismatch(msg) => write!(f, "dimension mismatch: {msg}"),
            Error::ShapeMismatch(msg) => write!(f, "shape mismatch: {msg}"),
            Error::MalformedMatrixFile(msg) => write!(f, "malformed matrix file: {msg}"),
            Error::ImageDecode(msg) => write!(f, "image decode failed: {msg}"),
            Error::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
