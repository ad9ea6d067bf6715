use std::{
    error::Error as StdError,
    fmt::{Display, Formatter},
    io::Error as IoError,
    num::ParseFloatError,
};

#[derive(Debug)]
pub enum Error {
    /// The configuration file is not valid TOML or has values of the wrong type.
    Config(toml::de::Error),
    /// The configuration could not be serialized.
    ConfigWrite(toml::ser::Error),
    /// A ray or perspective divide ran parallel to the base plane.
    Degenerate,
    /// A camera settings record is malformed.
    InvalidData,
    /// Grids need at least two vertices per side.
    InvalidSides(usize),
    Io(IoError),
    /// No range matrix has been computed yet.
    NoVisibleRange,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::ConfigWrite(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        Self::Io(error)
    }
}

impl From<ParseFloatError> for Error {
    fn from(_: ParseFloatError) -> Self {
        Self::InvalidData
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Config(error)
    }
}

impl From<toml::ser::Error> for Error {
    fn from(error: toml::ser::Error) -> Self {
        Self::ConfigWrite(error)
    }
}
