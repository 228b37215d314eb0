use nom;
use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    UnknownCommand,
    UnparsableLine,
    WeekdayParse,
    ArgumentParse,
    IncludeCycle,
    IncludeDepth,
    Extension,
    ConfigParse,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::ErrorKind> for Error {
    fn from(kind: io::ErrorKind) -> Error {
        Error::from(io::Error::from(kind))
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &toml_error.to_string())
    }
}

impl<E: std::fmt::Debug> From<nom::Err<E>> for Error {
    fn from(error: nom::Err<E>) -> Self {
        Error::new(
            ErrorKind::ArgumentParse,
            &format!("Error while parsing: {}", error),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::UnknownCommand => "unknown command".to_owned(),
            ErrorKind::UnparsableLine => "cannot parse".to_owned(),
            ErrorKind::WeekdayParse => "can't parse weekday".to_owned(),
            ErrorKind::ArgumentParse => "invalid argument".to_owned(),
            ErrorKind::IncludeCycle => "include cycle".to_owned(),
            ErrorKind::IncludeDepth => "include nesting too deep".to_owned(),
            ErrorKind::Extension => "not a calendar description file".to_owned(),
            ErrorKind::ConfigParse => "invalid config file".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}
