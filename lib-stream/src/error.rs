use std::{error::Error, fmt, io};

use processing::NumericError;
use timer::TimerError;
use transport::FormatError;

#[derive(Debug)]
pub enum StreamError
{
    Io(io::Error),
    Format(FormatError),
    Timer(TimerError),
    Numeric(NumericError),
    Csv(csv::Error),
    Config(String),
}

impl Error for StreamError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Timer(err) => Some(err),
            Self::Numeric(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Socket error: {}", err),
            Self::Format(err) => write!(f, "Wire format error: {}", err),
            Self::Timer(err) => write!(f, "Timer error: {}", err),
            Self::Numeric(err) => write!(f, "Numeric error: {}", err),
            Self::Csv(err) => write!(f, "CSV error: {}", err),
            Self::Config(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl From<io::Error> for StreamError
{
    fn from(err: io::Error) -> Self {
        StreamError::Io(err)
    }
}

impl From<FormatError> for StreamError
{
    fn from(err: FormatError) -> Self {
        StreamError::Format(err)
    }
}

impl From<TimerError> for StreamError
{
    fn from(err: TimerError) -> Self {
        StreamError::Timer(err)
    }
}

impl From<NumericError> for StreamError
{
    fn from(err: NumericError) -> Self {
        StreamError::Numeric(err)
    }
}

impl From<csv::Error> for StreamError
{
    fn from(err: csv::Error) -> Self {
        StreamError::Csv(err)
    }
}
