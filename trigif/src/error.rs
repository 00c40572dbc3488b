// error.rs
//
// Copyright (c) 2026  Douglas Lau
//
use std::fmt;
use std::io;

/// Errors encountered while building or encoding an animation
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error.
    Io(io::Error),
    /// A wrapped GIF encoder error.
    Gift(gift::Error),
    /// Screen width or height is zero or too large for GIF.
    InvalidDimensions(u32, u32),
    /// Byte buffer length is not `width * height * 4`.
    InvalidBufferSize,
    /// Quality must be between 1 and 100.
    InvalidQuality(u8),
    /// Frame index is not the next one expected.
    FrameOrder {
        /// Index expected next
        expected: u32,
        /// Index received
        actual: u32,
    },
    /// Frame size does not match the animation size.
    FrameDimensions,
    /// Presentation timestamp is negative, not finite or goes backwards.
    InvalidTimestamp(f64),
    /// Frame has more colors than fit in a palette.
    TooManyColors,
    /// Animation finished without any frames.
    NoFrames,
}

/// Trigif result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            Error::Gift(err) => err.fmt(fmt),
            Error::InvalidDimensions(w, h) => {
                write!(fmt, "invalid dimensions: {}x{}", w, h)
            }
            Error::InvalidQuality(q) => write!(fmt, "invalid quality: {}", q),
            Error::FrameOrder { expected, actual } => {
                write!(fmt, "frame {} out of order, expected {}", actual, expected)
            }
            Error::InvalidTimestamp(pts) => {
                write!(fmt, "invalid timestamp: {}", pts)
            }
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::Gift(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<gift::Error> for Error {
    fn from(err: gift::Error) -> Self {
        Error::Gift(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display() {
        let e = Error::FrameOrder {
            expected: 2,
            actual: 5,
        };
        assert_eq!(e.to_string(), "frame 5 out of order, expected 2");
        assert_eq!(Error::NoFrames.to_string(), "NoFrames");
        assert_eq!(
            Error::InvalidDimensions(0, 16).to_string(),
            "invalid dimensions: 0x16"
        );
    }

    #[test]
    fn source() {
        let e = Error::from(io::Error::new(io::ErrorKind::Other, "disk"));
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "disk");
        assert!(Error::TooManyColors.source().is_none());
    }
}
