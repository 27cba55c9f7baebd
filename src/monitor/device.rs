use std::io::{ErrorKind, Read};
use std::time::Duration;

use thiserror::Error;

pub const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Outcome categories of a poll. Connection problems drive the device
/// offline; anything else is only reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Unexpected(String),
}

/// Opens a line-oriented link to the device.
pub trait DeviceConnector: Send + Sync {
    fn open(&self, port: &str, baud_rate: u32) -> Result<Box<dyn DeviceLink>, PollError>;
}

/// An open link. Dropping it closes the underlying handle.
pub trait DeviceLink: Send {
    fn read_line(&mut self) -> Result<String, PollError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SerialConnector;

impl DeviceConnector for SerialConnector {
    fn open(&self, port: &str, baud_rate: u32) -> Result<Box<dyn DeviceLink>, PollError> {
        let port = serialport::new(port, baud_rate)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|error| PollError::Connection(error.to_string()))?;
        Ok(Box::new(SerialLink { port }))
    }
}

struct SerialLink {
    port: Box<dyn serialport::SerialPort>,
}

impl DeviceLink for SerialLink {
    fn read_line(&mut self) -> Result<String, PollError> {
        let raw = read_raw_line(&mut *self.port)?;
        decode_line(raw)
    }
}

/// Reads bytes up to and including `\n`. A read timeout or end of stream
/// ends the line early with whatever arrived.
pub(crate) fn read_raw_line<R: Read + ?Sized>(reader: &mut R) -> Result<Vec<u8>, PollError> {
    let mut line = Vec::new();
    let mut byte = [0u8; 1];

    loop {
        match reader.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                line.push(byte[0]);
                if byte[0] == b'\n' {
                    break;
                }
            }
            Err(error) if error.kind() == ErrorKind::TimedOut => break,
            Err(error) if error.kind() == ErrorKind::Interrupted => continue,
            Err(error) => return Err(PollError::Connection(error.to_string())),
        }
    }

    Ok(line)
}

pub(crate) fn decode_line(raw: Vec<u8>) -> Result<String, PollError> {
    let text = String::from_utf8(raw)
        .map_err(|error| PollError::Unexpected(format!("reading is not valid UTF-8: {}", error)))?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, ErrorKind, Read};

    use super::{PollError, decode_line, read_raw_line};

    struct TimeoutAfter {
        data: Cursor<Vec<u8>>,
    }

    impl Read for TimeoutAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(ErrorKind::TimedOut, "timed out")),
                read => Ok(read),
            }
        }
    }

    struct Unplugged;

    impl Read for Unplugged {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "device disconnected"))
        }
    }

    #[test]
    fn stops_at_newline_and_leaves_rest_unread() {
        let mut reader = Cursor::new(b"23.5\r\n24.0\n".to_vec());

        let line = read_raw_line(&mut reader).expect("line should be read");
        assert_eq!(line, b"23.5\r\n");
        assert_eq!(decode_line(line).expect("valid utf-8"), "23.5");
    }

    #[test]
    fn timeout_returns_partial_line() {
        let mut reader = TimeoutAfter {
            data: Cursor::new(b"  17".to_vec()),
        };

        let line = read_raw_line(&mut reader).expect("timeout is not an error");
        assert_eq!(decode_line(line).expect("valid utf-8"), "17");
    }

    #[test]
    fn silent_device_yields_empty_reading() {
        let mut reader = TimeoutAfter {
            data: Cursor::new(Vec::new()),
        };

        let line = read_raw_line(&mut reader).expect("timeout is not an error");
        assert_eq!(decode_line(line).expect("valid utf-8"), "");
    }

    #[test]
    fn io_failure_is_a_connection_error() {
        let error = read_raw_line(&mut Unplugged).expect_err("read must fail");
        assert_eq!(error, PollError::Connection("device disconnected".to_string()));
    }

    #[test]
    fn invalid_utf8_is_unexpected() {
        let error = decode_line(vec![0xff, 0xfe, b'\n']).expect_err("decode must fail");
        assert!(matches!(error, PollError::Unexpected(_)));
    }
}
