//! Newline framing on top of a byte stream.

use crate::constants::MAX_LINE_LEN;
use crate::error::{Error, Result};
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::trace;

/// A source of raw, newline-terminated device lines.
pub trait LineSource {
    /// Block until the next line is available.
    ///
    /// The returned bytes include the terminator when one was received.
    fn read_line(&mut self) -> Result<Vec<u8>>;
}

/// Reads lines from any byte stream, typically an open serial port.
///
/// The stream is expected to time out periodically (`ErrorKind::TimedOut`).
/// Each timeout is either absorbed, when no read timeout is configured, or
/// counted against the configured read timeout. Lines are capped at
/// [`MAX_LINE_LEN`] bytes.
pub struct LineReader<R> {
    reader: BufReader<R>,
    read_timeout: Option<Duration>,
    stop: Option<Arc<AtomicBool>>,
}

impl<R: Read> LineReader<R> {
    /// Wrap a byte stream.
    pub fn new(inner: R, read_timeout: Option<Duration>) -> Self {
        Self {
            reader: BufReader::new(inner),
            read_timeout,
            stop: None,
        }
    }

    /// Abort reads with [`Error::Interrupted`] once `stop` is set.
    ///
    /// The flag is checked before every poll of the stream.
    #[must_use]
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    fn stop_requested(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|stop| stop.load(Ordering::SeqCst))
    }
}

impl<R: Read> LineSource for LineReader<R> {
    fn read_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();
        let started = Instant::now();

        loop {
            if self.stop_requested() {
                return Err(Error::Interrupted);
            }
            if line.len() >= MAX_LINE_LEN {
                return Err(Error::LineTooLong {
                    limit: MAX_LINE_LEN,
                });
            }

            let remaining = (MAX_LINE_LEN - line.len()) as u64;
            match (&mut self.reader).take(remaining).read_until(b'\n', &mut line) {
                // End of stream with nothing pending: the device is gone.
                Ok(0) if line.is_empty() => return Err(Error::DeviceDisconnected),
                // Limit reached mid-line; the next pass reports it.
                Ok(_) if line.len() >= MAX_LINE_LEN && line.last() != Some(&b'\n') => {}
                // Either a full line, or a trailing fragment right before end of stream.
                Ok(_) => return Ok(line),
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    if let Some(timeout) = self.read_timeout
                        && started.elapsed() >= timeout
                    {
                        return Err(Error::ReadTimeout {
                            timeout_secs: timeout.as_secs_f64(),
                        });
                    }
                    trace!("Waiting for device ({} bytes pending)", line.len());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::DeviceRead { source: e }),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{self, Cursor};

    /// Replays a script of chunks and errors.
    struct Scripted(VecDeque<io::Result<Vec<u8>>>);

    impl Scripted {
        fn new(steps: Vec<io::Result<Vec<u8>>>) -> Self {
            Self(steps.into())
        }
    }

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                None => Ok(0),
                Some(Ok(chunk)) => {
                    buf[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                Some(Err(e)) => Err(e),
            }
        }
    }

    fn timed_out() -> io::Result<Vec<u8>> {
        Err(io::Error::from(ErrorKind::TimedOut))
    }

    #[test]
    fn test_reads_consecutive_lines() {
        let mut reader = LineReader::new(Cursor::new(b"a;1;2\r\nb;3;4\r\n".to_vec()), None);
        assert_eq!(reader.read_line().unwrap(), b"a;1;2\r\n");
        assert_eq!(reader.read_line().unwrap(), b"b;3;4\r\n");
        assert!(matches!(
            reader.read_line(),
            Err(Error::DeviceDisconnected)
        ));
    }

    #[test]
    fn test_trailing_fragment_before_eof() {
        let mut reader = LineReader::new(Cursor::new(b"a;1;2\r\npartial".to_vec()), None);
        assert_eq!(reader.read_line().unwrap(), b"a;1;2\r\n");
        assert_eq!(reader.read_line().unwrap(), b"partial");
        assert!(matches!(
            reader.read_line(),
            Err(Error::DeviceDisconnected)
        ));
    }

    #[test]
    fn test_timeouts_are_absorbed_without_read_timeout() {
        let source = Scripted::new(vec![
            timed_out(),
            Ok(b"12:00".to_vec()),
            timed_out(),
            timed_out(),
            Ok(b":01;5;12\r\n".to_vec()),
        ]);
        let mut reader = LineReader::new(source, None);
        assert_eq!(reader.read_line().unwrap(), b"12:00:01;5;12\r\n");
    }

    #[test]
    fn test_read_timeout_expires() {
        let source = Scripted::new(vec![Ok(b"12:00".to_vec()), timed_out()]);
        let mut reader = LineReader::new(source, Some(Duration::ZERO));
        assert!(matches!(
            reader.read_line(),
            Err(Error::ReadTimeout { .. })
        ));
    }

    #[test]
    fn test_interrupted_is_retried() {
        let source = Scripted::new(vec![
            Err(io::Error::from(ErrorKind::Interrupted)),
            Ok(b"1;2;3\n".to_vec()),
        ]);
        let mut reader = LineReader::new(source, Some(Duration::ZERO));
        assert_eq!(reader.read_line().unwrap(), b"1;2;3\n");
    }

    /// Yields `remaining` bytes of `x`, never a newline.
    struct NoNewline {
        remaining: usize,
    }

    impl Read for NoNewline {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(self.remaining);
            buf[..n].fill(b'x');
            self.remaining -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_line_without_newline_is_capped() {
        let mut reader = LineReader::new(NoNewline { remaining: 50_000_000 }, None);
        assert!(matches!(
            reader.read_line(),
            Err(Error::LineTooLong { limit: MAX_LINE_LEN })
        ));
    }

    #[test]
    fn test_line_cap_survives_timeouts() {
        let chunk = vec![b'x'; MAX_LINE_LEN / 2];
        let source = Scripted::new(vec![
            Ok(chunk.clone()),
            timed_out(),
            Ok(chunk.clone()),
            timed_out(),
            Ok(chunk),
        ]);
        let mut reader = LineReader::new(source, None);
        assert!(matches!(
            reader.read_line(),
            Err(Error::LineTooLong { .. })
        ));
    }

    #[test]
    fn test_line_at_limit_is_accepted() {
        let mut line = vec![b'x'; MAX_LINE_LEN - 1];
        line.push(b'\n');
        let mut reader = LineReader::new(Cursor::new(line.clone()), None);
        assert_eq!(reader.read_line().unwrap(), line);
    }

    #[test]
    fn test_stop_flag_interrupts_wait() {
        let stop = Arc::new(AtomicBool::new(false));
        let source = Scripted::new(vec![timed_out(), timed_out(), Ok(b"1;2;3\n".to_vec())]);
        let mut reader = LineReader::new(source, None).with_stop_flag(Arc::clone(&stop));

        stop.store(true, Ordering::SeqCst);
        assert!(matches!(reader.read_line(), Err(Error::Interrupted)));
    }

    #[test]
    fn test_other_errors_are_fatal() {
        let source = Scripted::new(vec![Err(io::Error::from(ErrorKind::BrokenPipe))]);
        let mut reader = LineReader::new(source, None);
        assert!(matches!(
            reader.read_line(),
            Err(Error::DeviceRead { .. })
        ));
    }
}
