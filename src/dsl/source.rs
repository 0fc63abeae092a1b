//! Incremental character source over a byte reader.

use std::io::{self, Read};

/// Decode UTF-8 characters from a reader one at a time.
///
/// The scanner treats the end of this iterator as end of input. A read
/// failure or malformed UTF-8 also ends the iterator, but the error is kept
/// so the caller can tell a truncated source from a complete one.
///
/// Reads are issued one byte at a time, so wrap unbuffered readers in a
/// [`std::io::BufReader`].
pub struct ReadChars<R> {
    reader: R,
    error: Option<io::Error>,
    finished: bool,
}

impl<R: Read> ReadChars<R> {
    /// Create a character source over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            error: None,
            finished: false,
        }
    }

    /// The error that ended the stream early, if any.
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// Take the error that ended the stream early, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn decode(&mut self) -> io::Result<Option<char>> {
        let first = match self.read_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };

        let width = match first {
            0x00..=0x7F => return Ok(Some(char::from(first))),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(invalid_utf8(first)),
        };

        let mut buf = [first, 0, 0, 0];
        for slot in buf[1..width].iter_mut() {
            *slot = self.read_byte()?.ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "truncated UTF-8 sequence")
            })?;
        }

        let text = std::str::from_utf8(&buf[..width])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(text.chars().next())
    }
}

impl<R: Read> Iterator for ReadChars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.finished {
            return None;
        }

        match self.decode() {
            Ok(Some(ch)) => Some(ch),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                log::warn!("character source failed, treating as end of input: {}", e);
                self.error = Some(e);
                self.finished = true;
                None
            }
        }
    }
}

fn invalid_utf8(byte: u8) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid UTF-8 leading byte 0x{:02x}", byte),
    )
}
