//! Raw input decoding.
//!
//! [`KeyReader`] turns the byte stream coming from a raw-mode terminal into
//! [`Key`]s. Escape sequences are only completed from bytes that already
//! arrived in the same read, so a lone ESC resolves immediately instead of
//! waiting for a follow-up byte that may never come.

use std::collections::VecDeque;
use std::io::{self, Read};

const ESC: u8 = 0x1b;
const READ_CHUNK: usize = 1024;

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Space,
    Esc,
    Up,
    Down,
    PageUp,
    PageDown,
    /// Any other single byte.
    Char(char),
}

/// Decodes one key per call from a blocking byte source.
#[derive(Debug)]
pub struct KeyReader<R> {
    inner: R,
    pending: VecDeque<u8>,
}

impl<R: Read> KeyReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: VecDeque::with_capacity(READ_CHUNK),
        }
    }

    /// Read the next key.
    ///
    /// Blocks until at least one byte is available. Returns `Ok(None)` once
    /// the input reaches end-of-stream.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying reader other than
    /// [`io::ErrorKind::Interrupted`], which is retried.
    pub fn read_key(&mut self) -> io::Result<Option<Key>> {
        let Some(byte) = self.next_byte()? else {
            return Ok(None);
        };

        let key = match byte {
            b'\r' | b'\n' => Key::Enter,
            127 | 8 => Key::Backspace,
            b' ' => Key::Space,
            ESC => self.decode_escape(),
            other => Key::Char(char::from(other)),
        };
        Ok(Some(key))
    }

    fn decode_escape(&mut self) -> Key {
        if self.pending.front() != Some(&b'[') {
            // Lone ESC, or ESC followed by something that is not a CSI.
            if !self.pending.is_empty() {
                self.pending.pop_front();
            }
            return Key::Esc;
        }
        self.pending.pop_front();

        let Some(final_byte) = self.pending.pop_front() else {
            return Key::Esc;
        };
        match final_byte {
            b'A' => Key::Up,
            b'B' => Key::Down,
            b'5' => {
                self.pending.pop_front();
                Key::PageUp
            }
            b'6' => {
                self.pending.pop_front();
                Key::PageDown
            }
            _ => Key::Esc,
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if self.pending.is_empty() && !self.fill()? {
            return Ok(None);
        }
        Ok(self.pending.pop_front())
    }

    /// One blocking read. Returns `false` on end-of-stream.
    fn fill(&mut self) -> io::Result<bool> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.inner.read(&mut chunk) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    self.pending.extend(&chunk[..n]);
                    return Ok(true);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let mut reader = KeyReader::new(Cursor::new(bytes.to_vec()));
        let mut keys = Vec::new();
        while let Some(key) = reader.read_key().unwrap() {
            keys.push(key);
        }
        keys
    }

    /// Delivers each chunk from a separate `read` call.
    struct Chunked(VecDeque<Vec<u8>>);

    impl Read for Chunked {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let Some(chunk) = self.0.pop_front() else {
                return Ok(0);
            };
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_control_bytes_decode_to_named_keys() {
        assert_eq!(
            decode_all(b"\r\n\x7f\x08 "),
            vec![Key::Enter, Key::Enter, Key::Backspace, Key::Backspace, Key::Space]
        );
    }

    #[test]
    fn test_plain_bytes_decode_to_chars() {
        assert_eq!(
            decode_all(b"qG/"),
            vec![Key::Char('q'), Key::Char('G'), Key::Char('/')]
        );
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(decode_all(b"\x1b[A\x1b[B"), vec![Key::Up, Key::Down]);
    }

    #[test]
    fn test_page_keys_absorb_trailing_tilde() {
        assert_eq!(
            decode_all(b"\x1b[5~\x1b[6~j"),
            vec![Key::PageUp, Key::PageDown, Key::Char('j')]
        );
    }

    #[test]
    fn test_page_key_without_trailing_byte() {
        assert_eq!(decode_all(b"\x1b[6"), vec![Key::PageDown]);
    }

    #[test]
    fn test_lone_escape_resolves_without_waiting() {
        let mut reader = KeyReader::new(Chunked(VecDeque::from(vec![
            b"\x1b".to_vec(),
            b"[A".to_vec(),
        ])));
        assert_eq!(reader.read_key().unwrap(), Some(Key::Esc));
        // The late bytes are not stitched onto the earlier ESC.
        assert_eq!(reader.read_key().unwrap(), Some(Key::Char('[')));
        assert_eq!(reader.read_key().unwrap(), Some(Key::Char('A')));
    }

    #[test]
    fn test_unknown_sequences_degrade_to_escape() {
        assert_eq!(decode_all(b"\x1b[Zq"), vec![Key::Esc, Key::Char('q')]);
        assert_eq!(decode_all(b"\x1bOq"), vec![Key::Esc, Key::Char('q')]);
        assert_eq!(decode_all(b"\x1b["), vec![Key::Esc]);
    }

    #[test]
    fn test_end_of_stream_is_none() {
        let mut reader = KeyReader::new(Cursor::new(Vec::new()));
        assert_eq!(reader.read_key().unwrap(), None);
    }

    #[test]
    fn test_io_errors_propagate() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            }
        }
        let err = KeyReader::new(Broken).read_key().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
