use std::cell::RefCell;
use std::io::{BufRead, Cursor, Read, Result as IoResult, Write};
use std::rc::Rc;

/// Memory-backed console input, e.g. canned answers for `io.read`.
pub struct MemReader {
    cursor: Cursor<Vec<u8>>,
}

impl MemReader {
    /// Create a MemReader that will read from the provided buffer.
    pub fn new(buf: impl Into<Vec<u8>>) -> Self {
        Self {
            cursor: Cursor::new(buf.into()),
        }
    }
}

impl Read for MemReader {
    fn read(&mut self, out: &mut [u8]) -> IoResult<usize> {
        self.cursor.read(out)
    }
}

impl BufRead for MemReader {
    fn fill_buf(&mut self) -> IoResult<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

/// Memory-backed console output.
///
/// The interpreter owns the writer; keep the handle from
/// [`MemWriter::with_handle`] to read what was printed.
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self {
            buf: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Convenience: create writer and return (writer, rc_handle).
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let mw = MemWriter::new();
        let rc = mw.buf.clone();
        (mw, rc)
    }
}

impl Default for MemWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_handle_sees_output() {
        let (mut w, handle) = MemWriter::with_handle();
        write!(w, "hello").unwrap();
        writeln!(w, " world").unwrap();
        assert_eq!(handle.borrow().as_slice(), b"hello world\n");
    }

    #[test]
    fn test_reader_reads_lines() {
        let mut r = MemReader::new("first\nsecond\n");
        let mut line = String::new();
        r.read_line(&mut line).unwrap();
        assert_eq!(line, "first\n");
        line.clear();
        r.read_line(&mut line).unwrap();
        assert_eq!(line, "second\n");
        line.clear();
        assert_eq!(r.read_line(&mut line).unwrap(), 0);
    }
}
