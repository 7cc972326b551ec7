//! Line-aware output sink.
//!
//! [`LineWriter`] wraps any [`Write`] and remembers whether the cursor sits at
//! the start of a line. Block separation, inline spacing and line prefixes are
//! all decided from that one bit. The first I/O error is latched: later writes
//! fail immediately without touching the underlying sink.

use std::io::{self, Write};

use super::escape::escape_html;

pub struct LineWriter<'w> {
    out: &'w mut dyn Write,
    at_line_start: bool,
    prefix: String,
    failed: Option<io::ErrorKind>,
}

impl<'w> LineWriter<'w> {
    /// Writer for a fresh document: the cursor starts at a line start.
    pub fn new(out: &'w mut dyn Write) -> Self {
        Self {
            out,
            at_line_start: true,
            prefix: String::new(),
            failed: None,
        }
    }

    /// Writer whose output continues an existing line (e.g. a table cell).
    pub fn mid_line(out: &'w mut dyn Write) -> Self {
        Self {
            at_line_start: false,
            ..Self::new(out)
        }
    }

    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Set the prefix emitted before content that starts a line. Returns the
    /// previous prefix so callers can restore it.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) -> String {
        std::mem::replace(&mut self.prefix, prefix.into())
    }

    /// Raw write.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some(kind) = self.failed {
            return Err(io::Error::new(kind, "output sink failed on an earlier write"));
        }
        if bytes.is_empty() {
            return Ok(());
        }
        let result = self.write_through(bytes);
        if let Err(e) = &result {
            self.failed = Some(e.kind());
        }
        result
    }

    fn write_through(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.at_line_start && !self.prefix.is_empty() {
            self.out.write_all(self.prefix.as_bytes())?;
        }
        self.out.write_all(bytes)?;
        self.at_line_start = bytes.last() == Some(&b'\n');
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Write `s` HTML-escaped, with template braces neutralized.
    pub fn write_escaped(&mut self, s: &str) -> io::Result<()> {
        self.write_str(&escape_html(s))
    }

    /// A single space, unless at line start.
    pub fn space(&mut self) -> io::Result<()> {
        if self.at_line_start {
            return Ok(());
        }
        self.write_str(" ")
    }

    /// A blank line, unless already at line start.
    pub fn new_block(&mut self) -> io::Result<()> {
        if self.at_line_start {
            return Ok(());
        }
        self.write_str("\n\n")
    }

    /// End the current line if anything has been written on it.
    pub fn newline_if_needed(&mut self) -> io::Result<()> {
        if self.at_line_start {
            return Ok(());
        }
        self.write_str("\n")
    }

    /// `count` raw newlines, regardless of position.
    pub fn newlines(&mut self, count: usize) -> io::Result<()> {
        for _ in 0..count {
            self.write_str("\n")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for LineWriter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineWriter")
            .field("at_line_start", &self.at_line_start)
            .field("prefix", &self.prefix)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Sink that accepts `budget` writes and then fails every call.
    pub(crate) struct FailingSink {
        pub budget: usize,
        pub calls: usize,
        pub written: Vec<u8>,
    }

    impl FailingSink {
        pub(crate) fn new(budget: usize) -> Self {
            Self {
                budget,
                calls: 0,
                written: Vec::new(),
            }
        }
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.calls > self.budget {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracks_line_start() {
        let mut buf = Vec::new();
        let mut w = LineWriter::new(&mut buf);
        assert!(w.at_line_start());
        w.write_str("abc").unwrap();
        assert!(!w.at_line_start());
        w.write_str("\n").unwrap();
        assert!(w.at_line_start());
    }

    #[test]
    fn test_empty_write_keeps_state() {
        let mut buf = Vec::new();
        let mut w = LineWriter::new(&mut buf);
        w.write_str("").unwrap();
        assert!(w.at_line_start());
    }

    #[test]
    fn test_new_block_only_mid_line() {
        let mut buf = Vec::new();
        {
            let mut w = LineWriter::new(&mut buf);
            w.new_block().unwrap();
            w.write_str("a").unwrap();
            w.new_block().unwrap();
            w.new_block().unwrap();
            w.write_str("b").unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "a\n\nb");
    }

    #[test]
    fn test_space_suppressed_at_line_start() {
        let mut buf = Vec::new();
        {
            let mut w = LineWriter::new(&mut buf);
            w.space().unwrap();
            w.write_str("a").unwrap();
            w.space().unwrap();
            w.write_str("b").unwrap();
        }
        assert_eq!(buf, b"a b");
    }

    #[test]
    fn test_mid_line_forces_block_separation() {
        let mut buf = Vec::new();
        {
            let mut w = LineWriter::mid_line(&mut buf);
            w.new_block().unwrap();
        }
        assert_eq!(buf, b"\n\n");
    }

    #[test]
    fn test_prefix_written_at_line_start() {
        let mut buf = Vec::new();
        {
            let mut w = LineWriter::new(&mut buf);
            let old = w.set_prefix("> ");
            assert_eq!(old, "");
            w.write_str("one\n").unwrap();
            w.write_str("two").unwrap();
            w.write_str(" more\n").unwrap();
            w.set_prefix(old);
            w.write_str("three").unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "> one\n> two more\nthree");
    }

    #[test]
    fn test_escaped_write() {
        let mut buf = Vec::new();
        {
            let mut w = LineWriter::new(&mut buf);
            w.write_escaped("<a> & {{b}}").unwrap();
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "&lt;a&gt; &amp; &#123;&#123;b&#125;&#125;"
        );
    }

    #[test]
    fn test_first_error_is_latched() {
        let mut sink = FailingSink::new(1);
        {
            let mut w = LineWriter::new(&mut sink);
            w.write_str("ok").unwrap();
            let err = w.write_str("boom").unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
            let again = w.write_str("later").unwrap_err();
            assert_eq!(again.kind(), io::ErrorKind::BrokenPipe);
        }
        // The latched error short-circuits: the sink saw only two calls.
        assert_eq!(sink.calls, 2);
        assert_eq!(sink.written, b"ok");
    }
}
