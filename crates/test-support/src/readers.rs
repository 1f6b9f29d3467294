use std::io::{self, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared between a [`CountingReader`] and the test that created it.
///
/// The reader itself is usually moved into the engine, so the counters live
/// behind an `Arc` and stay readable afterwards.
#[derive(Debug, Default)]
pub struct ReadStats {
    calls: AtomicUsize,
    data_reads: AtomicUsize,
    eof_reads: AtomicUsize,
    bytes: AtomicUsize,
}

impl ReadStats {
    /// Total number of `read` calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `read` calls that returned at least one byte.
    pub fn data_reads(&self) -> usize {
        self.data_reads.load(Ordering::SeqCst)
    }

    /// `read` calls that returned zero bytes.
    pub fn eof_reads(&self) -> usize {
        self.eof_reads.load(Ordering::SeqCst)
    }

    /// Total bytes handed out.
    pub fn bytes(&self) -> usize {
        self.bytes.load(Ordering::SeqCst)
    }
}

/// In-memory source that counts every read.
///
/// Each `read` call returns at most `max_read` bytes (default: the caller's
/// whole buffer) so the count of data reads is predictable.
#[derive(Debug)]
pub struct CountingReader {
    data: Vec<u8>,
    position: usize,
    max_read: usize,
    stats: Arc<ReadStats>,
}

impl CountingReader {
    /// Wraps `data`.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            position: 0,
            max_read: usize::MAX,
            stats: Arc::new(ReadStats::default()),
        }
    }

    /// Caps how many bytes a single `read` call may return.
    #[must_use]
    pub fn with_max_read(mut self, max_read: usize) -> Self {
        self.max_read = max_read.max(1);
        self
    }

    /// Handle to the counters, valid after the reader has been consumed.
    pub fn stats(&self) -> Arc<ReadStats> {
        Arc::clone(&self.stats)
    }
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stats.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = &self.data[self.position..];
        let n = remaining.len().min(buf.len()).min(self.max_read);
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;

        if n == 0 {
            self.stats.eof_reads.fetch_add(1, Ordering::SeqCst);
        } else {
            self.stats.data_reads.fetch_add(1, Ordering::SeqCst);
            self.stats.bytes.fetch_add(n, Ordering::SeqCst);
        }
        Ok(n)
    }
}

/// Source that yields a fixed prefix and then fails every read.
#[derive(Debug)]
pub struct FailingReader {
    prefix: Vec<u8>,
    position: usize,
    kind: io::ErrorKind,
}

impl FailingReader {
    /// Yields `prefix`, then fails with [`io::ErrorKind::Other`].
    pub fn new(prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            prefix: prefix.into(),
            position: 0,
            kind: io::ErrorKind::Other,
        }
    }

    /// Fails immediately, before producing any data.
    pub fn immediately() -> Self {
        Self::new(Vec::new())
    }

    /// Sets the error kind reported once the prefix is exhausted.
    #[must_use]
    pub fn with_kind(mut self, kind: io::ErrorKind) -> Self {
        self.kind = kind;
        self
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.prefix[self.position..];
        if remaining.is_empty() {
            return Err(io::Error::new(self.kind, "injected read failure"));
        }
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(n)
    }
}
