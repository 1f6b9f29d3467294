//! crates/engine/src/chunk.rs
//!
//! Blocks travelling from a reader to its consumers, and the plumbing on
//! both ends of the queues.
//!
//! A reader broadcasts every block to all consumer queues, then exactly one
//! terminal marker. Consumers drain their queue until they see the marker.
//! Blocks are reference counted so a broadcast never copies the payload.

use std::io::{self, Read};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use logging::trace_read;

use crate::results::SourceId;

/// How a stream ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StreamEnd {
    /// Every byte of the source was delivered.
    Complete,
    /// The reader gave up early; consumers must discard their state.
    Aborted,
}

/// One item on a consumer queue.
#[derive(Clone, Debug)]
pub(crate) enum Chunk {
    Data(Arc<[u8]>),
    End(StreamEnd),
}

/// Splits a source into blocks of at most `chunk_size` bytes.
///
/// Blocks are filled completely except for the last one. End of input is
/// remembered, so the source sees exactly one zero-length read.
pub(crate) struct ChunkReader<R> {
    inner: R,
    scratch: Vec<u8>,
    eof: bool,
}

impl<R: Read> ChunkReader<R> {
    pub(crate) fn new(inner: R, chunk_size: usize) -> Self {
        Self {
            inner,
            scratch: vec![0; chunk_size.max(1)],
            eof: false,
        }
    }

    /// Next block, or `None` at end of input.
    pub(crate) fn next_chunk(&mut self) -> io::Result<Option<Arc<[u8]>>> {
        let mut filled = 0;
        while !self.eof && filled < self.scratch.len() {
            match self.inner.read(&mut self.scratch[filled..]) {
                Ok(0) => self.eof = true,
                Ok(n) => filled += n,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error),
            }
        }
        if filled == 0 {
            Ok(None)
        } else {
            Ok(Some(Arc::from(&self.scratch[..filled])))
        }
    }
}

/// Producer side of a set of consumer queues.
///
/// Dropping an unfinished broadcast sends [`StreamEnd::Aborted`], so a
/// reader that unwinds still releases every consumer.
pub(crate) struct Broadcast {
    senders: Vec<Sender<Chunk>>,
    finished: bool,
}

impl Broadcast {
    pub(crate) fn new(senders: Vec<Sender<Chunk>>) -> Self {
        Self {
            senders,
            finished: false,
        }
    }

    /// Delivers `block` to every live consumer and returns how many remain.
    ///
    /// A consumer that dropped its receiver has already reported its own
    /// failure and is skipped from then on.
    pub(crate) fn send(&mut self, block: &Arc<[u8]>) -> usize {
        self.senders
            .retain(|sender| sender.send(Chunk::Data(Arc::clone(block))).is_ok());
        self.senders.len()
    }

    /// Sends the terminal marker to every live consumer.
    pub(crate) fn finish(mut self, end: StreamEnd) {
        self.terminate(end);
    }

    fn terminate(&mut self, end: StreamEnd) {
        self.finished = true;
        for sender in self.senders.drain(..) {
            let _ = sender.send(Chunk::End(end));
        }
    }
}

impl Drop for Broadcast {
    fn drop(&mut self) {
        if !self.finished {
            self.terminate(StreamEnd::Aborted);
        }
    }
}

/// Reads `source` to the end, broadcasting every block, and returns the
/// number of bytes read.
///
/// On success every consumer gets [`StreamEnd::Complete`]; on a read error
/// every consumer gets [`StreamEnd::Aborted`] before the error is returned.
/// Reading stops early once no consumer is left.
pub(crate) fn pump<R: Read>(
    source: R,
    chunk_size: usize,
    mut broadcast: Broadcast,
    source_id: &SourceId,
) -> io::Result<u64> {
    let mut reader = ChunkReader::new(source, chunk_size);
    let mut total = 0u64;
    loop {
        match reader.next_chunk() {
            Ok(Some(block)) => {
                total += block.len() as u64;
                if broadcast.send(&block) == 0 {
                    trace_read!(source = %source_id, bytes = total, "no consumers left");
                    return Ok(total);
                }
            }
            Ok(None) => {
                broadcast.finish(StreamEnd::Complete);
                trace_read!(source = %source_id, bytes = total, "source complete");
                return Ok(total);
            }
            Err(error) => {
                broadcast.finish(StreamEnd::Aborted);
                trace_read!(source = %source_id, bytes = total, %error, "source aborted");
                return Err(error);
            }
        }
    }
}

/// A consumer waited longer than the dequeue timeout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Stalled {
    pub(crate) waited: Duration,
}

/// Feeds every data block on `queue` to `on_data` until the terminal marker.
///
/// A queue whose producer vanished without a marker counts as aborted.
pub(crate) fn drain(
    queue: &Receiver<Chunk>,
    timeout: Duration,
    mut on_data: impl FnMut(&[u8]),
) -> Result<StreamEnd, Stalled> {
    loop {
        match queue.recv_timeout(timeout) {
            Ok(Chunk::Data(block)) => on_data(&block),
            Ok(Chunk::End(end)) => return Ok(end),
            Err(RecvTimeoutError::Timeout) => return Err(Stalled { waited: timeout }),
            Err(RecvTimeoutError::Disconnected) => return Ok(StreamEnd::Aborted),
        }
    }
}
