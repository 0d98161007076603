//! The table contract: a cancellable, error-reporting producer of rows
//!
//! A [`Table`] is a handle to a possibly in-progress sequence of rows plus
//! two pieces of terminal state: a completion error, meaningful once the row
//! sequence has been observed to end, and an idempotent cancellation control
//! that unwinds the table and everything upstream of it.

use std::sync::{Arc, Mutex, OnceLock};
use std::thread;

use crossbeam_channel::{bounded, select, Receiver, Sender};
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::model::Row;

/// An abstract producer of a row sequence.
///
/// Rows travel over an unbuffered channel: the producer blocks on each send
/// until the consumer is ready, which is the pipeline's backpressure
/// mechanism. The sequence terminates exactly once, either by natural
/// exhaustion or by cancellation, and termination is observed as the
/// channel disconnecting.
pub trait Table: Send {
    /// The row stream. The receiver yields each row at most once, in the
    /// order the producer emits them, and disconnects when the sequence
    /// ends.
    fn rows(&self) -> Receiver<Row>;

    /// The completion error, if any. The value is stable once the reader
    /// has observed the end of the row sequence; reading earlier may race
    /// with in-flight production. Once set, it is never overwritten.
    fn err(&self) -> Option<Error>;

    /// Request early termination. Safe to call any number of times,
    /// including after natural exhaustion; the row sequence terminates
    /// soon after, and cancellation propagates transitively upstream.
    fn stop(&self);
}

impl<T: Table + ?Sized> Table for Box<T> {
    fn rows(&self) -> Receiver<Row> {
        (**self).rows()
    }

    fn err(&self) -> Option<Error> {
        (**self).err()
    }

    fn stop(&self) {
        (**self).stop()
    }
}

/// State shared between a stage's worker thread and its outside handles.
struct StageShared {
    /// Completion error; first write wins.
    err: OnceLock<Error>,
    /// Sender half of the cancellation signal channel. Dropping it is the
    /// broadcast: every `select!` waiting on the paired receiver wakes up.
    cancel: Mutex<Option<Sender<()>>>,
}

impl StageShared {
    fn cancel(&self) {
        if let Ok(mut guard) = self.cancel.lock() {
            guard.take();
        }
    }
}

/// Output handle given to a stage's worker for emitting rows downstream.
///
/// Every push races the send against the stage's cancellation signal, so a
/// producer blocked on a slow (or vanished) consumer still observes
/// cancellation promptly instead of deadlocking mid-send.
pub struct RowSink<'a> {
    tx: &'a Sender<Row>,
    cancel: &'a Receiver<()>,
}

impl RowSink<'_> {
    /// Deliver a row downstream. Blocks until a consumer takes it; returns
    /// [`Error::Cancelled`] if the stage is cancelled or every consumer is
    /// gone, in which case the row is dropped and the caller should unwind.
    pub fn push(&self, row: Row) -> Result<()> {
        select! {
            send(self.tx, row) -> res => res.map_err(|_| Error::Cancelled),
            recv(self.cancel) -> _ => Err(Error::Cancelled),
        }
    }
}

/// A table backed by one worker thread.
///
/// This is the concrete table type produced by every source and by the
/// transform operator. Handles are cheap to clone and share the same
/// underlying stream and terminal state.
#[derive(Clone)]
pub struct StreamTable {
    rows: Receiver<Row>,
    shared: Arc<StageShared>,
}

impl StreamTable {
    /// Spawn a worker that produces this table's rows.
    ///
    /// The body pushes rows through the sink until it is done, fails, or
    /// observes cancellation; the second argument is the stage's
    /// cancellation signal, for bodies that block somewhere other than the
    /// sink. When the body returns, the row stream closes. An `Ok(())` or
    /// `Err(Error::Cancelled)` return leaves no completion error; any
    /// other error is recorded (first error wins) and the stage is
    /// cancelled so anything still blocked on it unwinds.
    ///
    /// This is how custom sources are built; see [`crate::sources::slice`]
    /// for the smallest example.
    pub fn spawn<F>(name: &str, body: F) -> Self
    where
        F: FnOnce(&RowSink<'_>, &Receiver<()>) -> Result<()> + Send + 'static,
    {
        let (tx, rows) = bounded(0);
        let (cancel_tx, cancel_rx) = bounded(0);
        let shared = Arc::new(StageShared {
            err: OnceLock::new(),
            cancel: Mutex::new(Some(cancel_tx)),
        });

        let worker = Arc::clone(&shared);
        let stage = name.to_string();
        let spawned = thread::Builder::new().name(stage.clone()).spawn(move || {
            let sink = RowSink {
                tx: &tx,
                cancel: &cancel_rx,
            };
            match body(&sink, &cancel_rx) {
                Ok(()) => {}
                Err(Error::Cancelled) => debug!("{stage}: cancelled"),
                Err(err) => {
                    debug!("{stage}: failed: {err}");
                    let _ = worker.err.set(err);
                    worker.cancel();
                }
            }
            // Dropping `tx` here closes the row stream; the error above is
            // published before consumers can observe the end of it.
        });

        if let Err(err) = spawned {
            // The closure was dropped, so the stream is already closed.
            warn!("{name}: failed to spawn worker: {err}");
            let _ = shared.err.set(Error::failed(err));
        }

        StreamTable { rows, shared }
    }
}

impl Table for StreamTable {
    fn rows(&self) -> Receiver<Row> {
        self.rows.clone()
    }

    fn err(&self) -> Option<Error> {
        self.shared.err.get().cloned()
    }

    fn stop(&self) {
        self.shared.cancel();
    }
}
