//! A dedicated thread for database writes.
//!
//! Callers decode record batches on their own threads and hand them to a
//! [`DatabaseWriter`]. The writer thread owns the only connection, applies
//! batches strictly in submission order, and closes the connection only after
//! the queue has been drained.

use crate::builder::DatabaseBuilder;
use crate::inflator::DatabaseInflator;
use crate::records::{Color, Part};
use brickdb_core::{Error, Result};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// A batch of records for the writer thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteBatch {
    Colors(Vec<Color>),
    Parts(Vec<Part>),
}

impl WriteBatch {
    pub fn len(&self) -> usize {
        match self {
            WriteBatch::Colors(colors) => colors.len(),
            WriteBatch::Parts(parts) => parts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rows written by a finished writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub colors: usize,
    pub parts: usize,
}

/// Handle to the writer thread.
#[derive(Debug)]
pub struct DatabaseWriter {
    sender: Option<Sender<WriteBatch>>,
    handle: Option<JoinHandle<Result<WriteSummary>>>,
}

impl DatabaseWriter {
    /// Build a new database at `path` on a writer thread.
    pub fn spawn(path: impl Into<PathBuf>) -> Result<Self> {
        Self::spawn_with(DatabaseBuilder::new(path))
    }

    /// Start the writer thread with a configured builder. The database is
    /// created on the writer thread; a failure there is reported by the next
    /// [`submit`](Self::submit) or by [`finish`](Self::finish).
    pub fn spawn_with(builder: DatabaseBuilder) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("brickdb-writer".to_string())
            .spawn(move || write_loop(builder, &receiver))?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Queue a batch without waiting for it to be written.
    ///
    /// Fails only when the writer thread has already stopped because of an
    /// earlier error. The thread is then joined and that error is returned.
    pub fn submit(&mut self, batch: WriteBatch) -> Result<()> {
        let sent = match &self.sender {
            Some(sender) => sender.send(batch).is_ok(),
            None => false,
        };
        if sent {
            return Ok(());
        }
        match self.join() {
            Ok(_) => Err(stopped()),
            Err(e) => Err(e),
        }
    }

    /// Close the queue, wait for every queued batch to be written, and close
    /// the database.
    pub fn finish(mut self) -> Result<WriteSummary> {
        self.join()
    }

    fn join(&mut self) -> Result<WriteSummary> {
        // Dropping the sender ends the write loop once the queue is empty.
        drop(self.sender.take());
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| Error::Custom("Writer thread panicked".to_string()))?,
            None => Err(stopped()),
        }
    }
}

impl Drop for DatabaseWriter {
    fn drop(&mut self) {
        if self.handle.is_none() {
            return;
        }
        if let Err(e) = self.join() {
            tracing::warn!(error = %e, "Writer dropped with an error");
        }
    }
}

fn stopped() -> Error {
    Error::Custom("Writer thread has stopped".to_string())
}

fn write_loop(builder: DatabaseBuilder, receiver: &Receiver<WriteBatch>) -> Result<WriteSummary> {
    let start = Instant::now();
    let mut db = builder.create()?;
    let mut summary = WriteSummary::default();

    {
        let mut inflator = DatabaseInflator::new(&db)?;
        for batch in receiver {
            match batch {
                WriteBatch::Colors(colors) => summary.colors += inflator.insert_colors(&colors)?,
                WriteBatch::Parts(parts) => summary.parts += inflator.insert_parts(&parts)?,
            }
        }
    }

    db.close();
    tracing::info!(
        colors = summary.colors,
        parts = summary.parts,
        elapsed_ms = start.elapsed().as_millis(),
        "Writer finished"
    );
    Ok(summary)
}
