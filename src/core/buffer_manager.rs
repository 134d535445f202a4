//! Bounded record buffer with a single background consumer
//!
//! Producers push with a short timeout; one consumer thread pops records in
//! FIFO order and hands them to the [`Dispatcher`]. The queue is the only
//! channel between the two sides.
//!
//! Shutdown drops the only sender under a write lock, so no push can slip
//! in after the consumer starts draining. The consumer keeps receiving until
//! the channel reports disconnection, which crossbeam only does once every
//! queued record has been delivered.

use super::{
    config::{DEFAULT_AVERAGE_LINE_BYTES, DEFAULT_CLOSE_TIMEOUT, DEFAULT_MAX_BUFFER_BYTES},
    dispatcher::Dispatcher,
    error::{panic_message, LoggerError, Result},
    log_record::LogRecord,
};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Records drained per wake-up before the printers are flushed
const BATCH_SIZE: usize = 64;

/// Interval at which `close()` polls the consumer thread
const CLOSE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Queue capacity derived from the memory budget, never below one
pub fn buffer_capacity(max_buffer_bytes: usize, average_line_bytes: usize) -> usize {
    max_buffer_bytes
        .checked_div(average_line_bytes)
        .unwrap_or(0)
        .max(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferConfig {
    pub average_line_bytes: usize,
    pub max_buffer_bytes: usize,
    /// Bounded wait of the consumer on an empty queue
    pub pop_timeout: Duration,
    /// Drain budget for `close()`
    pub close_timeout: Duration,
}

impl BufferConfig {
    pub fn capacity(&self) -> usize {
        buffer_capacity(self.max_buffer_bytes, self.average_line_bytes)
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            average_line_bytes: DEFAULT_AVERAGE_LINE_BYTES,
            max_buffer_bytes: DEFAULT_MAX_BUFFER_BYTES,
            pop_timeout: Duration::from_secs(1),
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The queue stayed full for the whole push timeout
    Timeout,
    /// The buffer is closing or closed
    Closing,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Timeout => write!(f, "queue full until timeout"),
            RejectReason::Closing => write!(f, "buffer closing"),
        }
    }
}

/// A push the buffer refused. Non-fatal; the record is handed back.
#[derive(Debug, thiserror::Error)]
#[error("log record rejected: {reason}")]
pub struct PushRejected {
    pub record: LogRecord,
    pub reason: RejectReason,
}

pub struct BufferManager {
    sender: RwLock<Option<Sender<LogRecord>>>,
    /// Observer handle used for `pending()`; never receives
    receiver: Receiver<LogRecord>,
    closing: Arc<AtomicBool>,
    drained: AtomicBool,
    capacity: usize,
    close_timeout: Duration,
    consumer: Mutex<Option<thread::JoinHandle<()>>>,
    dispatcher: Arc<Dispatcher>,
}

impl BufferManager {
    /// Create the queue and start its consumer thread
    pub fn new(config: BufferConfig, dispatcher: Arc<Dispatcher>) -> Result<Self> {
        let capacity = config.capacity();
        let (sender, receiver) = bounded(capacity);
        let closing = Arc::new(AtomicBool::new(false));

        let consumer = {
            let receiver = receiver.clone();
            let dispatcher = Arc::clone(&dispatcher);
            let closing = Arc::clone(&closing);
            let pop_timeout = config.pop_timeout;

            thread::Builder::new()
                .name("log-buffer-consumer".to_string())
                .spawn(move || Self::consume(receiver, dispatcher, closing, pop_timeout))
                .map_err(|e| {
                    LoggerError::io_operation("spawning buffer consumer", "thread spawn failed", e)
                })?
        };

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            receiver,
            closing,
            drained: AtomicBool::new(false),
            capacity,
            close_timeout: config.close_timeout,
            consumer: Mutex::new(Some(consumer)),
            dispatcher,
        })
    }

    /// Consumer loop: pop with a bounded wait, dispatch, repeat
    fn consume(
        receiver: Receiver<LogRecord>,
        dispatcher: Arc<Dispatcher>,
        closing: Arc<AtomicBool>,
        pop_timeout: Duration,
    ) {
        loop {
            match receiver.recv_timeout(pop_timeout) {
                Ok(record) => {
                    dispatcher.dispatch(&record);

                    // Drain what is already queued, then flush once per batch
                    for record in receiver.try_iter().take(BATCH_SIZE - 1) {
                        dispatcher.dispatch(&record);
                    }
                    dispatcher.flush();
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    if !closing.load(Ordering::Acquire) {
                        dispatcher.escalate(LoggerError::QueueClosedUnexpectedly);
                    }
                    break;
                }
            }
        }
    }

    /// Try to enqueue `record` within `timeout`.
    ///
    /// Returns `false` if the queue stayed full or the buffer is closing.
    pub fn push(&self, record: LogRecord, timeout: Duration) -> bool {
        self.try_push(record, timeout).is_ok()
    }

    /// Like [`push`](Self::push), but hands a rejected record back
    pub fn try_push(
        &self,
        record: LogRecord,
        timeout: Duration,
    ) -> std::result::Result<(), PushRejected> {
        // Held across the send so close() cannot disconnect mid-push
        let sender = self.sender.read();

        let sender = match sender.as_ref() {
            Some(sender) if !self.closing.load(Ordering::Acquire) => sender,
            _ => {
                return Err(PushRejected {
                    record,
                    reason: RejectReason::Closing,
                })
            }
        };

        match sender.send_timeout(record, timeout) {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(record)) => Err(PushRejected {
                record,
                reason: RejectReason::Timeout,
            }),
            Err(SendTimeoutError::Disconnected(record)) => Err(PushRejected {
                record,
                reason: RejectReason::Closing,
            }),
        }
    }

    /// Stop accepting records, drain the queue, and stop the consumer.
    ///
    /// Idempotent. Returns `true` if every queued record was dispatched
    /// within the drain budget; otherwise the fault is escalated.
    pub fn close(&self) -> bool {
        if self.closing.swap(true, Ordering::AcqRel) {
            return self.drained.load(Ordering::Acquire);
        }

        // Waits for in-flight pushes, then disconnects the consumer
        drop(self.sender.write().take());

        let Some(handle) = self.consumer.lock().take() else {
            return false;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(payload) = handle.join() {
                    self.dispatcher.escalate(LoggerError::ConsumerPanicked(panic_message(
                        payload.as_ref(),
                    )));
                    return false;
                }
                break;
            }

            if start.elapsed() >= self.close_timeout {
                self.dispatcher.escalate(LoggerError::CloseWithPendingItems {
                    pending: self.pending(),
                });
                return false;
            }

            thread::sleep(CLOSE_POLL_INTERVAL);
        }

        self.drained.store(true, Ordering::Release);
        true
    }

    /// Records queued but not yet popped by the consumer
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_closed(&self) -> bool {
        self.closing.load(Ordering::Acquire)
    }
}

impl Drop for BufferManager {
    fn drop(&mut self) {
        if !self.is_closed() {
            self.dispatcher.escalate(LoggerError::NotClosed {
                pending: self.pending(),
            });
            self.close();
        }
    }
}
