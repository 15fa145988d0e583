//! Cooperative cancellation primitive
//!
//! One `CancelSource` and any number of cloned `CancelToken`s form the
//! cancellation signal for one generation of monitor tasks. Built on a
//! zero-capacity crossbeam channel: nothing is ever sent, cancellation is the
//! disconnection observed when the source drops its sender.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, bounded};
use std::time::Duration;

/// The cancelling side of the signal, held by the manager for the lifetime of
/// one `start` generation.
#[derive(Debug)]
pub struct CancelSource {
    // Dropping the sender disconnects every token.
    _tx: Sender<()>,
}

impl CancelSource {
    /// Fire the signal. Consumes the source; all tokens observe cancellation.
    pub fn cancel(self) {
        drop(self);
    }
}

/// The observing side of the signal, cloned into every monitor task of a
/// generation.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: Receiver<()>,
}

impl CancelToken {
    /// Whether the signal has fired
    pub fn is_cancelled(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Block until the signal fires
    pub fn wait(&self) {
        // recv returns only on disconnection; the channel never carries data
        let _ = self.rx.recv();
    }

    /// Block until the signal fires or the timeout elapses.
    ///
    /// Returns true when cancelled, false on timeout.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        matches!(
            self.rx.recv_timeout(timeout),
            Err(RecvTimeoutError::Disconnected)
        )
    }
}

/// Create a fresh cancellation signal pair
pub fn cancellation() -> (CancelSource, CancelToken) {
    let (tx, rx) = bounded(0);
    (CancelSource { _tx: tx }, CancelToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_token_starts_uncancelled() {
        let (_source, token) = cancellation();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_fires_token() {
        let (source, token) = cancellation();
        source.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_clones_share_the_signal() {
        let (source, token) = cancellation();
        let other = token.clone();
        source.cancel();
        assert!(token.is_cancelled());
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_wait_unblocks_on_cancel() {
        let (source, token) = cancellation();

        let waiter = thread::spawn(move || {
            token.wait();
        });

        source.cancel();
        waiter.join().unwrap();
    }

    #[test]
    fn test_wait_timeout_reports_timeout() {
        let (_source, token) = cancellation();
        let started = Instant::now();
        assert!(!token.wait_timeout(Duration::from_millis(50)));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_wait_timeout_reports_cancellation() {
        let (source, token) = cancellation();
        source.cancel();
        assert!(token.wait_timeout(Duration::from_secs(5)));
    }

    #[test]
    fn test_dropping_source_cancels() {
        let (source, token) = cancellation();
        drop(source);
        assert!(token.is_cancelled());
    }
}
