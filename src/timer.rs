//! Deadline timer for bounding search time.
//!
//! The timer runs on a background thread and sets a [`StopFlag`] when its
//! duration elapses. Cancelling or dropping the timer wakes the thread
//! without touching the flag.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::sync::StopFlag;

/// A timer that signals a stop flag when a deadline is reached.
pub struct DeadlineTimer {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DeadlineTimer {
    /// Start a timer that will stop `stop_flag` after `duration`.
    ///
    /// Returns `None` if the duration is zero.
    #[must_use]
    pub fn start(duration: Duration, stop_flag: StopFlag) -> Option<Self> {
        if duration.is_zero() {
            return None;
        }

        let (cancel, wake) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            // Any message or a disconnected sender means cancelled.
            if let Err(RecvTimeoutError::Timeout) = wake.recv_timeout(duration) {
                log::debug!("search deadline of {:?} reached", duration);
                stop_flag.stop();
            }
        });

        Some(DeadlineTimer {
            cancel: Some(cancel),
            handle: Some(handle),
        })
    }

    /// Cancel the timer without triggering the stop flag.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // The thread may already have exited after firing.
            let _ = cancel.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_triggers() {
        let flag = StopFlag::new();
        let timer = DeadlineTimer::start(Duration::from_millis(20), flag.clone());
        assert!(timer.is_some());

        thread::sleep(Duration::from_millis(200));
        assert!(flag.is_stopped());
        drop(timer);
        assert!(flag.is_stopped());
    }

    #[test]
    fn test_timer_zero_duration() {
        let flag = StopFlag::new();
        assert!(DeadlineTimer::start(Duration::ZERO, flag.clone()).is_none());
        assert!(!flag.is_stopped());
    }

    #[test]
    fn test_cancel_leaves_flag_clear() {
        let flag = StopFlag::new();
        let timer = DeadlineTimer::start(Duration::from_millis(50), flag.clone()).unwrap();
        timer.cancel();
        thread::sleep(Duration::from_millis(120));
        assert!(!flag.is_stopped());
    }

    #[test]
    fn test_drop_cancels() {
        let flag = StopFlag::new();
        drop(DeadlineTimer::start(Duration::from_millis(50), flag.clone()));
        thread::sleep(Duration::from_millis(120));
        assert!(!flag.is_stopped());
    }
}
