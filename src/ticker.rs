//! Repeating timer with a scoped cancellation handle.
//!
//! [`Ticker::start`] runs a callback on a dedicated timer thread. The callback
//! decides the delay before its next invocation, so a [`LifeClockDriver`]'s
//! [`ServiceTiming`] maps straight onto it. Ticks never overlap.
//!
//! [`LifeClockDriver`]: crate::display::LifeClockDriver
//! [`ServiceTiming`]: crate::display::ServiceTiming

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Spawns repeating timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ticker;

impl Ticker {
    /// Calls `callback` after `first_delay`, then after each delay it returns.
    ///
    /// Returning `None` from the callback stops the timer. Dropping or
    /// cancelling the returned handle stops it too, and no call to `callback`
    /// starts after `cancel` returns.
    pub fn start<F>(first_delay: Duration, mut callback: F) -> std::io::Result<TickerHandle>
    where
        F: FnMut() -> Option<Duration> + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();

        let thread = thread::Builder::new()
            .name("life-clock-ticker".into())
            .spawn(move || {
                let mut delay = first_delay;
                loop {
                    match cancel_rx.recv_timeout(delay) {
                        Err(RecvTimeoutError::Timeout) => match callback() {
                            Some(next) => delay = next,
                            None => {
                                log::debug!("ticker callback finished");
                                break;
                            }
                        },
                        // Cancelled, or the handle was dropped.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        Ok(TickerHandle {
            cancel: Some(cancel_tx),
            thread: Some(thread),
        })
    }
}

/// Owns a running timer. Dropping it cancels the timer and waits for it to stop.
#[derive(Debug)]
pub struct TickerHandle {
    cancel: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Stops the timer and waits for an in-flight tick to finish.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    /// Returns true while the timer thread is still running.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn shutdown(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // The thread may already have exited on its own.
            let _ = cancel.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
