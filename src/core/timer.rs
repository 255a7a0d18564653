//! Live timer: a stopwatch that publishes elapsed time and provisional
//! earnings from a background ticker until it is stopped.
//!
//! The ticker and the caller share a single "latest snapshot" slot; newer
//! snapshots overwrite older ones. `stop()` signals the ticker and joins it
//! before returning, so no tick is published after `stop()` returns.

use crate::core::calculator::earnings_for;
use crate::core::clock::{Clock, SystemClock};
use crate::errors::{AppError, AppResult};
use crate::utils::time::format_timestamp;
use chrono::NaiveDateTime;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Stopped,
    Running,
}

/// What the display shows while the timer runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSnapshot {
    pub started_at: NaiveDateTime,
    pub elapsed_secs: i64,
    /// `None` when the timer was started without a rate.
    pub provisional_earnings: Option<f64>,
}

/// Final instants of a completed timer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRun {
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

type TickSink = Arc<dyn Fn(&TimerSnapshot) + Send + Sync>;
type Slot = Arc<Mutex<Option<TimerSnapshot>>>;

struct Ticker {
    started_at: NaiveDateTime,
    rate: Option<f64>,
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

pub struct LiveTimer {
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
    latest: Slot,
    sink: Option<TickSink>,
    ticker: Option<Ticker>,
}

fn snapshot_at(
    started_at: NaiveDateTime,
    now: NaiveDateTime,
    rate: Option<f64>,
) -> TimerSnapshot {
    let elapsed_secs = (now - started_at).num_seconds().max(0);
    TimerSnapshot {
        started_at,
        elapsed_secs,
        provisional_earnings: rate.map(|r| earnings_for(elapsed_secs, r)),
    }
}

fn publish(slot: &Slot, snapshot: TimerSnapshot) {
    let mut guard = slot.lock().unwrap_or_else(|p| p.into_inner());
    *guard = Some(snapshot);
}

impl LiveTimer {
    pub fn new(clock: Arc<dyn Clock>, tick_interval: Duration) -> Self {
        Self {
            clock,
            tick_interval,
            latest: Arc::new(Mutex::new(None)),
            sink: None,
            ticker: None,
        }
    }

    /// Timer on the local wall clock.
    pub fn system(tick_interval: Duration) -> Self {
        Self::new(Arc::new(SystemClock), tick_interval)
    }

    /// Register a callback invoked from the ticker thread after each publication.
    pub fn on_tick<F>(mut self, f: F) -> Self
    where
        F: Fn(&TimerSnapshot) + Send + Sync + 'static,
    {
        self.sink = Some(Arc::new(f));
        self
    }

    pub fn status(&self) -> TimerStatus {
        if self.ticker.is_some() {
            TimerStatus::Running
        } else {
            TimerStatus::Stopped
        }
    }

    /// Latest published snapshot; after `stop()` this is the final one.
    pub fn current_snapshot(&self) -> Option<TimerSnapshot> {
        *self.latest.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Start a new cycle. Fails with `InvalidState` if one is already running.
    pub fn start(&mut self, rate: Option<f64>) -> AppResult<NaiveDateTime> {
        if let Some(t) = &self.ticker {
            return Err(AppError::InvalidState(format!(
                "timer already running since {}",
                format_timestamp(&t.started_at)
            )));
        }

        if let Some(r) = rate
            && (!r.is_finite() || r < 0.0)
        {
            return Err(AppError::Validation(format!(
                "hourly rate must be a non-negative number, got {r}"
            )));
        }

        let started_at = self.clock.now();
        let first = snapshot_at(started_at, started_at, rate);
        publish(&self.latest, first);
        if let Some(sink) = &self.sink {
            sink(&first);
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let clock = Arc::clone(&self.clock);
        let slot = Arc::clone(&self.latest);
        let sink = self.sink.clone();
        let interval = self.tick_interval;

        let handle = thread::Builder::new()
            .name("live-timer".into())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            let snap = snapshot_at(started_at, clock.now(), rate);
                            publish(&slot, snap);
                            if let Some(sink) = &sink {
                                sink(&snap);
                            }
                        }
                        // stop requested, or the timer was dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        self.ticker = Some(Ticker {
            started_at,
            rate,
            stop_tx,
            handle,
        });

        Ok(started_at)
    }

    /// Stop the running cycle and return its start and end instants.
    /// Fails with `InvalidState` if the timer is not running.
    pub fn stop(&mut self) -> AppResult<TimerRun> {
        let ticker = self
            .ticker
            .take()
            .ok_or_else(|| AppError::InvalidState("timer is not running".into()))?;

        let ended_at = self.clock.now();

        // A send error only means the ticker already exited.
        let _ = ticker.stop_tx.send(());
        ticker
            .handle
            .join()
            .map_err(|_| AppError::Other("live timer thread panicked".into()))?;

        publish(
            &self.latest,
            snapshot_at(ticker.started_at, ended_at, ticker.rate),
        );

        Ok(TimerRun {
            started_at: ticker.started_at,
            ended_at,
        })
    }
}

impl Drop for LiveTimer {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            let _ = ticker.stop_tx.send(());
            let _ = ticker.handle.join();
        }
    }
}
