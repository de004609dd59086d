//! Condition waits for dynamically rendered pages.
//!
//! A [`Wait`] is a poll interval plus an optional timeout. Time is read and
//! slept through a [`Clock`] so the same logic runs against virtual time in
//! tests.

use std::thread;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall-clock time and real `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration)
    }
}

#[derive(Debug)]
pub enum WaitError<E> {
    TimedOut { waited: Duration },
    Probe(E),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    pub interval: Duration,
    /// `None` polls until the condition holds.
    pub timeout: Option<Duration>,
}

impl Wait {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Polls `probe` until it returns `Some`, sleeping `interval` between
    /// attempts. The first attempt happens immediately.
    pub fn until<C, T, E>(
        &self,
        clock: &C,
        mut probe: impl FnMut() -> Result<Option<T>, E>,
    ) -> Result<T, WaitError<E>>
    where
        C: Clock + ?Sized,
    {
        let started = clock.now();
        loop {
            if let Some(value) = probe().map_err(WaitError::Probe)? {
                return Ok(value);
            }
            self.check_deadline(clock, started)?;
            clock.sleep(self.interval);
        }
    }

    /// Repeats `advance`, sleeps, then `measure`s, until two consecutive
    /// measurements agree. Returns the settled value.
    ///
    /// Used for infinite-scroll pages: advance scrolls to the bottom, measure
    /// reads the document height.
    pub fn settle<C, T, E>(
        &self,
        clock: &C,
        mut advance: impl FnMut() -> Result<(), E>,
        mut measure: impl FnMut() -> Result<T, E>,
    ) -> Result<T, WaitError<E>>
    where
        C: Clock + ?Sized,
        T: PartialEq,
    {
        let started = clock.now();
        let mut last = measure().map_err(WaitError::Probe)?;
        loop {
            advance().map_err(WaitError::Probe)?;
            clock.sleep(self.interval);
            let current = measure().map_err(WaitError::Probe)?;
            if current == last {
                return Ok(current);
            }
            self.check_deadline(clock, started)?;
            last = current;
        }
    }

    fn check_deadline<C, E>(&self, clock: &C, started: Instant) -> Result<(), WaitError<E>>
    where
        C: Clock + ?Sized,
    {
        let waited = clock.now().saturating_duration_since(started);
        match self.timeout {
            Some(timeout) if waited >= timeout => Err(WaitError::TimedOut { waited }),
            _ => Ok(()),
        }
    }
}

/// Virtual clock: `sleep` advances time instantly.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct ManualClock {
    start: Instant,
    elapsed: std::cell::Cell<Duration>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: std::cell::Cell::new(Duration::ZERO),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed.get()
    }

    fn sleep(&self, duration: Duration) {
        self.elapsed.set(self.elapsed.get() + duration);
    }
}
