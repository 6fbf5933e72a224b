use std::{error::Error, fmt, thread, time::{Duration, Instant}};

/// Waits longer than this are mostly slept, shorter ones are spun out completely.
///
pub const SLEEP_THRESHOLD: Duration = Duration::from_millis(4);

/// How long before the deadline the sleeping part of a wait wakes up again to spin the rest.
///
pub const SPIN_MARGIN: Duration = Duration::from_micros(100);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerError
{
    /// The frequency must be a finite number above zero.
    InvalidFrequency(f64),
}

impl Error for TimerError {}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidFrequency(hz) => write!(f, "invalid timer frequency: {} Hz", hz),
        }
    }
}

/// Paces a loop to a fixed frequency.
///
/// Sleeping alone is too coarse for sub-millisecond accuracy and spinning alone burns a core, so
/// `wait` sleeps for most of a long wait and spins for the final stretch. Deadlines advance by
/// exactly one period every call, a late caller therefore returns immediately without shifting
/// the schedule and without catching up on missed ticks in a burst.
///
#[derive(Debug, Clone)]
pub struct IntervalTimer
{
    period: Duration,
    next_deadline: Instant,
}

impl IntervalTimer
{
    pub fn new(frequency_hz: f64) -> Result<Self, TimerError> {
        Ok(IntervalTimer {
            period: period_from_frequency(frequency_hz)?,
            next_deadline: Instant::now(),
        })
    }

    /// Change the frequency, takes effect after the currently scheduled deadline.
    ///
    pub fn configure(&mut self, frequency_hz: f64) -> Result<(), TimerError> {
        self.period = period_from_frequency(frequency_hz)?;
        Ok(())
    }

    /// Anchor the schedule to the current instant, the next `wait` returns immediately.
    ///
    pub fn reset(&mut self) {
        self.next_deadline = Instant::now();
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// Block until the next scheduled deadline.
    ///
    pub fn wait(&mut self) {
        let deadline = self.next_deadline;
        let time_left = deadline.saturating_duration_since(Instant::now());

        if time_left > SLEEP_THRESHOLD {
            thread::sleep(time_left - SPIN_MARGIN);
            spin_until(deadline);
        } else if !time_left.is_zero() {
            spin_until(deadline);
        } else {
            log::trace!("interval timer behind schedule");
        }

        self.next_deadline = deadline + self.period;
    }
}

fn spin_until(deadline: Instant) {
    while Instant::now() < deadline {
        std::hint::spin_loop();
    }
}

fn period_from_frequency(frequency_hz: f64) -> Result<Duration, TimerError> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Err(TimerError::InvalidFrequency(frequency_hz));
    }
    Duration::try_from_secs_f64(1.0 / frequency_hz).map_err(|_| TimerError::InvalidFrequency(frequency_hz))
}
