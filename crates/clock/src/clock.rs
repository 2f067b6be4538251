//! The electronics clock value type.
use crate::errors::*;

/// Slack, in ulps, within which a frame's sample count is treated as a whole number.
const SNAP_ULPS: f64 = 8.0;

/// How far a floored estimate of a position may be walked to settle it against the sample start times.
///
/// Floors of `time / frame_period` and of the remainder are each off by at most one sample, so a couple of steps
/// either way is always enough unless samples are closer together than the float spacing of `time`.
const SETTLE_STEPS: usize = 4;

/// Return the nearest integer to `x` if `x` is within [SNAP_ULPS] ulps of it, otherwise `x` unchanged.
fn snapped(x: f64) -> f64 {
    let nearest = x.round();
    let slack = SNAP_ULPS * f64::EPSILON * x.abs().max(1.0);
    if (x - nearest).abs() <= slack {
        nearest
    } else {
        x
    }
}

/// Check that a frame period or frequency is usable: finite and strictly positive.
pub fn check_positive(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidConfiguration { parameter, value })
    }
}

/// A point in electronics time for one subsystem.
///
/// The clock stores the precise time in ns since clock-counting start, plus the frame period (ns) and sampling
/// frequency (GHz, i.e. samples per ns) it was built with. Frames and samples are derived on demand with floor
/// division, so times before clock-counting start land in negative frames while samples stay within
/// `[0, frame_ticks)`.
///
/// The position of a time is the last `(sample, frame)` whose start, as computed by [Clock::time_of], is not after
/// it. Every view (sample, frame, ticks, discrete time) is derived from that one position, so they always agree, and a
/// clock built from a sample and frame reports exactly that sample and frame back.
///
/// Clocks are values: nothing here mutates in place, and every `at_*` method hands back a new clock with the same
/// frame period and frequency.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Clock {
    time: f64,
    frame_period: f64,
    frequency: f64,
}

impl Clock {
    /// Build a clock at `time` ns.
    ///
    /// `time` may be negative. Fails if `frame_period` or `frequency` isn't finite and positive.
    ///
    /// `time` must be finite. That is only checked by a debug assertion: in release builds a NaN or infinite time
    /// isn't rejected and the clock reports meaningless samples and frames.
    pub fn new(time: f64, frame_period: f64, frequency: f64) -> Result<Clock> {
        debug_assert!(time.is_finite(), "Clock time must be finite, got {}", time);
        Ok(Clock {
            time,
            frame_period: check_positive("frame_period", frame_period)?,
            frequency: check_positive("frequency", frequency)?,
        })
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame_period(&self) -> f64 {
        self.frame_period
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Number of samples in one frame. Not necessarily an integer.
    pub fn frame_ticks(&self) -> f64 {
        self.frequency * self.frame_period
    }

    /// How many distinct samples a frame holds: every integer below [Clock::frame_ticks], and never less than one.
    pub fn samples_per_frame(&self) -> u64 {
        snapped(self.frame_ticks()).ceil().max(1.0) as u64
    }

    /// `Some(samples_per_frame)` when frames hold a whole number of samples, so that ticks line up with frames.
    fn whole_frame_ticks(&self) -> Option<i64> {
        let frame_ticks = snapped(self.frame_ticks());
        if frame_ticks >= 1.0 && frame_ticks.fract() == 0.0 {
            Some(frame_ticks as i64)
        } else {
            None
        }
    }

    pub fn sample(&self) -> u64 {
        self.sample_of(self.time)
    }

    pub fn frame(&self) -> i64 {
        self.frame_of(self.time)
    }

    /// Samples since clock-counting start.
    pub fn ticks(&self) -> i64 {
        self.ticks_of(self.time)
    }

    /// The start of the sample this clock's time falls in. Never after [Clock::time].
    pub fn discrete_time(&self) -> f64 {
        let (sample, frame) = self.position_of(self.time);
        self.time_of(sample, frame)
    }

    pub fn sample_of(&self, time: f64) -> u64 {
        self.position_of(time).0
    }

    pub fn frame_of(&self, time: f64) -> i64 {
        self.position_of(time).1
    }

    /// The last tick starting at or before `time`.
    ///
    /// When frames hold a whole number of samples this is `frame * frame_ticks + sample`.
    pub fn ticks_of(&self, time: f64) -> i64 {
        if let Some(frame_ticks) = self.whole_frame_ticks() {
            let (sample, frame) = self.position_of(time);
            return frame * frame_ticks + sample as i64;
        }

        let mut ticks = (time * self.frequency).floor() as i64;
        for _ in 0..SETTLE_STEPS {
            if self.time_of_ticks(ticks) <= time {
                break;
            }
            ticks -= 1;
        }
        for _ in 0..SETTLE_STEPS {
            if self.time_of_ticks(ticks + 1) > time {
                break;
            }
            ticks += 1;
        }
        ticks
    }

    /// Time in ns of the given sample of the given frame.
    ///
    /// Samples past the end of a frame are not rejected; they simply run on into later frames.
    pub fn time_of(&self, sample: u64, frame: i64) -> f64 {
        frame as f64 * self.frame_period + sample as f64 / self.frequency
    }

    /// Time in ns at which the given tick starts.
    pub fn time_of_ticks(&self, ticks: i64) -> f64 {
        match self.whole_frame_ticks() {
            Some(frame_ticks) => self.time_of(ticks.rem_euclid(frame_ticks) as u64, ticks.div_euclid(frame_ticks)),
            None => ticks as f64 / self.frequency,
        }
    }

    fn next_position(&self, (sample, frame): (u64, i64)) -> (u64, i64) {
        if sample + 1 < self.samples_per_frame() {
            (sample + 1, frame)
        } else {
            (0, frame + 1)
        }
    }

    fn previous_position(&self, (sample, frame): (u64, i64)) -> (u64, i64) {
        if sample > 0 {
            (sample - 1, frame)
        } else {
            (self.samples_per_frame() - 1, frame - 1)
        }
    }

    /// Split `time` into `(sample, frame)`.
    fn position_of(&self, time: f64) -> (u64, i64) {
        let frame = (time / self.frame_period).floor();
        let sample = ((time - frame * self.frame_period) * self.frequency)
            .floor()
            .clamp(0.0, (self.samples_per_frame() - 1) as f64);
        let mut position = (sample as u64, frame as i64);

        // The floors above can round either way by a sample; settle against the start times themselves.
        for _ in 0..SETTLE_STEPS {
            if self.time_of(position.0, position.1) <= time {
                break;
            }
            position = self.previous_position(position);
        }
        for _ in 0..SETTLE_STEPS {
            let next = self.next_position(position);
            if self.time_of(next.0, next.1) > time {
                break;
            }
            position = next;
        }
        position
    }

    /// A clock of the same subsystem at the given sample and frame.
    ///
    /// For `sample < frame_ticks()` the result reports exactly `sample` and `frame` back.
    #[must_use = "This returns a new clock rather than moving this one"]
    pub fn at_sample_frame(&self, sample: u64, frame: i64) -> Clock {
        self.at_time(self.time_of(sample, frame))
    }

    #[must_use = "This returns a new clock rather than moving this one"]
    pub fn at_ticks(&self, ticks: i64) -> Clock {
        self.at_time(self.time_of_ticks(ticks))
    }

    /// A clock of the same subsystem at `time` ns. As with [Clock::new], `time` must be finite.
    #[must_use = "This returns a new clock rather than moving this one"]
    pub fn at_time(&self, time: f64) -> Clock {
        debug_assert!(time.is_finite(), "Clock time must be finite, got {}", time);
        Clock { time, ..*self }
    }
}

impl std::fmt::Display for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (sample, frame) = self.position_of(self.time);
        write!(f, "{} ns (frame {}, sample {})", self.time, frame, sample)
    }
}

/// Shift a clock later by a duration in ns.
impl std::ops::Add<f64> for Clock {
    type Output = Clock;

    fn add(self, rhs: f64) -> Clock {
        self.at_time(self.time + rhs)
    }
}

/// Shift a clock earlier by a duration in ns.
impl std::ops::Sub<f64> for Clock {
    type Output = Clock;

    fn sub(self, rhs: f64) -> Clock {
        self.at_time(self.time - rhs)
    }
}

/// The time in ns between two clocks.
impl std::ops::Sub for Clock {
    type Output = f64;

    fn sub(self, rhs: Clock) -> f64 {
        self.time - rhs.time
    }
}
