use proptest::prelude::*;

use crate::*;

/// A clock whose frames hold a whole number of samples, the way real digitizers are built.
fn clock_strategy() -> impl Strategy<Value = Clock> {
    (1e-3..10.0f64, 1..100_000u64).prop_map(|(frequency, frame_ticks)| {
        Clock::new(0.0, frame_ticks as f64 / frequency, frequency).unwrap()
    })
}

/// A clock plus a sample which is in range for it.
fn clock_and_sample() -> impl Strategy<Value = (Clock, u64)> {
    clock_strategy().prop_flat_map(|c| {
        let frame_ticks = c.frame_ticks().round() as u64;
        (Just(c), 0..frame_ticks)
    })
}

/// A clock whose frames end part way through a sample, like a 64 MHz digitizer in 1.6 ms frames.
fn uneven_clock_strategy() -> impl Strategy<Value = Clock> {
    (1e-3..10.0f64, 1.0..100_000.0f64)
        .prop_filter("frames must end part way through a sample", |(_, frame_ticks)| {
            (0.1..0.9).contains(&frame_ticks.fract())
        })
        .prop_map(|(frequency, frame_ticks)| Clock::new(0.0, frame_ticks / frequency, frequency).unwrap())
}

/// The split of a clock's time matches a plain floor, except within a few ulps of a frame boundary, where the
/// boundary's computed start time decides. The discretized instant is never after the time itself.
fn check_split(c: Clock) -> proptest::test_runner::TestCaseResult {
    let time = c.time();
    let expected = (time / c.frame_period()).floor() as i64;
    if c.frame() != expected {
        let boundary = c.frame().max(expected) as f64 * c.frame_period();
        let slack = 8.0 * f64::EPSILON * time.abs().max(c.frame_period());
        prop_assert!((time - boundary).abs() <= slack, "frame {} for {} is off the floor {}", c.frame(), time, expected);
    }
    prop_assert!((c.sample() as f64) < c.frame_ticks());
    prop_assert!(c.sample() < c.samples_per_frame());
    prop_assert!(c.discrete_time() <= time);
    prop_assert!(c.at_time(c.discrete_time()).discrete_time() == c.discrete_time());
    Ok(())
}

fn check_round_trip(clock: Clock, sample: u64, frame: i64) -> proptest::test_runner::TestCaseResult {
    let c = clock.at_sample_frame(sample, frame);
    prop_assert_eq!(c.sample(), sample);
    prop_assert_eq!(c.frame(), frame);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    #[test]
    fn round_trip_small_frames((clock, sample) in clock_and_sample(), frame in 0..1000i64) {
        check_round_trip(clock, sample, frame)?;
    }

    // Late frames are where the division in the round trip starts losing bits.
    #[test]
    fn round_trip_large_frames((clock, sample) in clock_and_sample(), frame in 1_000_000..100_000_000i64) {
        check_round_trip(clock, sample, frame)?;
    }

    #[test]
    fn round_trip_uneven_frames(clock in uneven_clock_strategy(), sample in 0..100_000u64, frame in -10_000..10_000i64) {
        check_round_trip(clock, sample % clock.samples_per_frame(), frame)?;
    }

    #[test]
    fn round_trip_negative_frames((clock, sample) in clock_and_sample(), frame in -100_000..0i64) {
        check_round_trip(clock, sample, frame)?;
    }

    #[test]
    fn split_matches_floor(clock in clock_strategy(), time in 0.0..1e12f64) {
        let c = clock.at_time(time);
        check_split(c)?;
        let frame_ticks = c.samples_per_frame() as i64;
        prop_assert_eq!(c.ticks(), c.frame() * frame_ticks + c.sample() as i64);
    }

    #[test]
    fn split_matches_floor_for_negative_times(clock in clock_strategy(), time in -1e9..0.0f64) {
        let c = clock.at_time(time);
        prop_assert!(c.frame() < 0);
        check_split(c)?;
    }

    #[test]
    fn split_matches_floor_for_uneven_frames(clock in uneven_clock_strategy(), time in -1e9..1e9f64) {
        check_split(clock.at_time(time))?;
    }

    #[test]
    fn monotonic(clock in clock_strategy(), a in -1e9..1e9f64, b in -1e9..1e9f64) {
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let early = clock.at_time(early);
        let late = clock.at_time(late);
        prop_assert!(early.ticks() <= late.ticks());
        prop_assert!((early.frame(), early.sample()) <= (late.frame(), late.sample()));
        prop_assert!(early.discrete_time() <= late.discrete_time());

        let frame_ticks = clock.samples_per_frame() as i64;
        prop_assert_eq!(early.ticks(), early.frame() * frame_ticks + early.sample() as i64);
        prop_assert_eq!(late.ticks(), late.frame() * frame_ticks + late.sample() as i64);
    }

    #[test]
    fn ticks_round_trip(clock in clock_strategy(), ticks in -1_000_000_000..1_000_000_000i64) {
        prop_assert_eq!(clock.at_ticks(ticks).ticks(), ticks);
    }
}
