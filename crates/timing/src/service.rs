//! The time reference service hands out clocks for each subsystem.
use std::sync::OnceLock;

use log::*;

use elec_clock::Clock;

use crate::errors::*;
use crate::{Subsystem, TimingConfig};

static GLOBAL: OnceLock<TimeReferenceService> = OnceLock::new();

/// Converts simulation time to electronics time and builds [Clock]s for each [Subsystem].
///
/// The configuration is validated once when the service is built and never changes afterwards, so building clocks
/// can't fail. Clocks are snapshots: they keep the frame period and frequency they were built with.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeReferenceService {
    config: TimingConfig,
}

impl TimeReferenceService {
    pub fn new(config: TimingConfig) -> Result<TimeReferenceService> {
        if let Err(e) = config.validate() {
            warn!("Rejected timing configuration {:?}: {}", config, e);
            return Err(e);
        }

        info!(
            "Electronics clocks: t0={} ns frame_period={} ns tpc={} GHz optical={} GHz trigger={} GHz",
            config.reference_time,
            config.frame_period,
            config.frequency_tpc,
            config.frequency_optical,
            config.frequency_trigger
        );
        Ok(TimeReferenceService { config })
    }

    /// A service using the default detector constants.
    pub fn with_defaults() -> TimeReferenceService {
        let config = TimingConfig::default();
        debug_assert!(config.validate().is_ok());
        TimeReferenceService { config }
    }

    /// Make `service` the process-wide default returned by [TimeReferenceService::global].
    ///
    /// Only the first initialization wins: this fails if a service was already installed, or if
    /// [TimeReferenceService::global] already fell back to the defaults.
    pub fn install_global(service: TimeReferenceService) -> Result<&'static TimeReferenceService> {
        let mut candidate = Some(service);
        let global = GLOBAL.get_or_init(|| {
            debug!("Installing the process-wide time reference service");
            candidate.take().unwrap_or_default()
        });

        if candidate.is_some() {
            return Err(Error::GlobalAlreadyInitialized);
        }
        Ok(global)
    }

    /// The process-wide service, initialized with the defaults if nothing was installed first.
    ///
    /// Initialization happens exactly once even under concurrent first access.
    pub fn global() -> &'static TimeReferenceService {
        GLOBAL.get_or_init(|| {
            debug!("No time reference service installed, using the defaults");
            TimeReferenceService::with_defaults()
        })
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    pub fn reference_time(&self) -> f64 {
        self.config.reference_time
    }

    pub fn frame_period(&self) -> f64 {
        self.config.frame_period
    }

    pub fn frequency(&self, subsystem: Subsystem) -> f64 {
        self.config.frequency(subsystem)
    }

    /// Given a simulation time in ns, get the time in ns relative to electronics time zero.
    pub fn simulation_to_electronics_time(&self, sim_time: f64) -> f64 {
        sim_time - self.config.reference_time
    }

    pub fn electronics_to_simulation_time(&self, elec_time: f64) -> f64 {
        elec_time + self.config.reference_time
    }

    /// A clock for `subsystem` at `time` ns from clock-counting start.
    ///
    /// Readout windows can be placed by passing their offset from the start of the trigger.
    pub fn clock_for(&self, subsystem: Subsystem, time: f64) -> Clock {
        Clock::new(time, self.config.frame_period, self.frequency(subsystem))
            .expect("Timing configuration is validated when the service is built")
    }

    /// A clock for `subsystem` at a sample and frame of that subsystem's sampling.
    pub fn clock_at(&self, subsystem: Subsystem, sample: u64, frame: i64) -> Clock {
        self.clock_for(subsystem, 0.0).at_sample_frame(sample, frame)
    }

    /// A clock for `subsystem` at the electronics time corresponding to `sim_time`.
    pub fn simulation_clock_for(&self, subsystem: Subsystem, sim_time: f64) -> Clock {
        self.clock_for(subsystem, self.simulation_to_electronics_time(sim_time))
    }
}

impl Default for TimeReferenceService {
    fn default() -> TimeReferenceService {
        TimeReferenceService::with_defaults()
    }
}
