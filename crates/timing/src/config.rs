//! Timing configuration: the five scalars every clock is built from.
use std::io::Read;

use elec_clock::check_positive;

use crate::errors::*;
use crate::Subsystem;

/// Electronics clock counting start in simulation time, ns.
pub const DEFAULT_MC_CLOCK_T0: f64 = 0.0;
/// Frame period shared by all subsystems, ns.
pub const DEFAULT_FRAME_PERIOD: f64 = 1.6e6;
/// TPC digitizer frequency, GHz.
pub const DEFAULT_FREQUENCY_TPC: f64 = 2e-3;
/// Optical digitizer frequency, GHz.
pub const DEFAULT_FREQUENCY_OPTICAL: f64 = 64e-3;
/// Trigger board frequency, GHz.
pub const DEFAULT_FREQUENCY_TRIGGER: f64 = 16e-3;

/// Where electronics time zero is, and how each subsystem's clock ticks.
///
/// Times are in ns and frequencies in GHz. Deserializing accepts any subset of the fields, falling back to the
/// defaults above for the rest, and also understands the detector framework's parameter names (`G4RefTime`,
/// `FramePeriod`, `ClockSpeedTPC` and so on).
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    #[serde(alias = "G4RefTime")]
    pub reference_time: f64,

    #[serde(alias = "FramePeriod")]
    pub frame_period: f64,

    #[serde(alias = "ClockSpeedTPC")]
    pub frequency_tpc: f64,

    #[serde(alias = "ClockSpeedOptical")]
    pub frequency_optical: f64,

    #[serde(alias = "ClockSpeedTrigger")]
    pub frequency_trigger: f64,
}

impl Default for TimingConfig {
    fn default() -> TimingConfig {
        TimingConfig {
            reference_time: DEFAULT_MC_CLOCK_T0,
            frame_period: DEFAULT_FRAME_PERIOD,
            frequency_tpc: DEFAULT_FREQUENCY_TPC,
            frequency_optical: DEFAULT_FREQUENCY_OPTICAL,
            frequency_trigger: DEFAULT_FREQUENCY_TRIGGER,
        }
    }
}

impl TimingConfig {
    /// Parse a JSON object, then validate it.
    pub fn from_json_str(json: &str) -> Result<TimingConfig> {
        let config: TimingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [TimingConfig::from_json_str], but from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<TimingConfig> {
        let config: TimingConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn frequency(&self, subsystem: Subsystem) -> f64 {
        match subsystem {
            Subsystem::Tpc => self.frequency_tpc,
            Subsystem::Optical => self.frequency_optical,
            Subsystem::Trigger => self.frequency_trigger,
        }
    }

    /// Check that every clock this configuration can build is well-formed.
    pub fn validate(&self) -> Result<()> {
        if !self.reference_time.is_finite() {
            return Err(elec_clock::Error::InvalidConfiguration {
                parameter: "reference_time",
                value: self.reference_time,
            }
            .into());
        }

        check_positive("frame_period", self.frame_period)?;
        check_positive("frequency_tpc", self.frequency_tpc)?;
        check_positive("frequency_optical", self.frequency_optical)?;
        check_positive("frequency_trigger", self.frequency_trigger)?;
        Ok(())
    }
}
