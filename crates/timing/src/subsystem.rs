//! The readout subsystems which get their own clocks.

/// A readout subsystem. Each samples at its own frequency, but all of them share one frame period.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, derive_more::Display)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Subsystem {
    #[display(fmt = "TPC")]
    Tpc,
    #[display(fmt = "Optical")]
    Optical,
    #[display(fmt = "Trigger")]
    Trigger,
}

impl Subsystem {
    pub const ALL: [Subsystem; 3] = [Subsystem::Tpc, Subsystem::Optical, Subsystem::Trigger];
}
