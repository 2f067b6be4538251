//! Electronics clocks: a point in time for one readout subsystem, viewed either as a continuous offset or as a
//! sample within a frame.
mod clock;
mod errors;

#[cfg(test)]
mod tests;

pub use clock::*;
pub use errors::*;
