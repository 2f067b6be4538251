//! The time reference for a detector run: where electronics time zero sits in simulation time, and the frame period
//! and sampling frequencies used to build [Clock]s for each readout subsystem.
mod config;
mod errors;
mod service;
mod subsystem;


pub use config::*;
pub use elec_clock::Clock;
pub use errors::*;
pub use service::*;
pub use subsystem::*;
