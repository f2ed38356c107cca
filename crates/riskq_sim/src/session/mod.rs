//! Cancellable background runs and per-session state.
//!
//! A simulation is blocking and CPU-bound. Interactive callers hand it to a
//! [`SimulationWorker`] thread and keep a [`SimulationHandle`]; a newer edit
//! trips the old run's [`CancellationToken`] so it stops within one block of
//! trials. [`SimulationSession`] ties this to a private [`ResultCache`](crate::cache::ResultCache).

mod cancel;
mod state;
mod worker;

pub use cancel::CancellationToken;
pub use state::{SimulationSession, Submission};
pub use worker::{SimulationHandle, SimulationWorker};
