//! Check-in and route progress.
//!
//! A check-in resolves a route stop to its place, verifies the user stands
//! close enough, records the visit in the ledger and re-evaluates route
//! completion. The ledger write and the completion update commit together.

pub mod error;
pub mod ledger;
pub mod progress;
pub mod workflow;

pub use error::CheckInError;
pub use ledger::{VisitLedger, VisitOutcome};
pub use progress::{Completion, ProgressTracker};
pub use workflow::{CheckIn, CheckInReceipt, CheckInWorkflow};
