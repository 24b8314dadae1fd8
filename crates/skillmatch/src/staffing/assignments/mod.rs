//! Person-to-project time allocations and their Active/Completed lifecycle.
//!
//! The ledger performs no overlap validation: two assignments for the same person over the
//! same dates are accepted as-is.

mod domain;
mod ledger;

pub use domain::{
    Assignment, AssignmentRequest, AssignmentStatus, AssignmentUpdate, AssignmentView,
};
pub use ledger::AssignmentLedger;
