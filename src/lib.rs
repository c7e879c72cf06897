#![doc(test(attr(deny(warnings))))]

//! Support Enforcement computes what a child-support obligor owes over time
//! and checks recorded payments against it.
//!
//! [`schedule`] turns children, amounts and a start date into the step-down
//! intervals and the dated list of amounts due; [`enforcement`] applies a
//! payment log to that list and reports what is still unpaid.

pub mod case;
pub mod cli;
pub mod config;
pub mod enforcement;
pub mod errors;
pub mod schedule;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Support enforcement tracing initialized.");
    });
}
