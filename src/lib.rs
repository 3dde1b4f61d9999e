#![doc(test(attr(deny(warnings))))]

//! Category Manager provides the view layer for maintaining expense and income
//! categories: a list page, a create/edit form and the data-access seam behind them.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod notify;
pub mod storage;
pub mod utils;
pub mod views;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Category Manager tracing initialized.");
    });
}
