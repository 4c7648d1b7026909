//! Common utilities and helpers

pub mod logging;
pub mod process;
pub mod temp;
pub mod time;
