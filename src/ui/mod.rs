//! # User Interface
//!
//! Colored terminal output and the HTML page served to the browser.

pub mod log;
pub mod page;

pub use log::{analyzed, debug, error, header, info, print_logo, success, warn, Log};
pub use page::{escape, render, ModelNotice, Outcome, PageView, Preview};
