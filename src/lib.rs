//! # pneumoscan
//!
//! Chest X-ray pneumonia detection with a pretrained ONNX classifier.
//! Loads the newest model once and serves a single upload-and-analyze page.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod models;
pub mod processing;
pub mod runtime;
pub mod server;
pub mod ui;
