//! Unified logging system

use chrono::Local;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
    ____                                                    
   / __ \____  ___  __  ______ ___  ____  ______________ _____ 
  / /_/ / __ \/ _ \/ / / / __ `__ \/ __ \/ ___/ ___/ __ `/ __ \
 / ____/ / / /  __/ /_/ / / / / / / /_/ (__  ) /__/ /_/ / / / /
/_/   /_/ /_/\___/\__,_/_/ /_/ /_/\____/____/\___/\__,_/_/ /_/ "#;

const SLOGANS: &[&str] = &[
	"Take a deep breath",
	"One forward pass, no waiting room",
	"Now with 100% fewer lab coats",
	"Say \"aah\"... wait, wrong organ",
	"Reading X-rays so radiologists can read books",
	"Not a doctor. Please see a doctor.",
	"Inhale the image, exhale the label",
];

pub fn random_slogan() -> &'static str {
	let idx = rand::random_range(0..SLOGANS.len());
	SLOGANS[idx]
}

pub fn print_logo() {
	println!("{}", LOGO.bright_blue().bold());
	println!("{}", random_slogan().dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

fn stamp() -> ColoredString {
	Local::now().format("%H:%M:%S").to_string().dimmed()
}

pub fn info(msg: &str) {
	println!("[{}] {} {}", stamp(), "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("[{}] {} {}", stamp(), "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("[{}] {} {}", stamp(), "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("[{}] {} {}", stamp(), "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("[{}] {} {}", stamp(), "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", format!("─── {} ───", text).bright_blue().bold());
}

/// Log a finished analysis with the label colored by outcome
pub fn analyzed(filename: &str, label: &str, confidence: f32, duration_ms: u128) {
	let label = if label == "PNEUMONIA" { label.bright_red().bold() } else { label.bright_green().bold() };
	info(&format!(
		"{} {} {} {}",
		filename.bright_white(),
		label,
		format!("{:.0}%", confidence * 100.0).dimmed(),
		format!("{}ms", duration_ms).dimmed()
	));
}
