//! pneumoscan - chest X-ray pneumonia detection
//!
//! Serves a single-page web UI, or classifies one image from the terminal.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use pneumoscan::cli::{Cli, Command};
use pneumoscan::{commands, config, runtime, ui};

fn main() -> Result<()> {
	let cli = Cli::parse();

	ui::Log::set_verbose(cli.verbose);
	runtime::set_provider(cli.provider);
	if let Some(dir) = cli.models_dir {
		config::set_models_dir(dir);
	}

	match cli.command {
		Command::Serve { host, port, model } => commands::serve::run(&host, port, &model),
		Command::Predict { image, json, model } => commands::predict::run(&image, json, &model),
		Command::Models => commands::models::run(),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			match subcommand {
				Some(sub) => match cmd.find_subcommand_mut(&sub) {
					Some(sub_cmd) => sub_cmd.print_help()?,
					None => {
						ui::error(&format!("Unknown subcommand: {}", sub));
						cmd.print_help()?;
					}
				},
				None => cmd.print_help()?,
			}
			Ok(())
		}
	}
}
