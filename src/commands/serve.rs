//! Serve command - run the web UI

use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use std::time::Instant;

use crate::cli::ModelArgs;
use crate::models::ModelState;
use crate::server::{routes, AppState};
use crate::ui;

pub fn run(host: &str, port: u16, args: &ModelArgs) -> Result<()> {
	ui::print_logo();
	ui::header(&format!("pneumoscan v{}", env!("CARGO_PKG_VERSION")));

	let ip: IpAddr = host.parse().with_context(|| format!("Invalid bind address: {}", host))?;
	let addr = SocketAddr::new(ip, port);

	let load_start = Instant::now();
	let state = super::resolve_model(args)?;
	match &state {
		ModelState::Ready { path, .. } => ui::success(&format!(
			"Model {} ready in {:.2}s",
			path.display(),
			load_start.elapsed().as_secs_f32()
		)),
		ModelState::Missing { dir } => ui::warn(&format!(
			"Serving without a model; drop a .onnx file into {} and restart",
			dir.display()
		)),
		ModelState::Failed { path, .. } => ui::warn(&format!("Serving without a model; {} failed to load", path.display())),
	}

	let runtime = tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.build()
		.context("Failed to start async runtime")?;

	runtime.block_on(async move {
		let filter = routes(AppState::new(state));
		let (bound, server) = warp::serve(filter)
			.try_bind_with_graceful_shutdown(addr, async {
				let _ = tokio::signal::ctrl_c().await;
			})
			.with_context(|| format!("Failed to bind {}", addr))?;

		ui::success(&format!("Listening on http://{}", bound));
		server.await;
		ui::info("Shutting down");
		Ok::<(), anyhow::Error>(())
	})
}
