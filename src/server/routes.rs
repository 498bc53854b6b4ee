//! Route table

use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

use crate::config::MAX_UPLOAD_BYTES;
use crate::models::ModelState;
use crate::server::handlers;

/// Shared by every request; the model inside is resolved once per process
#[derive(Clone)]
pub struct AppState {
	pub model: Arc<ModelState>,
}

impl AppState {
	pub fn new(model: ModelState) -> Self {
		Self { model: Arc::new(model) }
	}
}

/// Build the complete route tree
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
	let index = warp::path::end()
		.and(warp::get())
		.and(with_state(state.clone()))
		.map(handlers::index);

	let page_state = state.clone();
	let analyze = warp::path("analyze").and(warp::path::end()).and(warp::post()).and(
		warp::multipart::form()
			.max_length(MAX_UPLOAD_BYTES)
			.and(with_state(state.clone()))
			.and_then(handlers::analyze)
			.recover(move |err: Rejection| handlers::analyze_rejection(err, page_state.clone()))
			.unify(),
	);

	let api_predict = warp::path!("api" / "predict")
		.and(warp::post())
		.and(warp::multipart::form().max_length(MAX_UPLOAD_BYTES))
		.and(with_state(state.clone()))
		.and_then(handlers::api_predict);

	let health = warp::path("health")
		.and(warp::path::end())
		.and(warp::get())
		.and(with_state(state))
		.map(handlers::health);

	index
		.or(analyze)
		.or(api_predict)
		.or(health)
		.recover(handlers::handle_rejection)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
	warp::any().map(move || state.clone())
}
