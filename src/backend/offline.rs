//! Pass-through terminal
//!
//! The handler at the end of the chain. There is no network transport in
//! this crate, so whatever reaches it fails the way a browser reports a
//! request to a host where nothing is listening.

use crate::core::traits::RequestHandler;
use crate::types::{ApiRequest, ApiResponse};
use futures::future::{self, BoxFuture, FutureExt};

/// Answers every request with status `0 Unknown Error`
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

impl RequestHandler for OfflineBackend {
    fn handle(&self, request: ApiRequest) -> BoxFuture<'_, ApiResponse> {
        log::warn!("no backend reachable for {}", request);
        future::ready(ApiResponse::unreachable()).boxed()
    }
}
