//! Core traits for the backend request seam
//!
//! This module defines the trait abstraction that lets the simulated backend
//! and the pass-through terminal be used interchangeably behind the
//! customer service. Which implementation is live is decided once, at
//! configuration time (see [`crate::backend::create_backend`]).

use crate::types::{ApiRequest, ApiResponse};
use futures::future::BoxFuture;

/// Trait for answering requests of the customer API
///
/// Implementations never fail out-of-band: every outcome, including a
/// network failure, is an [`ApiResponse`] with the matching status. The
/// returned future is the only suspension point of a request.
pub trait RequestHandler: Send + Sync {
    /// Answer one request
    fn handle(&self, request: ApiRequest) -> BoxFuture<'_, ApiResponse>;
}

impl<H: RequestHandler + ?Sized> RequestHandler for Box<H> {
    fn handle(&self, request: ApiRequest) -> BoxFuture<'_, ApiResponse> {
        (**self).handle(request)
    }
}

impl<H: RequestHandler + ?Sized> RequestHandler for std::sync::Arc<H> {
    fn handle(&self, request: ApiRequest) -> BoxFuture<'_, ApiResponse> {
        (**self).handle(request)
    }
}
