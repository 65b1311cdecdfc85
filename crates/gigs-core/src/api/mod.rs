//! REST API client module for the gigs service.
//!
//! This module provides the `GigClient` for signing up, signing in, listing
//! gigs and creating gigs, plus the `Transport` seam it sends requests
//! through.
//!
//! Listing uses `Authorization: Bearer <token>`; creating sends the raw token
//! in an `Authentication` header.

pub mod client;
pub mod error;
pub mod transport;

pub use client::GigClient;
pub use error::{ApiError, Result};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
