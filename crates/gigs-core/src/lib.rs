//! Core library for gigs.
//!
//! A thin async client for the gigs listing service: sign up, sign in, list
//! gigs and create gigs over HTTP + JSON.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiError, GigClient};
pub use auth::{Bearer, CredentialStore};
pub use config::Config;
pub use models::{Gig, User};
