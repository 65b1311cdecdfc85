//! Data models exchanged with the gigs service.
//!
//! - `User`: sign-up / sign-in credentials
//! - `Gig`: a listed job with a title, description and ISO-8601 due date

pub mod gig;
pub mod user;

pub use gig::Gig;
pub use user::User;
