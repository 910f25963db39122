//! Cached client for the page content documents (`hero`, `services`,
//! `gallery`) published by the content host.

pub mod client;
pub mod error;

pub use client::{ContentClient, ContentObject};
pub use error::ContentError;
