//! Rate-limited client for the ISMP goods introduction API.
//!
//! Every [`SubmissionClient`] owns one [`RateGate`] that allows at most
//! `request_limit` confirmed submissions per time unit. Refused attempts come
//! back as [`SubmissionOutcome::Throttled`] instead of waiting.

pub mod client;
pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod metrics;
pub mod ratelimit;
pub mod transport;

pub use client::{SubmissionClient, SubmissionOutcome};
pub use document::{BatchEntry, Document, Product, ProductGroup};
pub use error::ClientError;
pub use ratelimit::{RateGate, TimeUnit};
