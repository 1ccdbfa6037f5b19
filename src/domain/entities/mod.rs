//! Core domain entities.
//!
//! The service has a single entity, [`ShortUrl`], mapping a short path token
//! to an absolute destination URL.

pub mod short_url;

pub use short_url::ShortUrl;
