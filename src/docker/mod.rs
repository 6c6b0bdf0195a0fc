//! Docker Engine API access over the daemon's Unix socket.
//!
//! Only the container listing endpoint is used; the response is decoded into
//! [`RawContainer`] records that live for a single refresh cycle.
mod client;
mod error;
mod models;

pub use client::Client;
pub use error::{Error, Result};
pub use models::RawContainer;

#[cfg(test)]
pub(crate) use client::tests;
