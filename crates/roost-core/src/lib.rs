//! Core types and logic for the Roost review curation service.
//!
//! This crate is free of HTTP and filesystem dependencies. Upstream adapters
//! (`roost-sources`) and the selection store backend (`roost-store-file`)
//! plug into the traits defined here; the JSON API (`roost-api`) drives the
//! [`aggregate::ReviewService`].

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod property;
pub mod provider;
pub mod resolver;
pub mod review;
pub mod selection;
pub mod source;
pub mod stats;

pub use error::{Error, Result};
