//! Flat-file backend for the Roost selection store.
//!
//! The selection set lives in a small JSON document,
//! `{"selectedReviewIds": [...]}`. A store can either write every change to
//! that file or keep changes in memory for deployments without a writable
//! filesystem; see [`SelectionMode`].

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{FileSelectionStore, SelectionMode};
