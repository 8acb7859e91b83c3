//! SeaORM bindings for the marketplace back-office database.
//!
//! The entities in [`codegen`] mirror the tables created by the `migration` crate.
//! [`conversions`] holds the helpers shared by the database and API layers for
//! comma-joined list columns and batched relation lookups.

#![allow(clippy::all)]

#[cfg_attr(rustfmt, rustfmt_skip)]
pub mod codegen;

pub mod conversions;

#[cfg_attr(rustfmt, rustfmt_skip)]
pub use codegen::*;
