#![forbid(unsafe_code)]

//! Browser runner for the Folio scroll pager.
//!
//! This crate provides [`FolioPager`], a `wasm-bindgen`-exported struct that
//! wraps [`RunnerCore`] and exposes it to JavaScript for host-driven
//! execution:
//!
//! - **Host-driven I/O**: the page script forwards wheel events and the
//!   viewport height.
//! - **Deterministic time**: the host advances the frame clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.

#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod runner_core;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use runner_core::{RunnerCore, RunnerError};

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioPager;
