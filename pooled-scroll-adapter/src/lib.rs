//! Motion utilities for the `pooled-scroll` crate.
//!
//! The `pooled-scroll` crate is UI-agnostic and focuses on virtualization state. This crate
//! provides small, framework-neutral helpers that move a scroll over time:
//!
//! - Tween-driven moves stepped once per host frame ([`Mover`])
//! - Page-wise navigation past the viewport edges ([`Navigator`])
//! - Post-drag snapping to the nearest position ([`Snapper`])
//!
//! All of them work on any [`pooled_scroll::ScrollSurface`]; [`Controller`] wires them together.
//! This crate is intentionally framework-agnostic (no toolkit bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod cancel;
mod controller;
mod mover;
mod navigator;
mod snapper;
mod tween;

#[cfg(test)]
mod tests;

pub use cancel::CancelToken;
pub use controller::Controller;
pub use mover::{MoveStatus, Mover};
pub use navigator::{Navigator, NavigatorOptions};
pub use snapper::{SnapCallback, SnapEvent, SnapOptions, Snapper};
pub use tween::{Easing, Tween};
