//! A headless, object-pooled scroll virtualization engine.
//!
//! For motion utilities (tweened moves, paging navigation, drag snapping), see the
//! `pooled-scroll-adapter` crate.
//!
//! This crate keeps huge collections scrollable while materializing only what intersects the
//! viewport: a cumulative offset table with binary-search lookup, incremental reconciliation of
//! pooled instances against the visible range, and two placeholder spacers that keep the total
//! scrollable extent exact.
//!
//! Three scroll kinds share the same primitives:
//! - [`ListScroll`]: one pooled element per logical position
//! - [`GridScroll`]: elements batched into pooled cells (rows or columns)
//! - [`ScreenScroll`]: one active full-screen element, swapped through transition callbacks
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size along and across the scroll axis
//! - the scroll position (absolute or normalized) on every scroll frame
//! - an [`ObjectSource`] that creates, binds, toggles and destroys visual instances
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod events;
mod grid;
mod host;
mod list;
mod offsets;
mod options;
mod pool;
mod reconcile;
mod screen;
mod state;
mod surface;
mod track;
mod types;


pub use error::ScrollError;
pub use events::{EventCallback, ScrollEvent, SubscriptionId};
pub use grid::{GridScroll, ScrollCell};
pub use host::{CellLayout, CellSource, ObjectSource, ScreenCallbacks, Transition};
pub use list::ListScroll;
pub use offsets::{OffsetEntry, OffsetTable};
pub use options::{ScrollOptions, SizeFn};
pub use pool::{ObjectPool, PoolHandle, PoolListener};
pub use reconcile::{Holder, ReconcileStats};
pub use screen::{NoCallbacks, ScreenScroll, ScreenStep};
pub use state::ScrollSnapshot;
pub use surface::ScrollSurface;
pub use types::{Axis, Extent, LifecycleState, Padding, Placeholders, ScrollRange, VisibleRange};
