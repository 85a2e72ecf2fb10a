//! docstring-md turns prose docstrings into structured Markdown references.
//!
//! The engine ([`render`]) takes trees of [`DocumentedUnit`]s and produces
//! Markdown documents plus an index. Collectors in [`collect`] build those
//! trees from Python sources or JSON; [`settings`] persists user defaults.

pub mod classify;
pub mod collect;
pub mod error;
pub mod model;
pub mod render;
pub mod settings;
pub mod toc;
pub mod tracker;
pub mod warning;

pub use error::MalformedTreeError;
pub use model::{DocumentedUnit, UnitKind};
pub use render::{render, RenderConfiguration, RenderOutput};
pub use tracker::ArgumentTracker;
pub use warning::DocWarning;
