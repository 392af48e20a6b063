//! Discovery controller: the state machine behind the find-partners view.
//!
//! Reconciles two mutually exclusive retrieval modes (paginated browse and
//! free-text search), debounces typing, drops superseded responses, and
//! projects a read-only view model that the UI subscribes to.

pub mod controller;
pub mod intent;
pub mod mode;
pub mod view;

pub use controller::DiscoveryController;
pub use intent::Intent;
pub use mode::Mode;
pub use view::{PageItem, Pagination, ViewModel};
