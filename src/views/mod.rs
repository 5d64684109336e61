//! View coordinators
//!
//! Each view owns its stores, forms and selection state, and turns every
//! failure into a message exposed through its `error()` accessors.

mod dashboard;
mod menu;
mod orders;

pub use dashboard::{Dashboard, Tab};
pub use menu::MenuView;
pub use orders::OrdersView;
