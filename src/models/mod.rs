//! Catalog row types.
//!
//! One struct per table the API exposes. Each derives [`sqlx::FromRow`] for
//! decoding and [`serde::Serialize`] for the JSON responses; the structs
//! mirror the column sets the list and detail queries select.

pub mod keyboard;
pub mod keycap;
pub mod layout;
pub mod mouse;
pub mod switch;
pub mod vendor;

// Re-export all model types
pub use keyboard::Keyboard;
pub use keycap::KeycapSet;
pub use layout::Layout;
pub use mouse::{Mouse, MouseButton};
pub use switch::Switch;
pub use vendor::Vendor;
