//! Layout row type.

use serde::Serialize;
use sqlx::FromRow;

/// A physical keyboard layout (e.g., "ANSI 60%", "ISO TKL").
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Layout {
    /// Primary key
    pub layout_id: i64,
    /// Layout name
    pub name: String,
}
