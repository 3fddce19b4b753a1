//! ARC engine variants. Each module is a constructor over constant
//! tables; adding a variant means adding data, not code.

pub mod t6;
pub mod t7;
pub mod t9;
