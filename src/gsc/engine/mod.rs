//! GSC engine variants. Each module is a constructor over constant
//! tables; adding a variant means adding data, not code.

pub mod iw6;
pub mod iw9;
