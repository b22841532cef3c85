//! Request handlers.

pub mod analyze;
pub mod coaching;
pub mod generate;
pub mod health;

pub use analyze::*;
pub use coaching::*;
pub use generate::*;
pub use health::*;
