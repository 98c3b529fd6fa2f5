pub mod check;
pub mod ip;

pub use check::*;
pub use ip::*;
