pub mod address;
pub mod common;
pub mod error;
pub mod pool;
pub mod quote;

pub use address::*;
pub use common::*;
pub use error::*;
pub use pool::*;
pub use quote::*;
