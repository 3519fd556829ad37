// Application layer: the loan ledger operations and their error model.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
