pub mod export;
pub mod replay;
pub mod script;

pub use export::*;
pub use replay::*;
pub use script::*;
