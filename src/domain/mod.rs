mod interest;
mod loan;

pub use interest::*;
pub use loan::*;
