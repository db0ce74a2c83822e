pub mod aggregate;
pub mod differential;
pub mod history;

pub use aggregate::*;
pub use differential::*;
pub use history::*;
