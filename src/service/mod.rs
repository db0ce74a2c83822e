pub mod query;
pub mod refresh;
pub mod rounds;

pub use query::*;
pub use refresh::*;
pub use rounds::*;
