pub mod course;
pub mod player;
pub mod round;

pub use course::*;
pub use player::*;
pub use round::*;
