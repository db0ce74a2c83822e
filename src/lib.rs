pub mod args;
pub mod controller;
pub mod error;
pub mod handicap;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod view {
    pub mod history;
    pub mod index;
}

pub use handicap::{HandicapMethod, HoleCount, compute_differential, compute_handicap};
