//! Timerstat core library: per-frame GPU/CPU timer aggregation and ranking.

mod aggregator;
mod cmd;
mod color;
mod config;
mod error;
mod ranking;
mod registry;
mod render;
mod replay;
mod sample;
mod synth;

pub use aggregator::*;
pub use cmd::*;
pub use color::*;
pub use config::*;
pub use error::*;
pub use ranking::*;
pub use registry::*;
pub use render::*;
pub use replay::*;
pub use sample::*;
pub use synth::*;
