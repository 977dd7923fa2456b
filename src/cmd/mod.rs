//! Command handlers behind the `timerstat` binary.

mod generate_cmd;
mod replay_cmd;
mod schema;

pub use generate_cmd::*;
pub use replay_cmd::*;
pub use schema::*;
