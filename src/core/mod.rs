pub mod attendance;
pub mod check_in;
pub mod check_out;
pub mod config;
pub mod confirmation;
pub mod log;
pub mod machine;
pub mod resolver;

pub use attendance::{Attendance, Flow};
pub use machine::{DialogState, Phase, SessionMachine, UiState};
