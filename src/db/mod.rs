//! Local SQLite audit trail of the commands sent to the server.

pub mod initialize;
pub mod log;
pub mod pool;
