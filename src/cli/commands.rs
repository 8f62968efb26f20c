pub mod check_in;
pub mod check_out;
pub mod common;
pub mod config;
pub mod init;
pub mod log;
pub mod login;
pub mod logout;
pub mod status;
