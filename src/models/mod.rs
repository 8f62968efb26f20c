pub mod location;
pub mod requests;
pub mod session;
pub mod work_type;
