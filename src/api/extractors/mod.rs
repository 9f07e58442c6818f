pub mod admin;
pub mod client_ip;
pub mod json;
