pub mod config;
pub mod frame;
pub mod network;
pub mod vendors;
