pub mod espressif;
pub mod mac;
pub mod prefix;
