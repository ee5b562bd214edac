pub mod device_name;
pub mod host;
pub mod show;
