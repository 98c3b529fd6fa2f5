pub mod config;
pub mod records;
pub mod invocation;
pub mod reply;
pub mod geolocation;
