pub mod error;
pub mod http;
pub mod params;
pub mod server;
