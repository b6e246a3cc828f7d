pub mod engine;
pub mod port;
pub mod route;
