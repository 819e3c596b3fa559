pub mod frame;
pub mod route;
