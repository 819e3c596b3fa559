pub mod clock;
pub mod controller;
pub mod resolver;
pub mod session;
pub mod sink;
