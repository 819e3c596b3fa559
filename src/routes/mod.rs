pub mod health;
pub mod playback;
pub mod route;
