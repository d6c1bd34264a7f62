pub mod assets;
pub mod controller;
pub mod core;
pub mod error;
pub mod render;
pub mod utils;
