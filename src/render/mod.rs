pub mod escape;
pub mod result;
