pub mod page;
pub mod theme;
pub mod types;
pub mod upload;
pub mod view;
