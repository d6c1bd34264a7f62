pub mod check_client;
pub mod theme_store;
