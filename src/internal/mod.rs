pub mod debounce;
pub mod filters;
pub mod models;
pub mod notification;
pub mod preferences;
pub mod render;
pub mod ui;
