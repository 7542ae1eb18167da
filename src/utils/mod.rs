pub mod datetime;
pub mod theme_loader;
