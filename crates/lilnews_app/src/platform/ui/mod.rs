pub mod render;
pub mod theme;
pub mod thumbnail;
