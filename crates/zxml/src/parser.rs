//! Markup scanner and tree builder

pub mod config;
pub mod cursor;
pub mod scanner;

pub use config::{Config, EndTagMode};
pub use cursor::Cursor;
pub use scanner::Parser;
