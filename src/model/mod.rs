pub mod clipboard;
pub mod config;
pub mod job;
pub mod schedule;

pub use clipboard::*;
pub use config::*;
pub use job::*;
pub use schedule::*;
