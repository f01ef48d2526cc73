pub mod config;
pub mod error;
pub mod list;
pub mod menu;

pub use list::{ListError, OrderedList};
