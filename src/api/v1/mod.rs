//! Todo resource handlers.

mod todos;


pub use todos::*;
