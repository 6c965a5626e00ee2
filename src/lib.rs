pub mod api;
pub mod cli;
pub mod db;
pub mod serde_utils;

pub fn hello() -> &'static str {
    "Hello World"
}
