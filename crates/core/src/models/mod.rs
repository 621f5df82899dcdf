//! Data models for myFlix

mod movie;
pub mod parse;
mod user;

pub use movie::*;
pub use user::*;
