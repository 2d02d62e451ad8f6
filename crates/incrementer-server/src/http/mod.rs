//! The HTTP transport related stuff.

mod error;
mod filters;
mod handlers;
pub mod rejection;


pub use filters::root;
