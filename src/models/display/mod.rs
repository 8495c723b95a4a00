//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod category;
mod common;
mod post;
mod tag;
mod user;

pub use category::CategoryDisplay;
pub use post::{PostDetail, PostDisplay};
pub use tag::TagDisplay;
pub use user::UserDisplay;
