//! Shared command handler patterns

pub mod delete;
pub mod list;

pub use delete::delete_many;
pub use list::print_list;
