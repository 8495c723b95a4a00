//! Generic list output
//!
//! Every list command ends the same way: apply the optional row limit,
//! convert API models to display rows, print in the chosen format.

use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::Formattable;

/// Print `items` as display rows of type `D`.
///
/// # Type Parameters
///
/// * `T` - The API model type (e.g. `Post`, `Tag`)
/// * `D` - The display type that implements `From<T>`, `Tabled`, and `Serialize`
pub fn print_list<T, D>(
    items: Vec<T>,
    limit: Option<usize>,
    resource_name: &str,
    format: OutputFormat,
) -> Result<()>
where
    D: From<T> + Tabled + Serialize,
{
    debug!("Fetched {} {}", items.len(), resource_name);

    let rows: Vec<D> = match limit {
        Some(limit) => items.into_iter().take(limit).map(D::from).collect(),
        None => items.into_iter().map(D::from).collect(),
    };

    if rows.is_empty() && format == OutputFormat::Table {
        println!("No {} found.", resource_name);
        return Ok(());
    }

    rows.print(format)
}
