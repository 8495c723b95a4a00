//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "ID")]
        id: String,
    }

    #[test]
    fn test_vec_formats_as_table() {
        let rows = vec![Row {
            id: "r1".to_string(),
        }];
        let out = rows.format(OutputFormat::Table).unwrap();
        assert!(out.contains("ID"));
        assert!(out.contains("r1"));
    }

    #[test]
    fn test_vec_formats_as_json() {
        let rows = vec![Row {
            id: "r1".to_string(),
        }];
        let out = rows.format(OutputFormat::Json).unwrap();
        assert!(out.contains("\"id\": \"r1\""));
        assert!(out.contains("\"meta\""));
    }
}
