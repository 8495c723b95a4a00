//! Bulk delete handler
//!
//! Deletes run concurrently; each outcome is reported on its own line and
//! the command fails if any of them failed.

use std::future::Future;

use colored::Colorize;
use futures::future::join_all;

use crate::error::{Error, Result};

/// Delete every id in `ids` with `delete`, reporting per-id results.
pub async fn delete_many<F, Fut>(resource_name: &str, ids: &[String], delete: F) -> Result<()>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let results = join_all(ids.iter().map(|id| {
        let pending = delete(id.clone());
        async move { (id, pending.await) }
    }))
    .await;

    let mut failed = 0;
    for (id, result) in results {
        match result {
            Ok(()) => println!("{} Deleted {} {}", "✓".green(), resource_name, id),
            Err(e) => {
                failed += 1;
                eprintln!(
                    "{} Failed to delete {} {}: {}",
                    "✗".red(),
                    resource_name,
                    id,
                    e
                );
            }
        }
    }

    if failed > 0 {
        return Err(Error::Other(format!(
            "{} of {} {} deletions failed",
            failed,
            ids.len(),
            resource_name
        )));
    }
    Ok(())
}
