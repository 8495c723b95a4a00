//! Post editing arguments

use std::path::PathBuf;

use clap::Args;

use crate::client::models::PostStatus;
use crate::error::Result;

/// Fields for creating a post
#[derive(Debug, Clone, Args)]
pub struct PostArgs {
    /// Post title
    #[arg(long)]
    pub title: String,

    /// Post body (markdown)
    #[arg(long, required_unless_present = "file", conflicts_with = "file")]
    pub content: Option<String>,

    /// Read the post body from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Category ID
    #[arg(long)]
    pub category: Option<String>,

    /// Tag ID (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Save as a draft instead of publishing
    #[arg(long)]
    pub draft: bool,
}

impl PostArgs {
    /// Body text from `--content` or `--file`
    pub fn body(&self) -> Result<String> {
        read_body(self.content.as_deref(), self.file.as_ref()).map(Option::unwrap_or_default)
    }

    pub fn status(&self) -> PostStatus {
        if self.draft {
            PostStatus::Draft
        } else {
            PostStatus::Published
        }
    }
}

/// Fields for updating a post; all optional
#[derive(Debug, Clone, Default, Args)]
pub struct PostUpdateArgs {
    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New body (markdown)
    #[arg(long, conflicts_with = "file")]
    pub content: Option<String>,

    /// Read the new body from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// New category ID
    #[arg(long, conflicts_with = "no_category")]
    pub category: Option<String>,

    /// Remove the post from its category
    #[arg(long)]
    pub no_category: bool,

    /// Replace tags with these IDs (repeatable)
    #[arg(long = "tag")]
    pub tags: Option<Vec<String>>,

    /// Move the post back to drafts
    #[arg(long, conflicts_with = "publish")]
    pub draft: bool,

    /// Publish the post
    #[arg(long)]
    pub publish: bool,
}

impl PostUpdateArgs {
    /// New body, when one was given
    pub fn body(&self) -> Result<Option<String>> {
        read_body(self.content.as_deref(), self.file.as_ref())
    }

    /// Requested status change, when one was given
    pub fn status(&self) -> Option<PostStatus> {
        if self.draft {
            Some(PostStatus::Draft)
        } else if self.publish {
            Some(PostStatus::Published)
        } else {
            None
        }
    }
}

fn read_body(content: Option<&str>, file: Option<&PathBuf>) -> Result<Option<String>> {
    if let Some(content) = content {
        return Ok(Some(content.to_string()));
    }
    match file {
        Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_body_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# Hello\n\nBody").unwrap();

        let args = PostUpdateArgs {
            file: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        assert_eq!(args.body().unwrap().as_deref(), Some("# Hello\n\nBody"));
    }

    #[test]
    fn test_update_status_flags() {
        assert_eq!(PostUpdateArgs::default().status(), None);

        let args = PostUpdateArgs {
            draft: true,
            ..Default::default()
        };
        assert_eq!(args.status(), Some(PostStatus::Draft));

        let args = PostUpdateArgs {
            publish: true,
            ..Default::default()
        };
        assert_eq!(args.status(), Some(PostStatus::Published));
    }
}
