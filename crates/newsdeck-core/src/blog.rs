//! Local persistence for user-authored blog posts.
//!
//! Posts live in a single pretty-printed JSON file under the platform data
//! directory (`NEWSDECK_DATA_DIR` overrides it for tests). The whole post
//! list is read and rewritten on every operation; there is no partial
//! mutation on disk. A soft 5 MiB budget mirrors the original client-side
//! store and feeds the usage report.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Maximum post title length, matching the original authoring form.
pub const MAX_TITLE_LEN: usize = 60;

/// Soft storage budget for the post file (5 MiB).
const STORAGE_BUDGET_BYTES: u64 = 5 * 1024 * 1024;

/// One user-authored blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    /// Monotonically assigned identifier.
    pub id: u64,
    /// Post title (at most [`MAX_TITLE_LEN`] characters).
    pub title: String,
    /// Post body.
    pub content: String,
    /// Optional illustration path or URL.
    #[serde(default)]
    pub image: Option<String>,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// When the post was last edited.
    pub updated_at: DateTime<Utc>,
}

/// Approximate usage of the post store against its soft budget.
#[derive(Debug, Clone, Serialize)]
pub struct StorageUsage {
    /// Bytes currently used by the post file.
    pub used_bytes: u64,
    /// Bytes remaining under the soft budget (never negative).
    pub remaining_bytes: u64,
    /// Percentage of the budget in use.
    pub percent_used: f64,
}

/// JSON-file-backed store for [`BlogPost`]s.
pub struct BlogStore {
    path: PathBuf,
}

impl BlogStore {
    /// Create a store at the default platform data directory.
    ///
    /// `NEWSDECK_DATA_DIR` overrides the location when set (tests and
    /// sandboxed environments).
    pub fn new() -> Result<Self> {
        if let Ok(dir) = std::env::var("NEWSDECK_DATA_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Self::with_root(PathBuf::from(trimmed));
            }
        }

        let dirs = ProjectDirs::from("", "", "newsdeck")
            .ok_or_else(|| Error::Storage("failed to determine data directory".into()))?;
        Self::with_root(dirs.data_dir().to_path_buf())
    }

    /// Create a store rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| Error::Storage(format!("failed to create data directory: {e}")))?;
        Ok(Self {
            path: root.join("blogs.json"),
        })
    }

    /// Path of the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a new post and persist it.
    pub fn add(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        image: Option<String>,
    ) -> Result<BlogPost> {
        let title = title.into();
        Self::validate_title(&title)?;

        let mut posts = self.load()?;
        let id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let post = BlogPost {
            id,
            title,
            content: content.into(),
            image,
            created_at: now,
            updated_at: now,
        };
        posts.push(post.clone());
        self.save(&posts)?;
        info!(id, "created blog post");
        Ok(post)
    }

    /// All posts, oldest first.
    pub fn list(&self) -> Result<Vec<BlogPost>> {
        self.load()
    }

    /// Fetch one post by id.
    pub fn get(&self, id: u64) -> Result<BlogPost> {
        self.load()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("no blog post with id {id}")))
    }

    /// Edit a post's title and/or content, bumping `updated_at`.
    pub fn update(
        &self,
        id: u64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<BlogPost> {
        if let Some(title) = title {
            Self::validate_title(title)?;
        }

        let mut posts = self.load()?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("no blog post with id {id}")))?;

        if let Some(title) = title {
            post.title = title.to_string();
        }
        if let Some(content) = content {
            post.content = content.to_string();
        }
        post.updated_at = Utc::now();
        let updated = post.clone();

        self.save(&posts)?;
        debug!(id, "updated blog post");
        Ok(updated)
    }

    /// Delete a post by id.
    pub fn remove(&self, id: u64) -> Result<()> {
        let mut posts = self.load()?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(Error::NotFound(format!("no blog post with id {id}")));
        }
        self.save(&posts)?;
        info!(id, "removed blog post");
        Ok(())
    }

    /// Report how much of the soft storage budget the post file uses.
    pub fn usage(&self) -> Result<StorageUsage> {
        let used_bytes = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(Error::Storage(format!("failed to stat post file: {e}"))),
        };

        #[allow(clippy::cast_precision_loss)]
        let percent_used = (used_bytes as f64 / STORAGE_BUDGET_BYTES as f64) * 100.0;
        Ok(StorageUsage {
            used_bytes,
            remaining_bytes: STORAGE_BUDGET_BYTES.saturating_sub(used_bytes),
            percent_used,
        })
    }

    fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(Error::Storage("post title cannot be empty".into()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(Error::Storage(format!(
                "post title exceeds {MAX_TITLE_LEN} characters"
            )));
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<BlogPost>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(Error::Storage(format!("failed to read post file: {e}"))),
        }
    }

    fn save(&self, posts: &[BlogPost]) -> Result<()> {
        let content = serde_json::to_string_pretty(posts)?;
        fs::write(&self.path, content)
            .map_err(|e| Error::Storage(format!("failed to write post file: {e}")))
    }
}
