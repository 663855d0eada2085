//! CLI structure and argument parsing.
//!
//! The CLI follows a standard command-subcommand pattern:
//!
//! ```bash
//! # Headlines for a category
//! newsdeck news technology
//!
//! # Full-text search (overrides any category)
//! newsdeck search election results
//!
//! # Read article 2 of the current sports headlines, with a 3-sentence summary
//! newsdeck read 2 --category sports
//!
//! # Weather
//! newsdeck weather "São Paulo" --units imperial
//!
//! # Blog posts
//! newsdeck blog add "My title" "Post body"
//! newsdeck blog list
//! newsdeck blog stats
//! ```
//!
//! Most commands support `--format text` (default) and `--format json` for
//! scripting.

use clap::{Parser, Subcommand};
use newsdeck_core::Units;

use crate::output::OutputFormat;

/// Main CLI structure for the `newsdeck` command.
#[derive(Parser, Debug)]
#[command(name = "newsdeck")]
#[command(version)]
#[command(about = "newsdeck - cached news, weather, and blog dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show top headlines for a category
    News {
        /// Category to browse (defaults to the configured category)
        category: Option<String>,
    },

    /// Search news by free-text query
    Search {
        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Read one article in full, with an extractive summary
    Read {
        /// 1-based index into the current headline or search results
        index: usize,

        /// Category context for the article list
        #[arg(short = 'c', long, conflicts_with = "search")]
        category: Option<String>,

        /// Search context for the article list
        #[arg(short = 's', long)]
        search: Option<String>,

        /// Number of sentences in the summary
        #[arg(long, default_value_t = 3)]
        sentences: usize,
    },

    /// Show current weather for a location
    Weather {
        /// Location to observe (defaults to the configured location)
        location: Option<String>,

        /// Temperature units (metric or imperial)
        #[arg(long)]
        units: Option<Units>,
    },

    /// Manage personal blog posts
    Blog {
        #[command(subcommand)]
        command: BlogCommands,
    },
}

/// Blog post management subcommands.
#[derive(Subcommand, Debug)]
pub enum BlogCommands {
    /// Create a new post
    Add {
        /// Post title (at most 60 characters)
        title: String,
        /// Post body
        content: String,
        /// Optional illustration path or URL
        #[arg(long)]
        image: Option<String>,
    },

    /// List all posts
    List,

    /// Show one post in full
    Show {
        /// Post id
        id: u64,
    },

    /// Edit a post's title and/or content
    Edit {
        /// Post id
        id: u64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a post
    Rm {
        /// Post id
        id: u64,
    },

    /// Report storage usage of the post file
    Stats,
}
