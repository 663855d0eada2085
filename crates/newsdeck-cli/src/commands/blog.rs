//! Blog post management commands.

use anyhow::{Context, Result};
use colored::Colorize;
use newsdeck_core::{BlogPost, BlogStore};

use crate::cli::BlogCommands;
use crate::output::{OutputFormat, print_json, short_date};

/// Execute a blog subcommand.
pub fn execute(command: BlogCommands, format: OutputFormat) -> Result<()> {
    let store = BlogStore::new().context("opening blog store")?;

    match command {
        BlogCommands::Add {
            title,
            content,
            image,
        } => {
            let post = store.add(title, content, image)?;
            match format {
                OutputFormat::Json => print_json(&post),
                OutputFormat::Text => {
                    println!("Created post {} - {}", post.id, post.title.bold());
                    Ok(())
                },
            }
        },

        BlogCommands::List => {
            let posts = store.list()?;
            match format {
                OutputFormat::Json => print_json(&posts),
                OutputFormat::Text => {
                    if posts.is_empty() {
                        println!("No posts yet. Use 'newsdeck blog add' to write one.");
                        return Ok(());
                    }
                    for post in &posts {
                        print_post_line(post);
                    }
                    Ok(())
                },
            }
        },

        BlogCommands::Show { id } => {
            let post = store.get(id)?;
            match format {
                OutputFormat::Json => print_json(&post),
                OutputFormat::Text => {
                    println!("{}", post.title.bold());
                    println!(
                        "{}",
                        format!("created {}", short_date(&post.created_at)).bright_black()
                    );
                    if let Some(image) = &post.image {
                        println!("{}", format!("image: {image}").bright_black());
                    }
                    println!();
                    println!("{}", post.content);
                    Ok(())
                },
            }
        },

        BlogCommands::Edit { id, title, content } => {
            let post = store.update(id, title.as_deref(), content.as_deref())?;
            match format {
                OutputFormat::Json => print_json(&post),
                OutputFormat::Text => {
                    println!("Updated post {} - {}", post.id, post.title.bold());
                    Ok(())
                },
            }
        },

        BlogCommands::Rm { id } => {
            store.remove(id)?;
            if matches!(format, OutputFormat::Text) {
                println!("Removed post {id}");
            }
            Ok(())
        },

        BlogCommands::Stats => {
            let usage = store.usage()?;
            match format {
                OutputFormat::Json => print_json(&usage),
                OutputFormat::Text => {
                    println!(
                        "{:.2} KB used, {:.2} KB remaining ({:.2}% of budget)",
                        to_kb(usage.used_bytes),
                        to_kb(usage.remaining_bytes),
                        usage.percent_used
                    );
                    Ok(())
                },
            }
        },
    }
}

fn print_post_line(post: &BlogPost) {
    println!(
        "{} {} {}",
        format!("{:>3}.", post.id).bold(),
        post.title.bold(),
        format!("({})", short_date(&post.created_at)).bright_black()
    );
}

#[allow(clippy::cast_precision_loss)]
fn to_kb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}
