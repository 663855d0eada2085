//! News command implementations: headlines, search, and article reading.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use newsdeck_core::{
    Article, CATEGORIES, Config, Fetcher, NewsFeed, NewsResponse, QueryState, ResponseCache,
    Subscription, summarize,
};
use std::sync::Arc;

use crate::output::{OutputFormat, print_json, short_date};

/// Execute the news command: top headlines for a category.
pub async fn execute(category: Option<String>, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let category = category.unwrap_or_else(|| config.defaults.category.clone());
    if !CATEGORIES.contains(&category.as_str()) {
        tracing::warn!(%category, "category not in the provider's known set");
    }

    let response = fetch_articles(&config, QueryState::category(category)).await?;
    render(&response, format)
}

/// Execute the search command: full-text query across articles.
pub async fn search(query: String, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let response = fetch_articles(&config, QueryState::search(query)).await?;
    render(&response, format)
}

/// Execute the read command: one article in full plus a summary.
pub async fn read(
    index: usize,
    category: Option<String>,
    search: Option<String>,
    sentences: usize,
) -> Result<()> {
    let config = Config::load()?;
    let query = match search {
        Some(term) => QueryState::search(term),
        None => QueryState::category(
            category.unwrap_or_else(|| config.defaults.category.clone()),
        ),
    };

    let response = fetch_articles(&config, query).await?;
    if index == 0 || index > response.articles.len() {
        bail!(
            "article index {index} out of range (1-{})",
            response.articles.len()
        );
    }
    let article = &response.articles[index - 1];
    print_article(article, sentences);
    Ok(())
}

async fn fetch_articles(config: &Config, query: QueryState) -> Result<NewsResponse> {
    if config.keys.news.is_empty() {
        bail!(
            "no news API key configured; set NEWSDECK_NEWS_API_KEY or add it to {}",
            Config::config_path()?.display()
        );
    }

    let cache = ResponseCache::new();
    let fetcher = Arc::new(Fetcher::new()?);
    let mut feed = NewsFeed::new(Subscription::new(cache, fetcher), &config.keys.news);
    feed.select(query);
    feed.articles().await.context("fetching articles")
}

fn render(response: &NewsResponse, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(response),
        OutputFormat::Text => {
            if response.articles.is_empty() {
                println!("No articles found.");
                return Ok(());
            }
            for (idx, article) in response.articles.iter().enumerate() {
                print_headline(idx + 1, article);
            }
            println!(
                "{}",
                format!("{} matching articles", response.total_articles).bright_black()
            );
            Ok(())
        },
    }
}

fn print_headline(position: usize, article: &Article) {
    println!("{} {}", format!("{position:>2}.").bold(), article.title.bold());

    let mut meta = vec![article.source.name.clone()];
    if let Some(ts) = &article.published_at {
        meta.push(short_date(ts));
    }
    println!("    {}", meta.join(" - ").bright_black());

    if let Some(description) = &article.description {
        println!("    {description}");
    }
    println!();
}

fn print_article(article: &Article, sentences: usize) {
    println!("{}", article.title.bold());
    println!(
        "{}",
        format!(
            "{}{}",
            article.source.name,
            article
                .published_at
                .as_ref()
                .map(|ts| format!(" - {}", short_date(ts)))
                .unwrap_or_default()
        )
        .bright_black()
    );
    println!();

    let body = article
        .content
        .as_deref()
        .or(article.description.as_deref())
        .unwrap_or("(no content provided)");
    println!("{body}");
    println!();

    if sentences > 0 {
        let summary = summarize(body, sentences);
        if !summary.is_empty() && summary != body {
            println!("{}", "Summary".bold().underline());
            println!("{summary}");
            println!();
        }
    }

    println!("{} {}", "Read more:".bright_black(), article.url);
}
