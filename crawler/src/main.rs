use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Client;
use scraper::{Html, Selector};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

#[derive(Parser)]
#[command(name = "quarry-crawler")]
#[command(about = "Download a corpus from a remote link page", long_about = None)]
struct Cli {
    /// URL of the link page listing the corpus files
    #[arg(long)]
    url: String,
    /// Directory the downloaded corpus is written to
    #[arg(long, default_value = "./corpus")]
    output: String,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let page_url = Url::parse(&cli.url).context("invalid link page url")?;
    let client = Client::builder()
        .user_agent("quarry-crawler/0.1")
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()?;

    tracing::info!(url = %page_url, "fetching link page");
    let page = client
        .get(page_url.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let out_dir = Path::new(&cli.output);
    fs::create_dir_all(out_dir)?;

    let links = extract_links(&page, &page_url);
    tracing::info!(count = links.len(), "corpus files listed");

    let mut fetched = 0usize;
    for (href, file_url) in links {
        let Some(rel) = safe_relative_path(&href) else {
            tracing::warn!(href, "skipping link that escapes the output directory");
            continue;
        };
        match download(&client, &file_url, &out_dir.join(&rel)).await {
            Ok(()) => {
                fetched += 1;
                tracing::info!(file = %rel.display(), "downloaded");
            }
            Err(err) => {
                tracing::warn!(url = %file_url, %err, "skipping file");
            }
        }
    }
    tracing::info!(fetched, output = %out_dir.display(), "corpus download complete");
    Ok(())
}

/// hrefs from the link page, resolved against it. Only same-host http(s)
/// links qualify as corpus files.
fn extract_links(page: &str, page_url: &Url) -> Vec<(String, Url)> {
    let sel_a = Selector::parse("a[href]").expect("valid selector");
    let doc = Html::parse_document(page);
    let mut links = Vec::new();
    for a in doc.select(&sel_a) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = page_url.join(href) else {
            tracing::warn!(href, "skipping unresolvable link");
            continue;
        };
        if !resolved.scheme().starts_with("http") || resolved.host_str() != page_url.host_str() {
            tracing::warn!(href, "skipping off-corpus link");
            continue;
        }
        links.push((href.to_string(), resolved));
    }
    links
}

/// Interpret an href as a path under the output directory, rejecting
/// absolute paths and parent traversal.
fn safe_relative_path(href: &str) -> Option<PathBuf> {
    let trimmed = href.trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let path = Path::new(trimmed);
    if path
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        Some(path.to_path_buf())
    } else {
        None
    }
}

async fn download(client: &Client, url: &Url, target: &Path) -> Result<()> {
    let bytes = client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, &bytes)?;
    Ok(())
}
