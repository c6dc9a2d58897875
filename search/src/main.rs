use anyhow::Result;
use clap::Parser;
use quarry_core::{RankOptions, DEFAULT_LIMIT};
use quarry_search::{is_exit, print_results, Searcher};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "quarry-search")]
#[command(about = "Interactive boolean/ranked search over a built index", long_about = None)]
struct Cli {
    /// Index directory produced by the indexer
    #[arg(long, default_value = "./index")]
    index: String,
    /// Maximum number of results per query
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    top: usize,
    /// Divide scores by document vector length
    #[arg(long, default_value_t = false)]
    cosine: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let searcher = Searcher::open(
        &cli.index,
        RankOptions {
            limit: cli.top,
            cosine: cli.cosine,
        },
    )?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("Enter a query (AND/OR connectives and \"quoted\" co-occurrence supported).");
    println!("Type 'exit' to leave.");
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if is_exit(query) {
            break;
        }
        if query.is_empty() {
            continue;
        }
        let hits = searcher.search(query);
        print_results(&mut stdout, &hits)?;
    }
    Ok(())
}
