use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use wikiquote_random::parser::to_plain_text;
use wikiquote_random::{batch, select_quote_sections, Settings, WikiquoteClient};

#[derive(Parser)]
#[command(name = "wikiquote", about = "Random quotations from Wikiquote")]
struct Cli {
    /// MediaWiki API endpoint (overrides WIKIQUOTE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one random quote for a person, work or topic
    Quote {
        #[arg(required = true)]
        query: Vec<String>,
        /// Strip inline markup
        #[arg(long)]
        plain: bool,
        /// Print as JSON
        #[arg(long, conflicts_with = "plain")]
        json: bool,
    },
    /// List the quotes of one section, or of every quote section
    Quotes {
        #[arg(required = true)]
        query: Vec<String>,
        /// Section index token (see `sections`)
        #[arg(short, long)]
        section: Option<String>,
        #[arg(long)]
        plain: bool,
    },
    /// Show a page's outline and which sections hold quotes
    Sections {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Suggest page titles for a search phrase
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Find the cross-wiki link for a page (e.g. its encyclopedia article)
    Link {
        #[arg(required = true)]
        query: Vec<String>,
        /// Only look at this section (default: whole page)
        #[arg(short, long)]
        section: Option<String>,
    },
    /// One random quote per line of FILE, printed as JSON lines
    Batch {
        file: PathBuf,
        /// Concurrent lookups (default: WIKIQUOTE_CONCURRENCY or 4)
        #[arg(short = 'c', long)]
        concurrency: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load()?;
    if let Some(url) = cli.api_url {
        settings.api_url = url;
    }
    let client = WikiquoteClient::from_settings(&settings)?;

    let result = match cli.command {
        Commands::Quote { query, plain, json } => {
            let query = query.join(" ");
            let mut rng = StdRng::from_entropy();
            let resolved = client
                .random_quote(&query, &mut rng)
                .await
                .with_context(|| format!("No quote for {:?}", query))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                println!("{}", render(&resolved.quote, plain));
                println!("  -- {}", resolved.canonical_title);
            }
            Ok(())
        }
        Commands::Quotes { query, section, plain } => {
            let page = client.resolve_title(&query.join(" ")).await?;
            let sections = match section {
                Some(s) => vec![s],
                None => client.resolve_sections(page.page_id).await?.section_indexes,
            };

            let mut total = 0;
            for index in &sections {
                let set = client.extract_quotes(page.page_id, index).await?;
                println!("== {} / section {} ({} quotes) ==", set.canonical_title, index, set.quotes.len());
                for (i, q) in set.quotes.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, render(q, plain));
                }
                total += set.quotes.len();
            }
            println!("\n{} quotes in {} sections", total, sections.len());
            Ok(())
        }
        Commands::Sections { query } => {
            let page = client.resolve_title(&query.join(" ")).await?;
            let (title, outline) = client.outline(page.page_id).await?;
            let candidates = select_quote_sections(&outline);

            println!("{} (page {})\n", title, page.page_id);
            println!("{:>8} | {:>6} | {:<40} | {}", "Number", "Index", "Heading", "Quotes");
            println!("{}", "-".repeat(70));
            for s in &outline {
                let mark = if candidates.contains(&s.index) { "*" } else { "" };
                println!(
                    "{:>8} | {:>6} | {:<40} | {}",
                    s.number,
                    s.index,
                    truncate(&to_plain_text(&s.heading), 40),
                    mark
                );
            }
            println!("\nQuote sections: {}", candidates.join(", "));
            Ok(())
        }
        Commands::Search { query } => {
            let query = query.join(" ");
            let titles = client.search_titles(&query).await?;
            if titles.is_empty() {
                println!("No suggestions for {:?}.", query);
                return Ok(());
            }
            for (i, t) in titles.iter().enumerate() {
                println!("{:>3}. {}", i + 1, t);
            }
            Ok(())
        }
        Commands::Link { query, section } => {
            let page = client.resolve_title(&query.join(" ")).await?;
            match client
                .find_wiki_link(page.page_id, section.as_deref(), &page.canonical_title)
                .await?
            {
                Some(url) => println!("{}", url),
                None => println!("No cross-wiki link for {}.", page.canonical_title),
            }
            Ok(())
        }
        Commands::Batch { file, concurrency } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let queries = batch::read_queries(&text);
            if queries.is_empty() {
                println!("No queries in {:?}.", file);
                return Ok(());
            }

            let concurrency = concurrency.unwrap_or(settings.concurrency);
            eprintln!("Resolving {} queries ({} at a time)...", queries.len(), concurrency);
            let stats = batch::resolve_many(Arc::new(client), queries, concurrency, |row| {
                println!("{}", serde_json::to_string(row)?);
                Ok(())
            })
            .await?;
            eprintln!(
                "Done: {} queries ({} ok, {} errors).",
                stats.total, stats.ok, stats.errors
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn render(quote: &str, plain: bool) -> String {
    if plain {
        to_plain_text(quote)
    } else {
        quote.to_string()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
