//! Command-line tool for inspecting links and redirects.
//!
//! Resolves CMS link descriptors, walks through the navigation guard
//! interactively, and prints the short-link and route tables built from the
//! configured redirect source.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a descriptor from a file, inline JSON, or stdin
//! cargo run --bin linkctl -- resolve link.json
//! cargo run --bin linkctl -- resolve '{"externalLink":{"url":"https://x.com","newTab":true}}'
//! echo '{"internal":{"documentType":"post","slug":"hello"}}' | cargo run --bin linkctl -- resolve -
//!
//! # Simulate a click, answering the confirmation prompts in the terminal
//! cargo run --bin linkctl -- open link.json
//! cargo run --bin linkctl -- open link.json --href mailto:info@example.com
//!
//! # Show short links and the static route table
//! cargo run --bin linkctl -- redirects
//! cargo run --bin linkctl -- routes
//! ```
//!
//! # Environment Variables
//!
//! Uses the same variables as the server (`CONTENT_API_URL`, `REDIRECTS_FILE`,
//! `SHORT_LINK_ROUTE`, `SITE_BRAND_TOKEN`, ...). See [`site_links::config`].

use site_links::application::services::{
    ConfirmPrompt, Disclaimer, NavigationGuard, RouteTable, ShortLinkPattern, resolve,
};
use site_links::config::{self, Config};
use site_links::domain::entities::{ConfirmationPolicy, LinkDescriptor, ResolvedLink};
use site_links::infrastructure::content::source_from_config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::io::Read;
use std::path::Path;

/// CLI tool for site links.
#[derive(Parser)]
#[command(name = "linkctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a link descriptor to href, target and confirmation policy
    Resolve {
        /// Descriptor JSON: a file path, inline JSON, or `-` for stdin
        input: String,
    },

    /// Resolve a descriptor and simulate activating it
    Open {
        /// Descriptor JSON: a file path, inline JSON, or `-` for stdin
        input: String,

        /// Destination actually clicked (defaults to the resolved href)
        #[arg(long)]
        href: Option<String>,
    },

    /// List short links served by the redirect filter
    Redirects,

    /// List static route rewrites
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Resolve { input } => handle_resolve(&input)?,
        Commands::Open { input, href } => handle_open(&config, &input, href.as_deref())?,
        Commands::Redirects => handle_redirects(&config).await?,
        Commands::Routes => handle_routes(&config).await?,
    }

    Ok(())
}

/// Reads a descriptor from stdin (`-`), inline JSON, or a file.
fn read_descriptor(input: &str) -> Result<LinkDescriptor> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read descriptor from stdin")?;
        buf
    } else if input.trim_start().starts_with('{') {
        input.to_string()
    } else {
        std::fs::read_to_string(Path::new(input))
            .with_context(|| format!("Failed to read descriptor file {input}"))?
    };

    if raw.trim().is_empty() {
        return Ok(LinkDescriptor::default());
    }

    serde_json::from_str(&raw).context("Descriptor is not valid link JSON")
}

fn print_resolved(link: &ResolvedLink) {
    let policy = match link.confirmation_policy {
        ConfirmationPolicy::None => "none".bright_black(),
        ConfirmationPolicy::LeavingSiteWarning => "leaving site warning".yellow(),
        ConfirmationPolicy::EmailWarning => "email warning".yellow(),
    };

    println!("  Href:   {}", link.href.cyan());
    println!("  Target: {}", link.target.as_str());
    println!("  Policy: {}", policy);
    if let Some(rel) = link.rel() {
        println!("  Rel:    {}", rel.bright_black());
    }
}

fn handle_resolve(input: &str) -> Result<()> {
    let descriptor = read_descriptor(input)?;

    println!("{}", "Resolved link".bright_blue().bold());
    println!();
    print_resolved(&resolve(&descriptor));
    println!();

    Ok(())
}

/// Answers guard prompts on the terminal.
///
/// A prompt that cannot be shown (no TTY) counts as declined.
struct TerminalPrompt;

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&mut self, disclaimer: Disclaimer, message: &str) -> bool {
        let title = match disclaimer {
            Disclaimer::LeavingSite => "Leaving site",
            Disclaimer::Email => "Email",
            Disclaimer::ExternalSite => "Third-party site",
        };

        println!();
        println!("{}", title.yellow().bold());
        println!("  {}", message);

        Confirm::new()
            .with_prompt("Continue?")
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

fn handle_open(config: &Config, input: &str, href: Option<&str>) -> Result<()> {
    let descriptor = read_descriptor(input)?;
    let link = resolve(&descriptor);

    println!("{}", "Opening link".bright_blue().bold());
    println!();
    print_resolved(&link);

    let guard = NavigationGuard::new(&config.site_brand_token, &config.asset_host);
    let raw_href = href.unwrap_or(&link.href);

    println!();
    if guard.should_navigate(&link, raw_href, &mut TerminalPrompt) {
        println!("{} {}", "Navigating to".green().bold(), raw_href.cyan());
    } else {
        println!("{}", "Navigation cancelled".red());
    }
    println!();

    Ok(())
}

/// Lists the short links the redirect filter would answer.
///
/// # Output Format
///
/// ```text
/// Short links (/go.php?bid=<code>)
///
///   Code     Status  Destination
///   ──────────────────────────────────────────────────────
///   42       308     https://partner.example/offer
///   7        307     /news/summer-campaign
/// ```
async fn handle_redirects(config: &Config) -> Result<()> {
    let pattern = ShortLinkPattern::new(&config.short_link_route, &config.short_link_param)?;
    let source = source_from_config(config)?;

    let records = source
        .fetch_redirects()
        .await
        .with_context(|| format!("Failed to read redirects from {}", source.describe()))?;

    let entries = pattern.entries(&records);

    println!(
        "{}",
        format!(
            "Short links ({}?{}=<code>)",
            pattern.route(),
            pattern.param()
        )
        .bright_blue()
        .bold()
    );
    println!();

    if entries.is_empty() {
        println!("{}", "  No short links found".yellow());
        println!("  Source: {}", source.describe().bright_black());
        return Ok(());
    }

    println!(
        "  {:<8} {:<7} {}",
        "Code".bright_white().bold(),
        "Status".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for entry in &entries {
        let status = if entry.permanent {
            "308".green()
        } else {
            "307".yellow()
        };
        println!(
            "  {:<8} {:<7} {}",
            entry.code.cyan(),
            status,
            entry.destination
        );
    }

    println!();
    println!(
        "  Total: {}",
        entries.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn handle_routes(config: &Config) -> Result<()> {
    let pattern = ShortLinkPattern::new(&config.short_link_route, &config.short_link_param)?;
    let source = source_from_config(config)?;

    let records = source
        .fetch_redirects()
        .await
        .with_context(|| format!("Failed to read redirects from {}", source.describe()))?;

    let table = RouteTable::build(&records, &pattern);

    println!("{}", "Route rewrites".bright_blue().bold());
    println!();

    if table.is_empty() {
        println!("{}", "  No route rewrites found".yellow());
        return Ok(());
    }

    for rule in table.rules() {
        let kind = if rule.permanent {
            "permanent".green()
        } else {
            "temporary".yellow()
        };
        println!(
            "  {} {} {}  {}",
            rule.source.cyan(),
            "→".bright_black(),
            rule.destination,
            kind
        );
    }

    println!();
    println!("  Total: {}", table.len().to_string().bright_white().bold());
    println!();

    Ok(())
}
