use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use grid_core::{GridController, GridSnapshot, RestCapsuleService};
use shared::domain::{CapsuleStatus, SearchField};
use tracing::info;

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the capsule listing API. Beats grid.toml and the
    /// CAPSULE_API_URL environment variable.
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    info!(api_url = %settings.api_url, "console: starting");

    let service = RestCapsuleService::new(&settings.api_url)
        .with_context(|| format!("cannot use api url {}", settings.api_url))?;
    let controller = GridController::new(service);

    controller.load().await;
    render(&controller.snapshot().await);
    println!("type 'help' for commands");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if !dispatch(&controller, line.trim()).await {
            break;
        }
        render(&controller.snapshot().await);
    }

    Ok(())
}

/// Runs one REPL command. Returns false when the session should end.
async fn dispatch(controller: &GridController<RestCapsuleService>, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("quit") | Some("q") | Some("exit") => return false,
        Some("help") => print_help(),
        Some("reload") => controller.load().await,
        Some("next") => {
            if !controller.next_page().await {
                println!("already on the last page");
            }
        }
        Some("prev") => {
            if !controller.prev_page().await {
                println!("already on the first page");
            }
        }
        Some("first") => {
            controller.first_page().await;
        }
        Some("last") => {
            controller.last_page().await;
        }
        Some("page") => match parts.next().and_then(|v| v.parse::<u32>().ok()) {
            Some(index) => controller.set_page(index).await,
            None => println!("usage: page <index>"),
        },
        Some("size") => match parts.next().and_then(|v| v.parse().ok()) {
            Some(size) => controller.set_page_size(size).await,
            None => println!("usage: size 5|10|25|all"),
        },
        Some("field") => match parts.next() {
            Some("id") => controller.set_search_field(Some(SearchField::CapsuleId)).await,
            Some("serial") => {
                controller
                    .set_search_field(Some(SearchField::CapsuleSerial))
                    .await
            }
            Some("none") => controller.set_search_field(None).await,
            _ => println!("usage: field id|serial|none"),
        },
        Some("text") => {
            let text = parts.collect::<Vec<_>>().join(" ");
            controller.set_search_text(text).await;
        }
        Some("status") => match parts.next() {
            Some("none") => controller.set_status(None).await,
            Some(raw) => match raw.parse::<CapsuleStatus>() {
                Ok(status) => controller.set_status(Some(status)).await,
                Err(err) => println!("{err}"),
            },
            None => println!("usage: status active|unknown|retired|none"),
        },
        Some("submit") => {
            if !controller.submit_filters().await {
                println!("nothing to submit: all filters are empty");
            }
        }
        Some("clear") => controller.clear_filters().await,
        Some(other) => println!("unknown command: {other} (try 'help')"),
    }
    true
}

fn print_help() {
    println!("navigation:  next | prev | first | last | page <n> | size 5|10|25|all");
    println!("filtering:   field id|serial|none | text <search text> | status <s>|none");
    println!("             submit | clear");
    println!("other:       reload | help | quit");
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let cut: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn render(snapshot: &GridSnapshot) {
    if let Some(err) = &snapshot.last_error {
        println!("!! {err}");
    }

    println!(
        "{:<12} {:<8} {:<12} {:<8} {:<12} {:<34} {:<4}",
        "SERIAL", "STATUS", "LAUNCH DATE", "LANDINGS", "TYPE", "DETAILS", "USED"
    );
    for row in &snapshot.rows {
        println!(
            "{:<12} {:<8} {:<12} {:<8} {:<12} {:<34} {:<4}",
            row.serial,
            row.status,
            row.launch_date,
            row.landings,
            clip(&row.kind, 12),
            clip(&row.details, 34),
            row.reuse_count
        );
    }
    // Blank padding so a short last page keeps the table height.
    for _ in 0..snapshot.empty_row_count {
        println!();
    }

    let last = grid_core::last_page_index(snapshot.total_count, snapshot.page_size);
    let mut status_line = format!(
        "page {}/{} | size {} | {} capsules",
        snapshot.page_index, last, snapshot.page_size, snapshot.total_count
    );
    if !snapshot.filters.is_empty() {
        let filters = &snapshot.filters;
        if let Some(field) = filters.search_field {
            status_line.push_str(&format!(
                " | {}={}",
                field.as_query_key(),
                filters.search_text
            ));
        }
        if let Some(status) = filters.status {
            status_line.push_str(&format!(" | status={}", status.as_query_value()));
        }
    }
    println!("{status_line}");
}
