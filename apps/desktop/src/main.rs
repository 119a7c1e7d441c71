use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{fetch_employees, FetchState, HttpEmployeeApi};
use shared::domain::Employee;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com/users";

#[derive(Parser, Debug)]
#[command(name = "employee_desk_cli", about = "Headless employee directory queries")]
struct Args {
    #[arg(long, env = "STAFFDESK_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print employees whose name contains the query (case-insensitive).
    List {
        #[arg(long, default_value = "")]
        query: String,
        /// Emit JSON instead of a text table.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let api = HttpEmployeeApi::with_timeout(
        &args.api_base_url,
        Duration::from_secs(args.timeout_secs.max(1)),
    )?;

    match args.command {
        Command::List { query, json } => {
            info!(api = %args.api_base_url, %query, "listing employees");
            let roster = match fetch_employees(&api).await {
                FetchState::Ready(roster) => roster,
                FetchState::Failed(message) => {
                    error!(api = %args.api_base_url, "employee load failed: {message}");
                    bail!("could not load employees: {message}");
                }
                FetchState::Loading => bail!("employee load did not settle"),
            };
            let matches = roster.filtered(&query);
            debug!(total = roster.len(), matched = matches.len(), "filtered employees");
            if json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else {
                print_table(&matches);
            }
        }
    }

    Ok(())
}

fn print_table(employees: &[&Employee]) {
    if employees.is_empty() {
        println!("No employees match.");
        return;
    }
    println!("{:>4}  {:<24}  {:<28}  {:<22}  ADDRESS", "ID", "NAME", "EMAIL", "PHONE");
    for employee in employees {
        println!(
            "{:>4}  {:<24}  {:<28}  {:<22}  {}",
            employee.id.0,
            employee.name,
            employee.email,
            employee.phone,
            employee.address.display_line()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_defaults_to_empty_query_and_text_output() {
        let args = Args::try_parse_from(["employee_desk_cli", "list"]).expect("parse");
        match args.command {
            Command::List { query, json } => {
                assert!(query.is_empty());
                assert!(!json);
            }
        }
        assert_eq!(args.timeout_secs, 15);
    }

    #[test]
    fn list_accepts_query_and_json_flags() {
        let args = Args::try_parse_from([
            "employee_desk_cli",
            "--api-base-url",
            "http://127.0.0.1:9000/users",
            "list",
            "--query",
            "al",
            "--json",
        ])
        .expect("parse");
        assert_eq!(args.api_base_url, "http://127.0.0.1:9000/users");
        let Command::List { query, json } = args.command;
        assert_eq!(query, "al");
        assert!(json);
    }
}
