//! Hosted Search CLI - Command-line interface for the Hosted Search service

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use futures::StreamExt;
use hosted_search_core::domain::TaskId;
use hosted_search_sdk::{
    ClientConfig, CopyScope, KeyParams, SearchClient, SearchParams, TaskReceipt,
};
use tabled::{Table, Tabled};
use tracing::debug;

#[derive(Parser)]
#[command(name = "hosted-search")]
#[command(about = "Hosted Search CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Application identifier
    #[arg(long, env = "SEARCH_APPLICATION_ID", global = true)]
    application_id: Option<String>,

    /// API key (admin key for write commands)
    #[arg(long, env = "SEARCH_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Override the read host (e.g. http://localhost:8080)
    #[arg(long, env = "SEARCH_READ_HOST", global = true)]
    read_host: Option<String>,

    /// Override the write host
    #[arg(long, env = "SEARCH_WRITE_HOST", global = true)]
    write_host: Option<String>,

    /// Task status checks before giving up
    #[arg(long, env = "SEARCH_WAIT_MAX_ATTEMPTS", default_value_t = 120, global = true)]
    wait_max_attempts: u32,

    /// Delay between task status checks, in milliseconds
    #[arg(long, env = "SEARCH_WAIT_DELAY_MS", default_value_t = 1000, global = true)]
    wait_delay_ms: u64,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List indices
    Indices,

    /// Read or change index settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Search an index
    Search {
        index: String,

        /// Full-text query
        #[arg(default_value = "")]
        query: String,

        /// Extra parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
    },

    /// Search the values of a facet
    Facets {
        index: String,
        facet: String,
        query: String,

        /// Extra parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
    },

    /// Print every record of an index as JSON lines
    Browse {
        index: String,

        /// Extra parameters as a JSON object
        #[arg(long)]
        params: Option<String>,

        /// Stop after this many records
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Wait for a task to be published
    Wait { index: String, task_id: TaskId },

    /// Copy an index, optionally restricted to settings, synonyms and rules
    Copy {
        index: String,
        destination: String,

        /// Comma-separated parts to copy (settings,synonyms,rules)
        #[arg(long, value_delimiter = ',')]
        scope: Vec<CopyScope>,

        /// Wait for the copy to be published
        #[arg(long)]
        wait: bool,
    },

    /// Rename an index
    Move {
        index: String,
        destination: String,

        /// Wait for the move to be published
        #[arg(long)]
        wait: bool,
    },

    /// Manage API keys
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the settings of an index
    Get { index: String },

    /// Apply a JSON object of settings; absent keys are left unchanged
    Set {
        index: String,
        settings: String,

        #[arg(long)]
        forward_to_replicas: bool,

        /// Wait for the change to be published
        #[arg(long)]
        wait: bool,
    },
}

#[derive(Subcommand)]
enum KeysAction {
    /// List API keys
    List,

    /// Show one API key
    Get { key: String },

    /// Create an API key
    Add {
        /// Comma-separated ACL (e.g. search,browse)
        #[arg(long, value_delimiter = ',', required = true)]
        acl: Vec<String>,

        #[arg(long)]
        description: Option<String>,

        /// Comma-separated indices the key is restricted to
        #[arg(long, value_delimiter = ',')]
        indexes: Vec<String>,

        /// Lifetime in seconds
        #[arg(long)]
        validity: Option<i64>,

        /// Wait until the key is usable
        #[arg(long)]
        wait: bool,
    },

    /// Delete an API key
    Delete { key: String },
}

#[derive(Tabled)]
struct IndexRow {
    name: String,
    entries: i64,
    updated_at: String,
}

#[derive(Tabled)]
struct KeyRow {
    key: String,
    acl: String,
    description: String,
    indexes: String,
    validity: i64,
}

#[derive(Tabled)]
struct FacetRow {
    value: String,
    count: usize,
}

impl Cli {
    fn client(&self) -> Result<SearchClient> {
        let application_id = self
            .application_id
            .clone()
            .context("Missing --application-id (or SEARCH_APPLICATION_ID)")?;
        let api_key = self
            .api_key
            .clone()
            .context("Missing --api-key (or SEARCH_API_KEY)")?;

        debug!(
            application_id = %application_id,
            read_host = ?self.read_host,
            write_host = ?self.write_host,
            "Building client"
        );
        let mut config = ClientConfig::new(application_id, api_key);
        config.read_host = self.read_host.clone();
        config.write_host = self.write_host.clone();
        config.wait_max_attempts = self.wait_max_attempts;
        config.wait_delay_ms = self.wait_delay_ms;

        SearchClient::new(config).context("Failed to create client")
    }
}

fn parse_params(params: Option<&str>) -> Result<SearchParams> {
    match params {
        None => Ok(SearchParams::new()),
        Some(raw) => serde_json::from_str(raw).context("Params must be a JSON object"),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_receipt(what: &str, receipt: &TaskReceipt) {
    println!(
        "{} {}",
        format!("✓ {what}").green().bold(),
        format!("(task {})", receipt.task_id).dimmed()
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;
    let client = cli.client()?;

    match cli.command {
        Commands::Indices => {
            let indices = client.list_indices().await?;
            if indices.is_empty() {
                println!("{}", "No indices".yellow());
                return Ok(());
            }
            let rows: Vec<IndexRow> = indices
                .into_iter()
                .map(|info| IndexRow {
                    name: info.name,
                    entries: info.entries,
                    updated_at: info.updated_at,
                })
                .collect();
            println!("{}", Table::new(rows));
        }

        Commands::Settings { action } => match action {
            SettingsAction::Get { index } => {
                let settings = client.init_index(index).get_settings().await?;
                print_json(&settings)?;
            }
            SettingsAction::Set {
                index,
                settings,
                forward_to_replicas,
                wait,
            } => {
                let settings: serde_json::Map<String, serde_json::Value> =
                    serde_json::from_str(&settings).context("Settings must be a JSON object")?;
                let index = client.init_index(index);
                let receipt = index
                    .set_settings_map(&settings, forward_to_replicas)
                    .await?;
                if wait {
                    index.wait_task(receipt.task_id).await?;
                }
                print_receipt("Settings updated", &receipt);
            }
        },

        Commands::Search {
            index,
            query,
            params,
        } => {
            let params = parse_params(params.as_deref())?;
            let res = client.init_index(index).search(&query, &params).await?;
            println!(
                "{}",
                format!("{} hits (page {}/{})", res.nb_hits, res.page + 1, res.nb_pages.max(1))
                    .cyan()
                    .bold()
            );
            print_json(&res.hits)?;
        }

        Commands::Facets {
            index,
            facet,
            query,
            params,
        } => {
            let params = parse_params(params.as_deref())?;
            let res = client
                .init_index(index)
                .search_for_facet_values(&facet, &query, &params)
                .await?;
            if res.facet_hits.is_empty() {
                println!("{}", "No facet values".yellow());
                return Ok(());
            }
            let rows: Vec<FacetRow> = res
                .facet_hits
                .into_iter()
                .map(|hit| FacetRow {
                    value: hit.value,
                    count: hit.count,
                })
                .collect();
            println!("{}", Table::new(rows));
        }

        Commands::Browse {
            index,
            params,
            limit,
        } => {
            let params = parse_params(params.as_deref())?;
            let records = client.init_index(index).browse_all(params).into_stream();
            let mut records = Box::pin(records.take(limit.unwrap_or(usize::MAX)));
            while let Some(record) = records.next().await {
                println!("{}", serde_json::to_string(&record?)?);
            }
        }

        Commands::Wait { index, task_id } => {
            client.init_index(index).wait_task(task_id).await?;
            println!("{}", format!("✓ Task {task_id} published").green().bold());
        }

        Commands::Copy {
            index,
            destination,
            scope,
            wait,
        } => {
            let index = client.init_index(index);
            let receipt = if scope.is_empty() {
                index.copy(&destination).await?
            } else {
                index.scoped_copy(&destination, &scope).await?
            };
            if wait {
                index.wait_task(receipt.task_id).await?;
            }
            print_receipt(&format!("Copied to {destination}"), &receipt);
        }

        Commands::Move {
            index,
            destination,
            wait,
        } => {
            let index = client.init_index(index);
            let receipt = index.move_to(&destination).await?;
            if wait {
                index.wait_task(receipt.task_id).await?;
            }
            print_receipt(&format!("Moved to {destination}"), &receipt);
        }

        Commands::Keys { action } => {
            let keys = client.keys();
            match action {
                KeysAction::List => {
                    let rows: Vec<KeyRow> = keys
                        .list_keys()
                        .await?
                        .into_iter()
                        .map(|key| KeyRow {
                            key: key.value,
                            acl: key.acl.join(","),
                            description: key.description,
                            indexes: key.indexes.join(","),
                            validity: key.validity,
                        })
                        .collect();
                    println!("{}", Table::new(rows));
                }
                KeysAction::Get { key } => {
                    print_json(&keys.get_key(&key).await?)?;
                }
                KeysAction::Add {
                    acl,
                    description,
                    indexes,
                    validity,
                    wait,
                } => {
                    let mut params = KeyParams::new(acl);
                    params.description = description;
                    params.validity = validity;
                    if !indexes.is_empty() {
                        params = params.with_indexes(indexes);
                    }
                    let res = keys.add_key(&params).await?;
                    if wait {
                        keys.wait_key(&res.key).await?;
                    }
                    println!("{} {}", "✓ Key created:".green().bold(), res.key);
                }
                KeysAction::Delete { key } => {
                    keys.delete_key(&key).await?;
                    println!("{}", format!("✓ Key {key} deleted").green().bold());
                }
            }
        }
    }

    Ok(())
}
