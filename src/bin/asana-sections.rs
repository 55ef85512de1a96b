//! Command-line access to the Asana sections endpoints.
//!
//! Every subcommand issues exactly one request and prints the JSON the
//! service returned.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::Level;

use asana_client::{
    AsanaClient, ClientConfig, CreateSectionParams, InsertSectionParams, Params, RequestOptions,
    UpdateSectionParams,
};

/// Manage the sections of Asana projects
#[derive(Parser, Debug)]
#[command(name = "asana-sections", version, about, long_about = None)]
struct Args {
    /// API root (defaults to ASANA_BASE_URL or the public API)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Access token (defaults to ASANA_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Comma-separated fields to include in the response
    #[arg(long, global = true, value_delimiter = ',')]
    fields: Vec<String>,

    /// Log level for debugging (written to stderr)
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a section in a project
    Create {
        project: String,
        #[arg(long)]
        name: String,
        /// Insert the new section before this section
        #[arg(long, conflicts_with = "after")]
        before: Option<String>,
        /// Insert the new section after this section
        #[arg(long)]
        after: Option<String>,
    },
    /// List the sections of a project
    List {
        project: String,
        /// Page size
        #[arg(long)]
        limit: Option<u32>,
        /// Offset token returned by a previous page
        #[arg(long)]
        offset: Option<String>,
    },
    /// Show a single section
    Get { section: String },
    /// Update a section; only the given fields change
    Update {
        section: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete an empty section
    Delete { section: String },
    /// Move a section within a board view
    Insert {
        project: String,
        /// The section to move
        #[arg(long)]
        section: String,
        #[arg(long, conflicts_with = "after")]
        before: Option<String>,
        #[arg(long)]
        after: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) {
    let Some(tracing_level) = level.to_tracing_level() else {
        return;
    };
    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_client(args: &Args) -> Result<AsanaClient> {
    let mut config = ClientConfig::from_env().context("Failed to read ASANA_* settings")?;
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url);
    }
    if let Some(token) = &args.token {
        config = config.with_access_token(token.clone());
    }
    if config.access_token.is_none() {
        tracing::warn!("no access token configured; requests will be unauthenticated");
    }
    AsanaClient::from_config(&config).context("Failed to create client")
}

/// The wrapper method a subcommand calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    CreateInProject,
    ListByProject,
    GetById,
    Update,
    Delete,
    InsertInProject,
}

/// One call to the sections API: which operation, on which id, with what.
#[derive(Debug)]
struct Request<'a> {
    operation: Operation,
    target: &'a str,
    params: Params,
}

fn request_for(command: &Command) -> Request<'_> {
    match command {
        Command::Create {
            project,
            name,
            before,
            after,
        } => Request {
            operation: Operation::CreateInProject,
            target: project,
            params: CreateSectionParams {
                name: name.clone(),
                insert_before: before.clone(),
                insert_after: after.clone(),
            }
            .to_params(),
        },
        Command::List {
            project,
            limit,
            offset,
        } => {
            let mut params = Params::new();
            if let Some(limit) = limit {
                params.insert("limit".into(), Value::from(*limit));
            }
            if let Some(offset) = offset {
                params.insert("offset".into(), Value::from(offset.as_str()));
            }
            Request {
                operation: Operation::ListByProject,
                target: project,
                params,
            }
        }
        Command::Get { section } => Request {
            operation: Operation::GetById,
            target: section,
            params: Params::new(),
        },
        Command::Update { section, name } => Request {
            operation: Operation::Update,
            target: section,
            params: UpdateSectionParams { name: name.clone() }.to_params(),
        },
        Command::Delete { section } => Request {
            operation: Operation::Delete,
            target: section,
            params: Params::new(),
        },
        Command::Insert {
            project,
            section,
            before,
            after,
        } => Request {
            operation: Operation::InsertInProject,
            target: project,
            params: InsertSectionParams {
                section: section.clone(),
                before_section: before.clone(),
                after_section: after.clone(),
            }
            .to_params(),
        },
    }
}

fn options_for(args: &Args) -> RequestOptions {
    RequestOptions::new().with_fields(args.fields.iter().cloned())
}

fn run(args: &Args) -> Result<Value> {
    let client = build_client(args)?;
    let sections = client.sections();
    let options = options_for(args);
    let Request {
        operation,
        target,
        params,
    } = request_for(&args.command);

    let value = match operation {
        Operation::CreateInProject => sections.create_in_project(target, &params, &options),
        Operation::ListByProject => sections.list_by_project(target, &params, &options),
        Operation::GetById => sections.get_by_id(target, &params, &options),
        Operation::Update => sections.update(target, &params, &options),
        Operation::Delete => sections.delete(target, &params, &options),
        Operation::InsertInProject => sections.insert_in_project(target, &params, &options),
    };

    Ok(value?)
}

fn main() {
    let args = Args::parse();
    setup_logging(args.log_level);

    match run(&args) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
