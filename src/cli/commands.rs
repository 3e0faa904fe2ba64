use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{LevelFilter, debug};

use crate::filters::{apply_filters, parse_filter};
use crate::models::{ArchiveModel, ParseError, ProcessedConversation};
use crate::parsers::{DEFAULT_CHUNK_SIZE, ParseOptions, parse_archive_file};
use crate::stats::ArchiveStats;
use crate::utils::{
    format_file_size, format_full_timestamp, format_path_with_tilde, resolve_archive_path,
    sanitize_for_terminal,
};

#[derive(Parser)]
#[command(name = "chat-archive-explorer")]
#[command(version)]
#[command(about = "Browse exported chat archives (conversations.json)", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Process conversations on a single thread
    #[arg(long, global = true)]
    pub sequential: bool,

    /// Conversations processed between cancellation checkpoints
    #[arg(long, global = true, value_name = "N", default_value_t = DEFAULT_CHUNK_SIZE,
          value_parser = parse_chunk_size)]
    pub chunk_size: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about the archive
    Stats {
        /// Archive file (defaults to $CHAT_ARCHIVE_FILE)
        archive: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// List projects in order of first appearance
    Projects {
        archive: Option<PathBuf>,
        /// Include member conversation titles
        #[arg(long)]
        titles: bool,
        #[arg(long)]
        json: bool,
    },
    /// List conversations, optionally filtered
    List {
        archive: Option<PathBuf>,
        /// Filter query, e.g. 'project:mars since:2024-01-01'
        #[arg(short, long, value_name = "QUERY")]
        filter: Option<String>,
        /// Maximum number of conversations to print
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Show the messages of one conversation
    Show {
        /// Conversation id
        id: String,
        archive: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// List conversations that could not be parsed
    Errors {
        archive: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
}

fn parse_chunk_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("chunk size must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut options = ParseOptions::default().with_chunk_size(cli.chunk_size);
    options.parallel = !cli.sequential;

    match &cli.command {
        Some(Commands::Stats { archive, json }) => show_stats(archive.as_deref(), &options, *json),
        Some(Commands::Projects { archive, titles, json }) => {
            show_projects(archive.as_deref(), &options, *titles, *json)
        }
        Some(Commands::List { archive, filter, limit, json }) => {
            list_conversations(archive.as_deref(), &options, filter.as_deref(), *limit, *json)
        }
        Some(Commands::Show { id, archive, json }) => {
            show_conversation(archive.as_deref(), &options, id, *json)
        }
        Some(Commands::Errors { archive, json }) => show_errors(archive.as_deref(), &options, *json),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

/// Resolve, read and parse the archive; fatal parse failures become an error
fn load_archive(
    path: Option<&Path>,
    options: &ParseOptions,
) -> Result<(PathBuf, ArchiveModel, Vec<ParseError>)> {
    let path = resolve_archive_path(path)?;
    debug!("Loading archive from {}", path.display());

    let outcome = parse_archive_file(&path, options)?;
    match outcome.archive {
        Some(archive) => Ok((path, archive, outcome.errors)),
        None => {
            let messages: Vec<String> = outcome.errors.iter().map(ToString::to_string).collect();
            bail!("Failed to parse {}: {}", format_path_with_tilde(&path), messages.join("; "))
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

fn show_stats(path: Option<&Path>, options: &ParseOptions, json: bool) -> Result<()> {
    let (path, archive, errors) = load_archive(path, options)?;
    let stats = ArchiveStats::from_archive(&archive);

    if json {
        return print_json(&stats);
    }

    println!("Chat Archive Statistics");
    println!("=======================");
    println!(
        "Archive: {} ({})",
        format_path_with_tilde(&path),
        format_file_size(archive.source.size_bytes as u64)
    );
    println!("Conversations: {}", stats.total_conversations);
    println!("  Archived: {}", stats.archived_conversations);
    println!("  Starred: {}", stats.starred_conversations);
    println!("  Standalone: {}", stats.standalone_conversations);
    println!("Projects: {}", stats.total_projects);
    println!("Messages: {}", stats.total_messages);
    for (role, count) in &stats.messages_by_role {
        println!("  {}: {}", role, count);
    }

    if !stats.model_usage.is_empty() {
        println!();
        println!("Models:");
        for (model, count) in stats.models_by_usage() {
            println!("  {}: {}", sanitize_for_terminal(model), count);
        }
    }

    if !stats.conversations_by_month.is_empty() {
        println!();
        println!("Conversations by month:");
        for (month, count) in &stats.conversations_by_month {
            println!("  {}: {}", month, count);
        }
    }

    println!();
    if stats.earliest_create_time.is_some() {
        println!("Oldest conversation: {}", format_full_timestamp(stats.earliest_create_time));
        println!("Newest conversation: {}", format_full_timestamp(stats.latest_create_time));
    }
    println!("Parse errors: {}", errors.len());

    Ok(())
}

fn show_projects(path: Option<&Path>, options: &ParseOptions, titles: bool, json: bool) -> Result<()> {
    let (_, archive, _) = load_archive(path, options)?;
    let projects = archive.projects_in_order();

    if json {
        return print_json(&projects);
    }

    if projects.is_empty() {
        println!("No projects found");
        return Ok(());
    }

    for project in projects {
        println!(
            "{}  ({}, {} conversations)",
            sanitize_for_terminal(&project.name),
            sanitize_for_terminal(&project.id),
            project.conversation_count
        );
        if titles {
            for title in &project.titles {
                println!("  - {}", sanitize_for_terminal(title));
            }
        }
    }

    Ok(())
}

fn list_conversations(
    path: Option<&Path>,
    options: &ParseOptions,
    filter: Option<&str>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let filter = parse_filter(filter.unwrap_or_default()).context("Invalid filter")?;
    let (_, archive, _) = load_archive(path, options)?;

    let mut conversations = apply_filters(&archive, &filter);
    if let Some(limit) = limit {
        conversations.truncate(limit);
    }

    if json {
        return print_json(&conversations);
    }

    for conversation in &conversations {
        let project = archive
            .project_of(conversation)
            .map(|p| format!("  [{}]", sanitize_for_terminal(&p.name)))
            .unwrap_or_default();
        println!(
            "{:>5}  {}  {}  {}{}",
            conversation.original_index,
            conversation.formatted_date,
            sanitize_for_terminal(&conversation.id),
            sanitize_for_terminal(conversation.display_title()),
            project
        );
    }
    debug!("Listed {} of {} conversations", conversations.len(), archive.total_conversations);

    Ok(())
}

fn show_conversation(path: Option<&Path>, options: &ParseOptions, id: &str, json: bool) -> Result<()> {
    let (_, archive, _) = load_archive(path, options)?;
    let Some(conversation) = archive.conversation(id) else {
        bail!("Conversation not found: {}", id);
    };

    if json {
        return print_json(conversation);
    }

    print_conversation(&archive, conversation);
    Ok(())
}

fn print_conversation(archive: &ArchiveModel, conversation: &ProcessedConversation) {
    println!("{}", sanitize_for_terminal(conversation.display_title()));
    println!("Id: {}", sanitize_for_terminal(&conversation.id));
    println!("Created: {}", format_full_timestamp(conversation.create_time));
    if let Some(model) = conversation.default_model_slug.as_deref() {
        println!("Model: {}", sanitize_for_terminal(model));
    }
    if let Some(project) = archive.project_of(conversation) {
        println!("Project: {}", sanitize_for_terminal(&project.name));
    }

    for message in &conversation.messages {
        println!();
        println!("[{}] {}", message.role, format_full_timestamp(message.create_time));
        println!("{}", sanitize_for_terminal(&message.content));
    }
}

fn show_errors(path: Option<&Path>, options: &ParseOptions, json: bool) -> Result<()> {
    let (_, _, errors) = load_archive(path, options)?;

    if json {
        return print_json(&errors);
    }

    if errors.is_empty() {
        println!("No parse errors");
        return Ok(());
    }

    for error in &errors {
        println!(
            "{}  {}  {}",
            error.kind,
            sanitize_for_terminal(error.conversation_id.as_deref().unwrap_or("-")),
            sanitize_for_terminal(&error.message)
        );
    }

    Ok(())
}
