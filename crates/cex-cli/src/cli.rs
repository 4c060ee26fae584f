//! CLI argument definitions for the content export tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "content-export",
    version,
    about = "Content export - flatten a CMS content tree into tab-delimited reports",
    long_about = "Flatten a content repository snapshot into a tab-delimited report.\n\n\
                  Selects items by path, query or template, optionally fans rows out\n\
                  across languages, and reconciles discovered field columns into a\n\
                  rectangular table downloadable as an .xls artifact."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run an export against a repository snapshot and write the artifact.
    Export(ExportArgs),

    /// Search field values for a text and report where it occurs.
    Search(SearchArgs),

    /// List the languages installed in a repository snapshot.
    Languages(LanguagesArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the repository snapshot JSON file.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Load a saved request preset (JSON); flags layer on top of it.
    #[arg(long = "request", value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Primary start path (default: the snapshot's default root).
    #[arg(long = "start-path", value_name = "PATH")]
    pub start_path: Option<String>,

    /// Additional start paths unioned into the selection (repeatable).
    #[arg(long = "add-path", value_name = "PATH")]
    pub add_path: Vec<String>,

    /// Fast-query string; replaces the primary path traversal.
    #[arg(long = "query", value_name = "QUERY")]
    pub query: Option<String>,

    /// Template filter tokens, comma separated (names or ids).
    #[arg(long = "templates", value_delimiter = ',', value_name = "TOKENS")]
    pub templates: Vec<String>,

    /// Also accept templates directly inheriting from a matched template.
    #[arg(long = "inherit")]
    pub inherit: bool,

    /// Fields to export, comma separated (names or ids).
    #[arg(long = "fields", value_delimiter = ',', value_name = "FIELDS")]
    pub fields: Vec<String>,

    /// Discover and export every field found while scanning.
    #[arg(long = "all-fields")]
    pub all_fields: bool,

    /// Include the Name column.
    #[arg(long = "name")]
    pub name: bool,

    /// Include the Item ID column.
    #[arg(long = "ids")]
    pub ids: bool,

    /// Include the Template column.
    #[arg(long = "template")]
    pub template: bool,

    /// Include "<field> ID" sub-columns for link fields.
    #[arg(long = "linked-ids")]
    pub linked_ids: bool,

    /// Include "<field> HTML" sub-columns with raw field markup.
    #[arg(long = "raw-html")]
    pub raw_html: bool,

    /// Include the Created column.
    #[arg(long = "created")]
    pub created: bool,

    /// Include the Created By column.
    #[arg(long = "created-by")]
    pub created_by: bool,

    /// Include the Modified column.
    #[arg(long = "modified")]
    pub modified: bool,

    /// Include the Modified By column.
    #[arg(long = "modified-by")]
    pub modified_by: bool,

    /// Include the Never Publish column.
    #[arg(long = "never-publish")]
    pub never_publish: bool,

    /// Include the Workflow column.
    #[arg(long = "workflow")]
    pub workflow: bool,

    /// Include the Workflow State column.
    #[arg(long = "workflow-state")]
    pub workflow_state: bool,

    /// Include the Referrers column.
    #[arg(long = "referrers")]
    pub referrers: bool,

    /// Only export items carrying a presentation layout.
    #[arg(long = "require-layout")]
    pub require_layout: bool,

    /// Export rows for one named language.
    #[arg(long = "language", value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Export rows for every language with saved versions.
    #[arg(long = "all-languages")]
    pub all_languages: bool,

    /// Keep items created on or after this date (YYYY-MM-DD).
    #[arg(long = "created-from", value_name = "DATE", value_parser = parse_date)]
    pub created_from: Option<NaiveDate>,

    /// Keep items created on or before this date (YYYY-MM-DD).
    #[arg(long = "created-to", value_name = "DATE", value_parser = parse_date)]
    pub created_to: Option<NaiveDate>,

    /// Keep items modified on or after this date (YYYY-MM-DD).
    #[arg(long = "modified-from", value_name = "DATE", value_parser = parse_date)]
    pub modified_from: Option<NaiveDate>,

    /// Keep items modified on or before this date (YYYY-MM-DD).
    #[arg(long = "modified-to", value_name = "DATE", value_parser = parse_date)]
    pub modified_to: Option<NaiveDate>,

    /// How the created and modified filters combine.
    #[arg(long = "date-mode", value_enum, value_name = "MODE")]
    pub date_mode: Option<DateModeArg>,

    /// Base name of the artifact (default: ContentExport).
    #[arg(long = "file-name", value_name = "NAME")]
    pub file_name: Option<String>,

    /// Output directory for the artifact (default: current directory).
    #[arg(long = "out", value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Path to the repository snapshot JSON file.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Text to search for (case-insensitive).
    #[arg(long = "text", value_name = "TEXT")]
    pub text: String,

    /// Subtree root (default: the snapshot's default root).
    #[arg(long = "start-path", value_name = "PATH")]
    pub start_path: Option<String>,

    /// Restrict the search to these field names, comma separated.
    #[arg(long = "fields", value_delimiter = ',', value_name = "FIELDS")]
    pub fields: Vec<String>,

    /// Output directory for the result artifact (default: current directory).
    #[arg(long = "out", value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LanguagesArgs {
    /// Path to the repository snapshot JSON file.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DateModeArg {
    Or,
    And,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{value}', expected YYYY-MM-DD"))
}
