//! Command parser for the : command system

use std::path::PathBuf;

use crate::domain::{Category, ReportId, Status};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Filter commands
    Category(Option<Category>),
    Status(Option<Status>),
    Search(String),
    Clear,

    // Report commands
    Open(ReportId),
    Urgent(ReportId),
    Start(ReportId),
    Resolve(ReportId),
    Set(ReportId, Status),

    Export(Option<PathBuf>),
    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let unknown = || Command::Unknown(input.to_string());

    match cmd.to_lowercase().as_str() {
        // Filters; "all" resets a single predicate
        "category" | "cat" => match args.as_deref() {
            None | Some("all") => Command::Category(None),
            Some(name) => Category::parse(name)
                .map(|c| Command::Category(Some(c)))
                .unwrap_or_else(unknown),
        },
        "status" | "st" => match args.as_deref() {
            None | Some("all") => Command::Status(None),
            Some(name) => Status::parse(name)
                .map(|s| Command::Status(Some(s)))
                .unwrap_or_else(unknown),
        },
        "search" | "find" => Command::Search(args.unwrap_or_default()),
        "clear" | "reset" => Command::Clear,

        // Reports
        "open" => parse_id(args.as_deref()).map(Command::Open).unwrap_or_else(unknown),
        "urgent" | "flag" => parse_id(args.as_deref())
            .map(Command::Urgent)
            .unwrap_or_else(unknown),
        "start" => parse_id(args.as_deref()).map(Command::Start).unwrap_or_else(unknown),
        "resolve" => parse_id(args.as_deref())
            .map(Command::Resolve)
            .unwrap_or_else(unknown),
        "set" => {
            let Some(args) = args else {
                return unknown();
            };
            let mut rest = args.splitn(2, ' ');
            let id = parse_id(rest.next());
            let status = rest.next().and_then(Status::parse);
            match (id, status) {
                (Some(id), Some(status)) => Command::Set(id, status),
                _ => unknown(),
            }
        }

        "export" | "csv" => Command::Export(args.map(PathBuf::from)),
        "help" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,

        _ => unknown(),
    }
}

fn parse_id(value: Option<&str>) -> Option<ReportId> {
    value?.trim().trim_start_matches('#').parse().ok()
}
