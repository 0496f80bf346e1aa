//! Line-oriented operator commands.
//!
//! | Command                       | Screen              |
//! |-------------------------------|---------------------|
//! | `view <id>`                   | any                 |
//! | `hover` / `leave` / `click <project-id>` | dashboard |
//! | `zoom-in`, `zoom-out`, `reset`, `toggle-style` | dashboard |
//! | `legend <issued\|retired\|none>` | dashboard        |
//! | `search <text>`, `filter <value>` | projects, users |
//! | `open <id>`, `close`, `tab <id>` | dashboard, projects, users |
//! | `track <credit-id>`           | marketplace         |
//! | `range <start> <end>`, `start`, `end`, `ecosystem`, `region` | reporting |
//! | `resize <width> <height>`     | any                 |
//! | `snapshot`, `quit`            | any                 |

use bluecarbon_registry::series::CreditSeries;

use crate::errors::{ConsoleError, Result};
use crate::events::MapEventKind;
use crate::shell::View;
use crate::surface::ContainerSize;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Navigate(View),
    Pointer(MapEventKind, String),
    ZoomIn,
    ZoomOut,
    ResetView,
    ToggleStyle,
    Legend(Option<CreditSeries>),
    Search(String),
    Filter(String),
    Open(String),
    Close,
    Tab(String),
    Track(String),
    Range(String, String),
    Start(String),
    End(String),
    Ecosystem(String),
    Region(String),
    Resize(ContainerSize),
    Snapshot,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb {
            "view" => Command::Navigate(View::from_id(required(verb, rest)?)),
            "hover" => Command::Pointer(MapEventKind::MouseEnter, required(verb, rest)?.to_string()),
            "leave" => Command::Pointer(MapEventKind::MouseLeave, required(verb, rest)?.to_string()),
            "click" => Command::Pointer(MapEventKind::Click, required(verb, rest)?.to_string()),
            "zoom-in" => Command::ZoomIn,
            "zoom-out" => Command::ZoomOut,
            "reset" => Command::ResetView,
            "toggle-style" => Command::ToggleStyle,
            "legend" => Command::Legend(match required(verb, rest)? {
                "issued" => Some(CreditSeries::Issued),
                "retired" => Some(CreditSeries::Retired),
                "none" => None,
                other => {
                    return Err(ConsoleError::Command(format!("Unknown series: {other}")));
                }
            }),
            // An empty search clears the query.
            "search" => Command::Search(rest.to_string()),
            "filter" => Command::Filter(required(verb, rest)?.to_string()),
            "open" => Command::Open(required(verb, rest)?.to_string()),
            "close" => Command::Close,
            "tab" => Command::Tab(required(verb, rest)?.to_string()),
            "track" => Command::Track(required(verb, rest)?.to_string()),
            "range" => {
                let (start, end) = two_args(verb, rest)?;
                Command::Range(start.to_string(), end.to_string())
            }
            "start" => Command::Start(required(verb, rest)?.to_string()),
            "end" => Command::End(required(verb, rest)?.to_string()),
            "ecosystem" => Command::Ecosystem(required(verb, rest)?.to_string()),
            "region" => Command::Region(required(verb, rest)?.to_string()),
            "resize" => {
                let (width, height) = two_args(verb, rest)?;
                Command::Resize(ContainerSize {
                    width: parse_px(width)?,
                    height: parse_px(height)?,
                })
            }
            "snapshot" => Command::Snapshot,
            "quit" | "exit" => Command::Quit,
            other => return Err(ConsoleError::Command(format!("Unknown command: {other}"))),
        };
        Ok(Some(command))
    }
}

fn required<'a>(verb: &str, rest: &'a str) -> Result<&'a str> {
    if rest.is_empty() {
        return Err(ConsoleError::Command(format!("`{verb}` needs an argument")));
    }
    Ok(rest)
}

fn two_args<'a>(verb: &str, rest: &'a str) -> Result<(&'a str, &'a str)> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok((a, b)),
        _ => Err(ConsoleError::Command(format!("`{verb}` needs two arguments"))),
    }
}

fn parse_px(raw: &str) -> Result<u32> {
    raw.parse()
        .map_err(|_| ConsoleError::Command(format!("Invalid size: {raw}")))
}
