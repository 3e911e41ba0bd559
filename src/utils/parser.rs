//! Parser for tab-separated retweet cascade files
//!
//! Each line reads
//!
//! ```text
//! cascade_id<TAB>root_user<TAB>publish_time<TAB>retweet_count<TAB>retweet_paths
//! ```
//!
//! where `retweet_paths` is a space-separated list of `u1/u2/.../un:dt`
//! entries. The last user of a path retweeted from the one before it, or
//! from the root when the path has a single user.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};
use crate::cascade::{Cascade, Event, UserId, earliest_event_by_user};
use crate::{CascadeError, Result};

fn field<T: FromStr>(raw: &str, name: &str, line: usize) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| CascadeError::MalformedLine {
        line,
        reason: format!("invalid {} '{}': {}", name, raw, e),
    })
}

/// Parse one `path:dt` entry into an event
fn parse_entry(item: &str, root: UserId) -> std::result::Result<Event, String> {
    let (path, time) = match item.split(':').collect::<Vec<_>>()[..] {
        [path, time] => (path, time),
        _ => return Err(format!("malformed retweet entry '{}'", item)),
    };
    let time: f64 = time.parse()
        .map_err(|_| format!("malformed retweet entry '{}'", item))?;

    let users = path.split('/')
        .map(|u| u.parse::<UserId>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| format!("non-integer user id in '{}'", item))?;

    match users[..] {
        [child] => Ok(Event::new(child, root, time)),
        [.., parent, child] => Ok(Event::new(child, parent, time)),
        [] => Err(format!("empty retweet path in '{}'", item)),
    }
}

/// Parse one dataset line
///
/// Blank lines yield `Ok(None)`. A bad header field fails the whole line;
/// bad retweet entries are logged and dropped on their own. Events are
/// deduplicated per user and sorted by time.
pub fn parse_line(text: &str, line: usize) -> Result<Option<Cascade>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = text.split('\t').collect();
    if parts.len() < 5 {
        return Err(CascadeError::MalformedLine {
            line,
            reason: format!("expected at least 5 fields, got {}", parts.len()),
        });
    }

    let id = field(parts[0], "cascade id", line)?;
    let root: UserId = field(parts[1], "root user", line)?;
    let publish_time = field(parts[2], "publish time", line)?;
    let retweet_count: usize = field(parts[3], "retweet count", line)?;

    let mut events = Vec::new();
    for item in parts[4].split(' ').filter(|s| !s.is_empty()) {
        match parse_entry(item, root) {
            Ok(event) => events.push(event),
            Err(reason) => warn!(line, "{}", reason),
        }
    }

    let mut cascade = Cascade::new(id, root, publish_time);
    cascade.events = earliest_event_by_user(&events);
    cascade.sort_events();

    if cascade.n_events() < retweet_count {
        info!(
            line,
            declared = retweet_count,
            unique = cascade.n_events(),
            "fewer unique retweeters than declared; duplicates were removed"
        );
    }

    Ok(Some(cascade))
}

/// Parse every line of a reader, skipping malformed lines
///
/// Cascades left with no events are dropped.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<Cascade>> {
    let mut cascades = Vec::new();

    for (idx, text) in reader.lines().enumerate() {
        let text = text?;
        match parse_line(&text, idx + 1) {
            Ok(Some(cascade)) if cascade.n_events() > 0 => cascades.push(cascade),
            Ok(_) => {}
            Err(e) => warn!("{}", e),
        }
    }

    Ok(cascades)
}

/// Parse a dataset file into cascades
pub fn parse_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Cascade>> {
    let file = File::open(path.as_ref())?;
    let cascades = parse_reader(BufReader::new(file))?;
    info!(path = %path.as_ref().display(), cascades = cascades.len(), "parsed dataset");
    Ok(cascades)
}
