//! Pipe-delimited item records.
//!
//! Item files hold one record per line, `id|field|field|...`, optionally
//! preceded by a metadata line such as `|V.16|93|` announcing the column
//! count. Long text fields may wrap onto following lines; any non-blank line
//! that does not start with `<digits>|` continues the previous record.

use std::sync::LazyLock;

use regex::Regex;

use super::table::{ItemTable, TIP_COLUMN};

static METADATA_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[|\s]*V\.\d+\|\d+").expect("Invalid metadata regex"));

static METADATA_COLUMNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[|\s]*V\.\d+\|(\d+)\|").expect("Invalid metadata regex"));

static RECORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\|").expect("Invalid record regex"));

/// Minimum number of lines, and of record lines, for a file to be an item file.
const MIN_RECORD_LINES: usize = 5;

/// Pipes required on a record line when no headers are known.
const MIN_PIPES_WITHOUT_HEADERS: usize = 3;

/// Largest column count accepted from a metadata line.
pub const MAX_COLUMNS: usize = 1024;

/// Returns whether the line is a `V.<version>|<columns>` metadata line.
pub fn is_metadata_line(line: &str) -> bool {
    METADATA_LINE.is_match(line.trim())
}

/// Returns whether the line starts a new record (`<digits>|`).
pub fn is_record_start(line: &str) -> bool {
    RECORD_START.is_match(line.trim())
}

/// Column count announced by a metadata line within the first five lines.
///
/// Counts of zero or above [`MAX_COLUMNS`] are treated as no metadata.
///
/// ```
/// use assetdesk_content::items::metadata_columns;
///
/// assert_eq!(metadata_columns("|V.16|93|\n1|a|b\n"), Some(93));
/// assert_eq!(metadata_columns("1|a|b\n"), None);
/// ```
pub fn metadata_columns(text: &str) -> Option<usize> {
    text.lines()
        .take(5)
        .find_map(|line| METADATA_COLUMNS.captures(line.trim()))
        .and_then(|caps| caps.get(1)?.as_str().parse().ok())
        .filter(|&columns| (1..=MAX_COLUMNS).contains(&columns))
}

/// Non-blank, trimmed lines with metadata lines removed.
fn content_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_metadata_line(line))
        .collect()
}

/// Heuristic check that `text` is an item file.
///
/// Requires at least five non-blank lines, at least five record lines among
/// the first twenty, and a record line among the first ten with enough
/// pipes for the headers (three when no headers are given).
pub fn looks_like_items(text: &str, headers: Option<&[String]>) -> bool {
    let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
    if non_blank < MIN_RECORD_LINES {
        return false;
    }

    let lines = content_lines(text);
    let record_lines = lines
        .iter()
        .take(20)
        .filter(|l| is_record_start(l))
        .count();
    if record_lines < MIN_RECORD_LINES {
        return false;
    }

    let min_pipes = match headers {
        Some(h) if !h.is_empty() => h.len() - 1,
        _ => MIN_PIPES_WITHOUT_HEADERS,
    };
    lines
        .iter()
        .take(10)
        .any(|l| is_record_start(l) && l.matches('|').count() >= min_pipes)
}

/// Parse item records into a table with the given headers.
///
/// Continuation lines are joined onto a record line with `\n` only while
/// it has fewer than `headers.len() - 1` pipes; the joined text is split on
/// `|`, text past the last header is dropped and missing cells are empty.
/// Continuation lines left over go to the `Tip` column (or are dropped when
/// there is none). `Tip` keeps its line breaks and only loses surrounding
/// pipes; every other cell is trimmed.
pub fn parse_items(text: &str, headers: &[String]) -> ItemTable {
    let mut groups: Vec<Vec<&str>> = Vec::new();
    for line in content_lines(text) {
        match groups.last_mut() {
            Some(group) if !is_record_start(line) => group.push(line),
            _ => groups.push(vec![line]),
        }
    }

    let tip = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(TIP_COLUMN));
    let rows = groups
        .iter()
        .map(|group| parse_record(group, headers.len(), tip))
        .collect();

    log::debug!("parsed {} item records", groups.len());
    ItemTable::from_parts(headers.to_vec(), rows)
}

fn parse_record(lines: &[&str], columns: usize, tip: Option<usize>) -> Vec<String> {
    let expected_pipes = columns.saturating_sub(1);
    let mut record = lines.first().copied().unwrap_or("").to_string();
    let mut consumed = 1;
    while record.matches('|').count() < expected_pipes && consumed < lines.len() {
        record.push('\n');
        record.push_str(lines[consumed]);
        consumed += 1;
    }
    let rest = lines.get(consumed..).unwrap_or(&[]);
    if tip.is_none() && !rest.is_empty() {
        log::debug!("dropping {} continuation lines without a Tip column", rest.len());
    }

    let mut parts = record.splitn(columns + 1, '|');
    (0..columns)
        .map(|index| {
            let raw = parts.next().unwrap_or("");
            if Some(index) == tip {
                let mut value = raw.to_string();
                for line in rest {
                    value.push('\n');
                    value.push_str(line);
                }
                value.trim_matches('|').to_string()
            } else {
                raw.trim().to_string()
            }
        })
        .collect()
}

/// `Unknown 0 .. Unknown n` headers for files without a header file.
///
/// The column count comes from the metadata line, or else from the data
/// line with the most pipes (when it has at least two).
pub fn generated_headers(text: &str) -> Option<Vec<String>> {
    let columns = metadata_columns(text).or_else(|| {
        let max_pipes = content_lines(text)
            .iter()
            .map(|l| l.matches('|').count())
            .max()?;
        (max_pipes >= 2).then_some(max_pipes + 1)
    })?;

    (columns >= 1).then(|| unknown_headers(0, columns))
}

/// `Unknown <start>` .. `Unknown <end - 1>`.
pub fn unknown_headers(start: usize, end: usize) -> Vec<String> {
    (start..end).map(|i| format!("Unknown {i}")).collect()
}
