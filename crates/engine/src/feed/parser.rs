//! Delimited-text feed parser.
//!
//! Parses a raw catalog feed into rows of field strings. The dialect is
//! the usual comma/double-quote one: quoted fields may contain the
//! delimiter, line breaks, and doubled quote characters; `\r\n`, `\n`,
//! and bare `\r` all terminate a row.
//!
//! The parser fails softly. No input is an error: an unterminated quote
//! absorbs the rest of the input into the open field instead of
//! aborting the load. A feed row that is wrong is a row problem, never
//! a catalog problem.

/// Field delimiter.
pub const DELIMITER: char = ',';

/// Quote character; doubled inside a quoted field to escape itself.
pub const QUOTE: char = '"';

/// A parsed feed split into header and data rows.
///
/// Row 0 of the input is the header; data rows are all subsequent rows
/// that are not entirely blank (every field trims to empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// The header row, as-is.
    pub header: Vec<String>,
    /// Data rows, blank rows dropped.
    pub rows: Vec<Vec<String>>,
}

/// Parse delimited text into an ordered sequence of rows.
///
/// Every row is emitted, including blank ones; header/blank-row policy
/// lives in [`parse_table`]. A final row is emitted when the input ends
/// without a trailing terminator, provided any content (including an
/// empty trailing field) was accumulated.
#[must_use]
pub fn parse(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    // Whether the current row has consumed any character. Needed so a
    // lone quoted empty field still produces a row at end of input.
    let mut pending = false;
    // Whether the current field opened with a quote; a quote is only
    // special at the very start of a field.
    let mut quoted = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            QUOTE if field.is_empty() && !quoted => {
                pending = true;
                quoted = true;
                loop {
                    match chars.next() {
                        // Unterminated quote: absorb the remainder.
                        None => break,
                        Some(QUOTE) => {
                            if chars.peek() == Some(&QUOTE) {
                                chars.next();
                                field.push(QUOTE);
                            } else {
                                break;
                            }
                        }
                        Some(inner) => field.push(inner),
                    }
                }
            }
            DELIMITER => {
                pending = true;
                row.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    // \r\n is a single terminator, not two.
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                pending = false;
                quoted = false;
            }
            other => {
                pending = true;
                field.push(other);
            }
        }
    }

    if pending || !row.is_empty() || !field.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Parse a feed and split it into header and non-blank data rows.
///
/// Returns `None` when the input contains no rows at all.
#[must_use]
pub fn parse_table(input: &str) -> Option<Table> {
    let mut rows = parse(input).into_iter();
    let header = rows.next()?;
    let rows = rows.filter(|row| !is_blank(row)).collect();
    Some(Table { header, rows })
}

/// Serialize rows back into delimited text, the inverse of [`parse`].
///
/// Fields containing the delimiter, the quote character, or a line
/// break are quoted, with embedded quotes doubled. Rows are joined with
/// `\n` and no trailing terminator is emitted.
#[must_use]
pub fn serialize(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|field| serialize_field(field))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn serialize_field(field: &str) -> String {
    let needs_quoting = field
        .chars()
        .any(|c| matches!(c, DELIMITER | QUOTE | '\r' | '\n'));
    if needs_quoting {
        let escaped = field.replace(QUOTE, "\"\"");
        format!("{QUOTE}{escaped}{QUOTE}")
    } else {
        field.to_string()
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}
