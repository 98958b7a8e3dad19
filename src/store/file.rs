//! Entry persistence: a two-column CSV file, written atomically.
//!
//! A store file has one row per entry: `name,secretToken`.  Fields
//! containing commas, quotes, or newlines are quoted with embedded
//! quotes doubled.  Rows with fewer than two fields (legacy or
//! hand-edited files) are padded with empty fields on load.
//!
//! `save` never leaves a half-written file behind: the content is
//! written to a temp file in the same directory and renamed over the
//! target, so a concurrent `load` sees either the old or the new file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{PasskeepError, Result};

use super::entry::Entry;

/// Data access for the persisted entry list.  Pure I/O, no crypto.
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all entries in file order.
    ///
    /// A missing file is the empty store, never an error.  A present
    /// but unreadable or malformed file is an error.
    pub fn load(&self) -> Result<Vec<Entry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&self.path)?;
        let rows = parse_csv(&text)?;

        Ok(rows
            .into_iter()
            .map(|mut fields| {
                // Pad short rows to the two logical columns.
                while fields.len() < 2 {
                    fields.push(String::new());
                }
                let mut it = fields.into_iter();
                Entry {
                    name: it.next().unwrap_or_default(),
                    secret: it.next().unwrap_or_default(),
                }
            })
            .collect())
    }

    /// Write the full entry list, replacing the previous file content
    /// atomically.  Creates the data directory on first save.
    pub fn save(&self, entries: &[Entry]) -> Result<()> {
        let mut text = String::new();
        for e in entries {
            text.push_str(&csv_field(&e.name));
            text.push(',');
            text.push_str(&csv_field(&e.secret));
            text.push('\n');
        }

        let parent = self.path.parent().unwrap_or(Path::new("."));
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        // Atomic write: temp file in the same directory, then rename.
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, text.as_bytes())?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Delete the store file if it exists (lost-key recovery).
    pub fn wipe(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Quote a CSV field when its content requires it.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('"');
        for c in s.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
        out
    } else {
        s.to_string()
    }
}

/// Parse CSV text into rows of fields.
///
/// Supports quoted fields with doubled embedded quotes and both LF and
/// CRLF line endings.  Blank lines between rows are skipped.
fn parse_csv(text: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_started = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                if field.is_empty() && !field_started {
                    in_quotes = true;
                    field_started = true;
                } else {
                    return Err(PasskeepError::StoreFormat(
                        "unexpected quote inside unquoted field".into(),
                    ));
                }
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                field_started = false;
            }
            '\r' => {
                // Consumed as part of CRLF; a bare CR is treated as LF.
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_row(&mut rows, &mut row, &mut field, &mut field_started);
            }
            '\n' => end_row(&mut rows, &mut row, &mut field, &mut field_started),
            _ => {
                field.push(c);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err(PasskeepError::StoreFormat("unterminated quoted field".into()));
    }

    // Final row without a trailing newline.
    end_row(&mut rows, &mut row, &mut field, &mut field_started);

    Ok(rows)
}

fn end_row(
    rows: &mut Vec<Vec<String>>,
    row: &mut Vec<String>,
    field: &mut String,
    field_started: &mut bool,
) {
    if row.is_empty() && field.is_empty() && !*field_started {
        return; // blank line
    }
    row.push(std::mem::take(field));
    rows.push(std::mem::take(row));
    *field_started = false;
}
