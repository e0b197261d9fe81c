//! A reader for tab-delimited specification tables.
//!
//! The tables are exported from spreadsheets: the first row is a header, cells
//! are separated by `\t`, and a cell may be wrapped in double quotes when it
//! contains a tab, with `""` standing for a literal quote.
//!
//! Every row and cell remembers its byte span in the table text, so errors can
//! be rendered with [`crate::file_text::FileText::render_span`].

use std::borrow::Cow;
use std::fmt;

/// An error type for the table reader.
///
/// `span`: the non-inclusive byte range of the offending row or cell.
/// `code`: the error code that facilitates error reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub span: (usize, usize),
    pub code: ErrorCode,
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            ErrorCode::MissingColumn { column, found } => write!(
                fmt,
                "row has {found} columns, but column {} is required",
                column + 1
            ),
            ErrorCode::InvalidTypeCode(cell) => {
                write!(fmt, "invalid type code: {cell:?} is not an integer in 0..=255")
            }
        }
    }
}

impl std::error::Error for Error {}

/// The table error code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// The row is shorter than the column being read, `column` is 0-based.
    MissingColumn { column: usize, found: usize },
    InvalidTypeCode(String),
}

/// A single cell of a data row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell<'a> {
    text: Cow<'a, str>,
    span: (usize, usize),
}

impl<'a> Cell<'a> {
    /// The cell content, with the surrounding quotes removed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Build an error that points to this cell.
    pub fn error(&self, code: ErrorCode) -> Error {
        Error {
            span: self.span,
            code,
        }
    }
}

/// A data row of the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row<'a> {
    line: usize,
    span: (usize, usize),
    cells: Vec<Cell<'a>>,
}

impl<'a> Row<'a> {
    /// The 1-based line number of the row in the table file.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return the cell at the 0-based `column`.
    pub fn cell(&self, column: usize) -> Result<&Cell<'a>, Error> {
        self.cells.get(column).ok_or(Error {
            span: self.span,
            code: ErrorCode::MissingColumn {
                column,
                found: self.cells.len(),
            },
        })
    }

    /// Fail unless the row holds at least `columns` cells.
    pub fn require(&self, columns: usize) -> Result<(), Error> {
        if columns > 0 {
            self.cell(columns - 1)?;
        }
        Ok(())
    }

    /// Whether the first cell equals `marker` exactly.
    pub fn first_cell_is(&self, marker: &str) -> bool {
        self.cells
            .first()
            .map(|cell| cell.text() == marker)
            .unwrap_or(false)
    }
}

/// An iterator over the data rows of a table.
///
/// The header row is discarded unconditionally. An empty line inside the
/// table is a row without cells, so it fails the first column lookup. The
/// terminator of the last line does not start a new row.
#[derive(Debug)]
pub struct Rows<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> Rows<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut rows = Self {
            text,
            offset: 0,
            line: 0,
        };
        // drop the header
        rows.next_line();
        rows
    }

    // Return the next physical line without its terminator, with its starting
    // byte offset.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        if self.offset >= self.text.len() {
            return None;
        }

        let start = self.offset;
        let rest = &self.text[start..];
        let (line, consumed) = match rest.find('\n') {
            Some(pos) => (&rest[..pos], pos + 1),
            None => (rest, rest.len()),
        };
        self.offset += consumed;
        self.line += 1;

        Some((start, line.strip_suffix('\r').unwrap_or(line)))
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, line) = self.next_line()?;
        let cells = if line.is_empty() {
            Vec::new()
        } else {
            split_cells(line, start)
        };

        Some(Row {
            line: self.line,
            span: (start, start + line.len()),
            cells,
        })
    }
}

// Split a physical line into cells, `offset` is the byte offset of the line.
fn split_cells(line: &str, offset: usize) -> Vec<Cell<'_>> {
    let mut cells = Vec::new();
    let mut start = 0;

    loop {
        let rest = &line[start..];
        let end = if rest.starts_with('"') {
            let (value, end) = unquote(rest);
            cells.push(Cell {
                text: Cow::Owned(value),
                span: (offset + start, offset + start + end),
            });
            end
        } else {
            let end = rest.find('\t').unwrap_or(rest.len());
            cells.push(Cell {
                text: Cow::Borrowed(&rest[..end]),
                span: (offset + start, offset + start + end),
            });
            end
        };

        if end == rest.len() {
            break;
        }
        // skip the delimiter
        start += end + 1;
    }

    cells
}

// Decode a quoted cell at the head of `rest`, return the value and the byte
// length consumed up to the next delimiter.
//
// Characters between the closing quote and the delimiter are kept verbatim,
// and an unterminated quote runs to the end of the line.
fn unquote(rest: &str) -> (String, usize) {
    let mut value = String::new();
    let mut chars = rest.char_indices().skip(1).peekable();
    let mut closed_at = rest.len();

    while let Some((idx, c)) = chars.next() {
        if c != '"' {
            value.push(c);
        } else if matches!(chars.peek(), Some((_, '"'))) {
            value.push('"');
            chars.next();
        } else {
            closed_at = idx + 1;
            break;
        }
    }

    let end = rest[closed_at..]
        .find('\t')
        .map(|pos| closed_at + pos)
        .unwrap_or(rest.len());
    value.push_str(&rest[closed_at..end]);

    (value, end)
}
