//! GTPv2 information elements, 3GPP TS 29.274.
//!
//! The table has seventeen positional columns: a skip marker, the IE type, the
//! message name, the specification, the section, the initial/triggered
//! markers and one marker column per interface that carries the IE.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{debug, info};

use crate::java;
use crate::table::{self, ErrorCode, Row, Rows};

const SKIP: usize = 0;
const TYPE: usize = 1;
const MESSAGE: usize = 2;
const SPECIFICATION: usize = 3;
const SECTION: usize = 4;
const INITIAL: usize = 5;
const TRIGGERED: usize = 6;
const COLUMNS: usize = 17;

/// A row whose first cell equals this marker is left out of the output.
pub const SKIP_MARKER: &str = "x";

/// The GTPv2 interfaces a message can be carried on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    S3,
    S10,
    S16,
    N26,
    S11,
    S4,
    S5,
    S8,
    S2a,
    S2b,
}

impl Interface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interface::S3 => "S3",
            Interface::S10 => "S10",
            Interface::S16 => "S16",
            Interface::N26 => "N26",
            Interface::S11 => "S11",
            Interface::S4 => "S4",
            Interface::S5 => "S5",
            Interface::S8 => "S8",
            Interface::S2a => "S2a",
            Interface::S2b => "S2b",
        }
    }
}

/// Marker columns in table order. The generated interface lists follow this
/// order.
pub const INTERFACE_COLUMNS: [(usize, Interface); 10] = [
    (7, Interface::S3),
    (8, Interface::S10),
    (9, Interface::S16),
    (10, Interface::N26),
    (11, Interface::S11),
    (12, Interface::S4),
    (13, Interface::S5),
    (14, Interface::S8),
    (15, Interface::S2a),
    (16, Interface::S2b),
];

/// A normalized row of the GTPv2 information element table.
///
/// `specification` and `section` hold the raw cell text, an empty section
/// is kept empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationElementRecord {
    pub type_: u8,
    pub message: String,
    pub specification: String,
    pub section: String,
    pub initial: bool,
    pub triggered: bool,
    pub interfaces: Vec<Interface>,
}

impl InformationElementRecord {
    /// Normalize a single table row, `Ok(None)` is returned for rows carrying
    /// the skip marker.
    pub fn from_row(row: &Row<'_>) -> Result<Option<Self>, table::Error> {
        if row.first_cell_is(SKIP_MARKER) {
            return Ok(None);
        }
        row.require(COLUMNS)?;

        let type_cell = row.cell(TYPE)?;
        let type_ = type_cell
            .text()
            .trim()
            .parse::<u8>()
            .map_err(|_| type_cell.error(ErrorCode::InvalidTypeCode(type_cell.text().to_string())))?;

        let section = row.cell(SECTION)?.text();
        let section = if section.trim().is_empty() { "" } else { section };

        let mut interfaces = Vec::new();
        for (column, interface) in INTERFACE_COLUMNS.iter() {
            if is_marked(row.cell(*column)?.text()) {
                interfaces.push(*interface);
            }
        }

        Ok(Some(Self {
            type_,
            message: row.cell(MESSAGE)?.text().replace(' ', "_"),
            specification: row.cell(SPECIFICATION)?.text().to_string(),
            section: section.to_string(),
            initial: is_marked(row.cell(INITIAL)?.text()),
            triggered: is_marked(row.cell(TRIGGERED)?.text()),
            interfaces,
        }))
    }

    /// The interface names joined by `,`, e.g. `S11,S4`.
    pub fn interface_list(&self) -> String {
        self.interfaces
            .iter()
            .map(Interface::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

// Templates receive java literals for the string fields.
impl Serialize for InformationElementRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("InformationElementRecord", 7)?;
        s.serialize_field("type", &self.type_)?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("specification", &java::string_literal(&self.specification))?;
        s.serialize_field("section", &java::string_literal(&self.section))?;
        s.serialize_field("initial", &self.initial)?;
        s.serialize_field("triggered", &self.triggered)?;
        s.serialize_field("interfaces", &self.interface_list())?;
        s.end()
    }
}

// A marker cell holds a single `x` or `X`.
fn is_marked(cell: &str) -> bool {
    cell == "x" || cell == "X"
}

/// Load every data row of the information element table, skipped rows are
/// dropped.
pub fn load(text: &str) -> Result<Vec<InformationElementRecord>, table::Error> {
    let mut records = Vec::new();
    for row in Rows::new(text) {
        match InformationElementRecord::from_row(&row)? {
            Some(record) => {
                debug!(line = row.line(), message = %record.message, "information element");
                records.push(record);
            }
            None => debug!(line = row.line(), "skipping marked row"),
        }
    }

    info!(count = records.len(), "loaded information element table");
    Ok(records)
}

#[cfg(test)]
mod test {
    use super::*;

    const HEADER: &str = "Skip\tType\tMessage\tSpecification\tSection\tInitial\tTriggered\tS3\tS10\tS16\tN26\tS11\tS4\tS5\tS8\tS2a\tS2b\n";

    fn row(cells: &[&str]) -> String {
        let mut line = cells.join("\t");
        line.push('\n');
        line
    }

    fn markers(marked: &[usize]) -> Vec<&'static str> {
        (0..10)
            .map(|idx| if marked.contains(&idx) { "x" } else { "" })
            .collect()
    }

    fn ie_row(skip: &str, type_: &str, message: &str, section: &str, marked: &[usize]) -> String {
        let mut cells = vec![skip, type_, message, "3GPP TS 29.274", section, "X", ""];
        cells.extend(markers(marked));
        row(&cells)
    }

    #[test]
    fn create_session_request() {
        let text = format!(
            "{HEADER}{}",
            ie_row("", "32", "Create Session Request", "7.2.1", &[4, 5, 6, 7, 8, 9])
        );
        let records = load(&text).unwrap();

        assert_eq!(
            records,
            vec![InformationElementRecord {
                type_: 32,
                message: "Create_Session_Request".to_string(),
                specification: "3GPP TS 29.274".to_string(),
                section: "7.2.1".to_string(),
                initial: true,
                triggered: false,
                interfaces: vec![
                    Interface::S11,
                    Interface::S4,
                    Interface::S5,
                    Interface::S8,
                    Interface::S2a,
                    Interface::S2b
                ],
            }]
        );
        assert_eq!(records[0].interface_list(), "S11,S4,S5,S8,S2a,S2b");
    }

    #[test]
    fn interfaces_follow_column_order() {
        let text = format!("{HEADER}{}", ie_row("", "1", "Echo Request", "", &[9, 0, 3]));
        let record = &load(&text).unwrap()[0];
        assert_eq!(
            record.interfaces,
            vec![Interface::S3, Interface::N26, Interface::S2b]
        );

        let all = format!("{HEADER}{}", ie_row("", "1", "Echo Request", "", &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]));
        assert_eq!(
            load(&all).unwrap()[0].interface_list(),
            "S3,S10,S16,N26,S11,S4,S5,S8,S2a,S2b"
        );
    }

    #[test]
    fn marked_rows_are_skipped() {
        let text = format!(
            "{HEADER}{}{}{}",
            ie_row("x", "33", "Create Session Response", "7.2.2", &[]),
            ie_row("", "1", "Echo Request", "7.1.1", &[]),
            // a skipped row is never validated
            row(&["x", "not a number"]),
        );
        let records = load(&text).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "Echo_Request");
    }

    #[test]
    fn upper_case_skip_marker_is_kept() {
        let text = format!("{HEADER}{}", ie_row("X", "2", "Echo Response", "", &[]));
        assert_eq!(load(&text).unwrap().len(), 1);
    }

    #[test]
    fn marker_cells() {
        assert!(is_marked("x"));
        assert!(is_marked("X"));
        assert!(!is_marked(""));
        assert!(!is_marked(" x"));
        assert!(!is_marked("yes"));
    }

    #[test]
    fn blank_section_is_an_empty_literal() {
        let text = format!(
            "{HEADER}{}{}",
            ie_row("", "1", "Echo Request", "", &[]),
            ie_row("", "2", "Echo Response", "  ", &[]),
        );
        for record in load(&text).unwrap() {
            assert_eq!(record.section, "");
            let value = serde_json::to_value(&record).unwrap();
            assert_eq!(value["section"], r#""""#);
        }
    }

    #[test]
    fn java_fields() {
        let text = format!("{HEADER}{}", ie_row("", " 86 ", "User Location Info", "8.21", &[4]));
        let value = serde_json::to_value(&load(&text).unwrap()[0]).unwrap();

        assert_eq!(value["type"], 86);
        assert_eq!(value["message"], "User_Location_Info");
        assert_eq!(value["specification"], r#""3GPP TS 29.274""#);
        assert_eq!(value["section"], r#""8.21""#);
        assert_eq!(value["initial"], true);
        assert_eq!(value["triggered"], false);
        assert_eq!(value["interfaces"], "S11");
    }

    #[test]
    fn invalid_type_code() {
        let text = format!(
            "{HEADER}{}{}",
            ie_row("", "1", "Echo Request", "", &[]),
            ie_row("", "abc", "Broken", "", &[]),
        );
        let err = load(&text).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidTypeCode("abc".to_string()));
        assert_eq!(&text[err.span.0..err.span.1], "abc");

        // An IE type is a single octet on the wire, so a code the java `int`
        // field could hold but the protocol can not is rejected here.
        let out_of_range = format!("{HEADER}{}", ie_row("", "256", "Broken", "", &[]));
        let err = load(&out_of_range).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTypeCode("256".to_string()));
    }

    #[test]
    fn short_row() {
        let text = format!("{HEADER}{}", row(&["", "1", "Echo Request"]));
        let err = load(&text).unwrap_err();

        assert_eq!(
            err.code,
            ErrorCode::MissingColumn {
                column: 16,
                found: 3
            }
        );
    }

    #[test]
    fn blank_row() {
        let text = format!("{HEADER}\n{}", ie_row("", "1", "Echo Request", "", &[]));
        let err = load(&text).unwrap_err();

        assert_eq!(
            err.code,
            ErrorCode::MissingColumn {
                column: 16,
                found: 0
            }
        );
        assert_eq!(err.span, (HEADER.len(), HEADER.len()));
    }
}
