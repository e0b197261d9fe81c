//! 3GPP/ITU reference points.
//!
//! The table has five positional columns:
//!
//! | column | content |
//! |--------|---------|
//! | 0 | interface name, e.g. `S1’` or `X2-C` |
//! | 1 | protocols, separated by `,` |
//! | 2 | network elements, separated by `,` |
//! | 3 | description |
//! | 4 | specification references separated by spaces, e.g. `TS 36.300` |

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{debug, info};

use crate::java;
use crate::table::{self, Row, Rows};

const NAME: usize = 0;
const PROTOCOL: usize = 1;
const ELEMENTS: usize = 2;
const DESCRIPTION: usize = 3;
const REFERENCES: usize = 4;
const COLUMNS: usize = 5;

/// Suffixes that mark a primed interface name, such as `S1’`.
const PRIME_MARKS: [char; 2] = ['’', '′'];

/// A normalized row of the reference point table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub name: String,
    pub protocol: Vec<String>,
    pub elements: Vec<String>,
    pub description: String,
    pub references: Vec<String>,
}

impl InterfaceRecord {
    /// Normalize a single table row.
    pub fn from_row(row: &Row<'_>) -> Result<Self, table::Error> {
        row.require(COLUMNS)?;

        Ok(Self {
            name: normalize_name(row.cell(NAME)?.text()),
            protocol: split_list(row.cell(PROTOCOL)?.text()),
            elements: split_list(row.cell(ELEMENTS)?.text()),
            description: row.cell(DESCRIPTION)?.text().to_string(),
            references: split_references(row.cell(REFERENCES)?.text()),
        })
    }
}

// Templates receive the java initializers directly.
impl Serialize for InterfaceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("InterfaceRecord", 5)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("protocol", &java::string_array(&self.protocol))?;
        s.serialize_field("elements", &java::string_array(&self.elements))?;
        s.serialize_field("description", &java::string_literal(&self.description))?;
        s.serialize_field("references", &java::string_array(&self.references))?;
        s.end()
    }
}

/// Turn an interface name into a java identifier.
///
/// A trailing prime becomes `Prime` and hyphens become underscores.
pub fn normalize_name(raw: &str) -> String {
    let name = match raw.strip_suffix(&PRIME_MARKS[..]) {
        Some(stem) => format!("{stem}Prime"),
        None => raw.to_string(),
    };
    name.replace('-', "_")
}

fn split_list(cell: &str) -> Vec<String> {
    cell.split(',').map(str::to_string).collect()
}

// References are written as "TS 36.300 TS 23.401": the "TS" tokens are dropped
// and stray "TS" prefixes are removed from the numbers.
fn split_references(cell: &str) -> Vec<String> {
    cell.split(' ')
        .filter(|token| *token != "TS")
        .map(|token| token.replace("TS", ""))
        .collect()
}

/// Load every data row of the reference point table.
pub fn load(text: &str) -> Result<Vec<InterfaceRecord>, table::Error> {
    let records = Rows::new(text)
        .map(|row| {
            let record = InterfaceRecord::from_row(&row)?;
            debug!(line = row.line(), name = %record.name, "reference point");
            Ok(record)
        })
        .collect::<Result<Vec<_>, table::Error>>()?;

    info!(count = records.len(), "loaded reference point table");
    Ok(records)
}
