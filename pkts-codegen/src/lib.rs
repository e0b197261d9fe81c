//! Build-time generators for the `pkts-3gppitu` java sources.
//!
//! The 3GPP/ITU reference points and the GTPv2 information elements are kept
//! as tab-delimited tables. The generators normalize each row into a record
//! and render the records through a liquid template into a java enum. A byte
//! literal formatter turns hex dumps into java byte array declarations.

#[macro_use]
extern crate quick_error;

pub mod utils;

pub mod byte_literal;
pub mod config;
pub mod file_text;
pub mod generate;
pub mod gtpv2_ie;
pub mod java;
pub mod reference_point;
pub mod render;
pub mod table;
