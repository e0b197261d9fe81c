use std::fmt::Write;

/// Number of byte values on each line of the literal.
pub const BYTES_PER_LINE: usize = 8;

const HEX_CHARS_PER_LINE: usize = BYTES_PER_LINE * 2;

/// Where the closing `};` of the literal is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// The terminator follows the last byte.
    #[default]
    Exact,
    /// The placement of the older generator. The terminator position is
    /// derived from the hex character index, and lands on the second-to-last
    /// byte whenever the hex length is not a multiple of 16.
    Legacy,
}

/// Format `hex` as a java byte array declaration named `name`.
///
/// ```
/// use pkts_codegen::byte_literal::{format_byte_literal, Boundary};
///
/// let literal = format_byte_literal("0aff", "magic", Boundary::Exact).unwrap();
/// assert_eq!(literal, "byte[] magic = {\n    (byte) 0x0a, (byte) 0xff};\n");
/// ```
pub fn format_byte_literal(
    hex: &str,
    name: &str,
    boundary: Boundary,
) -> Result<String, hex::FromHexError> {
    let bytes = hex::decode(hex)?;

    let mut output = String::new();
    if bytes.is_empty() {
        writeln!(&mut output, "byte[] {name} = {{}};").unwrap();
        return Ok(output);
    }
    writeln!(&mut output, "byte[] {name} = {{").unwrap();

    let hex_len = bytes.len() * 2;
    let terminator_idx = match boundary {
        Boundary::Legacy if hex_len % HEX_CHARS_PER_LINE != 0 => hex_len.saturating_sub(4),
        _ => hex_len - 2,
    };

    for (n, b) in bytes.iter().enumerate() {
        // the character index of this byte in the hex string
        let idx = n * 2;
        if idx % HEX_CHARS_PER_LINE == 0 {
            output.push_str("    ");
        } else {
            output.push(' ');
        }

        write!(&mut output, "(byte) 0x{b:02x}").unwrap();
        if idx == terminator_idx {
            output.push_str("};");
        } else {
            output.push(',');
        }

        if (idx + 2) % HEX_CHARS_PER_LINE == 0 || n == bytes.len() - 1 {
            output.push('\n');
        }
    }

    Ok(output)
}
