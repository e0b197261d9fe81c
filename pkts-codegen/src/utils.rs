//! The error type and error rendering shared by the generators.

use std::io::Write;
use std::path::PathBuf;

use crate::file_text::FileText;
use crate::table::Error as TableError;

quick_error! {
    /// A toplevel error type.
    ///
    /// This error type wraps all the errors exposed by the loading, rendering
    /// and writing stages. Every stage converts its error into the toplevel
    /// `Error` and the first error aborts the run.
    #[derive(Debug)]
    pub enum Error {
        Io{path: PathBuf, err: std::io::Error} {
            display("{}: {}", path.display(), err)
        }
        Table(err: TableError) {
            display("{}", err)
            from()
        }
        Template(err: liquid::Error) {
            display("template error: {}", err)
            from()
        }
        Config(err: toml::de::Error) {
            display("config error: {}", err)
            from()
        }
        Hex(err: hex::FromHexError) {
            display("invalid hex string: {}", err)
            from()
        }
        Json(err: serde_json::Error) {
            display("json error: {}", err)
            from()
        }
    }
}

impl Error {
    pub(crate) fn io<P: Into<PathBuf>>(path: P) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |err| Error::Io { path, err }
    }
}

/// Render the error message in the `out` writer.
/// The position of a table `error` is rendered through the `file_text`.
///
/// We first print a summary of the error.
/// Then we render the table line that generates the error.
/// We finalize the printing with the detailed explanation.
pub fn render_error(file_text: &FileText, error: Error, out: &mut dyn Write) -> std::io::Result<()> {
    // print error summary, then render error location
    match error {
        Error::Table(ref err) => {
            writeln!(out, "table error")?;
            file_text.render_span(err.span, out)?;
        }
        Error::Template(_) => {
            writeln!(out, "template error")?;
        }
        _ => {
            writeln!(out, "error")?;
        }
    }
    // print error details
    writeln!(out, "{error}")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::table::ErrorCode;

    #[test]
    fn render_table_error() {
        let text = FileText::from_string("ies.tsv", "h\n\tabc\tEcho\n".to_string());
        let err = Error::Table(TableError {
            span: (3, 6),
            code: ErrorCode::InvalidTypeCode("abc".to_string()),
        });

        let mut out = Vec::new();
        render_error(&text, err, &mut out).unwrap();

        let expected = "table error
at ies.tsv 2:2-4
2 | \tabc\tEcho
     ^^^
invalid type code: \"abc\" is not an integer in 0..=255
";
        assert_eq!(expected, std::str::from_utf8(&out[..]).unwrap());
    }

    #[test]
    fn render_io_error() {
        let text = FileText::from_string("t.tsv", String::new());
        let err = Error::io("out/Gen.java")(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing directory",
        ));

        let mut out = Vec::new();
        render_error(&text, err, &mut out).unwrap();

        assert_eq!(
            "error\nout/Gen.java: missing directory\n",
            std::str::from_utf8(&out[..]).unwrap()
        );
    }
}
