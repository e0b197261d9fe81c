use std::io::Write;
use std::path::{Path, PathBuf};

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        FileIoError(io_err: std::io::Error) {
            display("file io error: {}", io_err)
            from()
        }
    }
}

/// A table file that can render the location of a row or a cell in the
/// terminal.
///
/// Unlike a source file of a compiler, a specification table frequently
/// carries multi-byte characters (`’`, `′`), so byte offsets are kept for
/// slicing while the rendered columns are counted in characters.
#[derive(Debug)]
pub struct FileText {
    path: PathBuf,
    text: String,
    lines: Vec<(usize, usize)>,
}

impl FileText {
    /// Create a new `FileText` from a file path.
    pub fn new<P: AsRef<Path>>(p: P) -> Result<Self, Error> {
        let text = std::fs::read_to_string(p.as_ref())?;
        Ok(Self::from_string(p, text))
    }

    /// Create a new `FileText` from an in-memory table, `p` is only used
    /// when rendering locations.
    pub fn from_string<P: AsRef<Path>>(p: P, text: String) -> Self {
        let lines = Self::analyze_lines(&text);
        Self {
            path: p.as_ref().to_path_buf(),
            text,
            lines,
        }
    }

    /// Return the file text as a string slice
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the line containing the non-inclusive byte range `span`, with
    /// the range underlined.
    ///
    /// The range must not cross a line boundary. An empty range is rendered
    /// as a single caret at its position.
    pub fn render_span(&self, span: (usize, usize), out: &mut dyn Write) -> std::io::Result<()> {
        let (start, end) = span;
        assert!(start <= end, "invalid byte offset");

        let line_idx = self.line_idx(start);
        let (line_start, line_end) = self.lines[line_idx];
        assert!(end <= line_end, "can not render across lines");

        let start_col = self.text[line_start..start].chars().count() + 1;
        let width = self.text[start..end].chars().count().max(1);

        write!(
            out,
            "at {} {}:{}",
            self.path.display(),
            line_idx + 1,
            start_col
        )?;
        if width > 1 {
            writeln!(out, "-{}", start_col + width - 1)?;
        } else {
            writeln!(out, "")?;
        }

        let line_num_str = (line_idx + 1).to_string();
        writeln!(
            out,
            "{} | {}",
            line_num_str,
            self.text[line_start..line_end].trim_end_matches('\r')
        )?;
        keep_write(' ', line_num_str.len() + 3 + start_col - 1, out)?;
        keep_write('^', width, out)?;
        writeln!(out, "")?;

        Ok(())
    }

    // get the start and end byte indexes of each line, return it as a tuple vector
    fn analyze_lines(text: &str) -> Vec<(usize, usize)> {
        // collect the starting indexes of each line
        let line_idxes: Vec<usize> = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(offset, _)| offset + 1))
            .collect();

        // combine the starting index with the ending index of each line
        line_idxes
            .windows(2)
            .map(|w| (w[0], w[1] - 1))
            .chain(std::iter::once((line_idxes[line_idxes.len() - 1], text.len())))
            .collect()
    }

    // convert byte index to line index by searching through the tuple vector
    fn line_idx(&self, byte_offset: usize) -> usize {
        self.lines
            .binary_search_by(|(start, end)| {
                if byte_offset < *start {
                    std::cmp::Ordering::Greater
                } else if byte_offset > *end {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .expect("invalid byte offset")
    }
}

fn keep_write(c: char, times: usize, out: &mut dyn Write) -> std::io::Result<()> {
    for _ in 0..times {
        write!(out, "{}", c)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bad_file_path() {
        let res = FileText::new("sss**xx");
        assert_eq!(
            "file io error: No such file or directory (os error 2)",
            &format!("{}", res.unwrap_err())
        );
    }

    #[test]
    fn parse_lines() {
        let content = r#"1
23

456

7890
"#;
        let lines = FileText::analyze_lines(content);

        assert_eq!("1", &content[lines[0].0..lines[0].1]);
        assert_eq!("23", &content[lines[1].0..lines[1].1]);
        assert_eq!("", &content[lines[2].0..lines[2].1]);
        assert_eq!("456", &content[lines[3].0..lines[3].1]);
        assert_eq!("", &content[lines[4].0..lines[4].1]);
        assert_eq!("7890", &content[lines[5].0..lines[5].1]);
        assert_eq!("", &content[lines[6].0..lines[6].1]);
    }

    const FILE_STRING: &str = "Name\tProtocol
Uu\tLTE-Uu
S1’\tS1-MME
";

    #[test]
    fn test_render_cell() {
        let text = FileText::from_string("/local", FILE_STRING.to_string());

        // "LTE-Uu" on the second line
        let start = FILE_STRING.find("LTE-Uu").unwrap();
        let mut output = Vec::<u8>::new();
        text.render_span((start, start + "LTE-Uu".len()), &mut output)
            .unwrap();

        let expected = "at /local 2:4-9
2 | Uu\tLTE-Uu
       ^^^^^^
";

        assert_eq!(expected, std::str::from_utf8(&output[..]).unwrap());
    }

    #[test]
    fn test_render_multi_byte_line() {
        let text = FileText::from_string("/local", FILE_STRING.to_string());

        // "S1-MME" follows a three-byte character on the third line
        let start = FILE_STRING.find("S1-MME").unwrap();
        let mut output = Vec::<u8>::new();
        text.render_span((start, start + "S1-MME".len()), &mut output)
            .unwrap();

        let expected = "at /local 3:5-10
3 | S1’\tS1-MME
        ^^^^^^
";

        assert_eq!(expected, std::str::from_utf8(&output[..]).unwrap());
    }

    #[test]
    fn test_render_empty_span() {
        let text = FileText::from_string("/local", FILE_STRING.to_string());

        let start = FILE_STRING.find("Uu\t").unwrap();
        let mut output = Vec::<u8>::new();
        text.render_span((start, start), &mut output).unwrap();

        let expected = "at /local 2:1
2 | Uu\tLTE-Uu
    ^
";

        assert_eq!(expected, std::str::from_utf8(&output[..]).unwrap());
    }
}
