use super::Document;
use crate::error::{Result, StacksheetError};
use stacksheet_engine::SheetError;
use stacksheet_engine::engine::{CellStore, format_number};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

const MAX_GRID_FILE_BYTES: u64 = 64 * 1_048_576; // 64 MiB

/// Build a document from raw input lines.
///
/// The first line holds `"<columns> <rows>"`, two positive integers. Every
/// following line is one cell, row-major, and there must be exactly
/// `columns * rows` of them.
pub fn parse_lines<I, S>(lines: I) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = lines.into_iter();
    let Some(header) = lines.next() else {
        debug!("input is empty");
        return Err(SheetError::InvalidFormat.into());
    };
    let Some((columns, rows)) = parse_header(header.as_ref()) else {
        debug!(header = header.as_ref(), "malformed header");
        return Err(SheetError::InvalidFormat.into());
    };

    let entries: Vec<String> = lines.map(|line| line.as_ref().trim().to_string()).collect();
    let supplied = entries.len();
    let store = CellStore::new(columns, rows, entries).ok_or_else(|| {
        debug!(columns, rows, supplied, "entry count does not match dimensions");
        StacksheetError::from(SheetError::InvalidFormat)
    })?;

    debug!(columns, rows, "grid loaded");
    Ok(Document::from_store(store))
}

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let columns = parts.next()?.parse::<usize>().ok()?;
    let rows = parts.next()?.parse::<usize>().ok()?;
    if parts.next().is_some() || columns == 0 || rows == 0 {
        return None;
    }
    Some((columns, rows))
}

impl Document {
    /// Read a grid from any line-oriented source.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Document> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        parse_lines(lines)
    }

    /// Read a grid from a file.
    pub fn open(path: &Path) -> Result<Document> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_GRID_FILE_BYTES {
            return Err(StacksheetError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Refusing to read {}: grid file too large ({} bytes, max {})",
                    path.display(),
                    meta.len(),
                    MAX_GRID_FILE_BYTES
                ),
            )));
        }
        let file = std::fs::File::open(path)?;
        Self::read_from(std::io::BufReader::new(file))
    }

    /// Output lines: the header, then every value row-major.
    pub fn render(&self, precision: usize) -> Result<Vec<String>> {
        let values = self.store.values().ok_or(StacksheetError::NotResolved)?;
        let mut lines = Vec::with_capacity(values.len() + 1);
        lines.push(self.header());
        lines.extend(values.into_iter().map(|v| format_number(v, precision)));
        Ok(lines)
    }

    pub fn write_to<W: Write>(&self, out: &mut W, precision: usize) -> Result<()> {
        for line in self.render(precision)? {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kind(result: Result<Document>) -> SheetError {
        result.unwrap_err().sheet_error()
    }

    #[test]
    fn test_parse_lines_valid() {
        let doc = parse_lines(["2 3", "1", "2", "3", "4", "5", "6"]).unwrap();
        assert_eq!(doc.columns(), 2);
        assert_eq!(doc.rows(), 3);
        assert_eq!(doc.store.len(), 6);
    }

    #[test]
    fn test_wrong_entry_count_is_invalid_format() {
        assert_eq!(kind(parse_lines(["2 3", "1", "2", "3"])), SheetError::InvalidFormat);
        assert_eq!(
            kind(parse_lines(["2 3", "1", "2", "3", "4", "5", "6", "7"])),
            SheetError::InvalidFormat
        );
    }

    #[test]
    fn test_malformed_header_is_invalid_format() {
        let empty: [&str; 0] = [];
        assert_eq!(kind(parse_lines(empty)), SheetError::InvalidFormat);
        assert_eq!(kind(parse_lines(["2"])), SheetError::InvalidFormat);
        assert_eq!(kind(parse_lines(["2 1 1", "1", "2"])), SheetError::InvalidFormat);
        assert_eq!(kind(parse_lines(["a b"])), SheetError::InvalidFormat);
        assert_eq!(kind(parse_lines(["-1 2", "1"])), SheetError::InvalidFormat);
        assert_eq!(kind(parse_lines(["0 3"])), SheetError::InvalidFormat);
    }

    #[test]
    fn test_overflowing_dimensions_are_invalid_format() {
        let header = format!("{} 2", usize::MAX);
        assert_eq!(kind(parse_lines([header.as_str(), "1"])), SheetError::InvalidFormat);
    }

    #[test]
    fn test_read_from_handles_crlf() {
        let input = "1 2\r\n3 4 +\r\n5\r\n";
        let mut doc = Document::read_from(input.as_bytes()).unwrap();
        doc.resolve_all().unwrap();
        assert_eq!(doc.render(6).unwrap(), vec!["1 2", "7.000000", "5.000000"]);
    }

    #[test]
    fn test_stray_whitespace_is_tolerated() {
        let mut doc = parse_lines(["2  1", " 3 4 +", "A1 1 -\t"]).unwrap();
        assert_eq!(doc.columns(), 2);
        doc.resolve_all().unwrap();
        assert_eq!(doc.render(6).unwrap(), vec!["2 1", "7.000000", "-6.000000"]);
    }

    #[test]
    fn test_render_requires_resolution() {
        let doc = parse_lines(["1 1", "5"]).unwrap();
        assert!(matches!(doc.render(6), Err(StacksheetError::NotResolved)));
    }

    #[test]
    fn test_write_to() {
        let mut doc = parse_lines(["2 1", "1.5", "A1 ++"]).unwrap();
        doc.resolve_all().unwrap();
        let mut out = Vec::new();
        doc.write_to(&mut out, 2).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2 1\n1.50\n2.50\n");
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!(
            "stacksheet_missing_{}.txt",
            std::process::id()
        ));
        let err = Document::open(&path).unwrap_err();
        assert!(matches!(err, StacksheetError::Io(_)));
        assert_eq!(err.sheet_error(), SheetError::InvalidFormat);
    }
}
