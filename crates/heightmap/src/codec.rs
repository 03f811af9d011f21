//! Reading and writing the heightmap text format.
//!
//! A file is six opaque header lines followed by a whitespace-delimited
//! numeric matrix, one grid row per line:
//!
//! ```text
//! ncols        3
//! nrows        2
//! xllcorner    0.0
//! yllcorner    0.0
//! cellsize     10.0
//! NODATA_value -9999
//! 1.00 2.00 3.00
//! 4.00 5.00 6.00
//! ```
//!
//! Values are always written with two decimal places, so a write/read cycle
//! preserves the header exactly and the values to within 0.005.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{HeightmapError, Result};
use crate::types::{Grid, Header, Shape, HEADER_LINES};

/// Decimal digits used for every value on write.
pub const WRITE_PRECISION: usize = 2;

/// Read a grid file from disk.
pub fn read(path: impl AsRef<Path>) -> Result<(Header, Grid)> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let (header, grid) = read_from(BufReader::new(file))?;
    debug!(path = %path.display(), shape = %grid.shape(), "Read grid");
    Ok((header, grid))
}

/// Parse a grid from any buffered reader.
pub fn read_from<R: BufRead>(mut reader: R) -> Result<(Header, Grid)> {
    let mut buf = Vec::new();
    let mut line_no = 0;

    let mut header_lines = Vec::with_capacity(HEADER_LINES);
    while header_lines.len() < HEADER_LINES {
        line_no += 1;
        match next_line(&mut reader, &mut buf, line_no)? {
            Some(line) => header_lines.push(line),
            None => {
                return Err(HeightmapError::format(format!(
                    "expected {} header lines, found {}",
                    HEADER_LINES,
                    header_lines.len()
                )))
            }
        }
    }
    let header = Header::new(header_lines)?;

    let mut data = Vec::new();
    let mut cols = None;
    let mut rows = 0;

    loop {
        line_no += 1;
        let line = match next_line(&mut reader, &mut buf, line_no)? {
            Some(line) => line,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let before = data.len();
        for token in line.split_whitespace() {
            let value: f64 = token.parse().map_err(|_| {
                HeightmapError::format_at(line_no, format!("non-numeric value {:?}", token))
            })?;
            data.push(value);
        }
        let width = data.len() - before;

        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(HeightmapError::format_at(
                    line_no,
                    format!("expected {} values, found {}", expected, width),
                ));
            }
            Some(_) => {}
        }
        rows += 1;
    }

    let cols = cols.ok_or_else(|| HeightmapError::format("grid body contains no values"))?;
    let grid = Grid::new(Shape::new(rows, cols), data)?;
    Ok((header, grid))
}

/// Read one raw line without its `\n` / `\r\n` terminator. `None` at end of input.
fn next_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    line_no: usize,
) -> Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    let line = std::str::from_utf8(buf)
        .map_err(|e| HeightmapError::format_at(line_no, format!("invalid UTF-8: {}", e)))?;
    Ok(Some(line.to_owned()))
}

/// Write a grid file to disk, replacing any existing file.
pub fn write(path: impl AsRef<Path>, header: &Header, grid: &Grid) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, header, grid)?;
    writer.flush()?;
    debug!(path = %path.display(), shape = %grid.shape(), "Wrote grid");
    Ok(())
}

/// Serialize a grid to any writer.
pub fn write_to<W: Write>(writer: &mut W, header: &Header, grid: &Grid) -> Result<()> {
    for line in header.lines() {
        writeln!(writer, "{}", line)?;
    }

    for row in grid.rows() {
        let mut first = true;
        for value in row {
            if !first {
                writer.write_all(b" ")?;
            }
            write!(writer, "{:.*}", WRITE_PRECISION, value)?;
            first = false;
        }
        writer.write_all(b"\n")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "ncols 3\nnrows 2\nxllcorner 0.0\nyllcorner 0.0\ncellsize 10.0\nNODATA_value -9999\n1 2 3\n4.5 5.25 -6\n";

    fn parse(text: &str) -> Result<(Header, Grid)> {
        read_from(Cursor::new(text.as_bytes()))
    }

    #[test]
    fn test_read_header_and_body() {
        let (header, grid) = parse(SAMPLE).unwrap();
        assert_eq!(header.lines()[0], "ncols 3");
        assert_eq!(header.lines()[5], "NODATA_value -9999");
        assert_eq!(grid.shape(), Shape::new(2, 3));
        assert_eq!(grid.data(), &[1.0, 2.0, 3.0, 4.5, 5.25, -6.0]);
    }

    #[test]
    fn test_read_crlf_header() {
        let text = SAMPLE.replace('\n', "\r\n");
        let (header, grid) = parse(&text).unwrap();
        assert_eq!(header.lines()[1], "nrows 2");
        assert_eq!(grid.shape(), Shape::new(2, 3));
    }

    #[test]
    fn test_read_keeps_header_whitespace() {
        let text = "  ncols   1\t\nb\nc\nd\ne\nf\n7\n";
        let (header, _) = parse(text).unwrap();
        assert_eq!(header.lines()[0], "  ncols   1\t");
    }

    #[test]
    fn test_read_non_utf8_header_is_format_error() {
        let bytes = b"a\nb\nc\nd\ne\nNODATA_value -9999 \xb0\n1.0\n".to_vec();
        match read_from(Cursor::new(&bytes[..])).unwrap_err() {
            HeightmapError::Format(msg) => assert!(msg.contains("line 6"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_read_non_utf8_body_is_format_error() {
        let text = b"a\nb\nc\nd\ne\nf\n1.0 \xff\n";
        match read_from(Cursor::new(&text[..])).unwrap_err() {
            HeightmapError::Format(msg) => assert!(msg.contains("line 7"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_read_last_line_without_newline() {
        let (_, grid) = parse("a\nb\nc\nd\ne\nf\n1 2\n3 4").unwrap();
        assert_eq!(grid.data(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_read_skips_blank_body_lines() {
        let text = "a\nb\nc\nd\ne\nf\n1 2\n\n3 4\n\n";
        let (_, grid) = parse(text).unwrap();
        assert_eq!(grid.shape(), Shape::new(2, 2));
    }

    #[test]
    fn test_read_short_header() {
        let err = parse("ncols 3\nnrows 2\n").unwrap_err();
        assert!(matches!(err, HeightmapError::Format(_)));
    }

    #[test]
    fn test_read_non_numeric_token() {
        let text = "a\nb\nc\nd\ne\nf\n1 2\n3 x\n";
        match parse(text).unwrap_err() {
            HeightmapError::Format(msg) => assert!(msg.contains("line 8"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_read_ragged_rows() {
        let text = "a\nb\nc\nd\ne\nf\n1 2 3\n4 5\n";
        assert!(matches!(parse(text), Err(HeightmapError::Format(_))));
    }

    #[test]
    fn test_read_empty_body() {
        let text = "a\nb\nc\nd\ne\nf\n";
        assert!(matches!(parse(text), Err(HeightmapError::Format(_))));
    }

    #[test]
    fn test_write_two_decimals() {
        let (header, grid) = parse(SAMPLE).unwrap();
        let mut out = Vec::new();
        write_to(&mut out, &header, &grid).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "ncols 3\nnrows 2\nxllcorner 0.0\nyllcorner 0.0\ncellsize 10.0\nNODATA_value -9999\n\
             1.00 2.00 3.00\n4.50 5.25 -6.00\n"
        );
    }

    #[test]
    fn test_write_then_read_rounds_values() {
        let header = Header::new(vec!["h1", "h2", "h3", "h4", "h5", "h6"]).unwrap();
        let grid = Grid::from_rows(&[vec![1.23456, -0.004], vec![1000.999, 7.0]]).unwrap();

        let mut out = Vec::new();
        write_to(&mut out, &header, &grid).unwrap();
        let (header2, grid2) = read_from(Cursor::new(out)).unwrap();

        assert_eq!(header2, header);
        assert_eq!(grid2.shape(), grid.shape());
        for (a, b) in grid.data().iter().zip(grid2.data()) {
            assert!((a - b).abs() <= 0.005 + 1e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_non_finite_values_survive() {
        let header = Header::new(vec!["a", "b", "c", "d", "e", "f"]).unwrap();
        let grid = Grid::from_rows(&[vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY]]).unwrap();

        let mut out = Vec::new();
        write_to(&mut out, &header, &grid).unwrap();
        let (_, grid2) = read_from(Cursor::new(out)).unwrap();

        assert!(grid2.data()[0].is_nan());
        assert_eq!(grid2.data()[1], f64::INFINITY);
        assert_eq!(grid2.data()[2], f64::NEG_INFINITY);
    }
}
