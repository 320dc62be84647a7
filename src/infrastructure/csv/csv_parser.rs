// ============================================================
// CSV PARSER
// ============================================================
// Hand-rolled character scanner: quoted fields, escaped quotes,
// embedded separators/newlines and CRLF / LF / CR line endings

use tracing::debug;

use super::CellGrid;
use crate::domain::csv::RawRecord;

const QUOTE: char = '"';

/// Single-pass CSV parser producing header-keyed records
#[derive(Debug, Clone)]
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: char,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse a whole document into records.
    ///
    /// Never fails: empty or whitespace-only input, a header-only document,
    /// and documents whose rows are all short or blank yield an empty vec.
    pub fn parse(&self, text: &str) -> Vec<RawRecord> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let grid = self.scan(text);
        reduce(grid)
    }

    /// Run the character scanner and return the raw cell table.
    ///
    /// Rules are checked in order at every position:
    /// escaped quote inside quotes, quote toggle, delimiter, CRLF, LF, bare
    /// CR, and finally a literal append. Separators only count outside
    /// quotes.
    pub fn scan(&self, text: &str) -> CellGrid {
        let mut grid = CellGrid::new();
        let mut in_quotes = false;
        let mut row = 0usize;
        let mut col = 0usize;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            grid.touch(row, col);
            let next = chars.peek().copied();

            if c == QUOTE && in_quotes && next == Some(QUOTE) {
                grid.push_char(row, col, QUOTE);
                chars.next();
            } else if c == QUOTE {
                in_quotes = !in_quotes;
            } else if c == self.delimiter && !in_quotes {
                col += 1;
            } else if c == '\r' && next == Some('\n') && !in_quotes {
                row += 1;
                col = 0;
                chars.next();
            } else if (c == '\n' || c == '\r') && !in_quotes {
                row += 1;
                col = 0;
            } else {
                grid.push_char(row, col, c);
            }
        }

        grid
    }
}

/// Parse with the default comma-delimited parser
pub fn parse_csv(text: &str) -> Vec<RawRecord> {
    CsvParser::new().parse(text)
}

fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.trim().is_empty())
}

/// First populated row becomes the header; later rows are kept when they
/// have at least as many cells as headers and are not entirely blank.
fn reduce(grid: CellGrid) -> Vec<RawRecord> {
    let mut rows = grid.into_rows().into_iter();

    let headers: Vec<String> = match rows.by_ref().find(|r| !is_blank_row(r)) {
        Some(header_row) => header_row.iter().map(|h| h.trim().to_string()).collect(),
        None => return Vec::new(),
    };

    let mut dropped = 0usize;
    let records: Vec<RawRecord> = rows
        .filter(|cells| {
            let keep = cells.len() >= headers.len() && !is_blank_row(cells);
            if !keep {
                dropped += 1;
            }
            keep
        })
        .map(|cells| RawRecord::from_row(&headers, &cells))
        .collect();

    debug!(
        headers = headers.len(),
        records = records.len(),
        dropped,
        "Parsed CSV document"
    );

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "title,author,format\nAlpha,Ann,online\nBeta,Bob,offline";
        let rows = parse_csv(content);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0].get("title"), Some("Alpha"));
        assert_eq!(rows[1].get("author"), Some("Bob"));
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("   \n\r\n\t").is_empty());
    }

    #[test]
    fn test_header_only_input() {
        assert!(parse_csv("title,desc\n").is_empty());
        assert!(parse_csv("title,desc").is_empty());
    }

    #[test]
    fn test_quoted_comma_newline_and_escaped_quote_survive() {
        let content = "title,desc\nA,\"He said \"\"hi\"\", didn't he?\nYes.\"\n";
        let rows = parse_csv(content);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value("desc"), "He said \"hi\", didn't he?\nYes.");
    }

    #[test]
    fn test_end_to_end_example() {
        let content = "title,desc,category\n\"Peer Review, v2\",\"Uses \"\"structured\"\" feedback\nacross sessions\",\"ai,progress\"";
        let rows = parse_csv(content);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value("title"), "Peer Review, v2");
        assert_eq!(
            rows[0].value("desc"),
            "Uses \"structured\" feedback\nacross sessions"
        );
        assert_eq!(rows[0].value("category"), "ai,progress");
    }

    #[test]
    fn test_line_endings_are_equivalent() {
        let lf = parse_csv("a,b\n1,2\n3,4\n");
        let crlf = parse_csv("a,b\r\n1,2\r\n3,4\r\n");
        let cr = parse_csv("a,b\r1,2\r3,4\r");

        assert_eq!(lf.len(), 2);
        assert_eq!(lf, crlf);
        assert_eq!(lf, cr);
    }

    #[test]
    fn test_quoted_crlf_is_kept_literally() {
        let rows = parse_csv("a,b\r\n\"x\r\ny\",z\r\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value("a"), "x\r\ny");
    }

    #[test]
    fn test_blank_lines_do_not_change_record_count() {
        let clean = parse_csv("a,b\n1,2\n3,4");
        let noisy = parse_csv("a,b\n1,2\n\n  ,  \n3,4\n\n\n");

        assert_eq!(clean.len(), 2);
        assert_eq!(clean, noisy);
    }

    #[test]
    fn test_short_rows_are_dropped() {
        let rows = parse_csv("a,b,c\n1,2,3\nonly-one\n4,5\n6,7,8");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].value("a"), "6");
    }

    #[test]
    fn test_extra_cells_are_truncated() {
        let rows = parse_csv("a,b\n1,2,3,4\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].value("b"), "2");
    }

    #[test]
    fn test_trailing_delimiter_at_end_of_input_leaves_row_short() {
        // the cell after the last delimiter is only created by a following char
        assert!(parse_csv("a,b\n1,").is_empty());

        let rows = parse_csv("a,b\n1,\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("a"), Some("1"));
        assert_eq!(rows[0].get("b"), Some(""));
    }

    #[test]
    fn test_headers_and_values_are_trimmed() {
        let rows = parse_csv(" title , desc \n  A  ,  b  \n");
        assert_eq!(rows[0].get("title"), Some("A"));
        assert_eq!(rows[0].get("desc"), Some("b"));
    }

    #[test]
    fn test_leading_blank_lines_before_header() {
        let rows = parse_csv("\n\ntitle,desc\nA,b\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value("title"), "A");
    }

    #[test]
    fn test_every_record_has_every_header() {
        let rows = parse_csv("title,desc,author\nA,,\nB,x,y\n");
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.len(), 3);
            assert!(row.contains("desc"));
            assert!(row.contains("author"));
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let content = "title,desc\n\"A, b\",\"multi\nline\"\nC,d\n";
        assert_eq!(parse_csv(content), parse_csv(content));
    }

    #[test]
    fn test_custom_delimiter() {
        let rows = CsvParser::new().with_delimiter(';').parse("a;b\n\"1;x\";2\n");
        assert_eq!(rows[0].value("a"), "1;x");
        assert_eq!(rows[0].value("b"), "2");
    }

    #[test]
    fn test_scan_grid_shape() {
        let grid = CsvParser::new().scan("a,b\n\"c\nd\",e");
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.rows()[1], vec!["c\nd".to_string(), "e".to_string()]);
    }
}
