//! Line-oriented record scanner
//!
//! Pulls lines from a buffered reader and groups them into [`Record`]s:
//! comment lines start with `#`, blank lines separate records, every other
//! line is a `key = hexvalue` attribute. The first attribute names the
//! record's type.

use super::error::{ScanError, ScanResult};
use super::hex::parse_hex;
use super::record::Record;
use log::{debug, trace};
use num_bigint::BigInt;
use std::io::BufRead;
use std::iter::FusedIterator;

/// Classification of a single input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Comment,
    Attribute,
}

fn classify(line: &[u8]) -> LineKind {
    if line.is_empty() {
        LineKind::Blank
    } else if line.starts_with(b"#") {
        LineKind::Comment
    } else {
        LineKind::Attribute
    }
}

/// Split `key = value` on the first `=` and parse the value.
/// Bytes that are not UTF-8 are replaced, so they can only end up in a key
/// or make the value unparseable.
fn parse_attribute(line: &[u8], line_number: usize) -> ScanResult<(String, BigInt)> {
    let line = String::from_utf8_lossy(line);
    let (key, value) = line
        .split_once('=')
        .ok_or_else(|| ScanError::invalid_syntax(line_number))?;

    let key = key.trim();
    let value = value.trim();

    let parsed = parse_hex(value).ok_or_else(|| ScanError::invalid_value(line_number, value))?;
    Ok((key.to_string(), parsed))
}

/// Single-pass pull scanner over a test vector stream.
///
/// `next_record` yields `Ok(Some(record))` per record, `Ok(None)` once the stream is
/// exhausted, and `Err` on the first fatal problem. After exhaustion or an
/// error the reader is dropped and every later call returns `Ok(None)`.
pub struct RecordScanner<R> {
    reader: Option<R>,
    line_number: usize,
    buffer: Vec<u8>,
    records_scanned: usize,
    error: Option<ScanError>,
}

impl<R: BufRead> RecordScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            line_number: 0,
            buffer: Vec::new(),
            records_scanned: 0,
            error: None,
        }
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn records_scanned(&self) -> usize {
        self.records_scanned
    }

    /// The fatal error that stopped the scan, if any
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    /// Whether the scanner has stopped producing records
    pub fn is_finished(&self) -> bool {
        self.reader.is_none()
    }

    /// Pull the next record from the stream
    pub fn next_record(&mut self) -> ScanResult<Option<Record>> {
        if self.reader.is_none() {
            return Ok(None);
        }

        match self.scan_record() {
            Ok(Some(record)) => {
                self.records_scanned += 1;
                debug!(
                    "Scanned {} record at line {} ({} attributes)",
                    record.test_type(),
                    record.line_number(),
                    record.len()
                );
                Ok(Some(record))
            }
            Ok(None) => {
                debug!("End of input after {} lines", self.line_number);
                self.reader = None;
                Ok(None)
            }
            Err(error) => {
                debug!("Scan stopped: {}", error);
                self.reader = None;
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }

    fn scan_record(&mut self) -> ScanResult<Option<Record>> {
        // Seek the first attribute, skipping blank and comment lines
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            if classify(&self.buffer) == LineKind::Attribute {
                break;
            }
            trace!("Skipping line {} before record", self.line_number);
        }

        let (key, value) = parse_attribute(&self.buffer, self.line_number)?;
        let mut record = Record::start(self.line_number, key, value);

        while self.read_line()? {
            match classify(&self.buffer) {
                LineKind::Blank => break,
                LineKind::Comment => continue,
                LineKind::Attribute => {
                    let (key, value) = parse_attribute(&self.buffer, self.line_number)?;
                    record.insert(self.line_number, key, value)?;
                }
            }
        }

        Ok(Some(record))
    }

    /// Read the next line into the buffer without its terminator.
    /// Returns false at end of input.
    fn read_line(&mut self) -> ScanResult<bool> {
        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => return Ok(false),
        };

        self.buffer.clear();
        match reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => Ok(false),
            Ok(_) => {
                self.line_number += 1;
                if self.buffer.ends_with(b"\n") {
                    self.buffer.pop();
                    if self.buffer.ends_with(b"\r") {
                        self.buffer.pop();
                    }
                }
                Ok(true)
            }
            Err(error) => Err(ScanError::io(self.line_number + 1, &error)),
        }
    }
}

impl<R: BufRead> Iterator for RecordScanner<R> {
    type Item = ScanResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl<R: BufRead> FusedIterator for RecordScanner<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::{self, Cursor, Read};

    fn scanner(input: &str) -> RecordScanner<Cursor<Vec<u8>>> {
        RecordScanner::new(Cursor::new(input.as_bytes().to_vec()))
    }

    fn int(value: i64) -> BigInt {
        BigInt::from(value)
    }

    #[test]
    fn test_empty_input() {
        let mut scanner = scanner("");
        assert_eq!(scanner.next_record().unwrap(), None);
        assert!(scanner.is_finished());
        assert!(scanner.error().is_none());
    }

    #[test]
    fn test_only_comments_and_blanks() {
        let mut scanner = scanner("# header\n\n# another\n\n");
        assert_eq!(scanner.next_record().unwrap(), None);
        assert_eq!(scanner.line_number(), 4);
    }

    #[test]
    fn test_single_record() {
        let mut scanner = scanner("Sum = 3\nA = 1\nB = 2\n");
        let record = scanner.next_record().unwrap().unwrap();

        assert_eq!(record.test_type(), "Sum");
        assert_eq!(record.line_number(), 1);
        assert_eq!(record.get("Sum"), Some(&int(3)));
        assert_eq!(record.get("A"), Some(&int(1)));
        assert_eq!(record.get("B"), Some(&int(2)));
        assert_eq!(scanner.next_record().unwrap(), None);
    }

    #[test]
    fn test_records_and_line_numbers() {
        let input = "# Sums\n\nSum = 3\nA = 1\nB = 2\n\n\n# Products\nProduct = 6\nA = 2\nB = 3\n";
        let records: Vec<Record> = scanner(input).map(Result::unwrap).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line_number(), 3);
        assert_eq!(records[1].line_number(), 9);
        assert_eq!(records[1].test_type(), "Product");
    }

    #[test]
    fn test_comment_inside_record() {
        let mut scanner = scanner("Sum = 3\n# comment\nA = 1\nB = 2\n");
        let record = scanner.next_record().unwrap().unwrap();
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_whitespace_and_crlf() {
        let mut scanner = scanner("Square   =   19\r\n\tA=5\r\n\r\nSum=1\r\nA=0\r\nB=1");
        let first = scanner.next_record().unwrap().unwrap();
        assert_eq!(first.get("Square"), Some(&int(0x19)));
        assert_eq!(first.get("A"), Some(&int(5)));

        let second = scanner.next_record().unwrap().unwrap();
        assert_eq!(second.line_number(), 4);
        assert_eq!(second.get("B"), Some(&int(1)));
        assert_eq!(scanner.next_record().unwrap(), None);
    }

    #[test]
    fn test_value_splits_on_first_equals() {
        let mut scanner = scanner("Sum = 1 = 2\n");
        let error = scanner.next_record().unwrap_err();
        assert_matches!(error, ScanError::InvalidValue { line: 1, ref value } if value == "1 = 2");
    }

    #[test]
    fn test_missing_separator_is_fatal() {
        let mut scanner = scanner("Sum = 3\nA : 5\nB = 2\n\nSum = 3\nA = 1\nB = 2\n");
        let error = scanner.next_record().unwrap_err();

        assert_eq!(error, ScanError::invalid_syntax(2));
        assert_eq!(scanner.error(), Some(&error));
        assert!(scanner.is_finished());
        assert_eq!(scanner.next_record().unwrap(), None);
        assert_eq!(scanner.records_scanned(), 0);
    }

    #[test]
    fn test_invalid_hex_is_fatal() {
        let mut scanner = scanner("Sum = 3\nA = 0x1\n");
        assert_matches!(
            scanner.next_record(),
            Err(ScanError::InvalidValue { line: 2, ref value }) if value == "0x1"
        );
    }

    #[test]
    fn test_duplicate_key_is_fatal() {
        let mut scanner = scanner("Sum = 3\nA = 1\nA = 1\nB = 2\n");
        assert_matches!(
            scanner.next_record(),
            Err(ScanError::DuplicateKey { line: 3, ref key }) if key == "A"
        );
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_iterator_is_fused_after_error() {
        let mut scanner = scanner("Sum = 3\nA = 1\nB = 2\n\nbroken\n\nSum = 3\nA = 1\nB = 2\n");

        assert!(scanner.next().unwrap().is_ok());
        assert!(scanner.next().unwrap().is_err());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
        assert_eq!(scanner.records_scanned(), 1);
    }

    #[test]
    fn test_whitespace_only_line_is_not_blank() {
        let mut scanner = scanner("Sum = 3\n   \nA = 1\n");
        assert_eq!(scanner.next_record().unwrap_err(), ScanError::invalid_syntax(2));
    }

    #[test]
    fn test_record_at_end_without_newline() {
        let mut scanner = scanner("Square = 4\nA = 2");
        let record = scanner.next_record().unwrap().unwrap();
        assert_eq!(record.get("A"), Some(&int(2)));
        assert_eq!(scanner.next_record().unwrap(), None);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_read_failure_is_fatal() {
        let mut scanner = RecordScanner::new(io::BufReader::new(FailingReader));
        assert_matches!(scanner.next_record(), Err(ScanError::Io { line: 1, .. }));
        assert!(scanner.is_finished());
    }

    #[test]
    fn test_invalid_utf8_value_is_fatal() {
        let mut scanner = RecordScanner::new(Cursor::new(b"Sum = 3\nA = \xff\n".to_vec()));
        assert_matches!(scanner.next_record(), Err(ScanError::InvalidValue { line: 2, .. }));
    }

    #[test]
    fn test_latin1_comment_is_skipped() {
        let input = b"# caf\xe9\nSum = 3\n# na\xefve\nA = 1\nB = 2\n".to_vec();
        let mut scanner = RecordScanner::new(Cursor::new(input));

        let record = scanner.next_record().unwrap().unwrap();
        assert_eq!(record.line_number(), 2);
        assert_eq!(record.len(), 3);
        assert_eq!(scanner.next_record().unwrap(), None);
        assert!(scanner.error().is_none());
    }

    #[test]
    fn test_non_utf8_key_is_kept() {
        let mut scanner = RecordScanner::new(Cursor::new(b"Sum = 3\n\xffA = 1\n".to_vec()));
        let record = scanner.next_record().unwrap().unwrap();
        assert!(record.contains_key("\u{fffd}A"));
    }
}
