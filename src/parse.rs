//! Reading `<label> <value>` lines into [LabeledValue]s.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::{LabeledValue, ParseError, ReportError};

/// Parses a single `<label> <value>` line. Surrounding whitespace is ignored; the two tokens must be
/// separated by exactly one space.
///
/// ```rust
/// use daytally::LabeledValue;
/// use daytally::parse::parse_line;
///
/// assert_eq!(
///     parse_line("2016-12-01T15:30:00 11\n"),
///     Ok(LabeledValue::new("2016-12-01T15:30:00", 11))
/// );
/// assert!(parse_line("2016-12-01T15:30:00").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<LabeledValue, ParseError> {
    let line = line.trim();

    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut tokens = line.splitn(3, ' ');
    let label = tokens.next().unwrap_or_default();
    let value = tokens
        .next()
        .ok_or_else(|| ParseError::MissingValue(label.to_owned()))?;

    if let Some(rest) = tokens.next() {
        return Err(ParseError::TrailingTokens(rest.to_owned()));
    }

    let value = value.parse().map_err(|source| ParseError::InvalidValue {
        value: value.to_owned(),
        source,
    })?;

    Ok(LabeledValue::new(label, value))
}

/// Opens the given file, or standard input when there is none.
pub fn open(path: Option<&Path>) -> Result<Box<dyn BufRead>, ReportError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| ReportError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// A lazy, forward-only iterator of records, one per input line.
pub struct Records<R> {
    reader: R,
    buffer: String,
    line: usize,
}

impl<R> Records<R>
where
    R: BufRead,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line: 0,
        }
    }

    /// The number of lines read so far.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R> Iterator for Records<R>
where
    R: BufRead,
{
    type Item = Result<LabeledValue, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();

        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                Some(parse_line(&self.buffer).map_err(|source| ReportError::Parse {
                    line: self.line,
                    source,
                }))
            }
            Err(err) => Some(Err(ReportError::Io(err))),
        }
    }
}
