use crate::core::models::record::Configuration;
use crate::core::models::value::{Metadata, ScalarValue};
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Record starting on line {start_line} ended before its header line")]
    MissingHeader { start_line: usize },
    #[error(
        "Record starting on line {start_line} declares {expected} atoms but only {found} atom lines were present"
    )]
    TruncatedRecord {
        start_line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum XyzParseErrorKind {
    #[error("Atom count line must hold a single positive integer (value: '{value}')")]
    InvalidAtomCount { value: String },
    #[error("Header line ends inside a quoted value")]
    UnbalancedQuote,
    #[error("Quote character inside an unquoted value")]
    StrayQuote,
    #[error("'=' inside an already-open value")]
    UnexpectedEquals,
    #[error("Key '{key}' is not followed by '=' and a value")]
    DanglingKey { key: String },
    #[error("Duplicate header key '{key}'")]
    DuplicateKey { key: String },
    #[error("Atom line needs a symbol and three coordinates, found {found} fields")]
    MalformedAtomLine { found: usize },
    #[error("Invalid {axis} coordinate (value: '{value}')")]
    InvalidCoordinate { axis: char, value: String },
}

/// Scanner position within one header line.
///
/// The loop in [`tokenize_header`] owns the cursor; no state is shared
/// across iterations beyond this tag and the token start index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Accumulating key characters; `=` terminates the key.
    Key,
    /// Accumulating value characters. A quoted value runs to the closing
    /// quote (embedded whitespace preserved); an unquoted value runs to the
    /// next whitespace or the end of the line.
    Value { quoted: bool },
    /// Skipping whitespace between pairs.
    Between,
}

/// Splits a header line into alternating key/value tokens.
///
/// Tokens are slices of `line` in scan order: `[k0, v0, k1, v1, ...]`. Quote
/// characters are still present on quoted value tokens; stripping and type
/// coercion happen in [`build_metadata`]. An empty or whitespace-only line
/// yields an empty token list (for the count line this doubles as the record
/// reader's end-of-stream signal; a record may carry no metadata at all). On
/// success the token count is always even; every malformed boundary
/// (unbalanced quote, stray quote, `=` inside an open value, a key with no
/// value) fails instead of guessing.
pub(crate) fn tokenize_header(line: &str) -> Result<Vec<&str>, XyzParseErrorKind> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut tokens = Vec::new();
    let mut state = ScanState::Key;
    let mut start = 0;
    let mut idx = 0;

    while idx < chars.len() {
        let (pos, ch) = chars[idx];
        match state {
            ScanState::Key => {
                if ch == '=' {
                    tokens.push(&line[start..pos]);
                    start = pos + ch.len_utf8();
                    state = ScanState::Value { quoted: false };
                }
                idx += 1;
            }
            // The first character of a value decides quoted vs. unquoted.
            ScanState::Value { quoted: false } if pos == start && ch == '"' => {
                state = ScanState::Value { quoted: true };
                idx += 1;
            }
            ScanState::Value { quoted: true } => {
                if ch == '"' && pos > start {
                    tokens.push(&line[start..pos + ch.len_utf8()]);
                    state = ScanState::Between;
                }
                idx += 1;
            }
            ScanState::Value { quoted: false } => {
                if ch.is_whitespace() {
                    tokens.push(&line[start..pos]);
                    state = ScanState::Between;
                } else if ch == '=' {
                    return Err(XyzParseErrorKind::UnexpectedEquals);
                } else if ch == '"' {
                    return Err(XyzParseErrorKind::StrayQuote);
                }
                idx += 1;
            }
            ScanState::Between => {
                if ch.is_whitespace() {
                    idx += 1;
                } else {
                    // Not consumed; re-processed as the first key character.
                    state = ScanState::Key;
                    start = pos;
                }
            }
        }
    }

    match state {
        // A whitespace-only key scan means the line held no pairs at all
        // (blank or spaces-only header); that is an empty mapping, not an
        // orphaned key.
        ScanState::Key if !line[start..].trim().is_empty() => {
            Err(XyzParseErrorKind::DanglingKey {
                key: line[start..].to_string(),
            })
        }
        ScanState::Key | ScanState::Between => Ok(tokens),
        ScanState::Value { quoted: true } => Err(XyzParseErrorKind::UnbalancedQuote),
        ScanState::Value { quoted: false } => {
            // An unquoted value terminated by the end of the line.
            tokens.push(&line[start..]);
            Ok(tokens)
        }
    }
}

/// Pairs tokenizer output into a typed, insertion-ordered mapping.
///
/// Each value token loses one pair of enclosing double or single quotes if
/// present, then goes through [`ScalarValue::coerce`]. A repeated key fails
/// with [`XyzParseErrorKind::DuplicateKey`] rather than overwriting.
pub(crate) fn build_metadata(tokens: &[&str]) -> Result<Metadata, XyzParseErrorKind> {
    debug_assert!(tokens.len() % 2 == 0);
    let mut metadata = Metadata::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks_exact(2) {
        let key = pair[0];
        let value = ScalarValue::coerce(strip_quotes(pair[1]));
        if !metadata.insert(key, value) {
            return Err(XyzParseErrorKind::DuplicateKey {
                key: key.to_string(),
            });
        }
    }
    Ok(metadata)
}

fn strip_quotes(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let enclosed = bytes.len() >= 2
        && ((bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\''));
    if enclosed {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

fn parse_atom_line(line: &str) -> Result<(String, Point3<f64>), XyzParseErrorKind> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    // Trailing extra fields are ignored; only symbol + x/y/z are consumed.
    if fields.len() < 4 {
        return Err(XyzParseErrorKind::MalformedAtomLine {
            found: fields.len(),
        });
    }
    let mut coords = [0.0_f64; 3];
    for (slot, (field, axis)) in coords
        .iter_mut()
        .zip(fields[1..4].iter().zip(['x', 'y', 'z']))
    {
        *slot = field
            .parse()
            .map_err(|_| XyzParseErrorKind::InvalidCoordinate {
                axis,
                value: (*field).to_string(),
            })?;
    }
    Ok((
        fields[0].to_string(),
        Point3::new(coords[0], coords[1], coords[2]),
    ))
}

/// A lazy stream of [`Configuration`] records over a line-based text source.
///
/// The reader drives the record grammar — count line, header line,
/// `atom_count` atom lines — performing no look-ahead beyond the current
/// line, so files larger than memory stream fine. The sequence is finite and
/// not restartable: create a fresh reader to re-scan from the start. Dropping
/// the reader between records is always safe; a partially-read atom block is
/// discarded, never yielded.
///
/// End of stream is an empty read (or a whitespace-only count line), not an
/// explicit sentinel. Any error is fatal to the stream: the iterator yields
/// the error once and then fuses.
pub struct XyzReader<R: BufRead> {
    reader: R,
    line: usize,
    done: bool,
}

impl XyzReader<BufReader<File>> {
    /// Opens a configuration file for streaming.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, XyzError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> XyzReader<R> {
    /// Wraps a buffered line source in a record stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            done: false,
        }
    }

    /// Reads one line with the trailing newline trimmed; `None` at EOF.
    fn read_line(&mut self) -> Result<Option<String>, XyzError> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    fn next_record(&mut self) -> Result<Option<Configuration>, XyzError> {
        let Some(count_line) = self.read_line()? else {
            return Ok(None);
        };
        let start_line = self.line;
        let mut fields = count_line.split_whitespace();
        let Some(first) = fields.next() else {
            // A blank count line is the caller's end-of-stream signal.
            return Ok(None);
        };
        if fields.next().is_some() {
            return Err(XyzError::Parse {
                line: start_line,
                kind: XyzParseErrorKind::InvalidAtomCount {
                    value: count_line.trim().to_string(),
                },
            });
        }
        let atom_count = match first.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(XyzError::Parse {
                    line: start_line,
                    kind: XyzParseErrorKind::InvalidAtomCount {
                        value: first.to_string(),
                    },
                });
            }
        };

        let Some(header) = self.read_line()? else {
            return Err(XyzError::MissingHeader { start_line });
        };
        let header_line = self.line;
        let attach = |kind| XyzError::Parse {
            line: header_line,
            kind,
        };
        let tokens = tokenize_header(&header).map_err(attach)?;
        let metadata = build_metadata(&tokens).map_err(attach)?;

        let mut symbols = Vec::with_capacity(atom_count);
        let mut positions = Vec::with_capacity(atom_count);
        for found in 0..atom_count {
            let Some(atom_line) = self.read_line()? else {
                return Err(XyzError::TruncatedRecord {
                    start_line,
                    expected: atom_count,
                    found,
                });
            };
            let (symbol, position) = parse_atom_line(&atom_line).map_err(|kind| XyzError::Parse {
                line: self.line,
                kind,
            })?;
            symbols.push(symbol);
            positions.push(position);
        }

        Ok(Some(Configuration::new(metadata, symbols, positions)))
    }
}

impl<R: BufRead> Iterator for XyzReader<R> {
    type Item = Result<Configuration, XyzError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_record() {
            Ok(Some(config)) => Some(Ok(config)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Writes one configuration in normalized extended-XYZ form.
///
/// The header renders values so that parsing the output reproduces the same
/// typed mapping: floats always carry a decimal point, and string values
/// containing whitespace, `=`, quotes, or nothing at all are double-quoted.
pub fn write_configuration(
    config: &Configuration,
    writer: &mut impl Write,
) -> Result<(), XyzError> {
    writeln!(writer, "{}", config.atom_count())?;
    writeln!(writer, "{}", format_header(&config.metadata))?;
    for (symbol, position) in config.atoms() {
        writeln!(
            writer,
            "{} {:>15.8} {:>15.8} {:>15.8}",
            symbol, position.x, position.y, position.z
        )?;
    }
    Ok(())
}

/// Writes a sequence of configurations back-to-back.
pub fn write_all<'a>(
    configs: impl IntoIterator<Item = &'a Configuration>,
    writer: &mut impl Write,
) -> Result<(), XyzError> {
    for config in configs {
        write_configuration(config, writer)?;
    }
    Ok(())
}

fn format_header(metadata: &Metadata) -> String {
    metadata
        .iter()
        .map(|(key, value)| format!("{}={}", key, format_header_value(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_header_value(value: &ScalarValue) -> String {
    let rendered = value.to_string();
    let needs_quoting = matches!(value, ScalarValue::String(_))
        && (rendered.is_empty()
            || rendered
                .chars()
                .any(|c| c.is_whitespace() || c == '=' || c == '"' || c == '\''));
    if needs_quoting {
        format!("\"{}\"", rendered)
    } else {
        rendered
    }
}
