//! Table extraction from the departure page.
//!
//! The page is tag soup, so the tokenizer runs with every well-formedness
//! check it allows turned off. Only `<tr>`, `<td>`, text and `</html>` matter;
//! everything else is skipped.
//!
//! Limitations of reading HTML with an XML tokenizer:
//! - A bare `<` inside text (`a < b`) opens a tag, so the rest of that text
//!   up to the next `>` is lost. The page escapes it as `&lt;` in practice.
//! - Named entities are resolved from a fixed table of the XML, Latin-1 and
//!   common typographic names. Anything else is left as written.

use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::Event;
use tracing::warn;

use super::error::DepartureVisionError;

/// Rows of trimmed cell text, in page order. Row 0 is the header.
pub type Table = Vec<Vec<String>>;

/// The tokens the extractor cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    RowStart,
    CellStart,
    Text(String),
    HtmlEnd,
    Eof,
    Other,
}

/// Pull-based tokenizer over an HTML stream.
struct Tokens<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.check_comments = false;

        Self {
            reader,
            buf: Vec::new(),
        }
    }

    fn next_token(&mut self) -> Result<Token, quick_xml::Error> {
        self.buf.clear();
        let token = match self.reader.read_event_into(&mut self.buf)? {
            Event::Start(tag) => {
                let name = tag.name();
                if name.as_ref().eq_ignore_ascii_case(b"tr") {
                    Token::RowStart
                } else if name.as_ref().eq_ignore_ascii_case(b"td") {
                    Token::CellStart
                } else {
                    Token::Other
                }
            }
            Event::End(tag) if tag.name().as_ref().eq_ignore_ascii_case(b"html") => Token::HtmlEnd,
            Event::Text(text) => Token::Text(decode_text(&text)),
            Event::Eof => Token::Eof,
            _ => Token::Other,
        };
        Ok(token)
    }
}

/// Decode raw text, resolving HTML entities where possible.
fn decode_text(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    match unescape_with(&raw, resolve_html_entity) {
        Ok(text) => text.into_owned(),
        Err(_) => raw.to_string(),
    }
}

fn resolve_html_entity(entity: &str) -> Option<&'static str> {
    let resolved = match entity {
        "nbsp" => "\u{a0}",
        "iexcl" => "\u{a1}",
        "cent" => "\u{a2}",
        "pound" => "\u{a3}",
        "curren" => "\u{a4}",
        "yen" => "\u{a5}",
        "brvbar" => "\u{a6}",
        "sect" => "\u{a7}",
        "uml" => "\u{a8}",
        "copy" => "\u{a9}",
        "ordf" => "\u{aa}",
        "laquo" => "\u{ab}",
        "not" => "\u{ac}",
        "shy" => "\u{ad}",
        "reg" => "\u{ae}",
        "macr" => "\u{af}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "sup2" => "\u{b2}",
        "sup3" => "\u{b3}",
        "acute" => "\u{b4}",
        "micro" => "\u{b5}",
        "para" => "\u{b6}",
        "middot" => "\u{b7}",
        "cedil" => "\u{b8}",
        "sup1" => "\u{b9}",
        "ordm" => "\u{ba}",
        "raquo" => "\u{bb}",
        "frac14" => "\u{bc}",
        "frac12" => "\u{bd}",
        "frac34" => "\u{be}",
        "iquest" => "\u{bf}",
        "Agrave" => "\u{c0}",
        "Aacute" => "\u{c1}",
        "Acirc" => "\u{c2}",
        "Atilde" => "\u{c3}",
        "Auml" => "\u{c4}",
        "Aring" => "\u{c5}",
        "AElig" => "\u{c6}",
        "Ccedil" => "\u{c7}",
        "Egrave" => "\u{c8}",
        "Eacute" => "\u{c9}",
        "Ecirc" => "\u{ca}",
        "Euml" => "\u{cb}",
        "Igrave" => "\u{cc}",
        "Iacute" => "\u{cd}",
        "Icirc" => "\u{ce}",
        "Iuml" => "\u{cf}",
        "ETH" => "\u{d0}",
        "Ntilde" => "\u{d1}",
        "Ograve" => "\u{d2}",
        "Oacute" => "\u{d3}",
        "Ocirc" => "\u{d4}",
        "Otilde" => "\u{d5}",
        "Ouml" => "\u{d6}",
        "times" => "\u{d7}",
        "Oslash" => "\u{d8}",
        "Ugrave" => "\u{d9}",
        "Uacute" => "\u{da}",
        "Ucirc" => "\u{db}",
        "Uuml" => "\u{dc}",
        "Yacute" => "\u{dd}",
        "THORN" => "\u{de}",
        "szlig" => "\u{df}",
        "agrave" => "\u{e0}",
        "aacute" => "\u{e1}",
        "acirc" => "\u{e2}",
        "atilde" => "\u{e3}",
        "auml" => "\u{e4}",
        "aring" => "\u{e5}",
        "aelig" => "\u{e6}",
        "ccedil" => "\u{e7}",
        "egrave" => "\u{e8}",
        "eacute" => "\u{e9}",
        "ecirc" => "\u{ea}",
        "euml" => "\u{eb}",
        "igrave" => "\u{ec}",
        "iacute" => "\u{ed}",
        "icirc" => "\u{ee}",
        "iuml" => "\u{ef}",
        "eth" => "\u{f0}",
        "ntilde" => "\u{f1}",
        "ograve" => "\u{f2}",
        "oacute" => "\u{f3}",
        "ocirc" => "\u{f4}",
        "otilde" => "\u{f5}",
        "ouml" => "\u{f6}",
        "divide" => "\u{f7}",
        "oslash" => "\u{f8}",
        "ugrave" => "\u{f9}",
        "uacute" => "\u{fa}",
        "ucirc" => "\u{fb}",
        "uuml" => "\u{fc}",
        "yacute" => "\u{fd}",
        "thorn" => "\u{fe}",
        "yuml" => "\u{ff}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201a}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "prime" => "\u{2032}",
        "lsaquo" => "\u{2039}",
        "rsaquo" => "\u{203a}",
        "euro" => "\u{20ac}",
        "trade" => "\u{2122}",
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "rarr" => "\u{2192}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",
        _ => return resolve_predefined_entity(entity),
    };
    Some(resolved)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No cells in the current row yet.
    SeekingRow,
    /// The current row has at least one cell.
    InRow,
    /// A `<td>` was just opened; only an immediate text token becomes a cell.
    InCell,
}

/// Accumulates rows as tokens arrive.
#[derive(Debug)]
struct TableBuilder {
    state: State,
    row: Vec<String>,
    table: Table,
}

impl TableBuilder {
    fn new() -> Self {
        Self {
            state: State::SeekingRow,
            row: Vec::new(),
            table: Vec::new(),
        }
    }

    fn feed(&mut self, token: Token) {
        if self.state == State::InCell {
            self.state = self.resting_state();
            if let Token::Text(text) = &token {
                self.push_cell(text);
                return;
            }
            // Any other token is handled as if the cell had not been opened.
        }

        match token {
            Token::RowStart => {
                self.flush_row();
                self.state = State::SeekingRow;
            }
            Token::CellStart => self.state = State::InCell,
            Token::Text(_) | Token::HtmlEnd | Token::Eof | Token::Other => {}
        }
    }

    fn push_cell(&mut self, text: &str) {
        self.row.push(text.trim().to_string());
        self.state = State::InRow;
    }

    fn resting_state(&self) -> State {
        if self.row.is_empty() {
            State::SeekingRow
        } else {
            State::InRow
        }
    }

    fn flush_row(&mut self) {
        if !self.row.is_empty() {
            self.table.push(std::mem::take(&mut self.row));
        }
    }

    fn finish(mut self) -> Table {
        self.flush_row();
        self.table
    }
}

/// Extract the departure grid from an HTML page.
///
/// Scanning stops at `</html>` or end of input, and the last row is kept even
/// if it was never closed. Malformed markup ends the scan early with the rows
/// read so far; only a failure to read the input is an error.
pub fn extract_table<R: BufRead>(input: R) -> Result<Table, DepartureVisionError> {
    let mut tokens = Tokens::new(input);
    let mut builder = TableBuilder::new();

    loop {
        match tokens.next_token() {
            Ok(Token::HtmlEnd | Token::Eof) => break,
            Ok(token) => builder.feed(token),
            Err(quick_xml::Error::Io(e)) => return Err(DepartureVisionError::Read(e)),
            Err(e) => {
                warn!(error = %e, "malformed departure page, keeping rows read so far");
                break;
            }
        }
    }

    Ok(builder.finish())
}
