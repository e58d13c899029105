use tracing::{debug, trace};

use crate::constants::{is_json_whitespace, is_number_char};
use crate::num::number::number_from_literal;
use crate::table::HashTable;
use crate::types::{Constant, Value};
use crate::{Error, ParseOptions, Result};

use super::cursor::{Cursor, Source};

/// Recursive-descent JSON parser.
///
/// Every production starts at the cursor's current character and either
/// consumes its whole construct or fails. A failed parser is not meant to be
/// resumed.
pub struct Parser<S> {
    cursor: Cursor<S>,
    max_depth: usize,
    object_capacity: usize,
    decode_escapes: bool,
    depth: usize,
}

impl<S: Source> Parser<S> {
    pub fn new(source: S, options: &ParseOptions) -> Self {
        Self::with_cursor(Cursor::new(source), options)
    }

    pub fn with_cursor(cursor: Cursor<S>, options: &ParseOptions) -> Self {
        Self {
            cursor,
            max_depth: options.max_depth,
            object_capacity: options.object_capacity,
            decode_escapes: options.decode_escapes,
            depth: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// One value surrounded by optional whitespace, then end of input.
    pub fn parse_document(&mut self) -> Result<Value> {
        debug!("parsing document");
        let value = self.parse_value()?;
        if let Some(ch) = self.skip_whitespace()? {
            return Err(self.error_here(format!("characters remain at end: {ch}")));
        }
        debug!(chars = self.offset(), "parsed document");
        Ok(value)
    }

    pub fn parse_value(&mut self) -> Result<Value> {
        match self.skip_whitespace()? {
            None => Err(self.error_here("unexpected end of file")),
            Some('"') => self.parse_string().map(Value::Str),
            Some('{') => self.parse_object().map(Value::Object),
            Some('[') => self.parse_array().map(Value::Array),
            Some(ch) if ch.is_ascii_digit() || ch == '-' => self.parse_number(),
            Some('t' | 'f' | 'n') => self.parse_constant().map(Value::Const),
            Some(ch) => Err(self.error_here(format!("unexpected character: {ch}"))),
        }
    }

    /// A double-quoted string. Escapes are kept verbatim unless
    /// `decode_escapes` is set; either way `\"` does not end the string.
    pub fn parse_string(&mut self) -> Result<String> {
        self.expect_char('"')?;
        let mut out = String::new();
        loop {
            match self.cursor.advance()? {
                None => return Err(self.error_here("unterminated string")),
                Some('"') => return Ok(out),
                Some('\\') if self.decode_escapes => self.parse_escape(&mut out)?,
                Some('\\') => {
                    out.push('\\');
                    match self.cursor.advance()? {
                        Some(ch) => out.push(ch),
                        None => return Err(self.error_here("unterminated string")),
                    }
                }
                Some(ch) => out.push(ch),
            }
        }
    }

    pub fn parse_object(&mut self) -> Result<HashTable> {
        let start = self.offset();
        self.enter(start)?;
        self.expect_char('{')?;
        trace!(offset = start, depth = self.depth, "parsing object");

        let mut table = HashTable::with_capacity(self.object_capacity);
        match self.skip_whitespace()? {
            None => return Err(self.error_here("unterminated object")),
            Some('}') => {
                self.cursor.advance()?;
                self.leave();
                return Ok(table);
            }
            Some(_) => {}
        }

        loop {
            match self.skip_whitespace()? {
                None => return Err(self.error_here("unterminated object")),
                Some('"') => {}
                Some(ch) => return Err(self.error_here(format!("expected string key, found {ch}"))),
            }
            let key = self.parse_string()?;

            match self.skip_whitespace()? {
                None => return Err(self.error_here("unterminated object")),
                Some(':') => {
                    self.cursor.advance()?;
                }
                Some(_) => return Err(self.error_here("expected ':' after key")),
            }

            if self.skip_whitespace()?.is_none() {
                return Err(self.error_here("unterminated object"));
            }
            let value = self.parse_value()?;
            if let Some(previous) = table.set(key, value) {
                trace!(offset = self.offset(), ?previous, "duplicate key overwritten");
            }

            match self.skip_whitespace()? {
                None => return Err(self.error_here("unterminated object")),
                Some(',') => {
                    self.cursor.advance()?;
                }
                Some('}') => {
                    self.cursor.advance()?;
                    break;
                }
                Some(_) => return Err(self.error_here("expected ',' or '}'")),
            }
        }

        trace!(offset = self.offset(), entries = table.len(), "parsed object");
        self.leave();
        Ok(table)
    }

    pub fn parse_array(&mut self) -> Result<Vec<Value>> {
        let start = self.offset();
        self.enter(start)?;
        self.expect_char('[')?;
        trace!(offset = start, depth = self.depth, "parsing array");

        let mut items = Vec::new();
        match self.skip_whitespace()? {
            None => return Err(self.error_here("unterminated array")),
            Some(']') => {
                self.cursor.advance()?;
                self.leave();
                return Ok(items);
            }
            Some(_) => {}
        }

        loop {
            if self.skip_whitespace()?.is_none() {
                return Err(self.error_here("unterminated array"));
            }
            items.push(self.parse_value()?);

            match self.skip_whitespace()? {
                None => return Err(self.error_here("unterminated array")),
                Some(',') => {
                    self.cursor.advance()?;
                }
                Some(']') => {
                    self.cursor.advance()?;
                    break;
                }
                Some(_) => return Err(self.error_here("expected ',' or ']'")),
            }
        }

        trace!(offset = self.offset(), items = items.len(), "parsed array");
        self.leave();
        Ok(items)
    }

    /// Greedy and non-strict: digits, `.`, `e`, `E` and `-` in any order.
    pub fn parse_number(&mut self) -> Result<Value> {
        let start = self.offset();
        let mut text = String::new();
        while let Some(ch) = self.cursor.peek()? {
            if !is_number_char(ch) {
                break;
            }
            text.push(ch);
            self.cursor.advance()?;
        }
        number_from_literal(&text)
            .ok_or_else(|| Error::parse(format!("invalid number: {text}"), start))
    }

    pub fn parse_constant(&mut self) -> Result<Constant> {
        let start = self.offset();
        let mut text = String::new();
        while let Some(ch) = self.cursor.peek()? {
            if !ch.is_alphabetic() {
                break;
            }
            text.push(ch);
            self.cursor.advance()?;
        }
        Constant::from_literal(&text)
            .ok_or_else(|| Error::parse(format!("invalid constant: {text}"), start))
    }

    /// Skip JSON whitespace and peek the next character without consuming it.
    pub fn skip_whitespace(&mut self) -> Result<Option<char>> {
        while let Some(ch) = self.cursor.peek()? {
            if !is_json_whitespace(ch) {
                return Ok(Some(ch));
            }
            self.cursor.advance()?;
        }
        Ok(None)
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let start = self.offset() - 1;
        let decoded = match self.cursor.advance()? {
            None => return Err(self.error_here("unterminated string")),
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => self.parse_unicode_escape(start)?,
            Some(ch) => return Err(Error::parse(format!("invalid escape: \\{ch}"), start)),
        };
        out.push(decoded);
        Ok(())
    }

    fn parse_unicode_escape(&mut self, start: usize) -> Result<char> {
        let high = self.read_hex4(start)?;
        let code = match high {
            0xd800..=0xdbff => {
                if self.cursor.advance()? != Some('\\') || self.cursor.advance()? != Some('u') {
                    return Err(Error::parse("invalid escape: unpaired surrogate", start));
                }
                let low = self.read_hex4(start)?;
                if !(0xdc00..=0xdfff).contains(&low) {
                    return Err(Error::parse("invalid escape: unpaired surrogate", start));
                }
                0x10000 + ((high - 0xd800) << 10) + (low - 0xdc00)
            }
            0xdc00..=0xdfff => {
                return Err(Error::parse("invalid escape: unpaired surrogate", start));
            }
            other => other,
        };
        char::from_u32(code).ok_or_else(|| Error::parse("invalid escape: bad code point", start))
    }

    fn read_hex4(&mut self, start: usize) -> Result<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let ch = match self.cursor.advance()? {
                Some(ch) => ch,
                None => return Err(self.error_here("unterminated string")),
            };
            let digit = ch
                .to_digit(16)
                .ok_or_else(|| Error::parse(format!("invalid escape: bad hex digit {ch}"), start))?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.cursor.peek()? {
            Some(ch) if ch == expected => {
                self.cursor.advance()?;
                Ok(())
            }
            Some(ch) => Err(self.error_here(format!("expected '{expected}', found {ch}"))),
            None => Err(self.error_here("unexpected end of file")),
        }
    }

    fn enter(&mut self, offset: usize) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::parse("nesting too deep", offset));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn error_here(&self, message: impl Into<String>) -> Error {
        Error::parse(message, self.offset())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::decode::cursor::StrSource;

    fn parser(input: &str) -> Parser<StrSource<'_>> {
        Parser::new(StrSource::new(input), &ParseOptions::default())
    }

    fn int(n: i64) -> Value {
        Value::from(n)
    }

    #[rstest]
    fn test_skip_whitespace_peeks_without_consuming() {
        let mut p = parser(" \n\r\tx");
        assert_eq!(p.skip_whitespace().unwrap(), Some('x'));
        assert_eq!(p.offset(), 4);
        assert_eq!(p.skip_whitespace().unwrap(), Some('x'));
        assert_eq!(p.offset(), 4);

        let mut p = parser("   ");
        assert_eq!(p.skip_whitespace().unwrap(), None);
        assert_eq!(p.offset(), 3);
    }

    #[rstest]
    fn test_parse_string_verbatim() {
        let mut p = parser(r#""a\nb\"c" rest"#);
        assert_eq!(p.parse_string().unwrap(), r#"a\nb\"c"#);
        assert_eq!(p.offset(), 9);
    }

    #[rstest]
    fn test_parse_string_unterminated() {
        let err = parser(r#""abc"#).parse_string().unwrap_err();
        assert_eq!(err.message(), "unterminated string");
        assert_eq!(err.offset(), Some(4));

        let err = parser(r#""abc\"#).parse_string().unwrap_err();
        assert_eq!(err.message(), "unterminated string");
    }

    #[rstest]
    fn test_parse_string_decodes_escapes_when_enabled() {
        let options = ParseOptions::default().with_decode_escapes(true);
        let input = r#""q\" b\\ s\/ \b\f\n\r\t é 💩""#;
        let mut p = Parser::new(StrSource::new(input), &options);
        assert_eq!(
            p.parse_string().unwrap(),
            "q\" b\\ s/ \u{8}\u{c}\n\r\t é 💩"
        );
    }

    #[rstest]
    #[case(r#""\x""#, "invalid escape: \\x")]
    #[case(r#""\u12g4""#, "invalid escape: bad hex digit g")]
    #[case(r#""\udc00""#, "invalid escape: unpaired surrogate")]
    #[case(r#""\ud800x""#, "invalid escape: unpaired surrogate")]
    #[case(r#""\ud800A""#, "invalid escape: unpaired surrogate")]
    fn test_parse_string_rejects_bad_escapes(#[case] input: &str, #[case] message: &str) {
        let options = ParseOptions::default().with_decode_escapes(true);
        let err = Parser::new(StrSource::new(input), &options)
            .parse_string()
            .unwrap_err();
        assert_eq!(err.message(), message);
        assert_eq!(err.offset(), Some(1));
    }

    #[rstest]
    #[case("0", int(0))]
    #[case("-12", int(-12))]
    #[case("3.25", Value::Real(3.25))]
    #[case("1e2", Value::Real(100.0))]
    #[case("-2E-2", Value::Real(-0.02))]
    fn test_parse_number(#[case] input: &str, #[case] expected: Value) {
        assert_eq!(parser(input).parse_number().unwrap(), expected);
    }

    #[rstest]
    fn test_parse_number_pushes_back_terminator() {
        let mut p = parser("42,");
        assert_eq!(p.parse_number().unwrap(), int(42));
        assert_eq!(p.offset(), 2);
        assert_eq!(p.skip_whitespace().unwrap(), Some(','));
    }

    #[rstest]
    fn test_parse_number_invalid_reports_start() {
        let mut p = parser("[1.2.3]");
        p.cursor.advance().unwrap();
        let err = p.parse_number().unwrap_err();
        assert_eq!(err.message(), "invalid number: 1.2.3");
        assert_eq!(err.offset(), Some(1));
    }

    #[rstest]
    #[case("true", Constant::True)]
    #[case("false", Constant::False)]
    #[case("null", Constant::Null)]
    fn test_parse_constant(#[case] input: &str, #[case] expected: Constant) {
        assert_eq!(parser(input).parse_constant().unwrap(), expected);
    }

    #[rstest]
    fn test_parse_constant_invalid() {
        let err = parser("nope]").parse_constant().unwrap_err();
        assert_eq!(err.message(), "invalid constant: nope");
        assert_eq!(err.offset(), Some(0));

        let err = parser("trueish").parse_constant().unwrap_err();
        assert_eq!(err.message(), "invalid constant: trueish");
    }

    #[rstest]
    fn test_parse_constant_stops_at_non_letter() {
        let mut p = parser("null]");
        assert_eq!(p.parse_constant().unwrap(), Constant::Null);
        assert_eq!(p.offset(), 4);
    }

    #[rstest]
    fn test_parse_array_nested() {
        let value = parser("[1, [2, []], \"x\"]").parse_array().unwrap();
        assert_eq!(
            value,
            vec![
                int(1),
                Value::Array(vec![int(2), Value::Array(vec![])]),
                Value::from("x"),
            ]
        );
    }

    #[rstest]
    fn test_parse_object_duplicate_key_last_wins() {
        let table = parser(r#"{"x": "y", "x": "z"}"#).parse_object().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("x"), Some(&Value::from("z")));
    }

    #[rstest]
    fn test_parse_object_uses_configured_capacity() {
        let options = ParseOptions::default().with_object_capacity(64);
        let table = Parser::new(StrSource::new(r#"{"a": 1}"#), &options)
            .parse_object()
            .unwrap();
        assert_eq!(table.capacity(), 64);
    }

    #[rstest]
    fn test_depth_limit() {
        let options = ParseOptions::default().with_max_depth(2);
        let ok = Parser::new(StrSource::new("[[1]]"), &options).parse_document();
        assert!(ok.is_ok());

        let err = Parser::new(StrSource::new("[[[1]]]"), &options)
            .parse_document()
            .unwrap_err();
        assert_eq!(err.message(), "nesting too deep");
        assert_eq!(err.offset(), Some(2));

        let err = Parser::new(StrSource::new(r#"{"a": {"b": {}}}"#), &options)
            .parse_document()
            .unwrap_err();
        assert_eq!(err.message(), "nesting too deep");
        assert_eq!(err.offset(), Some(12));
    }

    #[rstest]
    fn test_depth_resets_between_siblings() {
        let options = ParseOptions::default().with_max_depth(2);
        let input = "[[1], [2], [3], [4]]";
        let value = Parser::new(StrSource::new(input), &options)
            .parse_document()
            .unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(4));
    }
}
