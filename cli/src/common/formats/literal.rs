//! # fileutils Literal Parser
//!
//! File: cli/src/common/formats/literal.rs
//!
//! ## Overview
//!
//! Parses one line of a "JSON-lines" file written by scripts that dump values
//! with `repr()`-style literals rather than strict JSON. The grammar is a
//! superset of JSON:
//!
//! - integers (`42`, `-7`, `1_000`, `0x1F`, `0o17`, `0b101`) and floats (`1.5`, `1.`, `.5`, `2e-3`)
//! - strings in single, double or triple quotes, with `r`/`u` prefixes, the
//!   usual backslash escapes, and implicit concatenation of adjacent strings
//! - `True`/`False`/`None` as well as `true`/`false`/`null`
//! - lists `[..]`, tuples `(..)` and sets `{a, b}` (all become JSON arrays;
//!   sets drop duplicates and keep first-seen order)
//! - mappings `{k: v}`; number/boolean/null keys are stringified the way
//!   `json.dumps` does it, container keys are rejected
//! - trailing commas and `#` comments
//!
//! The result is a `serde_json::Value`. Integers outside the `i64`/`u64` range
//! and non-finite floats are errors because JSON cannot carry them. Bytes
//! literals, f-strings and complex numbers are rejected as unsupported.
//!
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Why a literal could not be parsed. Offsets count characters from the start of the line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unknown name '{0}'")]
    UnknownName(String),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("integer '{0}' does not fit in 64 bits")]
    IntegerOverflow(String),

    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    #[error("unhashable mapping key at offset {0}")]
    UnhashableKey(usize),

    #[error("unsupported literal: {0}")]
    Unsupported(&'static str),

    #[error("unexpected trailing input at offset {0}")]
    TrailingInput(usize),

    #[error("too many nested containers at offset {0}")]
    TooDeep(usize),
}

/// Deepest container nesting accepted on one line.
pub const MAX_NESTING: usize = 200;

type ParseResult<T> = std::result::Result<T, LiteralError>;

/// Parses a single literal expression into a JSON value.
///
/// # Errors
///
/// Returns the first [`LiteralError`] encountered; there is no partial result.
pub fn parse_literal(text: &str) -> ParseResult<Value> {
    let mut parser = Parser::new(text);
    let value = parser.parse_value()?;
    parser.skip_trivia();
    match parser.peek() {
        None => Ok(value),
        Some(_) => Err(LiteralError::TrailingInput(parser.pos)),
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Skips whitespace and `#` comments.
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn unexpected(&self, found: char, offset: usize) -> LiteralError {
        LiteralError::UnexpectedChar { found, offset }
    }

    fn expect(&mut self, wanted: char) -> ParseResult<()> {
        match self.bump() {
            Some(c) if c == wanted => Ok(()),
            Some(c) => Err(self.unexpected(c, self.pos - 1)),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        self.skip_trivia();
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some(open @ ('[' | '(' | '{')) => self.parse_container(open),
            Some('+') | Some('-') => self.parse_signed(),
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(false),
            Some(_) if self.string_start().is_some() => self.parse_string_run(),
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_name(),
            Some(c) => Err(self.unexpected(c, self.pos)),
        }
    }

    /// Dispatches on the opening bracket, bounding recursion at [`MAX_NESTING`].
    fn parse_container(&mut self, open: char) -> ParseResult<Value> {
        if self.depth >= MAX_NESTING {
            return Err(LiteralError::TooDeep(self.pos));
        }
        self.depth += 1;
        let value = match open {
            '[' => {
                self.pos += 1;
                self.parse_items(']').map(Value::Array)
            }
            '(' => self.parse_paren(),
            _ => self.parse_brace(),
        };
        self.depth -= 1;
        value
    }

    /// Comma-separated values up to `close`, which is consumed. Allows a trailing comma.
    fn parse_items(&mut self, close: char) -> ParseResult<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(LiteralError::UnexpectedEnd),
                Some(c) if c == close => {
                    self.pos += 1;
                    return Ok(items);
                }
                Some(_) => {}
            }
            items.push(self.parse_value()?);
            self.skip_trivia();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(items),
                Some(c) => return Err(self.unexpected(c, self.pos - 1)),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    /// `()` and `(a, ...)` are tuples; `(a)` is just `a`.
    fn parse_paren(&mut self) -> ParseResult<Value> {
        self.pos += 1;
        self.skip_trivia();
        if self.peek() == Some(')') {
            self.pos += 1;
            return Ok(Value::Array(Vec::new()));
        }
        let first = self.parse_value()?;
        self.skip_trivia();
        match self.bump() {
            Some(')') => Ok(first),
            Some(',') => {
                let mut items = vec![first];
                items.extend(self.parse_items(')')?);
                Ok(Value::Array(items))
            }
            Some(c) => Err(self.unexpected(c, self.pos - 1)),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    /// Mappings and sets. `{}` is an empty mapping.
    fn parse_brace(&mut self) -> ParseResult<Value> {
        self.pos += 1;
        self.skip_trivia();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(Value::Object(Map::new()));
        }
        let key_offset = self.pos;
        let first = self.parse_value()?;
        self.skip_trivia();
        if self.peek() == Some(':') {
            self.pos += 1;
            let mut map = Map::new();
            let value = self.parse_value()?;
            map.insert(key_string(first, key_offset)?, value);
            loop {
                self.skip_trivia();
                match self.bump() {
                    Some('}') => return Ok(Value::Object(map)),
                    Some(',') => {}
                    Some(c) => return Err(self.unexpected(c, self.pos - 1)),
                    None => return Err(LiteralError::UnexpectedEnd),
                }
                self.skip_trivia();
                if self.peek() == Some('}') {
                    self.pos += 1;
                    return Ok(Value::Object(map));
                }
                let key_offset = self.pos;
                let key = self.parse_value()?;
                self.skip_trivia();
                self.expect(':')?;
                let value = self.parse_value()?;
                // Later duplicates overwrite earlier ones in place.
                map.insert(key_string(key, key_offset)?, value);
            }
        }

        let mut items = vec![first];
        match self.bump() {
            Some('}') => {}
            Some(',') => items.extend(self.parse_items('}')?),
            Some(c) => return Err(self.unexpected(c, self.pos - 1)),
            None => return Err(LiteralError::UnexpectedEnd),
        }
        let mut unique: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Ok(Value::Array(unique))
    }

    fn parse_name(&mut self) -> ParseResult<Value> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        match name.as_str() {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::Null),
            _ => Err(LiteralError::UnknownName(name)),
        }
    }

    /// A single leading `+` or `-` applied to a number.
    fn parse_signed(&mut self) -> ParseResult<Value> {
        let negative = self.bump() == Some('-');
        self.skip_trivia();
        match self.peek() {
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(negative),
            Some(c) => Err(self.unexpected(c, self.pos)),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn parse_number(&mut self, negative: bool) -> ParseResult<Value> {
        let start = self.pos;
        let radix_prefixed = self.peek() == Some('0')
            && matches!(self.peek_at(1), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'));
        let mut prev = '\0';
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '+' || c == '-') && matches!(prev, 'e' | 'E');
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || (exponent_sign && !radix_prefixed) {
                prev = c;
                self.pos += 1;
            } else {
                break;
            }
        }
        let token: String = self.chars[start..self.pos].iter().collect();
        let cleaned = token.replace('_', "");
        let lower = cleaned.to_ascii_lowercase();

        if lower.ends_with('j') && !radix_prefixed {
            return Err(LiteralError::Unsupported("complex number"));
        }

        if radix_prefixed {
            let radix = match lower.as_bytes()[1] {
                b'x' => 16,
                b'o' => 8,
                _ => 2,
            };
            let magnitude = u64::from_str_radix(&cleaned[2..], radix).map_err(|_| {
                if cleaned[2..].chars().all(|c| c.is_digit(radix)) && cleaned.len() > 2 {
                    LiteralError::IntegerOverflow(token.clone())
                } else {
                    LiteralError::InvalidNumber(token.clone())
                }
            })?;
            return signed_integer(magnitude, negative, &token);
        }

        if lower.contains('.') || lower.contains('e') {
            let parsed: f64 = cleaned
                .parse()
                .map_err(|_| LiteralError::InvalidNumber(token.clone()))?;
            let value = if negative { -parsed } else { parsed };
            return Number::from_f64(value)
                .map(Value::Number)
                .ok_or(LiteralError::InvalidNumber(token));
        }

        if !cleaned.chars().all(|c| c.is_ascii_digit()) || cleaned.is_empty() {
            return Err(LiteralError::InvalidNumber(token));
        }
        // Decimal literals other than zero may not have leading zeros.
        if cleaned.len() > 1 && cleaned.starts_with('0') && cleaned.chars().any(|c| c != '0') {
            return Err(LiteralError::InvalidNumber(token));
        }
        let magnitude: u64 = cleaned
            .parse()
            .map_err(|_| LiteralError::IntegerOverflow(token.clone()))?;
        signed_integer(magnitude, negative, &token)
    }

    /// Length of the string prefix (`r`, `u`, `b`, `rb`, ...) if a string literal starts here.
    fn string_start(&self) -> Option<usize> {
        let mut len = 0;
        while len < 2 {
            match self.peek_at(len) {
                Some(c) if "rRuUbBfF".contains(c) => len += 1,
                _ => break,
            }
        }
        match self.peek_at(len) {
            Some('"' | '\'') => Some(len),
            _ => None,
        }
    }

    /// One or more adjacent string literals, concatenated.
    fn parse_string_run(&mut self) -> ParseResult<Value> {
        let mut out = String::new();
        while let Some(prefix_len) = self.string_start() {
            let prefix: String = self.chars[self.pos..self.pos + prefix_len]
                .iter()
                .collect::<String>()
                .to_ascii_lowercase();
            if prefix.contains('b') {
                return Err(LiteralError::Unsupported("bytes literal"));
            }
            if prefix.contains('f') {
                return Err(LiteralError::Unsupported("f-string"));
            }
            self.pos += prefix_len;
            self.parse_quoted(prefix.contains('r'), &mut out)?;
            self.skip_trivia();
        }
        Ok(Value::String(out))
    }

    fn parse_quoted(&mut self, raw: bool, out: &mut String) -> ParseResult<()> {
        let start = self.pos;
        let quote = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.pos += 2;
        }
        loop {
            let c = self
                .bump()
                .ok_or(LiteralError::UnterminatedString(start))?;
            if c == quote {
                if !triple {
                    return Ok(());
                }
                if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                    self.pos += 2;
                    return Ok(());
                }
                out.push(c);
            } else if c == '\n' && !triple {
                return Err(LiteralError::UnterminatedString(start));
            } else if c == '\\' {
                if raw {
                    // Raw strings keep the backslash and the escaped character.
                    let next = self
                        .bump()
                        .ok_or(LiteralError::UnterminatedString(start))?;
                    out.push('\\');
                    out.push(next);
                } else {
                    self.parse_escape(out, start)?;
                }
            } else {
                out.push(c);
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String, string_start: usize) -> ParseResult<()> {
        let escape_offset = self.pos - 1;
        let c = self
            .bump()
            .ok_or(LiteralError::UnterminatedString(string_start))?;
        match c {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0b}'),
            '0'..='7' => {
                let mut value = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            self.pos += 1;
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).ok_or(LiteralError::InvalidEscape(escape_offset))?);
            }
            'x' => out.push(self.read_hex(2, escape_offset)?),
            'u' => out.push(self.read_hex(4, escape_offset)?),
            'U' => out.push(self.read_hex(8, escape_offset)?),
            'N' => return Err(LiteralError::Unsupported("named unicode escape")),
            // Unknown escapes are kept as written.
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn read_hex(&mut self, digits: usize, escape_offset: usize) -> ParseResult<char> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let digit = self
                .peek()
                .and_then(|d| d.to_digit(16))
                .ok_or(LiteralError::InvalidEscape(escape_offset))?;
            value = value * 16 + digit;
            self.pos += 1;
        }
        char::from_u32(value).ok_or(LiteralError::InvalidEscape(escape_offset))
    }
}

fn signed_integer(magnitude: u64, negative: bool, token: &str) -> ParseResult<Value> {
    if !negative {
        return Ok(Value::from(magnitude));
    }
    let value = -i128::from(magnitude);
    i64::try_from(value)
        .map(Value::from)
        .map_err(|_| LiteralError::IntegerOverflow(format!("-{token}")))
}

/// JSON object key for a parsed mapping key.
fn key_string(key: Value, offset: usize) -> ParseResult<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Array(_) | Value::Object(_) => Err(LiteralError::UnhashableKey(offset)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(parse_literal("1"), Ok(json!(1)));
        assert_eq!(parse_literal("'a'"), Ok(json!("a")));
        assert_eq!(parse_literal("\"a\""), Ok(json!("a")));
        assert_eq!(parse_literal("True"), Ok(json!(true)));
        assert_eq!(parse_literal("false"), Ok(json!(false)));
        assert_eq!(parse_literal("None"), Ok(json!(null)));
        assert_eq!(parse_literal("  -3  "), Ok(json!(-3)));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_literal("0x1F"), Ok(json!(31)));
        assert_eq!(parse_literal("-0b101"), Ok(json!(-5)));
        assert_eq!(parse_literal("0o17"), Ok(json!(15)));
        assert_eq!(parse_literal("1_000"), Ok(json!(1000)));
        assert_eq!(parse_literal("1e3"), Ok(json!(1000.0)));
        assert_eq!(parse_literal("2.5e-1"), Ok(json!(0.25)));
        assert_eq!(parse_literal(".5"), Ok(json!(0.5)));
        assert_eq!(parse_literal("-2."), Ok(json!(-2.0)));
        assert_eq!(parse_literal("0"), Ok(json!(0)));
        assert_eq!(parse_literal("007"), Err(LiteralError::InvalidNumber("007".into())));
    }

    #[test]
    fn test_integer_limits() {
        assert_eq!(
            parse_literal("18446744073709551615"),
            Ok(json!(18446744073709551615u64))
        );
        assert_eq!(parse_literal("-9223372036854775808"), Ok(json!(i64::MIN)));
        assert_eq!(
            parse_literal("99999999999999999999"),
            Err(LiteralError::IntegerOverflow("99999999999999999999".into()))
        );
        assert!(matches!(
            parse_literal("-9223372036854775809"),
            Err(LiteralError::IntegerOverflow(_))
        ));
    }

    #[test]
    fn test_containers() {
        assert_eq!(parse_literal("[1, 2]"), Ok(json!([1, 2])));
        assert_eq!(parse_literal("[1, 2,]"), Ok(json!([1, 2])));
        assert_eq!(parse_literal("(1, 'x')"), Ok(json!([1, "x"])));
        assert_eq!(parse_literal("(1,)"), Ok(json!([1])));
        assert_eq!(parse_literal("()"), Ok(json!([])));
        assert_eq!(parse_literal("(5)"), Ok(json!(5)));
        assert_eq!(parse_literal("{}"), Ok(json!({})));
        assert_eq!(parse_literal("{1, 2, 2, 3}"), Ok(json!([1, 2, 3])));
        assert_eq!(
            parse_literal("{'a': True, 'b': None, 'c': [1, 2.5, -3], 'd': {'e': ()}}"),
            Ok(json!({"a": true, "b": null, "c": [1, 2.5, -3], "d": {"e": []}}))
        );
    }

    #[test]
    fn test_strict_json_is_accepted() {
        let line = r#"{"name": "crowd", "boxes": [[1, 2, 3, 4]], "score": 0.9, "ok": true, "tag": null}"#;
        assert_eq!(
            parse_literal(line),
            Ok(json!({"name": "crowd", "boxes": [[1, 2, 3, 4]], "score": 0.9, "ok": true, "tag": null}))
        );
    }

    #[test]
    fn test_mapping_keys_are_stringified() {
        let value = parse_literal("{1: 'a', 2.5: 'b', None: 'c', True: 'd'}").unwrap();
        assert_eq!(value, json!({"1": "a", "2.5": "b", "null": "c", "true": "d"}));
        assert_eq!(
            parse_literal("{[1]: 2}"),
            Err(LiteralError::UnhashableKey(1))
        );
    }

    #[test]
    fn test_mapping_preserves_insertion_order() {
        let value = parse_literal("{'z': 1, 'a': 2, 'z': 3}").unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(value["z"], json!(3));
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            parse_literal(r"'a\nb\x41é\'q'"),
            Ok(json!("a\nbAé'q"))
        );
        assert_eq!(parse_literal(r"r'a\nb'"), Ok(json!("a\\nb")));
        assert_eq!(parse_literal(r"u'plain'"), Ok(json!("plain")));
        assert_eq!(parse_literal("'ab' \"cd\""), Ok(json!("abcd")));
        assert_eq!(parse_literal("'''it's'''"), Ok(json!("it's")));
        assert_eq!(parse_literal(r"'\101'"), Ok(json!("A")));
        assert_eq!(parse_literal(r"'\d'"), Ok(json!("\\d")));
        assert_eq!(parse_literal("'日本語'"), Ok(json!("日本語")));
    }

    #[test]
    fn test_comments_are_ignored() {
        assert_eq!(parse_literal("[1, 2]  # trailing"), Ok(json!([1, 2])));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_literal(""), Err(LiteralError::UnexpectedEnd));
        assert_eq!(parse_literal("[1, 2"), Err(LiteralError::UnexpectedEnd));
        assert_eq!(parse_literal("foo"), Err(LiteralError::UnknownName("foo".into())));
        assert_eq!(parse_literal("1 2"), Err(LiteralError::TrailingInput(2)));
        assert_eq!(parse_literal("'abc"), Err(LiteralError::UnterminatedString(0)));
        assert_eq!(
            parse_literal("b'x'"),
            Err(LiteralError::Unsupported("bytes literal"))
        );
        assert_eq!(
            parse_literal("1j"),
            Err(LiteralError::Unsupported("complex number"))
        );
        assert_eq!(
            parse_literal("[1,,2]"),
            Err(LiteralError::UnexpectedChar { found: ',', offset: 3 })
        );
        assert_eq!(parse_literal(r"'\x4'"), Err(LiteralError::InvalidEscape(1)));
    }

    #[test]
    fn test_nesting_is_bounded() {
        let nested = |depth: usize| "[".repeat(depth) + &"]".repeat(depth);
        assert!(parse_literal(&nested(MAX_NESTING)).is_ok());
        assert_eq!(
            parse_literal(&nested(MAX_NESTING + 1)),
            Err(LiteralError::TooDeep(MAX_NESTING))
        );
        assert_eq!(
            parse_literal(&nested(100_000)),
            Err(LiteralError::TooDeep(MAX_NESTING))
        );

        let mixed = "({[".repeat(100_000);
        assert_eq!(parse_literal(&mixed), Err(LiteralError::TooDeep(MAX_NESTING)));
        // Siblings do not accumulate depth.
        let wide = format!("[{}]", vec!["[[1]]"; 1_000].join(", "));
        assert!(parse_literal(&wide).is_ok());
    }
}
