use std::{iter::Peekable, str::CharIndices};

use derive_more::with_trait::{Display, Error};

use crate::value::{Object, Value};

/// Error while parsing a constant value literal.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum ParseError {
    /// An unexpected character was found at the given byte offset.
    #[display("Unexpected character \"{_0}\" at {_1}")]
    UnexpectedCharacter(#[error(not(source))] char, usize),

    /// The input ended before the literal was complete.
    #[display("Unexpected end of input")]
    UnexpectedEndOfFile,

    /// A numeric literal could not be represented.
    #[display("Invalid number \"{_0}\"")]
    InvalidNumber(#[error(not(source))] String),

    /// An unknown escape sequence was found in a string literal.
    #[display("Unknown escape sequence \"{_0}\" in string")]
    UnknownEscapeSequence(#[error(not(source))] String),

    /// An input object literal names the same field twice.
    #[display("Duplicate field \"{_0}\" in object literal")]
    DuplicateField(#[error(not(source))] String),

    /// Variables cannot appear in constant literals.
    #[display("Unexpected variable \"${_0}\" in constant value")]
    UnexpectedVariable(#[error(not(source))] String),
}

/// Parses a constant GraphQL value literal, such as a declared default value.
///
/// The whole input must be consumed, except for surrounding whitespace.
pub fn parse_value_literal(source: &str) -> Result<Value, ParseError> {
    let mut parser = LiteralParser {
        chars: source.char_indices().peekable(),
        source,
    };
    let value = parser.parse_value()?;
    parser.skip_ignored();
    match parser.chars.next() {
        None => Ok(value),
        Some((pos, c)) => Err(ParseError::UnexpectedCharacter(c, pos)),
    }
}

struct LiteralParser<'a> {
    chars: Peekable<CharIndices<'a>>,
    source: &'a str,
}

impl<'a> LiteralParser<'a> {
    fn skip_ignored(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            match c {
                ' ' | '\t' | '\n' | '\r' | ',' | '\u{feff}' => {
                    self.chars.next();
                }
                '#' => {
                    while self.chars.next_if(|&(_, c)| c != '\n' && c != '\r').is_some() {}
                }
                _ => break,
            }
        }
    }

    fn peek(&mut self) -> Result<(usize, char), ParseError> {
        self.skip_ignored();
        self.chars.peek().copied().ok_or(ParseError::UnexpectedEndOfFile)
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek()? {
            (_, c) if c == expected => {
                self.chars.next();
                Ok(())
            }
            (pos, c) => Err(ParseError::UnexpectedCharacter(c, pos)),
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek()? {
            (_, '[') => self.parse_list(),
            (_, '{') => self.parse_object(),
            (_, '"') => self.parse_string().map(Value::String),
            (_, '$') => {
                self.chars.next();
                Err(ParseError::UnexpectedVariable(self.parse_name()?.into()))
            }
            (_, c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            (_, c) if is_name_start(c) => Ok(match self.parse_name()? {
                "null" => Value::Null,
                "true" => Value::Boolean(true),
                "false" => Value::Boolean(false),
                name => Value::Enum(name.into()),
            }),
            (pos, c) => Err(ParseError::UnexpectedCharacter(c, pos)),
        }
    }

    fn parse_list(&mut self) -> Result<Value, ParseError> {
        self.expect('[')?;
        let mut items = Vec::new();
        while self.peek()?.1 != ']' {
            items.push(self.parse_value()?);
        }
        self.chars.next();
        Ok(Value::List(items))
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.expect('{')?;
        let mut object = Object::new();
        while self.peek()?.1 != '}' {
            let key = self.parse_name()?;
            if object.contains_field(key) {
                return Err(ParseError::DuplicateField(key.into()));
            }
            self.expect(':')?;
            object.add_field(key, self.parse_value()?);
        }
        self.chars.next();
        Ok(Value::Object(object))
    }

    fn parse_name(&mut self) -> Result<&'a str, ParseError> {
        let (start, c) = self.peek()?;
        if !is_name_start(c) {
            return Err(ParseError::UnexpectedCharacter(c, start));
        }
        let mut end = start;
        while let Some((pos, c)) = self.chars.next_if(|&(_, c)| is_name_continue(c)) {
            end = pos + c.len_utf8();
        }
        Ok(&self.source[start..end])
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let (start, _) = self.peek()?;
        let mut end = start;
        let mut is_float = false;
        while let Some((pos, c)) = self
            .chars
            .next_if(|&(_, c)| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        {
            is_float |= matches!(c, '.' | 'e' | 'E');
            end = pos + c.len_utf8();
        }
        let text = &self.source[start..end];
        let invalid = || ParseError::InvalidNumber(text.into());
        if is_float {
            text.parse::<f64>().map(Value::Float).map_err(|_| invalid())
        } else {
            text.parse::<i32>().map(Value::Int).map_err(|_| invalid())
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => return Err(ParseError::UnexpectedEndOfFile),
                Some((_, '"')) => return Ok(out),
                Some((_, '\\')) => out.push(self.parse_escape()?),
                Some((pos, c @ ('\n' | '\r'))) => {
                    return Err(ParseError::UnexpectedCharacter(c, pos));
                }
                Some((_, c)) => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char, ParseError> {
        let (_, c) = self.chars.next().ok_or(ParseError::UnexpectedEndOfFile)?;
        Ok(match c {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{0008}',
            'f' => '\u{000c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                let mut code = String::with_capacity(4);
                for _ in 0..4 {
                    let (_, d) = self.chars.next().ok_or(ParseError::UnexpectedEndOfFile)?;
                    code.push(d);
                }
                u32::from_str_radix(&code, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| ParseError::UnknownEscapeSequence(format!("\\u{code}")))?
            }
            _ => return Err(ParseError::UnknownEscapeSequence(format!("\\{c}"))),
        })
    }
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_name_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use crate::Value;

    use super::{ParseError, parse_value_literal};

    #[test]
    fn parses_scalars() {
        assert_eq!(parse_value_literal("false"), Ok(Value::Boolean(false)));
        assert_eq!(parse_value_literal(" 123 "), Ok(Value::Int(123)));
        assert_eq!(parse_value_literal("-1.5e1"), Ok(Value::Float(-15.0)));
        assert_eq!(parse_value_literal("null"), Ok(Value::Null));
        assert_eq!(
            parse_value_literal(r#""No longer supported""#),
            Ok(Value::string("No longer supported")),
        );
        assert_eq!(parse_value_literal("NON_NULL"), Ok(Value::enum_value("NON_NULL")));
    }

    #[test]
    fn parses_containers() {
        assert_eq!(
            parse_value_literal(r#"{a: [1, 2 3], b: {c: "A\n"}}"#),
            Ok(graphql_value!({"a": [1, 2, 3], "b": {"c": "A\n"}})),
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            parse_value_literal("[1"),
            Err(ParseError::UnexpectedEndOfFile),
        );
        assert_eq!(
            parse_value_literal("true false"),
            Err(ParseError::UnexpectedCharacter('f', 5)),
        );
        assert_eq!(
            parse_value_literal("99999999999"),
            Err(ParseError::InvalidNumber("99999999999".into())),
        );
        assert_eq!(
            parse_value_literal("$var"),
            Err(ParseError::UnexpectedVariable("var".into())),
        );
        assert_eq!(
            parse_value_literal("{a: 1, b: 2, a: 3}"),
            Err(ParseError::DuplicateField("a".into())),
        );
        assert_eq!(
            parse_value_literal(r#""\q""#),
            Err(ParseError::UnknownEscapeSequence("\\q".into())),
        );
    }
}
