//! Textual query descriptors.
//!
//! A descriptor is a compact, whitespace-separated description of a query:
//!
//! ```text
//! rooms/eros/messages where author == "alice" where likes > 10
//!     order by likes desc limit 20 start_after [10]
//! ```
//!
//! Field names use the server format, so a segment that is not an
//! identifier is written in backticks (`` where `odd name` == 1 ``).
//!
//! # Example
//!
//! ```
//! use firequery::QueryDescriptor;
//!
//! let descriptor = QueryDescriptor::parse("rooms where size > 3 limit 5").unwrap();
//! let query = descriptor.build().unwrap();
//! assert_eq!(query.limit_value(), Some(5));
//! ```

use std::fmt;

use chrono::{DateTime, Utc};

use super::filter::{Direction, Operator};
use super::query::Query;
use crate::error::{Error, Result};
use crate::model::{CollectionReference, FieldPath, ResourcePath, Value};

/// Deepest array nesting accepted in values.
const MAX_NESTING: usize = 32;

/// One clause following the collection path.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Where {
        field: FieldPath,
        op: Operator,
        value: Value,
    },
    OrderBy {
        field: FieldPath,
        direction: Direction,
    },
    Limit(i64),
    LimitToLast(i64),
    StartAt(Vec<Value>),
    StartAfter(Vec<Value>),
    EndAt(Vec<Value>),
    EndBefore(Vec<Value>),
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Where { field, op, value } => write!(f, "where {} {} {}", field, op, value),
            Clause::OrderBy { field, direction } => {
                write!(f, "order by {} {}", field, direction.keyword())
            }
            Clause::Limit(n) => write!(f, "limit {}", n),
            Clause::LimitToLast(n) => write!(f, "limit_to_last {}", n),
            Clause::StartAt(values) => write!(f, "start_at {}", Value::Array(values.clone())),
            Clause::StartAfter(values) => write!(f, "start_after {}", Value::Array(values.clone())),
            Clause::EndAt(values) => write!(f, "end_at {}", Value::Array(values.clone())),
            Clause::EndBefore(values) => write!(f, "end_before {}", Value::Array(values.clone())),
        }
    }
}

/// A parsed, not yet validated, query description.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub collection: String,
    pub clauses: Vec<Clause>,
}

impl QueryDescriptor {
    /// Parse descriptor text. Only syntax is checked here; query rules are
    /// enforced by [`build`](QueryDescriptor::build).
    pub fn parse(input: &str) -> Result<Self> {
        let tokens = tokenize(input)?;
        DescriptorParser {
            tokens,
            pos: 0,
            end: input.len(),
        }
        .parse_descriptor()
    }

    /// Resolve the collection and apply every clause in order.
    pub fn build(&self) -> Result<Query> {
        let collection = CollectionReference::new(&self.collection)?;
        self.clauses
            .iter()
            .try_fold(collection.query(), |query, clause| match clause.clone() {
                Clause::Where { field, op, value } => query.where_field(field, op, value),
                Clause::OrderBy { field, direction } => query.order_by(field, direction),
                Clause::Limit(n) => query.limit(n),
                Clause::LimitToLast(n) => query.limit_to_last(n),
                Clause::StartAt(values) => query.start_at(values),
                Clause::StartAfter(values) => query.start_after(values),
                Clause::EndAt(values) => query.end_at(values),
                Clause::EndBefore(values) => query.end_before(values),
            })
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.collection)?;
        for clause in &self.clauses {
            write!(f, " {}", clause)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Word(String),
    Str(String),
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '[' | ']' | '(' | ')' | ',' | '"')
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        let kind = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '"' => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some((_, '"')) => break,
                        Some((escape_at, '\\')) => match chars.next() {
                            Some((_, escaped)) => text.push(escaped),
                            None => return Err(Error::descriptor(escape_at, "trailing escape")),
                        },
                        Some((_, other)) => text.push(other),
                        None => {
                            return Err(Error::descriptor(offset, "unterminated string literal"))
                        }
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Str(text),
                    offset,
                });
                continue;
            }
            _ => {
                // Backtick sections may contain delimiters and are kept
                // verbatim for the field path parser.
                let mut text = String::new();
                let mut inside_backticks = false;
                while let Some(&(at, c)) = chars.peek() {
                    if !inside_backticks && is_delimiter(c) {
                        break;
                    }
                    chars.next();
                    text.push(c);
                    match c {
                        '`' => inside_backticks = !inside_backticks,
                        '\\' => match chars.next() {
                            Some((_, escaped)) => text.push(escaped),
                            None => return Err(Error::descriptor(at, "trailing escape")),
                        },
                        _ => {}
                    }
                }
                if inside_backticks {
                    return Err(Error::descriptor(offset, "unterminated `"));
                }
                tokens.push(Token {
                    kind: TokenKind::Word(text),
                    offset,
                });
                continue;
            }
        };
        chars.next();
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

struct DescriptorParser {
    tokens: Vec<Token>,
    pos: usize,
    /// Offset reported for errors at end of input.
    end: usize,
}

impl DescriptorParser {
    fn parse_descriptor(mut self) -> Result<QueryDescriptor> {
        let collection = match self.next() {
            Some(Token {
                kind: TokenKind::Word(path),
                ..
            }) => path,
            Some(token) => {
                return Err(Error::descriptor(token.offset, "expected a collection path"))
            }
            None => return Err(Error::descriptor(self.end, "missing collection path")),
        };

        let mut clauses = Vec::new();
        while let Some(token) = self.next() {
            let keyword = match token.kind {
                TokenKind::Word(word) => word,
                _ => return Err(Error::descriptor(token.offset, "expected a clause keyword")),
            };
            let clause = match keyword.as_str() {
                "where" => {
                    let field = self.field()?;
                    let (op_text, op_offset) = self.word("operator")?;
                    let op = Operator::from_symbol(&op_text).ok_or_else(|| {
                        Error::descriptor(op_offset, format!("unknown operator '{}'", op_text))
                    })?;
                    let value = self.value(0)?;
                    Clause::Where { field, op, value }
                }
                "order" => {
                    let (by, by_offset) = self.word("'by'")?;
                    if by != "by" {
                        return Err(Error::descriptor(by_offset, "expected 'by' after 'order'"));
                    }
                    let field = self.field()?;
                    let explicit = match self.peek_word() {
                        Some("asc") => Some(Direction::Ascending),
                        Some("desc") => Some(Direction::Descending),
                        _ => None,
                    };
                    if explicit.is_some() {
                        self.pos += 1;
                    }
                    Clause::OrderBy {
                        field,
                        direction: explicit.unwrap_or_default(),
                    }
                }
                "limit" => Clause::Limit(self.integer()?),
                "limit_to_last" => Clause::LimitToLast(self.integer()?),
                "start_at" => Clause::StartAt(self.cursor()?),
                "start_after" => Clause::StartAfter(self.cursor()?),
                "end_at" => Clause::EndAt(self.cursor()?),
                "end_before" => Clause::EndBefore(self.cursor()?),
                other => {
                    return Err(Error::descriptor(
                        token.offset,
                        format!("unknown clause '{}'", other),
                    ))
                }
            };
            clauses.push(clause);
        }

        Ok(QueryDescriptor {
            collection,
            clauses,
        })
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek_word(&self) -> Option<&str> {
        match self.tokens.get(self.pos) {
            Some(Token {
                kind: TokenKind::Word(word),
                ..
            }) => Some(word.as_str()),
            _ => None,
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        match self.next() {
            Some(token) if token.kind == kind => Ok(()),
            Some(token) => Err(Error::descriptor(token.offset, format!("expected {}", what))),
            None => Err(Error::descriptor(self.end, format!("expected {}", what))),
        }
    }

    fn word(&mut self, what: &str) -> Result<(String, usize)> {
        match self.next() {
            Some(Token {
                kind: TokenKind::Word(word),
                offset,
            }) => Ok((word, offset)),
            Some(token) => Err(Error::descriptor(token.offset, format!("expected {}", what))),
            None => Err(Error::descriptor(self.end, format!("expected {}", what))),
        }
    }

    fn field(&mut self) -> Result<FieldPath> {
        let (text, _) = self.word("a field path")?;
        FieldPath::from_server_format(&text)
    }

    fn integer(&mut self) -> Result<i64> {
        let (text, offset) = self.word("an integer")?;
        text.parse()
            .map_err(|_| Error::descriptor(offset, format!("invalid integer '{}'", text)))
    }

    fn cursor(&mut self) -> Result<Vec<Value>> {
        self.expect(TokenKind::LBracket, "'[' to open cursor values")?;
        self.array_items(1)
    }

    fn value(&mut self, depth: usize) -> Result<Value> {
        let token = self
            .next()
            .ok_or_else(|| Error::descriptor(self.end, "expected a value"))?;

        match token.kind {
            TokenKind::Str(text) => Ok(Value::String(text)),
            TokenKind::LBracket => Ok(Value::Array(self.array_items(depth + 1)?)),
            TokenKind::Word(word) => match word.as_str() {
                "null" => Ok(Value::Null),
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                "ts" => {
                    let (text, offset) = self.parenthesized("a timestamp")?;
                    DateTime::parse_from_rfc3339(&text)
                        .map(|ts| Value::Timestamp(ts.with_timezone(&Utc)))
                        .map_err(|e| {
                            Error::descriptor(offset, format!("invalid timestamp '{}': {}", text, e))
                        })
                }
                "ref" => {
                    let (text, _) = self.parenthesized("a document path")?;
                    Ok(Value::Reference(ResourcePath::parse(&text)?))
                }
                _ => parse_number(&word, token.offset),
            },
            _ => Err(Error::descriptor(token.offset, "expected a value")),
        }
    }

    fn parenthesized(&mut self, what: &str) -> Result<(String, usize)> {
        self.expect(TokenKind::LParen, "'('")?;
        let word = self.word(what)?;
        self.expect(TokenKind::RParen, "')'")?;
        Ok(word)
    }

    /// Parse the items of an array whose `[` was already consumed.
    fn array_items(&mut self, depth: usize) -> Result<Vec<Value>> {
        if depth > MAX_NESTING {
            return Err(Error::descriptor(self.end, "arrays nested too deeply"));
        }

        let mut values = Vec::new();
        if self.peek_kind() == Some(&TokenKind::RBracket) {
            self.pos += 1;
            return Ok(values);
        }

        loop {
            values.push(self.value(depth)?);
            match self.next() {
                Some(Token {
                    kind: TokenKind::Comma,
                    ..
                }) => continue,
                Some(Token {
                    kind: TokenKind::RBracket,
                    ..
                }) => return Ok(values),
                Some(token) => return Err(Error::descriptor(token.offset, "expected ',' or ']'")),
                None => return Err(Error::descriptor(self.end, "unterminated array")),
            }
        }
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|token| &token.kind)
    }
}

fn parse_number(word: &str, offset: usize) -> Result<Value> {
    if let Ok(i) = word.parse::<i64>() {
        return Ok(Value::Integer(i));
    }
    if let Ok(d) = word.parse::<f64>() {
        return Ok(Value::Double(d));
    }
    Err(Error::descriptor(offset, format!("unexpected value '{}'", word)))
}
