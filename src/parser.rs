//! Termpose parsing.
//!
//! This module turns source text into a [`Term`] tree. It is line based:
//! every non-blank line is tokenized on its own, and indentation decides which
//! line owns which. Nesting is tracked with an explicit stack of open lines, so
//! deep indentation does not grow the call stack.
//!
//! ## Overview
//!
//! - **Indentation**: a line's block is every following line indented deeper
//! - **Shorthand**: `tag:value` tags a single child inline
//! - **Groups**: `(a b c)` builds an untagged node on one line
//! - **String blocks**: a trailing `"` takes the deeper lines verbatim
//!
//! ```rust
//! use termpose::parse;
//!
//! let term = parse("products\n\thammer cost:5").unwrap();
//! assert_eq!(term.tag(), Some("products"));
//!
//! let hammer = &term.children()[0];
//! assert_eq!(hammer.children()[0].value(), Some("hammer"));
//! assert_eq!(hammer.children()[1].tag(), Some("cost"));
//! ```
//!
//! Errors are all-or-nothing: a [`SyntaxError`] means no tree at all.

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::options::ParseOptions;
use crate::term::{Position, Term};
use log::{debug, trace};

type ParseResult<T> = std::result::Result<T, SyntaxError>;

/// A lexed token of one line.
///
/// Openers only mean something at the end of a line, where they take the
/// indented block that follows. Anywhere else they are empty nodes.
#[derive(Debug)]
enum Token {
    Term(Term),
    /// `tag:` with nothing after it.
    OpenTag(String, Position),
    /// A bare `:`.
    OpenList(Position),
    /// `tag"`, `tag:"` or a lone `"` ending the line.
    OpenString(Option<String>, Position),
}

impl Token {
    fn into_term(self) -> Term {
        match self {
            Token::Term(t) => t,
            Token::OpenTag(tag, pos) => Term::tagged(tag, Vec::new()).with_position(pos),
            Token::OpenList(pos) => Term::empty().with_position(pos),
            Token::OpenString(Some(tag), pos) => {
                Term::tagged(tag, vec![Term::leaf(String::new()).with_position(pos)])
                    .with_position(pos)
            }
            Token::OpenString(None, pos) => Term::leaf(String::new()).with_position(pos),
        }
    }
}

/// Tokenizer for a single line.
struct LineLexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    base_depth: usize,
    max_depth: usize,
}

impl<'a> LineLexer<'a> {
    fn new(input: &'a str, line: usize, indent: usize, base_depth: usize, max_depth: usize) -> Self {
        LineLexer {
            input,
            position: indent,
            line,
            column: indent + 1,
            base_depth,
            max_depth,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        self.column += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn here(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn error_at(&self, kind: SyntaxErrorKind, at: Position, msg: &str) -> SyntaxError {
        SyntaxError::new(kind, at.line, at.column, msg, self.input)
    }

    fn error(&self, kind: SyntaxErrorKind, msg: &str) -> SyntaxError {
        self.error_at(kind, self.here(), msg)
    }

    /// True when the cursor sits on a `"` with nothing but whitespace after it.
    fn at_string_opener(&self) -> bool {
        let rest = &self.input[self.position..];
        rest.starts_with('"') && rest[1..].trim().is_empty()
    }

    fn consume_rest(&mut self) {
        while self.next_char().is_some() {}
    }

    fn lex_line(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek_char() {
                None => break,
                Some(')') => {
                    return Err(self.error(SyntaxErrorKind::UnexpectedToken, "unmatched ')'"))
                }
                Some(_) => {
                    let token = self.lex_token(0)?;
                    let ends_line = matches!(token, Token::OpenString(..));
                    tokens.push(token);
                    if ends_line {
                        break;
                    }
                }
            }
        }
        Ok(tokens)
    }

    fn lex_token(&mut self, depth: usize) -> ParseResult<Token> {
        let start = self.here();
        match self.peek_char() {
            Some('(') => {
                let group = self.lex_group(depth + 1)?;
                self.expect_token_end(depth)?;
                Ok(Token::Term(group))
            }
            Some(':') => {
                self.next_char();
                if self.at_token_end() {
                    Ok(Token::OpenList(start))
                } else {
                    Err(self.error_at(
                        SyntaxErrorKind::UnexpectedToken,
                        start,
                        "missing tag before ':'",
                    ))
                }
            }
            Some('"') => {
                if self.at_string_opener() {
                    self.consume_rest();
                    return Ok(Token::OpenString(None, start));
                }
                let text = self.lex_quoted()?;
                self.lex_after_atom(text, start, depth)
            }
            Some(_) => {
                let text = self.lex_bare();
                self.lex_after_atom(text, start, depth)
            }
            None => Err(self.error(SyntaxErrorKind::UnexpectedToken, "expected a token")),
        }
    }

    fn at_token_end(&self) -> bool {
        match self.peek_char() {
            None => true,
            Some(ch) => ch.is_whitespace() || ch == ')',
        }
    }

    fn expect_token_end(&self, depth: usize) -> ParseResult<()> {
        match self.peek_char() {
            None => Ok(()),
            Some(ch) if ch.is_whitespace() => Ok(()),
            Some(')') if depth > 0 => Ok(()),
            Some(')') => Err(self.error(SyntaxErrorKind::UnexpectedToken, "unmatched ')'")),
            Some(ch) => Err(self.error(
                SyntaxErrorKind::UnexpectedToken,
                &format!("unexpected '{}' after token", ch),
            )),
        }
    }

    fn lex_bare(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() || matches!(ch, '"' | ':' | '(' | ')') {
                break;
            }
            self.next_char();
        }
        self.input[start..self.position].to_string()
    }

    fn lex_quoted(&mut self) -> ParseResult<String> {
        let open = self.here();
        self.next_char(); // consume opening quote
        let mut result = String::new();

        while let Some(ch) = self.next_char() {
            match ch {
                '"' => return Ok(result),
                '\\' => match self.next_char() {
                    Some('\\') => result.push('\\'),
                    Some('"') => result.push('"'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('b') => result.push('\u{0008}'),
                    Some('f') => result.push('\u{000C}'),
                    Some('0') => result.push('\0'),
                    Some('u') => result.push(self.lex_unicode_escape()?),
                    Some(other) => {
                        // Unknown escape - preserve literally
                        result.push('\\');
                        result.push(other);
                    }
                    None => break,
                },
                other => result.push(other),
            }
        }
        Err(self.error_at(
            SyntaxErrorKind::UnterminatedQuote,
            open,
            "string is not closed before the end of the line",
        ))
    }

    fn lex_unicode_escape(&mut self) -> ParseResult<char> {
        let mut hex = String::new();
        for _ in 0..4 {
            match self.next_char() {
                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                _ => {
                    return Err(self.error(
                        SyntaxErrorKind::UnexpectedToken,
                        "invalid unicode escape sequence (expected 4 hex digits)",
                    ))
                }
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(SyntaxErrorKind::UnexpectedToken, "invalid unicode code point"))
    }

    /// Handles what may follow a bare or quoted atom: `:` shorthand, a
    /// trailing string opener, or the end of the token.
    ///
    /// Chains like `a:b:c` are read in a loop and folded from the innermost
    /// node outward, so their length is bounded by `max_depth` alone.
    fn lex_after_atom(&mut self, atom: String, start: Position, depth: usize) -> ParseResult<Token> {
        let mut tags: Vec<(String, Position)> = Vec::new();
        let (mut atom, mut start) = (atom, start);
        let innermost = loop {
            match self.peek_char() {
                Some(':') => {
                    self.next_char();
                    if self.at_token_end() {
                        break Token::OpenTag(atom, start);
                    }
                    if self.at_string_opener() {
                        self.consume_rest();
                        break Token::OpenString(Some(atom), start);
                    }
                    if self.peek_char() == Some(':') {
                        return Err(self.error(SyntaxErrorKind::UnexpectedToken, "unexpected ':'"));
                    }
                    if self.base_depth + depth + tags.len() + 1 > self.max_depth {
                        return Err(self.error(SyntaxErrorKind::NestingTooDeep, "too many chained tags"));
                    }
                    tags.push((atom, start));
                    start = self.here();
                    atom = match self.peek_char() {
                        Some('(') => break self.lex_token(depth)?,
                        Some('"') => self.lex_quoted()?,
                        _ => self.lex_bare(),
                    };
                }
                Some('"') => {
                    if self.at_string_opener() {
                        self.consume_rest();
                        break Token::OpenString(Some(atom), start);
                    }
                    return Err(self.error(SyntaxErrorKind::UnexpectedToken, "unexpected '\"' after token"));
                }
                _ => {
                    self.expect_token_end(depth)?;
                    break Token::Term(Term::leaf(atom).with_position(start));
                }
            }
        };

        let Some((_, outer)) = tags.last() else {
            return Ok(innermost);
        };
        let mut term = match innermost {
            Token::OpenString(..) => {
                return Err(self.error_at(
                    SyntaxErrorKind::UnexpectedToken,
                    *outer,
                    "a string block can only follow the outermost tag",
                ))
            }
            other => other.into_term(),
        };
        for (tag, pos) in tags.into_iter().rev() {
            term = Term::tagged(tag, vec![term]).with_position(pos);
        }
        Ok(Token::Term(term))
    }

    fn lex_group(&mut self, depth: usize) -> ParseResult<Term> {
        let start = self.here();
        if self.base_depth + depth > self.max_depth {
            return Err(self.error(SyntaxErrorKind::NestingTooDeep, "too many nested parentheses"));
        }
        self.next_char(); // consume '('

        let mut children = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek_char() {
                None => {
                    return Err(self.error_at(
                        SyntaxErrorKind::UnexpectedToken,
                        start,
                        "'(' is not closed on this line",
                    ))
                }
                Some(')') => {
                    self.next_char();
                    break;
                }
                Some(_) => match self.lex_token(depth)? {
                    Token::OpenString(_, pos) => {
                        return Err(self.error_at(
                            SyntaxErrorKind::UnexpectedToken,
                            pos,
                            "a string block cannot open inside parentheses",
                        ))
                    }
                    other => children.push(other.into_term()),
                },
            }
        }
        Ok(Term::list(children).with_position(start))
    }
}

/// An open line waiting for its indented block to end.
struct Frame {
    /// `None` for the document root.
    indent: Option<usize>,
    tokens: Vec<Token>,
    children: Vec<Term>,
    child_indent: Option<usize>,
    position: Position,
}

impl Frame {
    fn root() -> Self {
        Frame {
            indent: None,
            tokens: Vec::new(),
            children: Vec::new(),
            child_indent: None,
            position: Position { line: 1, column: 1 },
        }
    }

    fn line(indent: usize, tokens: Vec<Token>, position: Position) -> Self {
        Frame {
            indent: Some(indent),
            tokens,
            children: Vec::new(),
            child_indent: None,
            position,
        }
    }

    fn closes_at(&self, width: usize) -> bool {
        self.indent.is_some_and(|indent| indent >= width)
    }

    /// Builds the node for this line from its tokens and its block.
    fn finish(self) -> Term {
        let Frame {
            mut tokens,
            children,
            position,
            ..
        } = self;

        let opener = match tokens.last() {
            Some(Token::OpenTag(..)) | Some(Token::OpenList(..)) => tokens.pop(),
            _ => None,
        };
        let mut items: Vec<Term> = tokens.into_iter().map(Token::into_term).collect();

        match opener {
            Some(Token::OpenTag(tag, pos)) => {
                items.push(Term::tagged(tag, children).with_position(pos));
            }
            Some(Token::OpenList(pos)) => {
                items.push(Term::list(children).with_position(pos));
            }
            _ if children.is_empty() => {}
            _ => {
                let plain_head = match items.as_slice() {
                    [only] if only.tag().is_none() => only.value().map(str::to_string),
                    _ => None,
                };
                if let Some(tag) = plain_head {
                    return Term::tagged(tag, children).with_position(position);
                }
                items.extend(children);
            }
        }

        if items.len() == 1 {
            if let Some(only) = items.pop() {
                return only;
            }
        }
        Term::list(items).with_position(position)
    }

    fn finish_root(mut self) -> Term {
        match self.children.len() {
            0 => Term::empty(),
            1 => self.children.pop().unwrap_or_default(),
            _ => {
                let position = self.children[0].position().unwrap_or(self.position);
                Term::list(self.children).with_position(position)
            }
        }
    }
}

/// The termpose parser.
///
/// Created via [`Parser::new`]; most callers use [`crate::parse`] instead.
pub struct Parser<'a> {
    lines: Vec<&'a str>,
    options: ParseOptions,
    indent_char: Option<char>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &ParseOptions) -> Self {
        Parser {
            lines: input
                .split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l))
                .collect(),
            options: options.clone(),
            indent_char: None,
        }
    }

    fn line_error(&self, kind: SyntaxErrorKind, line: usize, column: usize, msg: &str) -> SyntaxError {
        let context = self.lines.get(line - 1).copied().unwrap_or_default();
        SyntaxError::new(kind, line, column, msg, context)
    }

    /// Measures and validates the indentation of a structural line.
    fn indentation(&mut self, raw: &str, line: usize) -> ParseResult<usize> {
        let width = raw.len() - raw.trim_start_matches([' ', '\t']).len();
        let lead = &raw[..width];

        if raw[width..].starts_with(char::is_whitespace) {
            return Err(self.line_error(
                SyntaxErrorKind::BadIndentation,
                line,
                width + 1,
                "only spaces and tabs may indent a line",
            ));
        }

        let mut chars = lead.chars();
        let Some(first) = chars.next() else {
            return Ok(0);
        };
        if chars.any(|c| c != first) {
            return Err(self.line_error(
                SyntaxErrorKind::BadIndentation,
                line,
                1,
                "indentation mixes tabs and spaces",
            ));
        }
        match self.indent_char {
            None => self.indent_char = Some(first),
            Some(expected) if expected != first => {
                return Err(self.line_error(
                    SyntaxErrorKind::BadIndentation,
                    line,
                    1,
                    if expected == '\t' {
                        "document is indented with tabs, but this line uses spaces"
                    } else {
                        "document is indented with spaces, but this line uses tabs"
                    },
                ));
            }
            Some(_) => {}
        }
        Ok(width)
    }

    /// Collects the raw string block following line `start` (0-based index of
    /// the first candidate line). Returns the text and the index after the block.
    fn read_string_block(&mut self, start: usize, opener_width: usize) -> (String, usize) {
        let mut body: Vec<&str> = Vec::new();
        let mut base: Option<usize> = None;
        let mut index = start;

        while index < self.lines.len() {
            let raw = self.lines[index];
            if raw.trim().is_empty() {
                if base.is_some() {
                    body.push("");
                }
                index += 1;
                continue;
            }

            let indent_char = match self.indent_char {
                Some(c) => c,
                None => match raw.chars().next() {
                    Some(c @ (' ' | '\t')) => c,
                    _ => break,
                },
            };
            let count = raw.chars().take_while(|&c| c == indent_char).count();
            if count <= opener_width {
                break;
            }
            self.indent_char = Some(indent_char);

            let base = *base.get_or_insert(count);
            body.push(&raw[count.min(base)..]);
            index += 1;
        }

        while body.last() == Some(&"") {
            body.pop();
        }
        (body.join("\n"), index)
    }

    /// Parses the whole document.
    pub fn parse(mut self) -> ParseResult<Term> {
        let mut stack = vec![Frame::root()];
        let mut index = 0;

        while index < self.lines.len() {
            let raw = self.lines[index];
            let line = index + 1;
            index += 1;

            if raw.trim().is_empty() {
                continue;
            }
            let width = self.indentation(raw, line)?;

            while stack.last().is_some_and(|f| f.closes_at(width)) {
                if let Some(frame) = stack.pop() {
                    let node = frame.finish();
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
            }

            let depth = stack.len();
            let Some(parent) = stack.last_mut() else {
                break;
            };
            match parent.child_indent {
                None => parent.child_indent = Some(width),
                Some(expected) if expected != width => {
                    return Err(self.line_error(
                        SyntaxErrorKind::BadIndentation,
                        line,
                        width + 1,
                        "indentation does not match any enclosing level",
                    ));
                }
                Some(_) => {}
            }
            if depth > self.options.max_depth {
                return Err(self.line_error(
                    SyntaxErrorKind::NestingTooDeep,
                    line,
                    width + 1,
                    "too many levels of indentation",
                ));
            }

            let mut lexer = LineLexer::new(raw, line, width, depth, self.options.max_depth);
            let mut tokens = lexer.lex_line()?;
            let position = Position {
                line,
                column: width + 1,
            };
            trace!("line {}: {} token(s) at depth {}", line, tokens.len(), depth);

            let string_opener = match tokens.last() {
                Some(Token::OpenString(..)) => tokens.pop(),
                _ => None,
            };
            if let Some(Token::OpenString(tag, pos)) = string_opener {
                let (text, next) = self.read_string_block(index, width);
                trace!("line {}: string block of {} line(s)", line, next - index);
                index = next;

                let leaf = Term::leaf(text).with_position(pos);
                let item = match tag {
                    Some(tag) => Term::tagged(tag, vec![leaf]).with_position(pos),
                    None => leaf,
                };
                tokens.push(Token::Term(item));
                let node = Frame::line(width, tokens, position).finish();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
                continue;
            }

            stack.push(Frame::line(width, tokens, position));
        }

        while stack.len() > 1 {
            if let Some(frame) = stack.pop() {
                let node = frame.finish();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
        }

        let root = stack.pop().map(Frame::finish_root).unwrap_or_default();
        debug!(
            "parsed {} line(s) into {} node(s)",
            self.lines.len(),
            root.node_count()
        );
        Ok(root)
    }
}

/// Parses a whole document with the given options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> ParseResult<Term> {
    Parser::new(input, options).parse()
}
