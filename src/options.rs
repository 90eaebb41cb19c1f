//! Configuration for parsing and printing.
//!
//! - [`ParseOptions`]: limits applied while reading text
//! - [`PrintOptions`]: how trees are rendered back to text
//! - [`Indent`]: the indentation unit used by the printer
//!
//! ## Examples
//!
//! ```rust
//! use termpose::{parse, print_with_options, PrintOptions};
//!
//! let term = parse("products\n\thammer cost:5").unwrap();
//!
//! // Four spaces instead of a tab
//! let text = print_with_options(&term, &PrintOptions::new().with_spaces(4));
//! assert_eq!(text, "products\n    hammer cost:5");
//! ```

/// The indentation unit written by the printer.
///
/// # Examples
///
/// ```rust
/// use termpose::Indent;
///
/// assert_eq!(Indent::Tab.unit(), "\t");
/// assert_eq!(Indent::Spaces(2).unit(), "  ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Tab,
    Spaces(usize),
}

impl Indent {
    /// Returns the text of one indentation level.
    #[must_use]
    pub fn unit(&self) -> String {
        match self {
            Indent::Tab => "\t".to_string(),
            Indent::Spaces(n) => " ".repeat((*n).max(1)),
        }
    }
}

/// Options controlling how trees are printed.
///
/// # Examples
///
/// ```rust
/// use termpose::PrintOptions;
///
/// let options = PrintOptions::new();
/// assert!(options.string_blocks);
///
/// let options = PrintOptions::new().with_spaces(2).with_string_blocks(false);
/// assert!(!options.string_blocks);
/// ```
#[derive(Clone, Debug)]
pub struct PrintOptions {
    pub indent: Indent,
    /// Print multi-line strings as raw indented blocks where the grammar allows.
    /// When off, they are always quoted with `\n` escapes.
    pub string_blocks: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            indent: Indent::default(),
            string_blocks: true,
        }
    }
}

impl PrintOptions {
    /// Creates default options (tab indentation, raw string blocks on).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Indents with `n` spaces per level. Zero is treated as one.
    #[must_use]
    pub fn with_spaces(self, n: usize) -> Self {
        self.with_indent(Indent::Spaces(n))
    }

    #[must_use]
    pub fn with_tabs(self) -> Self {
        self.with_indent(Indent::Tab)
    }

    #[must_use]
    pub fn with_string_blocks(mut self, enabled: bool) -> Self {
        self.string_blocks = enabled;
        self
    }
}

/// Options controlling the parser.
///
/// # Examples
///
/// ```rust
/// use termpose::{parse_with_options, ParseOptions, SyntaxErrorKind};
///
/// let options = ParseOptions::new().with_max_depth(2);
/// let err = parse_with_options("(((a)))", &options).unwrap_err();
/// assert_eq!(err.kind, SyntaxErrorKind::NestingTooDeep);
/// ```
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Maximum combined depth of indentation and parenthesis nesting.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { max_depth: 512 }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
