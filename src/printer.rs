//! Termpose printing.
//!
//! This module renders a [`Term`] back to canonical text. Printing never
//! fails and is deterministic. For any tree the parser can produce,
//! `parse(print(t)) == t`.
//!
//! ## Overview
//!
//! - **Inline first**: leaves, `tag:value` pairs and small groups stay on one line
//! - **Quote minimization**: strings are only quoted when a bare token would be misread
//! - **String blocks**: multi-line strings at the end of a line become raw indented blocks
//! - **Indented children**: anything that cannot go inline moves one level deeper
//!
//! ```rust
//! use termpose::{print, Term};
//!
//! let term = Term::tagged(
//!     "products",
//!     vec![Term::list(vec![
//!         Term::leaf("hammer"),
//!         Term::tagged_value("cost", "5"),
//!         Term::tagged_value("description", "premium hammer.\ngreat for smashing"),
//!     ])],
//! );
//!
//! assert_eq!(
//!     print(&term),
//!     "products\n\thammer cost:5 description\"\n\t\tpremium hammer.\n\t\tgreat for smashing"
//! );
//! ```

use crate::options::PrintOptions;
use crate::term::Term;
use log::trace;

/// The termpose printer.
///
/// Created via [`Printer::new`]; most callers use [`crate::print`] instead.
pub struct Printer<'o> {
    output: String,
    options: &'o PrintOptions,
    unit: String,
}

impl<'o> Printer<'o> {
    pub fn new(options: &'o PrintOptions) -> Self {
        Printer {
            output: String::with_capacity(256),
            options,
            unit: options.indent.unit(),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn start_line(&mut self, depth: usize) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        for _ in 0..depth {
            self.output.push_str(&self.unit);
        }
    }

    #[inline]
    fn needs_quotes(s: &str) -> bool {
        s.is_empty()
            || s.chars().any(|ch| {
                ch.is_whitespace()
                    || ch.is_control()
                    || matches!(ch, '"' | ':' | '(' | ')' | '\\')
            })
    }

    fn push_token(out: &mut String, s: &str) {
        if !Self::needs_quotes(s) {
            out.push_str(s);
            return;
        }
        out.push('"');
        for ch in s.chars() {
            match ch {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                '\u{0008}' => out.push_str("\\b"),
                '\u{000C}' => out.push_str("\\f"),
                '\0' => out.push_str("\\0"),
                c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
                c => out.push(c),
            }
        }
        out.push('"');
    }

    fn token(s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        Self::push_token(&mut out, s);
        out
    }

    /// Whether a multi-line string survives the raw block form unchanged.
    fn block_safe(s: &str) -> bool {
        if !s.contains('\n') || s.contains('\r') {
            return false;
        }
        let mut lines = s.split('\n');
        let first_ok = lines
            .next()
            .is_some_and(|first| !first.is_empty() && !first.starts_with(char::is_whitespace));
        let last_ok = s
            .rsplit('\n')
            .next()
            .is_some_and(|last| !last.trim().is_empty());
        first_ok && last_ok && s.split('\n').all(|l| l.is_empty() || !l.trim().is_empty())
    }

    /// If `term` should print as a raw string block, returns its tag (if any) and text.
    fn block_body<'t>(&self, term: &'t Term) -> Option<(Option<&'t str>, &'t str)> {
        if !self.options.string_blocks {
            return None;
        }
        match (term.tag(), term.value(), term.children()) {
            (None, Some(v), []) if Self::block_safe(v) => Some((None, v)),
            (Some(tag), Some(v), []) if Self::block_safe(v) => Some((Some(tag), v)),
            (Some(tag), None, [only]) if only.tag().is_none() && only.is_leaf() => only
                .value()
                .filter(|v| Self::block_safe(v))
                .map(|v| (Some(tag), v)),
            _ => None,
        }
    }

    /// The single-token rendering of `term`, if it has one.
    fn inline(term: &Term) -> Option<String> {
        match (term.tag(), term.value(), term.children()) {
            (None, Some(v), []) => Some(Self::token(v)),
            (None, None, []) => Some("()".to_string()),
            (Some(tag), None, []) => Some(format!("{}:", Self::token(tag))),
            (Some(tag), Some(v), []) => Some(format!("{}:{}", Self::token(tag), Self::token(v))),
            (Some(tag), _, [only]) => Self::inline(only).map(|c| format!("{}:{}", Self::token(tag), c)),
            (Some(_), _, _) => None,
            (None, _, children) => {
                let parts = children.iter().map(Self::inline).collect::<Option<Vec<_>>>()?;
                Some(format!("({})", parts.join(" ")))
            }
        }
    }

    /// Inline rendering, unless the term would rather be a string block.
    fn preferred_inline(&self, term: &Term) -> Option<String> {
        if self.block_body(term).is_some() {
            None
        } else {
            Self::inline(term)
        }
    }

    fn is_open_tag(term: &Term) -> bool {
        term.tag().is_some() && term.value().is_none() && term.children().is_empty()
    }

    fn write_block(&mut self, text: &str, depth: usize) {
        for line in text.split('\n') {
            if line.is_empty() {
                self.output.push('\n');
            } else {
                self.start_line(depth);
                self.output.push_str(line);
            }
        }
    }

    fn write_string_block(&mut self, tag: Option<&str>, text: &str, depth: usize) {
        if let Some(tag) = tag {
            Self::push_token(&mut self.output, tag);
        }
        self.output.push('"');
        self.write_block(text, depth + 1);
    }

    /// Writes `term` as one line (plus any indented block) at `depth`.
    fn write_line(&mut self, term: &Term, depth: usize) {
        if let Some((tag, text)) = self.block_body(term) {
            self.start_line(depth);
            self.write_string_block(tag, text, depth);
            return;
        }

        if let Some(tag) = term.tag() {
            self.start_line(depth);
            let wraps_list = matches!(term.children(), [only] if only.tag().is_none() && !only.is_leaf());
            if !wraps_list {
                if let Some(text) = Self::inline(term) {
                    self.output.push_str(&text);
                    return;
                }
            }
            Self::push_token(&mut self.output, tag);
            for child in term.children() {
                self.write_line(child, depth + 1);
            }
            return;
        }

        if term.children().is_empty() {
            self.start_line(depth);
            self.output.push_str(&Self::inline(term).unwrap_or_default());
            return;
        }

        if self.write_compact(term.children(), depth) {
            return;
        }

        let tokens: Vec<Option<String>> = term
            .children()
            .iter()
            .map(|c| self.preferred_inline(c))
            .collect();
        let mut head = tokens.iter().take_while(|t| t.is_some()).count();
        if head > 0 && Self::is_open_tag(&term.children()[head - 1]) {
            head -= 1;
        }

        self.start_line(depth);
        let rest = if head >= 2 {
            let parts: Vec<&str> = tokens[..head].iter().flatten().map(String::as_str).collect();
            self.output.push_str(&parts.join(" "));
            &term.children()[head..]
        } else {
            self.output.push(':');
            term.children()
        };
        for child in rest {
            self.write_line(child, depth + 1);
        }
    }

    /// Writes untagged children on a single line, optionally ending in a
    /// string block. Returns `false` (writing nothing) if that is not possible.
    fn write_compact(&mut self, children: &[Term], depth: usize) -> bool {
        let Some((last, init)) = children.split_last() else {
            self.start_line(depth);
            self.output.push_str("()");
            return true;
        };
        let Some(init_tokens) = init
            .iter()
            .map(|c| self.preferred_inline(c))
            .collect::<Option<Vec<_>>>()
        else {
            return false;
        };

        if let Some(last_token) = self.preferred_inline(last) {
            self.start_line(depth);
            if init.is_empty() {
                self.output.push('(');
                self.output.push_str(&last_token);
                self.output.push(')');
            } else {
                self.output.push_str(&init_tokens.join(" "));
                self.output.push(' ');
                self.output.push_str(&last_token);
            }
            return true;
        }

        match self.block_body(last) {
            Some((tag, text)) if !init.is_empty() => {
                self.start_line(depth);
                self.output.push_str(&init_tokens.join(" "));
                self.output.push(' ');
                self.write_string_block(tag, text, depth);
                true
            }
            _ => false,
        }
    }

    /// Writes a whole document.
    pub fn write_root(&mut self, term: &Term) {
        let untagged_interior = term.tag().is_none() && term.value().is_none();
        if untagged_interior && term.children().len() >= 2 {
            if !self.write_compact(term.children(), 0) {
                for child in term.children() {
                    self.write_line(child, 0);
                }
            }
        } else {
            self.write_line(term, 0);
        }
        trace!("printed {} node(s) into {} byte(s)", term.node_count(), self.output.len());
    }
}

/// Renders `term` with the given options.
#[must_use]
pub fn print_with_options(term: &Term, options: &PrintOptions) -> String {
    let mut printer = Printer::new(options);
    printer.write_root(term);
    printer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn print(t: &Term) -> String {
        print_with_options(t, &PrintOptions::default())
    }

    fn roundtrip(t: &Term) {
        let text = print(t);
        let back = parse(&text).unwrap_or_else(|e| panic!("{}\n--- printed ---\n{}", e, text));
        assert_eq!(&back, t, "printed:\n{}", text);
    }

    #[test]
    fn test_quote_minimization() {
        assert_eq!(print(&Term::leaf("hammer")), "hammer");
        assert_eq!(print(&Term::leaf("bee's knee")), "\"bee's knee\"");
        assert_eq!(print(&Term::leaf("")), "\"\"");
        assert_eq!(print(&Term::leaf("a:b")), "\"a:b\"");
        assert_eq!(print(&Term::leaf("(x)")), "\"(x)\"");
        assert_eq!(print(&Term::leaf("say \"hi\"")), r#""say \"hi\"""#);
        assert_eq!(print(&Term::leaf("\u{1}")), r#""\u0001""#);
    }

    #[test]
    fn test_single_element_list_is_grouped() {
        assert_eq!(print(&Term::list(vec![Term::leaf("x")])), "(x)");
        assert_eq!(print(&Term::empty()), "()");
    }

    #[test]
    fn test_tagged_forms() {
        assert_eq!(print(&Term::tagged_value("cost", "5")), "cost:5");
        assert_eq!(print(&Term::tagged("empty", vec![])), "empty:");
        assert_eq!(
            print(&Term::tagged("p", vec![Term::leaf("a"), Term::leaf("b")])),
            "p\n\ta\n\tb"
        );
        assert_eq!(
            print(&Term::tagged("my tag", vec![Term::leaf("a"), Term::leaf("b")])),
            "\"my tag\"\n\ta\n\tb"
        );

        let pos = Term::tagged("pos", vec![Term::list(vec![Term::leaf("1"), Term::leaf("2")])]);
        assert_eq!(print(&pos), "pos\n\t1 2");
        assert_eq!(print(&Term::list(vec![Term::leaf("a"), pos.clone()])), "a pos:(1 2)");
        roundtrip(&pos);
    }

    #[test]
    fn test_string_block_form() {
        let t = Term::tagged_value("d", "line one\nline two");
        assert_eq!(print(&t), "d\"\n\tline one\n\tline two");
        roundtrip(&t);
    }

    #[test]
    fn test_unsafe_multiline_is_quoted() {
        let t = Term::tagged_value("d", "  leading\nspace");
        assert_eq!(print(&t), r#"d:"  leading\nspace""#);
        roundtrip(&t);
        roundtrip(&Term::leaf("trailing\n"));
        roundtrip(&Term::leaf("a\n   \nb"));
    }

    #[test]
    fn test_string_blocks_disabled() {
        let options = PrintOptions::new().with_string_blocks(false);
        let t = Term::tagged_value("d", "a\nb");
        assert_eq!(print_with_options(&t, &options), r#"d:"a\nb""#);
    }

    #[test]
    fn test_spaces_indent() {
        let options = PrintOptions::new().with_spaces(2);
        let t = Term::tagged("p", vec![Term::tagged("q", vec![Term::leaf("a"), Term::leaf("b")])]);
        assert_eq!(print_with_options(&t, &options), "p\n  q\n    a\n    b");
    }

    #[test]
    fn test_prefix_form() {
        let t = Term::list(vec![
            Term::leaf("a"),
            Term::leaf("b"),
            Term::tagged("p", vec![Term::leaf("c"), Term::leaf("d")]),
        ]);
        assert_eq!(print(&Term::tagged("root", vec![t.clone()])), "root\n\ta b\n\t\tp\n\t\t\tc\n\t\t\td");
        roundtrip(&t);
    }

    #[test]
    fn test_colon_form() {
        let t = Term::list(vec![Term::tagged("p", vec![Term::leaf("c"), Term::leaf("d")])]);
        assert_eq!(print(&t), ":\n\tp\n\t\tc\n\t\td");
        roundtrip(&t);

        // an open tag cannot end a head line
        let t = Term::list(vec![
            Term::leaf("a"),
            Term::tagged("x", vec![]),
            Term::tagged("p", vec![Term::leaf("c"), Term::leaf("d")]),
        ]);
        roundtrip(&t);
    }

    #[test]
    fn test_root_lines() {
        let t = Term::list(vec![
            Term::tagged("p", vec![Term::leaf("c"), Term::leaf("d")]),
            Term::leaf("z"),
        ]);
        assert_eq!(print(&t), "p\n\tc\n\td\nz");
        roundtrip(&t);
    }

    #[test]
    fn test_nested_roundtrips() {
        roundtrip(&Term::tagged("a", vec![Term::tagged("b", vec![Term::empty()])]));
        roundtrip(&Term::list(vec![Term::tagged("a", vec![]), Term::leaf("b")]));
        roundtrip(&Term::list(vec![
            Term::list(vec![Term::leaf("tricky"), Term::leaf("list")]),
            Term::list(vec![Term::leaf("parse")]),
        ]));
        roundtrip(&Term::tagged(
            "",
            vec![Term::tagged_value("x", "multi\nline"), Term::leaf("y")],
        ));
        roundtrip(&Term::list(vec![
            Term::tagged_value("x", "multi\nline"),
            Term::leaf("y"),
        ]));
    }

    #[test]
    fn test_deterministic() {
        let t = Term::tagged("p", vec![Term::tagged_value("d", "a\nb"), Term::leaf("c")]);
        assert_eq!(print(&t), print(&t.clone()));
    }
}
