/// Builds a [`Term`](crate::Term) from a compact literal syntax.
///
/// - `()` is the empty node
/// - `[a, b, c]` is an untagged node with the given children
/// - `{ "tag": [a, b] }` is a node tagged `tag` with the given children
/// - `{ "tag": x }` is a node tagged `tag` with the single child `x`
/// - any other expression becomes a leaf holding its `Display` text
///
/// ```rust
/// use termpose::{parse, term};
///
/// let t = term!({ "products": [
///     ["hammer", { "cost": 5 }],
///     ["twine", { "cost": 0 }]
/// ]});
/// assert_eq!(t, parse("products\n\thammer cost:5\n\ttwine cost:0").unwrap());
/// ```
#[macro_export]
macro_rules! term {
    (()) => {
        $crate::Term::empty()
    };

    ([ $($child:tt),* $(,)? ]) => {
        $crate::Term::list(vec![$($crate::term!($child)),*])
    };

    ({ $tag:literal : [ $($child:tt),* $(,)? ] }) => {
        $crate::Term::tagged($tag, vec![$($crate::term!($child)),*])
    };

    ({ $tag:literal : $child:tt }) => {
        $crate::Term::tagged($tag, vec![$crate::term!($child)])
    };

    ($leaf:expr) => {
        $crate::Term::leaf(::std::string::ToString::to_string(&$leaf))
    };
}

#[cfg(test)]
mod tests {
    use crate::Term;

    #[test]
    fn test_term_macro_leaves() {
        assert_eq!(term!("hammer"), Term::leaf("hammer"));
        assert_eq!(term!(5), Term::leaf("5"));
        assert_eq!(term!(9.5), Term::leaf("9.5"));
        assert_eq!(term!(()), Term::empty());
    }

    #[test]
    fn test_term_macro_tags() {
        assert_eq!(term!({ "cost": 5 }), Term::tagged_value("cost", "5"));
        assert_eq!(term!({ "flag": [] }), Term::tagged("flag", vec![]));
        assert_eq!(
            term!({ "pos": [1, 2] }),
            Term::tagged("pos", vec![Term::leaf("1"), Term::leaf("2")])
        );
    }

    #[test]
    fn test_term_macro_lists() {
        assert_eq!(term!([]), Term::list(vec![]));
        assert_eq!(
            term!(["a", ["b", ()]]),
            Term::list(vec![
                Term::leaf("a"),
                Term::list(vec![Term::leaf("b"), Term::empty()])
            ])
        );
    }
}
