use core::fmt::{self, Display, Write};

/// Write the items of `items` to `out` in iteration order, separated by
/// `glue` and followed by `term`. An empty sequence writes `term` only.
///
/// # Errors
///
/// Returns the writer's error unchanged.
pub fn join_to<W, I>(out: &mut W, items: I, glue: &str, term: &str) -> fmt::Result
where
    W: Write,
    I: IntoIterator,
    I::Item: Display,
{
    let mut items = items.into_iter();
    if let Some(first) = items.next() {
        write!(out, "{first}")?;
        for item in items {
            write!(out, "{glue}{item}")?;
        }
    }
    out.write_str(term)
}

#[must_use]
/// [`join_to`] into a new `String`.
pub fn join<I>(items: I, glue: &str, term: &str) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut ret = String::new();
    // Writing into a String cannot fail.
    let _ = join_to(&mut ret, items, glue, term);
    ret
}

#[must_use]
/// Container debug form: `[e1, e2, ..., en]` and a newline.
pub fn debug_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    format!("[{}", join(items, ", ", "]\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    #[test]
    fn test_join_order() {
        assert_eq!(join([3, 1, 2], ", ", ""), "3, 1, 2");
        assert_eq!(join(["a", "b"], "-", ";"), "a-b;");
    }

    #[test]
    fn test_join_empty() {
        assert_eq!(join(Vec::<u8>::new(), ", ", "]"), "]");
        assert_eq!(debug_list(Vec::<u8>::new()), "[]\n");
    }

    #[test]
    fn test_debug_list() {
        let set: BTreeSet<_> = [5, 4, 6].into_iter().collect();
        assert_eq!(debug_list(&set), "[4, 5, 6]\n");
        assert_eq!(debug_list(vec!["x"]), "[x]\n");
    }

    #[test]
    fn test_join_to_existing_buffer() {
        let mut out = String::from("values: ");
        join_to(&mut out, 1..=3, " ", ".").expect("join");
        assert_eq!(out, "values: 1 2 3.");
    }
}
