use std::sync::LazyLock;

use regex::Regex;

// `perf script` pads its columns with spaces but also glues a colon onto
// the timestamp and the event name, so a plain whitespace split leaves
// stray colons behind. A colon followed by whitespace delimits exactly
// like a whitespace run does.
static FIELD_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s+|\s+").expect("field split pattern compiles"));

// Leaf symbol name: any number of lazily-consumed `namespace::` segments,
// then the identifier, then an optional `+offset` suffix. Namespace
// stripping happens before offset stripping; the capture excludes both.
static LEAF_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[^:]+?::)*?([^:+]+)(?:\+.*)?$").expect("leaf pattern compiles"));

/// Splits one perf script line into its columns.
///
/// Delimiters are a colon followed by whitespace, or a run of whitespace,
/// whichever the scan reaches first. Callers index into the result by the
/// fixed column positions of the sample format.
pub fn split_fields(line: &str) -> Vec<&str> {
    FIELD_SPLIT.split(line).collect()
}

/// Resolves the leaf function name of a raw symbol string.
///
/// `foo::bar+0x10` resolves to `bar`; a bare `baz` resolves to itself.
/// Returns `None` when the symbol contains no identifier at all.
pub fn leaf_name(symbol: &str) -> Option<&str> {
    LEAF_NAME
        .captures(symbol)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn splits_on_colon_space_and_whitespace_runs() {
        let line = "bench 12345 98123.456789: 5 L1-dcache-loads: ffffa3b2 foo::bar+0x10 (/usr/bin/bench)";
        let fields = split_fields(line);

        assert_eq!(
            fields,
            vec![
                "bench",
                "12345",
                "98123.456789",
                "5",
                "L1-dcache-loads",
                "ffffa3b2",
                "foo::bar+0x10",
                "(/usr/bin/bench)",
            ]
        );
    }

    #[test]
    fn colon_without_following_whitespace_stays_in_the_field() {
        // Only `": "` delimits; the `::` inside a symbol survives the split.
        let fields = split_fields("a::b c");
        assert_eq!(fields, vec!["a::b", "c"]);
    }

    #[rstest]
    #[case("bar", Some("bar"))]
    #[case("foo::bar", Some("bar"))]
    #[case("foo::bar+0x10", Some("bar"))]
    #[case("a::b::leaf+0x1f", Some("leaf"))]
    #[case("leaf+0x4", Some("leaf"))]
    #[case("[unknown]", Some("[unknown]"))]
    #[case("", None)]
    fn resolves_leaf_names(#[case] symbol: &str, #[case] expected: Option<&str>) {
        assert_eq!(leaf_name(symbol), expected);
    }
}
