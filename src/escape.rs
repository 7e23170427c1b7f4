/// Wrap `value` in POSIX single quotes.
///
/// Inside single quotes the shell interprets nothing, so the only character
/// that needs care is `'` itself: it closes the quote, emits an escaped quote,
/// and reopens (`'` becomes `'\''`). Backslashes, `$`, double quotes, and
/// newlines pass through untouched.
pub fn single_quote(value: &str) -> String {
    let mut output = String::with_capacity(value.len() + 2);
    output.push('\'');
    for c in value.chars() {
        if c == '\'' {
            output.push_str("'\\''");
        } else {
            output.push(c);
        }
    }
    output.push('\'');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluate a word made of single-quoted spans and `\x` escapes the way a
    /// POSIX shell would.
    fn shell_unquote(word: &str) -> String {
        let mut output = String::new();
        let mut chars = word.chars();
        while let Some(c) = chars.next() {
            match c {
                '\'' => {
                    for inner in chars.by_ref() {
                        if inner == '\'' {
                            break;
                        }
                        output.push(inner);
                    }
                }
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        output.push(escaped);
                    }
                }
                other => output.push(other),
            }
        }
        output
    }

    #[test]
    fn plain_value_is_wrapped() {
        assert_eq!(single_quote("gh-r"), "'gh-r'");
    }

    #[test]
    fn empty_value_is_empty_quotes() {
        assert_eq!(single_quote(""), "''");
    }

    #[test]
    fn embedded_single_quote_is_spliced() {
        assert_eq!(single_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn double_quotes_and_dollars_are_untouched() {
        assert_eq!(
            single_quote(r#"eval "$(foo)""#),
            r#"'eval "$(foo)"'"#
        );
    }

    #[test]
    fn round_trips_through_shell_quoting() {
        let samples = [
            "plain",
            "it's",
            "''",
            r"back\slash",
            "$HOME and ${PATH}",
            "line one\nline two",
            r#"mixed '"$x"' \' end"#,
            "tab\there",
            "unicode ✓ 'é'",
        ];
        for sample in samples {
            assert_eq!(shell_unquote(&single_quote(sample)), sample, "sample: {sample:?}");
        }
    }
}
