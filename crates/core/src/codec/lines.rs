//! Line and field splitting for box files.

use once_cell::sync::Lazy;
use regex::Regex;

/// Any Unicode line break sequence.
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|[\n\x0B\x0C\r\x{85}\x{2028}\x{2029}]").expect("line break pattern is valid")
});

/// Splits text on every Unicode line break (`\r\n`, `\n`, `\r`, VT, FF,
/// NEL, LS, PS).
pub fn split_lines(text: &str) -> Vec<&str> {
    LINE_BREAK.split(text).collect()
}

/// Splits a box line into fields on runs of spaces.
///
/// A space in the very first column is never a delimiter: it belongs to the
/// first field, so a box whose text is a space (`"  1 2 3 4 0"`) keeps its
/// text. Trailing empty fields are dropped. Tabs are not delimiters.
pub fn split_fields(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::with_capacity(6);
    let mut start = 0;
    let mut i = usize::from(bytes.first() == Some(&b' '));

    while i < bytes.len() {
        if bytes[i] != b' ' {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        fields.push(&line[start..run_start]);
        start = i;
    }
    fields.push(&line[start..]);

    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_every_line_break_kind() {
        let text = "a\r\nb\nc\rd\u{2028}e\u{0085}f";
        assert_eq!(split_lines(text), vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn crlf_is_one_break() {
        assert_eq!(split_lines("a\r\n\r\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn fields_split_on_space_runs() {
        assert_eq!(split_fields("h  10 10   20 30 0"), vec!["h", "10", "10", "20", "30", "0"]);
    }

    #[test]
    fn leading_space_is_box_text() {
        assert_eq!(split_fields("  1 2 3 4 0"), vec![" ", "1", "2", "3", "4", "0"]);
        assert_eq!(split_fields(" 1 2 3 4"), vec![" 1", "2", "3", "4"]);
    }

    #[test]
    fn trailing_spaces_add_no_fields() {
        assert_eq!(split_fields("a 1 2 3 4   "), vec!["a", "1", "2", "3", "4"]);
        assert!(split_fields("").is_empty());
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(split_fields("ก็ 1 2 3 4 0")[0], "ก็");
    }
}
