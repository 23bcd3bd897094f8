use unicode_width::UnicodeWidthChar;

/// Display width of a single character in terminal cells. Tabs count as 4.
pub fn char_width(c: char) -> usize {
    if c == '\t' { 4 } else { c.width().unwrap_or(0) }
}

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Truncate to fit within `max_cells`, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = char_width(c);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('\u{2026}');
    out
}

/// Pad with spaces to exactly `cells` wide (truncating when longer).
pub fn pad_to_width(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let w = display_width(&out);
    out.extend(std::iter::repeat_n(' ', cells.saturating_sub(w)));
    out
}

/// Wrap text into rows at most `width` cells wide.
///
/// Breaks at whitespace where possible. Runs without whitespace (CJK
/// sentences, long URLs) are broken between characters. Explicit newlines
/// always start a new row.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut rows = Vec::new();
    for logical in text.split('\n') {
        wrap_logical(logical, width, &mut rows);
    }
    rows
}

fn wrap_logical(line: &str, width: usize, rows: &mut Vec<String>) {
    let mut current = String::new();
    let mut col = 0;

    for word in line.split(' ') {
        let word_w = display_width(word);
        let space = usize::from(col > 0);

        if col + space + word_w <= width {
            if space == 1 {
                current.push(' ');
            }
            current.push_str(word);
            col += space + word_w;
            continue;
        }

        // Word does not fit on this row. Start a new row when the word
        // would fit there, otherwise fill character by character.
        if word_w <= width && col > 0 {
            rows.push(std::mem::take(&mut current));
            current.push_str(word);
            col = word_w;
            continue;
        }
        if col > 0 {
            current.push(' ');
            col += 1;
        }
        for c in word.chars() {
            let w = char_width(c);
            if col + w > width && col > 0 {
                rows.push(std::mem::take(&mut current));
                col = 0;
            }
            current.push(c);
            col += w;
        }
    }
    rows.push(current.trim_end().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn widths() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("设计"), 4);
        assert_eq!(display_width("a\tb"), 6);
    }

    #[test]
    fn truncate_and_pad() {
        assert_eq!(truncate_to_width("hello world", 6), "hello\u{2026}");
        assert_eq!(truncate_to_width("设计师", 4), "设\u{2026}");
        assert_eq!(truncate_to_width("ok", 5), "ok");
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("设计", 5), "设计 ");
    }

    #[test]
    fn wrap_on_spaces() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn wrap_cjk_between_characters() {
        assert_eq!(wrap_text("体验设计经验", 5), vec!["体验", "设计", "经验"]);
    }

    #[test]
    fn wrap_keeps_newlines_and_empty_text() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn long_word_is_split() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }
}
