//! Shared rendering utilities.
//!
//! Widths are counted in `char`s, which matches terminal cells for the text the
//! plugin renders (titles may contain accents but rarely wide glyphs).

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` occupies.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts or right-pads `text` to exactly `width` cells.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let used = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// Centers `text` in `width` cells, cutting it if it does not fit.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let len = self::width(text).min(width);
    let left = (width - len) / 2;
    format!("{}{}", " ".repeat(left), fit(text, width - left))
}

/// Greedy word wrap to lines of at most `width` cells.
///
/// Words longer than a line are split.
///
/// ```
/// use reelsearch::ui::helpers::wrap;
///
/// assert_eq!(wrap("a quiet place to sit", 8), vec!["a quiet", "place to", "sit"]);
/// ```
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        if word.is_empty() {
            continue;
        }

        let needed = if line.is_empty() { word.len() } else { self::width(&line) + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_cuts() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("Amélie", 6), "Amélie");
    }

    #[test]
    fn center_splits_padding() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("abcdefgh", 4), "abcd");
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("supercalifragilistic is long", 8), vec![
            "supercal", "ifragili", "stic is", "long"
        ]);
        assert!(wrap("   ", 10).is_empty());
    }
}
