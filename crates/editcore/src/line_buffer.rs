use std::borrow::Cow;

/// Spaces substituted for every horizontal tab entering the buffer.
pub const TAB_EXPANSION: &str = "    ";

/// Ordered, never-empty sequence of tab-free lines.
///
/// Columns passed to the line-level mutators are `char` offsets, so an edit
/// can never land in the middle of a UTF-8 sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// A buffer holding the single placeholder line of a new document.
    pub fn new() -> Self {
        let mut buffer = Self { lines: Vec::new() };
        buffer.append_line("");
        buffer
    }

    /// Builds a buffer from loaded records, one line each.
    ///
    /// An empty source still yields one empty line.
    pub fn from_lines<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buffer = Self { lines: Vec::new() };
        for record in records {
            buffer.append_line(record.as_ref());
        }
        if buffer.lines.is_empty() {
            buffer.append_line("");
        }
        buffer
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Length of line `index` in chars, or 0 for a missing line.
    pub fn line_len(&self, index: usize) -> usize {
        self.lines
            .get(index)
            .map(|line| line.chars().count())
            .unwrap_or(0)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Inserts `text` as a new line at `index`, shifting later lines down.
    ///
    /// `index == line_count()` appends.
    ///
    /// # Panics
    ///
    /// Panics if `index > line_count()`.
    pub fn insert_line(&mut self, index: usize, text: &str) {
        assert!(
            index <= self.lines.len(),
            "insert_line index {} out of bounds (line count {})",
            index,
            self.lines.len()
        );
        self.lines.insert(index, normalize_tabs(text).into_owned());
    }

    pub fn append_line(&mut self, text: &str) {
        self.lines.push(normalize_tabs(text).into_owned());
    }

    /// Removes and returns line `index`, shifting later lines up.
    ///
    /// The buffer does not guard against becoming empty; callers pair a
    /// removal with a surviving neighbour.
    ///
    /// # Panics
    ///
    /// Panics if `index >= line_count()`.
    pub fn remove_line(&mut self, index: usize) -> String {
        assert!(
            index < self.lines.len(),
            "remove_line index {} out of bounds (line count {})",
            index,
            self.lines.len()
        );
        self.lines.remove(index)
    }

    /// Inserts `text` into line `row` before char `col`.
    ///
    /// Returns the number of chars actually inserted after tab expansion.
    ///
    /// # Panics
    ///
    /// Panics if `row` does not exist or `col` is past the end of the line.
    pub fn insert_text(&mut self, row: usize, col: usize, text: &str) -> usize {
        let normalized = normalize_tabs(text);
        let line = self.line_mut(row);
        let at = byte_offset(line, col);
        line.insert_str(at, &normalized);
        normalized.chars().count()
    }

    /// Removes the char at `col` in line `row`, if there is one.
    ///
    /// # Panics
    ///
    /// Panics if `row` does not exist.
    pub fn remove_char(&mut self, row: usize, col: usize) -> Option<char> {
        let line = self.line_mut(row);
        let (at, _) = line.char_indices().nth(col)?;
        Some(line.remove(at))
    }

    /// Truncates line `row` at char `col` and returns the removed tail.
    ///
    /// # Panics
    ///
    /// Panics if `row` does not exist or `col` is past the end of the line.
    pub fn split_off(&mut self, row: usize, col: usize) -> String {
        let line = self.line_mut(row);
        let at = byte_offset(line, col);
        line.split_off(at)
    }

    /// Appends `text` to the end of line `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` does not exist.
    pub fn push_text(&mut self, row: usize, text: &str) {
        let normalized = normalize_tabs(text);
        self.line_mut(row).push_str(&normalized);
    }

    fn line_mut(&mut self, row: usize) -> &mut String {
        let count = self.lines.len();
        match self.lines.get_mut(row) {
            Some(line) => line,
            None => panic!("line {} out of bounds (line count {})", row, count),
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces every horizontal tab with four spaces in one pass.
///
/// Borrows the input unchanged when it holds no tab.
pub fn normalize_tabs(text: &str) -> Cow<'_, str> {
    if !text.contains('\t') {
        return Cow::Borrowed(text);
    }

    let tabs = text.matches('\t').count();
    let mut expanded = String::with_capacity(text.len() + tabs * (TAB_EXPANSION.len() - 1));
    for c in text.chars() {
        if c == '\t' {
            expanded.push_str(TAB_EXPANSION);
        } else {
            expanded.push(c);
        }
    }
    Cow::Owned(expanded)
}

fn byte_offset(line: &str, col: usize) -> usize {
    if col == 0 {
        return 0;
    }
    match line.char_indices().nth(col) {
        Some((at, _)) => at,
        None => {
            let len = line.chars().count();
            assert!(
                col <= len,
                "column {} out of bounds (line length {})",
                col,
                len
            );
            line.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_has_one_empty_line() {
        let buffer = LineBuffer::new();
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
    }

    #[test]
    fn test_from_empty_source_keeps_placeholder_line() {
        let buffer = LineBuffer::from_lines(Vec::<String>::new());
        assert_eq!(buffer.lines(), &[String::new()]);
    }

    #[test]
    fn test_tabs_expanded_exhaustively() {
        assert_eq!(normalize_tabs("a\tb\tc"), "a    b    c");
        assert_eq!(normalize_tabs("\t\t"), "        ");
        assert!(matches!(normalize_tabs("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_append_and_insert_normalize() {
        let mut buffer = LineBuffer::from_lines(["x\ty"]);
        buffer.insert_line(0, "\tfirst");
        buffer.append_line("last\t");

        assert_eq!(buffer.lines(), &["    first", "x    y", "last    "]);
        assert!(buffer.lines().iter().all(|line| !line.contains('\t')));
    }

    #[test]
    fn test_insert_at_line_count_appends() {
        let mut buffer = LineBuffer::from_lines(["one"]);
        buffer.insert_line(1, "two");
        assert_eq!(buffer.lines(), &["one", "two"]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_insert_past_end_panics() {
        let mut buffer = LineBuffer::new();
        buffer.insert_line(2, "nope");
    }

    #[test]
    fn test_remove_line_shifts_up() {
        let mut buffer = LineBuffer::from_lines(["a", "b", "c"]);
        assert_eq!(buffer.remove_line(1), "b");
        assert_eq!(buffer.lines(), &["a", "c"]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_remove_missing_line_panics() {
        let mut buffer = LineBuffer::new();
        buffer.remove_line(1);
    }

    #[test]
    fn test_insert_text_reports_expanded_width() {
        let mut buffer = LineBuffer::from_lines(["ac"]);
        assert_eq!(buffer.insert_text(0, 1, "b"), 1);
        assert_eq!(buffer.insert_text(0, 3, "\t"), 4);
        assert_eq!(buffer.line(0), Some("abc    "));
    }

    #[test]
    fn test_char_columns_respect_multibyte_text() {
        let mut buffer = LineBuffer::from_lines(["héllo"]);
        assert_eq!(buffer.line_len(0), 5);

        buffer.insert_text(0, 2, "!");
        assert_eq!(buffer.line(0), Some("hé!llo"));

        assert_eq!(buffer.remove_char(0, 1), Some('é'));
        assert_eq!(buffer.line(0), Some("h!llo"));
    }

    #[test]
    fn test_remove_char_past_end_is_none() {
        let mut buffer = LineBuffer::from_lines(["ab"]);
        assert_eq!(buffer.remove_char(0, 2), None);
        assert_eq!(buffer.line(0), Some("ab"));
    }

    #[test]
    fn test_split_off_and_push_text() {
        let mut buffer = LineBuffer::from_lines(["hello world"]);
        let tail = buffer.split_off(0, 5);
        assert_eq!(tail, " world");
        assert_eq!(buffer.line(0), Some("hello"));

        buffer.push_text(0, "\t!");
        assert_eq!(buffer.line(0), Some("hello    !"));
    }

    #[test]
    fn test_split_off_at_end_yields_empty_tail() {
        let mut buffer = LineBuffer::from_lines(["abc"]);
        assert_eq!(buffer.split_off(0, 3), "");
        assert_eq!(buffer.line(0), Some("abc"));
    }
}
