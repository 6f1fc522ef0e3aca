//! A small line-based textarea: just enough editing to drive the playground.
//! The cursor column is a char offset; byte offsets never leak out of here.

use unicode_width::UnicodeWidthStr;

pub struct EditorState {
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll: usize,
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

impl EditorState {
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = if text.is_empty() {
            vec![String::new()]
        } else {
            text.split('\n').map(String::from).collect()
        };
        Self {
            lines,
            row: 0,
            col: 0,
            scroll: 0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn line_chars(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    // --- edits (return true when the text changed) ---

    pub fn insert_char(&mut self, c: char) -> bool {
        let at = byte_index(&self.lines[self.row], self.col);
        self.lines[self.row].insert(at, c);
        self.col += 1;
        true
    }

    pub fn insert_newline(&mut self) -> bool {
        let at = byte_index(&self.lines[self.row], self.col);
        let rest = self.lines[self.row].split_off(at);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.col > 0 {
            let at = byte_index(&self.lines[self.row], self.col - 1);
            self.lines[self.row].remove(at);
            self.col -= 1;
            true
        } else if self.row > 0 {
            let tail = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_chars(self.row);
            self.lines[self.row].push_str(&tail);
            true
        } else {
            false
        }
    }

    pub fn delete(&mut self) -> bool {
        if self.col < self.line_chars(self.row) {
            let at = byte_index(&self.lines[self.row], self.col);
            self.lines[self.row].remove(at);
            true
        } else if self.row + 1 < self.lines.len() {
            let tail = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&tail);
            true
        } else {
            false
        }
    }

    // --- movement ---

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_chars(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_chars(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_chars(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_chars(self.row));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_chars(self.row);
    }

    // --- view ---

    /// Keep the cursor row inside a viewport of `height` rows.
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + height {
            self.scroll = self.row + 1 - height;
        }
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_screen_col(&self) -> u16 {
        let at = byte_index(&self.lines[self.row], self.col);
        self.lines[self.row][..at].width() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut EditorState, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                editor.insert_newline();
            } else {
                editor.insert_char(c);
            }
        }
    }

    #[test]
    fn typing_builds_the_text() {
        let mut editor = EditorState::from_text("");
        type_str(&mut editor, "(call\n  (identifier))");
        assert_eq!(editor.text(), "(call\n  (identifier))");
        assert_eq!(editor.cursor(), (1, 15));
    }

    #[test]
    fn text_round_trips_through_from_text() {
        let text = "(a)\n\n(b)";
        assert_eq!(EditorState::from_text(text).text(), text);
    }

    #[test]
    fn newline_splits_the_current_line() {
        let mut editor = EditorState::from_text("abcd");
        editor.move_right();
        editor.move_right();
        editor.insert_newline();
        assert_eq!(editor.text(), "ab\ncd");
        assert_eq!(editor.cursor(), (1, 0));
    }

    #[test]
    fn backspace_joins_lines_at_line_start() {
        let mut editor = EditorState::from_text("ab\ncd");
        editor.move_down();
        assert!(editor.backspace());
        assert_eq!(editor.text(), "abcd");
        assert_eq!(editor.cursor(), (0, 2));
    }

    #[test]
    fn backspace_at_origin_changes_nothing() {
        let mut editor = EditorState::from_text("ab");
        assert!(!editor.backspace());
        assert_eq!(editor.text(), "ab");
    }

    #[test]
    fn delete_joins_lines_at_line_end() {
        let mut editor = EditorState::from_text("ab\ncd");
        editor.move_end();
        assert!(editor.delete());
        assert_eq!(editor.text(), "abcd");
    }

    #[test]
    fn vertical_moves_clamp_the_column() {
        let mut editor = EditorState::from_text("long line\nab");
        editor.move_end();
        editor.move_down();
        assert_eq!(editor.cursor(), (1, 2));
    }

    #[test]
    fn multibyte_text_edits_by_chars_not_bytes() {
        let mut editor = EditorState::from_text("aé漢");
        editor.move_end();
        assert_eq!(editor.cursor_screen_col(), 4);
        assert!(editor.backspace());
        assert_eq!(editor.text(), "aé");
    }

    #[test]
    fn scrolling_follows_the_cursor() {
        let mut editor = EditorState::from_text("0\n1\n2\n3\n4\n5");
        for _ in 0..5 {
            editor.move_down();
        }
        editor.ensure_visible(3);
        assert_eq!(editor.scroll(), 3);
        for _ in 0..5 {
            editor.move_up();
        }
        editor.ensure_visible(3);
        assert_eq!(editor.scroll(), 0);
    }
}
