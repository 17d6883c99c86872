/// Single-line text input used by the search box and the creation dialog.
///
/// The cursor is a character index, never a byte index, so multi-byte input
/// stays safe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    chars: Vec<char>,
    pub cursor_col: usize,
    pub scroll_col: usize, // Horizontal scroll (column offset)
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(content: impl Into<String>) -> Self {
        let chars: Vec<char> = content.into().chars().filter(|c| *c != '\n').collect();
        let cursor_col = chars.len();
        Self {
            chars,
            cursor_col,
            scroll_col: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' || ch == '\r' {
            return;
        }
        let col = self.cursor_col.min(self.chars.len());
        self.chars.insert(col, ch);
        self.cursor_col = col + 1;
    }

    /// Delete the character before the cursor (Backspace)
    pub fn delete_char(&mut self) {
        let col = self.cursor_col.min(self.chars.len());
        if col > 0 {
            self.chars.remove(col - 1);
            self.cursor_col = col - 1;
        }
    }

    /// Delete the character under the cursor (Delete)
    pub fn delete_forward(&mut self) {
        let col = self.cursor_col.min(self.chars.len());
        if col < self.chars.len() {
            self.chars.remove(col);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_col < self.chars.len() {
            self.cursor_col += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_col = self.chars.len();
    }

    pub fn set_text(&mut self, content: &str) {
        *self = Self::from_string(content);
    }

    /// Keep the cursor inside a viewport `viewport_width` columns wide
    pub fn update_horizontal_scroll(&mut self, viewport_width: usize) {
        if viewport_width == 0 {
            return;
        }
        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        } else if self.cursor_col >= self.scroll_col + viewport_width {
            self.scroll_col = self.cursor_col + 1 - viewport_width;
        }
    }

    /// Visible slice of the text for the current horizontal scroll
    pub fn visible_text(&self, viewport_width: usize) -> String {
        self.chars
            .iter()
            .skip(self.scroll_col)
            .take(viewport_width)
            .collect()
    }

    /// Cursor column relative to the left edge of the viewport
    pub fn cursor_screen_col(&self) -> usize {
        self.cursor_col.saturating_sub(self.scroll_col)
    }
}

impl std::fmt::Display for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
