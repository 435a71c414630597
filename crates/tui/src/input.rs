/// Single-line text entry.
pub struct InputState {
    pub buffer: String,
    masked: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            masked: false,
        }
    }

    pub fn masked() -> Self {
        Self {
            buffer: String::new(),
            masked: true,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        if !c.is_control() {
            self.buffer.push(c);
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.buffer
            .extend(text.chars().filter(|c| !c.is_control()));
    }

    pub fn handle_backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    /// Text as it should be drawn.
    pub fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.buffer.chars().count())
        } else {
            self.buffer.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_drops_newlines() {
        let mut input = InputState::new();
        input.handle_paste("http://localhost/cb?code=abc\r\n");
        assert_eq!(input.buffer, "http://localhost/cb?code=abc");
        input.handle_backspace();
        assert_eq!(input.buffer, "http://localhost/cb?code=ab");
    }

    #[test]
    fn masked_input_hides_text() {
        let mut input = InputState::masked();
        input.handle_char('x');
        input.handle_char('y');
        assert_eq!(input.display(), "**");
        assert_eq!(input.buffer, "xy");
    }
}
