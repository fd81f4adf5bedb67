//! Single-line prompt buffer for command and legacy text entry
//!
//! Names and field values share one identifier-style charset, so the buffer
//! filters on insert. Character feed is decoupled from the windowing layer
//! to keep the input router testable headless.

/// State for a prompt input field
#[derive(Debug, Clone, Default)]
pub struct PromptState {
    /// The text content
    pub text: String,
}

impl PromptState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters accepted into names and field values
    pub fn accepts(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_'
    }

    /// Apply one frame of typed characters and an optional backspace edge.
    /// Returns true if the text changed.
    pub fn feed(&mut self, chars: &[char], backspace: bool) -> bool {
        let mut changed = false;
        for &ch in chars {
            if Self::accepts(ch) {
                self.text.push(ch);
                changed = true;
            }
        }
        if backspace && self.text.pop().is_some() {
            changed = true;
        }
        changed
    }

    /// Drain the buffer, returning its contents
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_to_identifier_charset() {
        let mut p = PromptState::new();
        p.feed(&['H', 'e', 'r', 'o', ' ', '!', '_', '2'], false);
        assert_eq!(p.text, "Hero_2");
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut p = PromptState::new();
        p.feed(&['a', 'b'], false);
        assert!(p.feed(&[], true));
        assert_eq!(p.text, "a");
        // Backspace on empty is not a change
        p.feed(&[], true);
        assert!(!p.feed(&[], true));
    }

    #[test]
    fn take_drains_the_buffer() {
        let mut p = PromptState::new();
        p.feed(&['o', 'k'], false);
        assert_eq!(p.take(), "ok");
        assert!(p.is_empty());
    }
}
