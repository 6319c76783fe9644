//! Six-box one-time token entry

/// Number of digits in a one-time token
pub const TOKEN_LENGTH: usize = 6;

/// Token entry model: six digit slots and the focused slot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenInput {
    slots: [Option<char>; TOKEN_LENGTH],
    focus: usize,
    disabled: bool,
}

impl TokenInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type a character into the focused slot
    ///
    /// Non-digits are ignored. Returns the full code once every slot holds
    /// a digit.
    pub fn input(&mut self, c: char) -> Option<String> {
        if self.disabled || !c.is_ascii_digit() {
            return None;
        }

        self.slots[self.focus] = Some(c);
        if self.focus < TOKEN_LENGTH - 1 {
            self.focus += 1;
        }

        self.completed()
    }

    /// Paste text; fills every slot only if it carries six digits
    pub fn paste(&mut self, text: &str) -> Option<String> {
        if self.disabled {
            return None;
        }

        let digits: Vec<char> = text
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(TOKEN_LENGTH)
            .collect();
        if digits.len() != TOKEN_LENGTH {
            return None;
        }

        for (slot, digit) in self.slots.iter_mut().zip(digits) {
            *slot = Some(digit);
        }
        self.focus = TOKEN_LENGTH - 1;

        self.completed()
    }

    /// Clear the focused slot, or step back and clear the previous one
    pub fn backspace(&mut self) {
        if self.disabled {
            return;
        }

        if self.slots[self.focus].is_some() {
            self.slots[self.focus] = None;
        } else if self.focus > 0 {
            self.focus -= 1;
            self.slots[self.focus] = None;
        }
    }

    pub fn move_left(&mut self) {
        if !self.disabled && self.focus > 0 {
            self.focus -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if !self.disabled && self.focus < TOKEN_LENGTH - 1 {
            self.focus += 1;
        }
    }

    /// Empty every slot and focus the first one
    pub fn clear(&mut self) {
        self.slots = [None; TOKEN_LENGTH];
        self.focus = 0;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn slots(&self) -> [Option<char>; TOKEN_LENGTH] {
        self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// The entered code, if all six slots are filled
    pub fn completed(&self) -> Option<String> {
        self.slots.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_completes_code() {
        let mut input = TokenInput::new();
        for c in "12345".chars() {
            assert_eq!(input.input(c), None);
        }
        assert_eq!(input.focus(), 5);
        assert_eq!(input.input('6'), Some("123456".to_string()));
    }

    #[test]
    fn test_non_digits_ignored() {
        let mut input = TokenInput::new();
        assert_eq!(input.input('a'), None);
        assert_eq!(input.input(' '), None);
        assert!(input.is_empty());
        assert_eq!(input.focus(), 0);
    }

    #[test]
    fn test_backspace_steps_back() {
        let mut input = TokenInput::new();
        input.input('1');
        input.input('2');
        assert_eq!(input.focus(), 2);

        input.backspace();
        assert_eq!(input.focus(), 1);
        assert_eq!(input.slots()[1], None);
        assert_eq!(input.slots()[0], Some('1'));

        input.backspace();
        input.backspace();
        assert!(input.is_empty());
        assert_eq!(input.focus(), 0);
    }

    #[test]
    fn test_paste() {
        let mut input = TokenInput::new();
        assert_eq!(input.paste("12-34"), None);
        assert!(input.is_empty());

        assert_eq!(input.paste(" 123 456 789"), Some("123456".to_string()));
        assert_eq!(input.focus(), 5);
    }

    #[test]
    fn test_overwrite_after_moving_focus() {
        let mut input = TokenInput::new();
        input.paste("111111");
        input.move_left();
        input.move_left();
        assert_eq!(input.focus(), 3);
        assert_eq!(input.input('9'), Some("111911".to_string()));
    }

    #[test]
    fn test_disabled_rejects_edits() {
        let mut input = TokenInput::new();
        input.set_disabled(true);
        assert_eq!(input.input('1'), None);
        assert_eq!(input.paste("123456"), None);
        assert!(input.is_empty());

        input.set_disabled(false);
        input.input('1');
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.focus(), 0);
    }
}
