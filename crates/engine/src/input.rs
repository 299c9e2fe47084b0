// Keypad input assembly - builds a well-formed expression string from
// discrete key tokens.

use crate::expr::Func;

/// Binary operator characters subject to the collision rule: typing one of
/// these directly after another replaces it instead of appending.
const OPERATORS: [char; 5] = ['+', '-', '*', '/', '%'];

/// Characters that end a numeric operand segment (for the one-decimal-point
/// rule).
const SEGMENT_BOUNDARIES: [char; 8] = ['+', '-', '*', '/', '%', '^', '(', ')'];

/// One keypad token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Dot,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Power,
    OpenParen,
    CloseParen,
    Func(Func),
    Const(Constant),
}

/// Constants append a fixed-precision decimal literal, not a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    /// Literal with 4 fractional digits, as the keypad inserts it.
    pub fn literal(&self) -> &'static str {
        match self {
            Constant::Pi => "3.1416",
            Constant::E => "2.7183",
        }
    }
}

impl Key {
    /// Map a keyboard character to its keypad token. Covers the typing
    /// surface: digits, dot, the four operators, %, ^ and parentheses.
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            '0'..='9' => Some(Key::Digit(c as u8 - b'0')),
            '.' => Some(Key::Dot),
            '+' => Some(Key::Add),
            '-' => Some(Key::Sub),
            '*' => Some(Key::Mul),
            '/' => Some(Key::Div),
            '%' => Some(Key::Rem),
            '^' => Some(Key::Power),
            '(' => Some(Key::OpenParen),
            ')' => Some(Key::CloseParen),
            _ => None,
        }
    }

    fn operator_char(&self) -> Option<char> {
        match self {
            Key::Add => Some('+'),
            Key::Sub => Some('-'),
            Key::Mul => Some('*'),
            Key::Div => Some('/'),
            Key::Rem => Some('%'),
            _ => None,
        }
    }
}

/// The in-progress expression buffer.
///
/// Every key press either mutates the buffer or is silently rejected; no
/// operation fails. The buffer only ever holds ASCII, so character-wise
/// deletion is byte-wise deletion.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole buffer (recalling a history entry).
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Apply one keypad token.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.text.push((b'0' + d.min(9)) as char),
            Key::Dot => {
                // One decimal point per operand segment.
                if !self.trailing_segment().contains('.') {
                    self.text.push('.');
                }
            }
            Key::Add | Key::Sub | Key::Mul | Key::Div | Key::Rem => {
                let op = key.operator_char().unwrap_or('+');
                // A new operator replaces a trailing operator rather than
                // appending, so operands stay single-operator separated.
                if self.text.ends_with(&OPERATORS[..]) {
                    self.text.pop();
                }
                self.text.push(op);
            }
            Key::Power => self.text.push('^'),
            Key::OpenParen => self.text.push('('),
            Key::CloseParen => self.text.push(')'),
            Key::Func(f) => {
                self.text.push_str(f.name());
                self.text.push('(');
            }
            Key::Const(c) => self.text.push_str(c.literal()),
        }
    }

    /// Remove exactly the last character; no-op on an empty buffer.
    pub fn delete(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// The numeric operand segment currently being typed: everything after
    /// the last operator boundary.
    fn trailing_segment(&self) -> &str {
        match self.text.rfind(&SEGMENT_BOUNDARIES[..]) {
            Some(i) => &self.text[i + 1..],
            None => &self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(keys: &[Key]) -> String {
        let mut buf = InputBuffer::new();
        for &k in keys {
            buf.press(k);
        }
        buf.text().to_string()
    }

    #[test]
    fn test_digits_append() {
        assert_eq!(pressed(&[Key::Digit(1), Key::Digit(2), Key::Digit(3)]), "123");
    }

    #[test]
    fn test_second_dot_in_segment_rejected() {
        assert_eq!(
            pressed(&[Key::Digit(1), Key::Dot, Key::Digit(5), Key::Dot]),
            "1.5"
        );
    }

    #[test]
    fn test_dot_allowed_after_operator() {
        // each operand gets its own decimal point
        assert_eq!(
            pressed(&[Key::Digit(1), Key::Dot, Key::Digit(5), Key::Add, Key::Dot]),
            "1.5+."
        );
    }

    #[test]
    fn test_dot_segment_resets_at_rem_and_power() {
        // % and ^ end an operand segment too
        assert_eq!(
            pressed(&[Key::Digit(1), Key::Dot, Key::Digit(5), Key::Rem, Key::Dot]),
            "1.5%."
        );
        assert_eq!(
            pressed(&[Key::Digit(1), Key::Dot, Key::Power, Key::Dot]),
            "1.^."
        );
    }

    #[test]
    fn test_operator_replaces_trailing_operator() {
        assert_eq!(pressed(&[Key::Digit(2), Key::Add, Key::Mul]), "2*");
        assert_eq!(pressed(&[Key::Digit(2), Key::Add, Key::Sub, Key::Div]), "2/");
    }

    #[test]
    fn test_operator_replacement_on_empty_buffer() {
        // "+" then "-" on an empty buffer yields "-", not "+-"
        assert_eq!(pressed(&[Key::Add, Key::Sub]), "-");
    }

    #[test]
    fn test_power_does_not_collide() {
        // ^ appends verbatim; only + - * / % participate in replacement
        assert_eq!(pressed(&[Key::Digit(2), Key::Power]), "2^");
        assert_eq!(pressed(&[Key::Digit(2), Key::Add, Key::Power]), "2+^");
    }

    #[test]
    fn test_function_appends_name_and_open_paren() {
        assert_eq!(pressed(&[Key::Func(Func::Sin)]), "sin(");
        assert_eq!(
            pressed(&[Key::Func(Func::Sqrt), Key::Digit(9), Key::CloseParen]),
            "sqrt(9)"
        );
    }

    #[test]
    fn test_constants_append_literals() {
        assert_eq!(pressed(&[Key::Const(Constant::Pi)]), "3.1416");
        assert_eq!(pressed(&[Key::Const(Constant::E)]), "2.7183");
    }

    #[test]
    fn test_delete_removes_one_character() {
        let mut buf = InputBuffer::new();
        buf.press(Key::Digit(1));
        buf.press(Key::Digit(2));
        buf.delete();
        assert_eq!(buf.text(), "1");
    }

    #[test]
    fn test_delete_on_empty_is_noop() {
        let mut buf = InputBuffer::new();
        buf.delete();
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_clear() {
        let mut buf = InputBuffer::new();
        buf.press(Key::Digit(7));
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_from_char_typing_surface() {
        assert_eq!(Key::from_char('7'), Some(Key::Digit(7)));
        assert_eq!(Key::from_char('*'), Some(Key::Mul));
        assert_eq!(Key::from_char('^'), Some(Key::Power));
        assert_eq!(Key::from_char('x'), None);
    }
}
