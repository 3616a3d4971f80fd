/// Random-access cursor over the code points of an expression.
///
/// The scanner reads one character at a time and steps back when a
/// lookahead does not pan out, so the whole source is decoded up front.
pub struct CharStream {
    source: Vec<char>,
    position: usize,
}

impl CharStream {
    pub fn new(source: &str) -> Self {
        CharStream {
            source: source.chars().collect(),
            position: 0,
        }
    }

    pub fn can_read(&self) -> bool {
        self.position < self.source.len()
    }

    /// Reads the character under the cursor and advances past it.
    ///
    /// # Panics
    ///
    /// Panics when the stream is exhausted; check [`CharStream::can_read`] first.
    pub fn read_character(&mut self) -> char {
        let ch = self.source[self.position];
        self.position += 1;
        ch
    }

    /// Moves the cursor back by `amount` characters.
    pub fn rewind(&mut self, amount: usize) {
        debug_assert!(amount <= self.position, "rewind past start of stream");
        self.position -= amount;
    }

    /// Current cursor offset, counted in characters.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_and_rewind() {
        let mut stream = CharStream::new("a=b");
        assert_eq!(stream.read_character(), 'a');
        assert_eq!(stream.read_character(), '=');
        stream.rewind(1);
        assert_eq!(stream.position(), 1);
        assert_eq!(stream.read_character(), '=');
        assert_eq!(stream.read_character(), 'b');
        assert!(!stream.can_read());
    }

    #[test]
    fn test_multibyte_characters_are_single_steps() {
        let mut stream = CharStream::new("登录");
        assert_eq!(stream.read_character(), '登');
        assert_eq!(stream.position(), 1);
        assert_eq!(stream.read_character(), '录');
        assert!(!stream.can_read());
    }

    #[test]
    fn test_empty_stream() {
        let stream = CharStream::new("");
        assert!(!stream.can_read());
    }
}
