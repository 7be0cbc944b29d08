/// Position of the next byte to be consumed.
///
/// Columns count bytes, starting at 1. Consuming `\n` moves to column 1 of
/// the following line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Step over `consumed`, which must be the bytes starting at `offset`.
    pub fn advance(&mut self, consumed: &[u8]) {
        for &byte in consumed {
            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += consumed.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_line_one_column_one() {
        let cursor = Cursor::new();
        assert_eq!((cursor.offset, cursor.line, cursor.column), (0, 1, 1));
    }

    #[test]
    fn advance_on_one_line() {
        let mut cursor = Cursor::new();
        cursor.advance(b"let x");
        assert_eq!((cursor.offset, cursor.line, cursor.column), (5, 1, 6));
    }

    #[test]
    fn newline_resets_column() {
        let mut cursor = Cursor::new();
        cursor.advance(b"ab\ncd");
        assert_eq!((cursor.offset, cursor.line, cursor.column), (5, 2, 3));
        cursor.advance(b"\n");
        assert_eq!((cursor.offset, cursor.line, cursor.column), (6, 3, 1));
    }

    #[test]
    fn carriage_return_is_a_column() {
        let mut cursor = Cursor::new();
        cursor.advance(b"\r\n");
        assert_eq!((cursor.line, cursor.column), (2, 1));
        cursor.advance(b"\r");
        assert_eq!((cursor.line, cursor.column), (2, 2));
    }
}
