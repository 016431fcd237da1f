use unicode_width::UnicodeWidthChar;

/// One column of a rendered strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Blank,
    Char(char),
    /// Right half of a double-width character.
    Continuation,
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }
}

/// Lay `text` out into cells, splitting wide characters over two columns.
/// Zero-width characters are dropped.
pub fn push_text(cells: &mut Vec<Cell>, text: &str) {
    for ch in text.chars() {
        match ch.width() {
            Some(0) | None => {}
            Some(1) => cells.push(Cell::Char(ch)),
            Some(_) => {
                cells.push(Cell::Char(ch));
                cells.push(Cell::Continuation);
            }
        }
    }
}

pub fn push_blanks(cells: &mut Vec<Cell>, n: usize) {
    cells.extend(std::iter::repeat(Cell::Blank).take(n));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_chars_take_two_cells() {
        let mut cells = Vec::new();
        push_text(&mut cells, "a日");
        assert_eq!(cells, vec![Cell::Char('a'), Cell::Char('日'), Cell::Continuation]);
    }
}
