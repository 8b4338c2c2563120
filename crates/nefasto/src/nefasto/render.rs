//! Re-emit a text map with nefasto cells marked.

use std::collections::HashSet;

use crate::registry::Pos;

pub const NEFASTO_GLYPH: char = '#';

/// Replace every character whose `(line, column)` is in `points` with `#`.
///
/// Columns count `char`s, as the loader does, so multibyte glyphs take one
/// cell; newlines and every other character pass through unchanged.
pub fn render_map<'a, I>(text: &str, points: I) -> String
where
    I: IntoIterator<Item = &'a Pos>,
{
    let marked: HashSet<Pos> = points.into_iter().copied().collect();
    let mut out = String::with_capacity(text.len());
    let (mut x, mut y) = (0i32, 0i32);
    for c in text.chars() {
        if c == '\n' {
            out.push(c);
            x += 1;
            y = 0;
            continue;
        }
        if marked.contains(&Pos::new(x, y)) {
            out.push(NEFASTO_GLYPH);
        } else {
            out.push(c);
        }
        y += 1;
    }
    out
}
