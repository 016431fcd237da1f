use std::time::Instant;

use super::cell::{push_blanks, push_text, Cell};
use super::surface::Surface;
use crate::measure::{wrap_translation, VAR_GAP, VAR_MASK_WIDTH};

const DIM_ON: &str = "\x1b[2m";
const DIM_OFF: &str = "\x1b[22m";

/// Attribute set on the container while the track sits centered.
const ATTR_CENTERED: &str = "data-marquee-centered";

/// One loop of the track as cells: each node followed by the gap.
fn cycle_cells(surface: &Surface) -> Vec<Cell> {
    let gap = surface.var_px(VAR_GAP).unwrap_or(0.0).round().max(0.0) as usize;
    let mut cells = Vec::new();
    if let Some(track) = &surface.track {
        for node in track.canonical() {
            push_text(&mut cells, &node.node);
            push_blanks(&mut cells, gap);
        }
    }
    cells
}

/// The visible window of the region at `now`, one terminal line wide.
pub fn visible_cells(surface: &Surface, now: Instant) -> Vec<Cell> {
    let width = surface.width.max(0.0) as usize;
    let cycle = cycle_cells(surface);
    let mut out = Vec::with_capacity(width);

    if cycle.is_empty() {
        push_blanks(&mut out, width);
        return out;
    }

    if surface.attribute(ATTR_CENTERED).is_some() {
        // trailing gap belongs to the loop seam, not the centered row
        let trimmed = cycle.len() - cycle.iter().rev().take_while(|c| c.is_blank()).count();
        let content = &cycle[..trimmed.min(width)];
        let left = (width - content.len()) / 2;
        push_blanks(&mut out, left);
        out.extend_from_slice(content);
        let rest = width - out.len();
        push_blanks(&mut out, rest);
        return out;
    }

    let period = cycle.len() as f32;
    let translation = wrap_translation(surface.rendered_translation(now), period);
    let start = (-translation).round() as usize % cycle.len();
    for i in 0..width {
        let cell = cycle[(start + i) % cycle.len()];
        out.push(match cell {
            // half a glyph at the left edge
            Cell::Continuation if i == 0 => Cell::Blank,
            other => other,
        });
    }
    // half a glyph at the right edge
    if let Some(Cell::Char(ch)) = out.last().copied() {
        if unicode_width::UnicodeWidthChar::width(ch) == Some(2) {
            if let Some(last) = out.last_mut() {
                *last = Cell::Blank;
            }
        }
    }
    out
}

/// Render the region as a printable line, dimming the faded edges.
pub fn render_line(surface: &Surface, now: Instant) -> String {
    let cells = visible_cells(surface, now);
    let fade = surface.var_px(VAR_MASK_WIDTH).unwrap_or(0.0).round().max(0.0) as usize;
    let fade = fade.min(cells.len() / 2);
    let mut line = String::with_capacity(cells.len() + 16);
    let mut dim = false;
    for (i, cell) in cells.iter().enumerate() {
        let faded = i < fade || i + fade >= cells.len();
        if faded != dim {
            line.push_str(if faded { DIM_ON } else { DIM_OFF });
            dim = faded;
        }
        match cell {
            Cell::Blank => line.push(' '),
            Cell::Char(ch) => line.push(*ch),
            Cell::Continuation => {}
        }
    }
    if dim {
        line.push_str(DIM_OFF);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TextHost;
    use crate::track::{self, Content};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn surface_with(items: &[&str], width: f32, gap: &str) -> Surface {
        let host = TextHost::new(Arc::new(Mutex::new(Surface::new(width))));
        let content: Content<String, String> =
            Content::new(items.iter().map(|s| s.to_string()).collect(), |s: &String, _| Ok(s.clone()));
        let canonical = track::render_cycle(&content, &host);
        let track = track::assemble(&host, canonical, 1, false, None);
        let mut s = Surface::new(width);
        s.track = Some(track);
        s.vars.insert(VAR_GAP, gap.to_string());
        s
    }

    fn plain(cells: &[Cell]) -> String {
        cells
            .iter()
            .filter_map(|c| match c {
                Cell::Blank => Some(' '),
                Cell::Char(ch) => Some(*ch),
                Cell::Continuation => None,
            })
            .collect()
    }

    #[test]
    fn window_follows_translation() {
        let now = Instant::now();
        let mut s = surface_with(&["abc", "de"], 6.0, "1px");
        assert_eq!(plain(&visible_cells(&s, now)), "abc de");
        s.direct = Some(-2.0);
        assert_eq!(plain(&visible_cells(&s, now)), "c de a");
        // a full period wraps back to the start
        s.direct = Some(-7.0);
        assert_eq!(plain(&visible_cells(&s, now)), "abc de");
    }

    #[test]
    fn centered_row_is_padded_both_sides() {
        let now = Instant::now();
        let mut s = surface_with(&["ab"], 6.0, "1px");
        s.attributes.insert(ATTR_CENTERED, "true".into());
        assert_eq!(plain(&visible_cells(&s, now)), "  ab  ");
    }

    #[test]
    fn half_glyphs_at_edges_are_blanked() {
        let now = Instant::now();
        let mut s = surface_with(&["日本"], 3.0, "0px");
        s.direct = Some(-1.0);
        let cells = visible_cells(&s, now);
        assert_eq!(cells[0], Cell::Blank);
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn faded_edges_are_dimmed() {
        let now = Instant::now();
        let mut s = surface_with(&["abcdef"], 6.0, "0px");
        s.vars.insert(VAR_MASK_WIDTH, "2px".into());
        assert_eq!(render_line(&s, now), "\x1b[2mab\x1b[22mcd\x1b[2mef\x1b[22m");
        s.vars.insert(VAR_MASK_WIDTH, "0px".into());
        assert_eq!(render_line(&s, now), "abcdef");
    }

    #[test]
    fn empty_region_is_blank() {
        let s = Surface::new(4.0);
        assert_eq!(render_line(&s, Instant::now()), "    ");
    }
}
