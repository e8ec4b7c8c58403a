pub(crate) mod layout;

use crate::roster::{self, AbilityKind};
use crate::showcase::{Layer, Showcase};
use crate::theme::{self, Color};
use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};
use crossterm::queue;
use layout::{Layout, Region, WindowSize};
use std::io::{self, Write};
use strum::IntoEnumIterator;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Quantized text opacity. The terminal can't blend, so tweened opacity
/// collapses to three states at paint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ink {
    Hidden,
    Dim,
    Full,
}

fn quantize_opacity(opacity: f32) -> Ink {
    if opacity < 0.15 {
        Ink::Hidden
    } else if opacity < 0.55 {
        Ink::Dim
    } else {
        Ink::Full
    }
}

/// Tween rise units map to rows at 10 units per row (a 30-unit rise is a
/// three-row offset).
fn rise_to_rows(rise: f32) -> i32 {
    (rise / 10.0).round() as i32
}

fn indicator_colors(count: usize, current: usize, theme: Color) -> Vec<Color> {
    (0..count).map(|i| if i == current { theme } else { theme::INACTIVE_SEGMENT }).collect()
}

/// Greedy word wrap by display width.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line = word.to_string();
        } else if line.width() + 1 + word.width() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn truncate_to(text: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > max {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out
}

fn offset_row(region: &Region, row: i32) -> Option<u16> {
    if row < region.y as i32 || row >= region.bottom() as i32 { None } else { Some(row as u16) }
}

/// Paints one frame of the showcase from a read-only snapshot.
pub(crate) struct Renderer<W: Write> {
    out: W,
    size: WindowSize,
    layout: Layout,
    segment_count: usize,
}

impl<W: Write> Renderer<W> {
    pub(crate) fn new(out: W, size: WindowSize, segment_count: usize) -> Self {
        Self { out, size, layout: Layout::compute(size, segment_count), segment_count }
    }

    pub(crate) fn resize(&mut self, size: WindowSize) {
        self.size = size;
        self.layout = Layout::compute(size, self.segment_count);
    }

    pub(crate) fn draw(&mut self, showcase: &Showcase) -> io::Result<()> {
        let current = &showcase.roster()[showcase.current()];
        let theme = current.theme_color;

        queue!(self.out, BeginSynchronizedUpdate)?;
        self.paint_background()?;
        self.paint_band(theme)?;
        self.paint_portraits(showcase, theme)?;

        // The outgoing slot paints first so the incoming one wins any cell
        // they briefly share.
        let visible: Vec<usize> =
            showcase.transition_from().into_iter().chain([showcase.current()]).collect();
        for slot in &visible {
            self.paint_left_panel(showcase, *slot, theme)?;
            self.paint_right_panel(showcase, *slot, theme)?;
        }

        self.paint_indicator(showcase.current(), theme)?;
        self.paint_header()?;
        self.paint_cursor(showcase, theme)?;
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()
    }

    fn paint_background(&mut self) -> io::Result<()> {
        let blank = " ".repeat(self.size.columns as usize);
        for row in 0..self.size.rows {
            queue!(
                self.out,
                MoveTo(0, row),
                SetForegroundColor(theme::INK.into()),
                SetBackgroundColor(theme::PAGE_BACKGROUND.into()),
                Print(&blank),
            )?;
        }
        Ok(())
    }

    fn paint_band(&mut self, theme: Color) -> io::Result<()> {
        let band = self.layout.band;
        let blank = " ".repeat(band.width as usize);
        for row in band.y..band.bottom() {
            queue!(
                self.out,
                MoveTo(band.x, row),
                SetBackgroundColor(theme.into()),
                Print(&blank),
            )?;

            // Diagonal gradient overlay: lighter shading grows toward the
            // lower-right corner of the band.
            let row_frac = (row - band.y) as f32 / band.height.max(1) as f32;
            let threshold = 1.2 - row_frac;
            if threshold < 1.0 {
                let start = (threshold.max(0.0) * band.width as f32).ceil() as u16;
                if start < band.width {
                    let overlay = "░".repeat((band.width - start) as usize);
                    queue!(
                        self.out,
                        MoveTo(band.x + start, row),
                        SetForegroundColor(theme::PAGE_BACKGROUND.into()),
                        SetBackgroundColor(theme.into()),
                        Print(overlay),
                    )?;
                }
            }
        }
        Ok(())
    }

    fn paint_portraits(&mut self, showcase: &Showcase, theme: Color) -> io::Result<()> {
        let slots = showcase.slots();
        let mut order: Vec<usize> = (0..slots.len()).collect();
        order.sort_by_key(|&index| {
            let layer = showcase
                .element(slots[index].portrait)
                .map(|element| element.layer)
                .unwrap_or(Layer::Back);
            (matches!(layer, Layer::Front), index == showcase.current())
        });
        for index in order {
            self.paint_portrait(showcase, index, theme)?;
        }
        Ok(())
    }

    fn paint_portrait(&mut self, showcase: &Showcase, index: usize, theme: Color) -> io::Result<()> {
        let Some(element) = showcase.element(showcase.slots()[index].portrait).copied() else {
            return Ok(());
        };
        if element.opacity <= 0.05 {
            return Ok(());
        }
        let character = &showcase.roster()[index];
        let Some(portrait) = roster::portrait(character.image) else {
            return Ok(());
        };

        let stage = self.layout.stage;
        let offset = (element.translate / 100.0 * stage.width as f32).round() as i32;
        let art_x = stage.x as i32 + (stage.width as i32 - portrait.width as i32) / 2 + offset;
        let art_y = stage.y as i32 + (stage.height as i32 - portrait.height() as i32) / 2;

        for (line_index, line) in portrait.lines.iter().enumerate() {
            let row = art_y + line_index as i32;
            let Some(row) = offset_row(&stage, row) else { continue };
            for (col_index, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let column = art_x + col_index as i32;
                if column < stage.x as i32 || column >= stage.right() as i32 {
                    continue;
                }
                let column = column as u16;
                let background =
                    if self.layout.band.contains(column, row) { theme } else { theme::PAGE_BACKGROUND };
                queue!(
                    self.out,
                    MoveTo(column, row),
                    SetForegroundColor(theme::INK.into()),
                    SetBackgroundColor(background.into()),
                    Print(ch),
                )?;
            }
        }
        Ok(())
    }

    fn paint_left_panel(&mut self, showcase: &Showcase, index: usize, theme: Color) -> io::Result<()> {
        let panel = self.layout.left;
        let slot = &showcase.slots()[index];
        let character = &showcase.roster()[index];
        let center_y = panel.y as i32 + panel.height as i32 / 2;

        if let Some(element) = showcase.element(slot.headline).copied() {
            if let Some(fg) = text_color(element.opacity, theme::INK) {
                if let Some(row) = offset_row(&panel, center_y - 3 + rise_to_rows(element.rise)) {
                    let text = truncate_to(showcase.headline(index), panel.width as usize);
                    self.text(panel.x, row, &text, fg, theme::PAGE_BACKGROUND, true)?;
                }
            }
        }

        if let Some(element) = showcase.element(slot.title).copied() {
            if let Some(fg) = text_color(element.opacity, theme) {
                if let Some(row) = offset_row(&panel, center_y - 1 + rise_to_rows(element.rise)) {
                    let text = truncate_to(&character.title.to_uppercase(), panel.width as usize);
                    self.text(panel.x, row, &text, fg, theme::PAGE_BACKGROUND, true)?;
                }
            }
        }

        if let Some(element) = showcase.element(slot.next_widget).copied() {
            if let Some(fg) = text_color(element.opacity, theme::INK) {
                let base = panel.bottom() as i32 - 3 + rise_to_rows(element.rise);
                let label_fg = if fg == theme::INK { theme::MUTED } else { fg };
                if let Some(row) = offset_row(&panel, base) {
                    self.text(panel.x, row, "    ", theme::INK, theme, false)?;
                    self.text(panel.x + 6, row, "NEXT", label_fg, theme::PAGE_BACKGROUND, false)?;
                }
                if let Some(row) = offset_row(&panel, base + 1) {
                    let name = truncate_to(
                        character.next.name,
                        panel.width.saturating_sub(6) as usize,
                    );
                    self.text(panel.x, row, "    ", theme::INK, theme, false)?;
                    self.text(panel.x + 6, row, &name, fg, theme::PAGE_BACKGROUND, true)?;
                }
            }
        }
        Ok(())
    }

    fn paint_right_panel(&mut self, showcase: &Showcase, index: usize, theme: Color) -> io::Result<()> {
        let panel = self.layout.right;
        let slot = &showcase.slots()[index];
        let character = &showcase.roster()[index];

        if let Some(element) = showcase.element(slot.description).copied() {
            if let Some(fg) = text_color(element.opacity, theme::BODY) {
                let lines = wrap_text(character.description, panel.width as usize);
                let base = panel.y as i32 + 1 + rise_to_rows(element.rise);
                for (line_index, line) in lines.iter().take(7).enumerate() {
                    if let Some(row) = offset_row(&panel, base + line_index as i32) {
                        self.text(panel.x, row, line, fg, theme::PAGE_BACKGROUND, false)?;
                    }
                }
            }
        }

        let ability_base = panel.y as i32 + 10;
        for (position, kind) in AbilityKind::iter().enumerate() {
            let handle = match kind {
                AbilityKind::Tactical => slot.tactical,
                AbilityKind::Passive => slot.passive,
                AbilityKind::Ultimate => slot.ultimate,
            };
            let Some(element) = showcase.element(handle).copied() else { continue };
            let Some(fg) = text_color(element.opacity, theme::INK) else { continue };

            let base = ability_base + position as i32 * 3 + rise_to_rows(element.rise);
            if let Some(row) = offset_row(&panel, base) {
                let badge = format!(" {} ", kind.badge());
                self.text(panel.x, row, &badge, theme::PAGE_BACKGROUND, theme, true)?;
                let label_fg = if fg == theme::INK { theme::MUTED } else { fg };
                let label = truncate_to(&kind.to_string(), panel.width.saturating_sub(4) as usize);
                self.text(panel.x + 4, row, &label, label_fg, theme::PAGE_BACKGROUND, false)?;
            }
            if let Some(row) = offset_row(&panel, base + 1) {
                let name = truncate_to(character.abilities.get(kind), panel.width as usize);
                self.text(panel.x, row, &name, fg, theme::PAGE_BACKGROUND, true)?;
            }
        }
        Ok(())
    }

    fn paint_indicator(&mut self, current: usize, theme: Color) -> io::Result<()> {
        let indicator = self.layout.indicator;
        for (index, color) in indicator_colors(self.segment_count, current, theme).iter().enumerate() {
            let x = indicator.x + index as u16 * 5;
            if x + 4 > self.size.columns {
                break;
            }
            self.text(x, indicator.y, "    ", theme::INK, *color, false)?;
        }
        Ok(())
    }

    fn paint_header(&mut self) -> io::Result<()> {
        self.text(3, 0, "APEX", theme::INK, theme::PAGE_BACKGROUND, true)?;
        // Static placeholder navigation; none of these go anywhere.
        let nav = "LEGENDS   SEASONS   BATTLE PASS   NEWS";
        let x = self.size.columns.saturating_sub(nav.width() as u16 + 3);
        self.text(x, 0, nav, theme::MUTED, theme::PAGE_BACKGROUND, false)
    }

    fn paint_cursor(&mut self, showcase: &Showcase, theme: Color) -> io::Result<()> {
        let Some((column, row)) = showcase.cursor() else { return Ok(()) };
        if column >= self.size.columns || row >= self.size.rows {
            return Ok(());
        }
        // Reverse video keeps the follower visible over any background.
        queue!(
            self.out,
            MoveTo(column, row),
            SetForegroundColor(theme.into()),
            SetAttribute(Attribute::Reverse),
            Print('●'),
            SetAttribute(Attribute::NoReverse),
        )
    }

    fn text(
        &mut self,
        column: u16,
        row: u16,
        text: &str,
        fg: Color,
        bg: Color,
        bold: bool,
    ) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(column, row),
            SetForegroundColor(fg.into()),
            SetBackgroundColor(bg.into()),
        )?;
        if bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.out, Print(text))?;
        if bold {
            queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }
}

/// Resolve a tweened opacity to a concrete color, or `None` when the element
/// is effectively invisible.
fn text_color(opacity: f32, full: Color) -> Option<Color> {
    match quantize_opacity(opacity) {
        Ink::Hidden => None,
        Ink::Dim => Some(theme::MUTED),
        Ink::Full => Some(full),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use crate::roster::CHARACTERS;
    use rstest::rstest;
    use std::time::{Duration, Instant};

    #[rstest]
    #[case(0.0, Ink::Hidden)]
    #[case(0.14, Ink::Hidden)]
    #[case(0.2, Ink::Dim)]
    #[case(0.54, Ink::Dim)]
    #[case(0.55, Ink::Full)]
    #[case(1.0, Ink::Full)]
    fn test_quantize_opacity(#[case] opacity: f32, #[case] expected: Ink) {
        assert_eq!(quantize_opacity(opacity), expected);
    }

    #[rstest]
    #[case(30.0, 3)]
    #[case(-30.0, -3)]
    #[case(0.0, 0)]
    #[case(14.0, 1)]
    fn test_rise_to_rows(#[case] rise: f32, #[case] expected: i32) {
        assert_eq!(rise_to_rows(rise), expected);
    }

    #[test]
    fn test_indicator_has_exactly_one_active_segment() {
        let theme = Color::new(209, 58, 58);
        for current in 0..6 {
            let colors = indicator_colors(6, current, theme);
            assert_eq!(colors.len(), 6);
            assert_eq!(colors.iter().filter(|c| **c == theme).count(), 1);
            assert_eq!(colors[current], theme);
        }
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let text = CHARACTERS[0].description;
        for line in wrap_text(text, 24) {
            assert!(line.width() <= 24, "line too wide: {line:?}");
        }
    }

    #[test]
    fn test_wrap_text_preserves_words() {
        let text = "one two three four five";
        let joined = wrap_text(text, 9).join(" ");
        assert_eq!(joined, text);
    }

    #[test]
    fn test_truncate_to() {
        assert_eq!(truncate_to("BLOODHOUND", 5), "BLOOD");
        assert_eq!(truncate_to("ABC", 10), "ABC");
    }

    #[test]
    fn test_draw_smoke() {
        let t0 = Instant::now();
        let showcase = Showcase::new(CHARACTERS, 24, &Options::default(), t0);
        let mut renderer = Renderer::new(Vec::new(), WindowSize::new(80, 24), CHARACTERS.len());
        renderer.draw(&showcase).unwrap();
        assert!(!renderer.out.is_empty());
    }

    #[test]
    fn test_draw_smoke_mid_transition() {
        let t0 = Instant::now();
        let mut showcase = Showcase::new(CHARACTERS, 24, &Options::default(), t0);
        showcase.pointer_moved(10, 5);
        showcase.handle_scroll(1000.0, t0);
        showcase.poll(t0 + Duration::from_millis(400));
        let mut renderer = Renderer::new(Vec::new(), WindowSize::new(100, 30), CHARACTERS.len());
        renderer.draw(&showcase).unwrap();
        assert!(!renderer.out.is_empty());
    }

    #[test]
    fn test_draw_smoke_tiny_window() {
        let t0 = Instant::now();
        let showcase = Showcase::new(CHARACTERS, 10, &Options::default(), t0);
        let mut renderer = Renderer::new(Vec::new(), WindowSize::new(20, 10), CHARACTERS.len());
        renderer.draw(&showcase).unwrap();
    }
}
