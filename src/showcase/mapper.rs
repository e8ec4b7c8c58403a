/// Maps a virtual scroll offset over the pinned panel to a character index.
///
/// The panel is pinned across `viewport_rows * (count - 1) * 2` rows of
/// virtual scroll; progress over that span picks the index. The mapper never
/// produces an out-of-range index and never emits while a transition is in
/// flight — the caller samples the in-flight flag before asking.
#[derive(Debug)]
pub(crate) struct ScrollMapper {
    count: usize,
    offset: f32,
    span: f32,
}

impl ScrollMapper {
    pub(crate) fn new(count: usize, viewport_rows: u16) -> Self {
        Self { count, offset: 0.0, span: Self::pinned_span(count, viewport_rows) }
    }

    fn pinned_span(count: usize, viewport_rows: u16) -> f32 {
        viewport_rows as f32 * count.saturating_sub(1) as f32 * 2.0
    }

    /// Re-derive the pinned span for a new viewport height, preserving
    /// relative progress.
    pub(crate) fn resize(&mut self, viewport_rows: u16) {
        let progress = self.progress();
        self.span = Self::pinned_span(self.count, viewport_rows);
        self.offset = progress * self.span;
    }

    /// Advance the virtual scroll offset, clamped to the pinned span. The
    /// offset keeps accumulating even while a transition is in flight, so an
    /// unlock picks up wherever the user actually is.
    pub(crate) fn scroll_by(&mut self, delta_rows: f32) {
        self.offset = (self.offset + delta_rows).clamp(0.0, self.span);
    }

    /// Continuous progress in [0, 1] over the pinned span.
    pub(crate) fn progress(&self) -> f32 {
        if self.span <= 0.0 { 0.0 } else { (self.offset / self.span).clamp(0.0, 1.0) }
    }

    /// The character index for the current offset.
    pub(crate) fn index(&self) -> usize {
        Self::index_for_progress(self.progress(), self.count)
    }

    /// `min(floor(p * count), count - 1)`, with `p` clamped to [0, 1].
    pub(crate) fn index_for_progress(progress: f32, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let progress = progress.clamp(0.0, 1.0);
        ((progress * count as f32).floor() as usize).min(count - 1)
    }
}
