//! Detail-screen image index ("rail") tracking.
//!
//! Positions are in document rows: `top` is the row where an image block
//! starts, `scroll_y` the first visible row, `viewport` the number of visible
//! rows.

/// Vertical extent of one rendered image block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpan {
    pub top: u16,
    pub height: u16,
}

impl ImageSpan {
    pub fn new(top: u16, height: u16) -> Self {
        ImageSpan { top, height }
    }

    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    fn contains(&self, row: u32) -> bool {
        row >= self.top as u32 && row <= self.bottom() as u32
    }
}

/// Stack images of the given heights starting at row `start`, separated by
/// `gap` blank rows.
pub fn stack_spans(start: u16, heights: &[u16], gap: u16) -> Vec<ImageSpan> {
    let mut top = start;
    heights
        .iter()
        .map(|&h| {
            let span = ImageSpan::new(top, h);
            top = top.saturating_add(h).saturating_add(gap);
            span
        })
        .collect()
}

/// Index of the first image whose span contains the viewport midpoint.
pub fn active_index(spans: &[ImageSpan], scroll_y: u16, viewport: u16) -> Option<usize> {
    let midpoint = scroll_y as u32 + viewport as u32 / 2;
    spans.iter().position(|s| s.contains(midpoint))
}

/// Row to scroll to so that image `index` starts at the top of the viewport.
pub fn image_offset(spans: &[ImageSpan], index: usize) -> Option<u16> {
    spans.get(index).map(|s| s.top)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RailState {
    #[default]
    Hidden,
    Visible,
}

/// Rail visibility plus the highlighted image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RailTracker {
    pub state: RailState,
    pub active: Option<usize>,
}

impl RailTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from the current scroll position. Returns the new state
    /// when visibility changed.
    ///
    /// Hidden → Visible once `scroll_y` reaches the first image's top.
    /// Visible → Hidden once the viewport bottom reaches the last image's
    /// bottom (or the viewport scrolls back above the first image).
    /// The active image keeps its previous value while the midpoint sits in
    /// a gap between images.
    pub fn update(&mut self, spans: &[ImageSpan], scroll_y: u16, viewport: u16) -> Option<RailState> {
        let (first, last) = match (spans.first(), spans.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => {
                self.active = None;
                return self.transition(RailState::Hidden);
            }
        };

        let reached_first = scroll_y >= first.top;
        let passed_last = scroll_y as u32 + viewport as u32 >= last.bottom() as u32;

        if let Some(idx) = active_index(spans, scroll_y, viewport) {
            self.active = Some(idx);
        } else if self.active.is_some_and(|i| i >= spans.len()) {
            self.active = None;
        }

        let next = match self.state {
            RailState::Hidden if reached_first && !passed_last => RailState::Visible,
            RailState::Visible if passed_last || !reached_first => RailState::Hidden,
            s => s,
        };
        self.transition(next)
    }

    fn transition(&mut self, next: RailState) -> Option<RailState> {
        if next == self.state {
            None
        } else {
            self.state = next;
            Some(next)
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state == RailState::Visible
    }
}

/// In-flight guard limiting scroll-driven recomputation to one pass per
/// drawn frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    ticking: bool,
}

impl FrameThrottle {
    /// Record a scroll event. Returns true when this event scheduled a pass;
    /// false when one is already pending for the next frame.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            false
        } else {
            self.ticking = true;
            true
        }
    }

    /// Called once per frame. Returns true when a pass should run now.
    pub fn take(&mut self) -> bool {
        std::mem::replace(&mut self.ticking, false)
    }
}

/// The back-to-top hint shows past `threshold` rows while the menu is closed.
pub fn back_to_top_visible(scroll_y: u16, threshold: u16, menu_open: bool) -> bool {
    scroll_y > threshold && !menu_open
}
