//! Typewriter dialogue
//!
//! Lines are revealed a few characters at a time. The confirm button works in
//! two stages: the first press reveals the rest of the current line, the
//! second press moves on. The battle stays frozen while dialogue is active.

use crate::renderer::{Align, Baseline, Surface, TextStyle, colors};
use crate::sim::Rect;

/// Default reveal speed (characters per second)
pub const DEFAULT_CPS: f32 = 34.0;

const FONT_PX: f32 = 12.0;
const LINE_HEIGHT: f32 = 14.0;
const PADDING: f32 = 8.0;

/// Typewriter state machine for a scripted sequence of lines
#[derive(Debug, Clone)]
pub struct Dialogue {
    /// Reveal rate in characters per second
    pub cps: f32,
    lines: Vec<String>,
    line_index: usize,
    /// Characters (not bytes) of the current line that are visible
    chars_revealed: usize,
    /// Time carried over between updates that has not produced a whole character yet
    accumulator: f32,
    active: bool,
}

impl Default for Dialogue {
    fn default() -> Self {
        Self::new(DEFAULT_CPS)
    }
}

impl Dialogue {
    pub fn new(cps: f32) -> Self {
        Self {
            cps,
            lines: Vec::new(),
            line_index: 0,
            chars_revealed: 0,
            accumulator: 0.0,
            active: false,
        }
    }

    /// Replace the script and start from its first line.
    ///
    /// An empty script leaves the dialogue inactive.
    pub fn start<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self.line_index = 0;
        self.chars_revealed = 0;
        self.accumulator = 0.0;
        self.active = !self.lines.is_empty();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn chars_revealed(&self) -> usize {
        self.chars_revealed
    }

    /// The line currently on screen (empty once the script is exhausted)
    pub fn current_line(&self) -> &str {
        self.lines.get(self.line_index).map(String::as_str).unwrap_or("")
    }

    fn current_len(&self) -> usize {
        self.current_line().chars().count()
    }

    pub fn is_line_complete(&self) -> bool {
        self.chars_revealed >= self.current_len()
    }

    /// The visible prefix of the current line
    pub fn revealed_text(&self) -> &str {
        let line = self.current_line();
        match line.char_indices().nth(self.chars_revealed) {
            Some((byte, _)) => &line[..byte],
            None => line,
        }
    }

    /// Reveal more of the current line.
    pub fn update(&mut self, dt: f32) {
        if !self.active || self.is_line_complete() {
            return;
        }

        self.accumulator += dt;
        let chars = (self.accumulator * self.cps).floor();
        if chars < 1.0 {
            return;
        }
        // Keep the fractional remainder so the reveal rate does not drift
        self.accumulator -= chars / self.cps;
        let len = self.current_len();
        self.chars_revealed = (self.chars_revealed + chars as usize).min(len);
    }

    /// Handle a confirm press: finish the line, or move to the next one.
    pub fn advance(&mut self) {
        if !self.active {
            return;
        }

        if !self.is_line_complete() {
            self.chars_revealed = self.current_len();
            return;
        }

        self.line_index += 1;
        self.chars_revealed = 0;
        self.accumulator = 0.0;
        if self.line_index >= self.lines.len() {
            self.active = false;
        }
    }

    /// Draw the dialogue box into `rect`.
    pub fn render(&self, surface: &mut dyn Surface, rect: Rect) {
        if !self.active {
            return;
        }

        surface.fill_rect(rect, colors::DIALOGUE_BOX);
        surface.stroke_rect(rect.inset(0.5), colors::DIALOGUE_BORDER);

        let style = TextStyle::new(FONT_PX);
        let max_width = rect.w - PADDING * 2.0;
        let lines = wrap_text(self.revealed_text(), max_width, |s| {
            surface.measure_text(s, FONT_PX)
        });

        let x = rect.x + PADDING;
        let mut y = rect.y + PADDING;
        for line in &lines {
            surface.fill_text(line, x, y, &style, colors::TEXT);
            y += LINE_HEIGHT;
        }

        if self.is_line_complete() {
            let hint = TextStyle::new(FONT_PX).align(Align::Right).baseline(Baseline::Top);
            surface.fill_text(
                "Enter",
                rect.right() - PADDING,
                rect.bottom() - PADDING - FONT_PX,
                &hint,
                colors::TEXT_DIM,
            );
        }
    }
}

/// Greedy word wrap.
///
/// Words are appended to the current line while it still fits in `max_width`;
/// otherwise the line is flushed and the word starts a new one. A word wider
/// than `max_width` gets a line of its own rather than being split.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };

        if line.is_empty() || measure(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    lines.push(line);
    lines
}
