//! Entrance transitions gated by viewport entry.
//!
//! The browser runs the actual interpolation through CSS transitions: a view
//! renders [`EntranceTransition::style`] with `visible = false` until its
//! entrance signal fires, then with `visible = true`. Because the signal is
//! one-shot the transition plays once. [`EntranceTransition::sample`] gives the
//! same curve for hosts that drive frames themselves.

use crate::geometry::map_range;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    Ease,
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn css(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }

    fn control_points(self) -> Option<(f64, f64, f64, f64)> {
        match self {
            Self::Linear => None,
            Self::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            Self::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Self::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
        }
    }

    /// Eased progress for linear progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self.control_points() {
            None => t,
            Some((x1, y1, x2, y2)) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_axis(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_axis_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// CSS `cubic-bezier(x1, y1, x2, y2)` evaluated at `x`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton first, bisection when the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let error = bezier_axis(x1, x2, s) - x;
        if error.abs() < 1e-7 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= error / slope;
    }

    let (mut low, mut high) = (0.0, 1.0);
    s = x;
    for _ in 0..32 {
        let value = bezier_axis(x1, x2, s);
        if (value - x).abs() < 1e-7 {
            break;
        }
        if value < x {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) / 2.0;
    }
    bezier_axis(y1, y2, s)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntranceEffect {
    Fade,
    /// Rise from `offset_px` below the resting position.
    FadeUp { offset_px: f64 },
    /// Slide horizontally from `offset_px` (negative is from the left).
    SlideIn { offset_px: f64 },
    /// Grow a bar from zero to `to_percent` width.
    GrowWidth { to_percent: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntranceTransition {
    pub effect: EntranceEffect,
    pub duration_secs: f64,
    pub delay_secs: f64,
    pub easing: Easing,
}

impl EntranceTransition {
    pub fn new(effect: EntranceEffect, duration_secs: f64) -> Self {
        Self {
            effect,
            duration_secs: duration_secs.max(0.0),
            delay_secs: 0.0,
            easing: Easing::Ease,
        }
    }

    pub fn with_delay(mut self, delay_secs: f64) -> Self {
        self.delay_secs = delay_secs.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Adds `index * step_secs` to the delay, for lists that cascade in.
    pub fn staggered(self, index: usize, step_secs: f64) -> Self {
        let delay = self.delay_secs + index as f64 * step_secs;
        self.with_delay(delay)
    }

    /// Wrapper of a whole page section.
    pub fn section() -> Self {
        Self::new(EntranceEffect::FadeUp { offset_px: 20.0 }, 0.5).with_delay(0.1)
    }

    /// Section heading block.
    pub fn heading() -> Self {
        Self::new(EntranceEffect::FadeUp { offset_px: 20.0 }, 0.8)
    }

    pub fn slide_from_left() -> Self {
        Self::new(EntranceEffect::SlideIn { offset_px: -50.0 }, 0.8)
    }

    pub fn slide_from_right() -> Self {
        Self::new(EntranceEffect::SlideIn { offset_px: 50.0 }, 0.8)
    }

    pub fn list_item(index: usize) -> Self {
        Self::new(EntranceEffect::FadeUp { offset_px: 20.0 }, 0.5).staggered(index, 0.1)
    }

    /// Hero badge, first in the on-load cascade.
    pub fn hero_badge() -> Self {
        Self::new(EntranceEffect::FadeUp { offset_px: 20.0 }, 0.8)
    }

    pub fn hero_title() -> Self {
        Self::new(EntranceEffect::Fade, 1.0).with_delay(0.2)
    }

    pub fn hero_tagline() -> Self {
        Self::new(EntranceEffect::Fade, 1.0).with_delay(0.4)
    }

    pub fn hero_actions() -> Self {
        Self::new(EntranceEffect::FadeUp { offset_px: 20.0 }, 0.8).with_delay(0.6)
    }

    pub fn skill_bar(level_percent: f64) -> Self {
        Self::new(
            EntranceEffect::GrowWidth {
                to_percent: level_percent.clamp(0.0, 100.0),
            },
            1.0,
        )
        .with_easing(Easing::EaseOut)
    }

    /// Eased progress `elapsed_secs` after the entrance fired.
    pub fn sample(&self, elapsed_secs: f64) -> f64 {
        let active = elapsed_secs - self.delay_secs;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration_secs <= 0.0 {
            return 1.0;
        }
        self.easing.apply(active / self.duration_secs)
    }

    pub fn total_secs(&self) -> f64 {
        self.delay_secs + self.duration_secs
    }

    /// Inline style for the hidden or entered state.
    pub fn style(&self, visible: bool) -> String {
        let timing = format!(
            "{:.2}s {} {:.2}s",
            self.duration_secs,
            self.easing.css(),
            self.delay_secs
        );

        match self.effect {
            EntranceEffect::Fade => format!(
                "opacity: {}; transition: opacity {timing};",
                if visible { 1 } else { 0 }
            ),
            EntranceEffect::FadeUp { offset_px } => {
                let offset = if visible { 0.0 } else { offset_px };
                format!(
                    "opacity: {}; transform: translate3d(0, {offset}px, 0); \
                     transition: opacity {timing}, transform {timing};",
                    if visible { 1 } else { 0 }
                )
            }
            EntranceEffect::SlideIn { offset_px } => {
                let offset = if visible { 0.0 } else { offset_px };
                format!(
                    "opacity: {}; transform: translate3d({offset}px, 0, 0); \
                     transition: opacity {timing}, transform {timing};",
                    if visible { 1 } else { 0 }
                )
            }
            EntranceEffect::GrowWidth { to_percent } => {
                let width = if visible { to_percent } else { 0.0 };
                format!("width: {width}%; transition: width {timing};")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealGlyph {
    pub ch: char,
    pub delay_secs: f64,
}

/// Per-character cascade for headline text: each word starts 0.1s after the
/// previous one and characters within a word follow 0.03s apart.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealSchedule {
    words: Vec<Vec<RevealGlyph>>,
}

impl RevealSchedule {
    pub const WORD_STEP_SECS: f64 = 0.1;
    pub const CHAR_STEP_SECS: f64 = 0.03;
    pub const GLYPH_DURATION_SECS: f64 = 0.1;
    pub const RISE_PX: f64 = 20.0;

    pub fn new(text: &str) -> Self {
        let words = text
            .split_whitespace()
            .enumerate()
            .map(|(word_index, word)| {
                word.chars()
                    .enumerate()
                    .map(|(char_index, ch)| RevealGlyph {
                        ch,
                        delay_secs: word_index as f64 * Self::WORD_STEP_SECS
                            + char_index as f64 * Self::CHAR_STEP_SECS,
                    })
                    .collect()
            })
            .collect();
        Self { words }
    }

    pub fn words(&self) -> &[Vec<RevealGlyph>] {
        &self.words
    }

    pub fn total_secs(&self) -> f64 {
        self.words
            .iter()
            .flatten()
            .map(|glyph| glyph.delay_secs + Self::GLYPH_DURATION_SECS)
            .fold(0.0, f64::max)
    }

    pub fn glyph_transition(glyph: &RevealGlyph) -> EntranceTransition {
        EntranceTransition::new(
            EntranceEffect::FadeUp {
                offset_px: Self::RISE_PX,
            },
            Self::GLYPH_DURATION_SECS,
        )
        .with_delay(glyph.delay_secs)
    }
}

/// Share of the scrollable height already scrolled, in `[0, 1]`. A document
/// no taller than the viewport cannot scroll and reports `0`.
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !scrollable.is_finite() || scrollable <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// Hero content shrinks over the first fifth of the page, then fades out
/// between 20% and 30% scroll progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroScrollFade {
    pub opacity: f64,
    pub scale: f64,
}

impl HeroScrollFade {
    pub const FADE_START: f64 = 0.2;
    pub const FADE_END: f64 = 0.3;
    pub const SHRINK_END: f64 = 0.2;
    pub const MIN_SCALE: f64 = 0.8;

    pub fn at(progress: f64) -> Self {
        Self {
            opacity: map_range(progress, (Self::FADE_START, Self::FADE_END), (1.0, 0.0)),
            scale: map_range(progress, (0.0, Self::SHRINK_END), (1.0, Self::MIN_SCALE)),
        }
    }

    pub fn style(&self) -> String {
        format!(
            "opacity: {:.3}; transform: scale({:.3});",
            self.opacity, self.scale
        )
    }
}
