//! Client-space geometry shared by the motion controllers.
//!
//! Coordinates are CSS pixels relative to the viewport's top-left corner, the
//! same space `getBoundingClientRect` reports in.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An element's bounding box in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// A node that is detached or `display: none` reports an all-zero box.
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.left.is_finite() && self.top.is_finite()
    }

    /// Whether the box overlaps the viewport after the viewport has been
    /// grown (positive margin) or shrunk (negative margin) on each side.
    pub fn intersects_viewport(&self, viewport: Viewport, margin: ViewportMargin) -> bool {
        let root_top = -margin.vertical;
        let root_bottom = viewport.height + margin.vertical;
        let root_left = -margin.horizontal;
        let root_right = viewport.width + margin.horizontal;

        if root_bottom <= root_top || root_right <= root_left {
            return false;
        }

        self.top < root_bottom
            && self.bottom() > root_top
            && self.left < root_right
            && self.right() > root_left
    }
}

/// CSS-style root margin: `"-100px 0px"` is `{ vertical: -100, horizontal: 0 }`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportMargin {
    pub vertical: f64,
    pub horizontal: f64,
}

impl ViewportMargin {
    pub const ZERO: Self = Self {
        vertical: 0.0,
        horizontal: 0.0,
    };

    pub fn new(vertical: f64, horizontal: f64) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    pub fn parse(value: &str) -> Result<Self, &'static str> {
        let parts: Vec<&str> = value.split_whitespace().collect();
        match parts.as_slice() {
            [all] => {
                let all = parse_px(all)?;
                Ok(Self::new(all, all))
            }
            [vertical, horizontal] => Ok(Self::new(parse_px(vertical)?, parse_px(horizontal)?)),
            [] => Err("margin is empty"),
            _ => Err("margin must have one or two lengths"),
        }
    }

    pub fn to_css(self) -> String {
        format!("{}px {}px", self.vertical, self.horizontal)
    }
}

fn parse_px(value: &str) -> Result<f64, &'static str> {
    let number = value.strip_suffix("px").unwrap_or(value);
    if number.is_empty() {
        return Err("margin length is missing a number");
    }
    number
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or("margin length is not a pixel value")
}

/// Linear mapping from `input` onto `output`, clamped to the output range.
pub fn map_range(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let span = input.1 - input.0;
    if span == 0.0 || !value.is_finite() {
        return output.0;
    }

    let progress = ((value - input.0) / span).clamp(0.0, 1.0);
    output.0 + (output.1 - output.0) * progress
}
