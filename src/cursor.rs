//! Custom cursor ring that trails the pointer on a spring.

use crate::spring::{Spring, SpringConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorVariant {
    #[default]
    Default,
    Hover,
    Click,
}

impl CursorVariant {
    pub fn size_px(self) -> f64 {
        match self {
            Self::Default | Self::Click => 32.0,
            Self::Hover => 48.0,
        }
    }

    pub fn fill_alpha(self) -> f64 {
        match self {
            Self::Default => 0.0,
            Self::Hover => 0.1,
            Self::Click => 0.2,
        }
    }

    pub fn border_alpha(self) -> f64 {
        match self {
            Self::Default => 0.3,
            Self::Hover => 0.5,
            Self::Click => 0.7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hover => "hover",
            Self::Click => "click",
        }
    }
}

pub fn default_cursor_spring() -> SpringConfig {
    SpringConfig::new(500.0, 28.0, 0.5)
}

pub struct CursorFollower {
    variant: CursorVariant,
    pointer: Option<(f64, f64)>,
    x: Spring,
    y: Spring,
    size: Spring,
}

impl CursorFollower {
    pub fn new(config: SpringConfig) -> Self {
        let size = CursorVariant::Default.size_px();
        Self {
            variant: CursorVariant::Default,
            pointer: None,
            x: Spring::new(0.0, config),
            y: Spring::new(0.0, config),
            size: Spring::new(size, config),
        }
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        if !client_x.is_finite() || !client_y.is_finite() {
            return;
        }
        let first = self.pointer.is_none();
        self.pointer = Some((client_x, client_y));
        self.retarget();
        if first {
            // Appear under the pointer instead of flying in from the corner.
            self.x.snap_to(self.x.target());
            self.y.snap_to(self.y.target());
        }
    }

    pub fn on_pointer_down(&mut self) {
        self.set_variant(CursorVariant::Click);
    }

    pub fn on_pointer_up(&mut self) {
        self.set_variant(CursorVariant::Default);
    }

    pub fn on_link_enter(&mut self) {
        self.set_variant(CursorVariant::Hover);
    }

    pub fn on_link_leave(&mut self) {
        self.set_variant(CursorVariant::Default);
    }

    pub fn step(&mut self, dt: f64) {
        self.x.step(dt);
        self.y.step(dt);
        self.size.step(dt);
    }

    pub fn variant(&self) -> CursorVariant {
        self.variant
    }

    pub fn is_visible(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn is_animating(&self) -> bool {
        !self.x.is_at_rest() || !self.y.is_at_rest() || !self.size.is_at_rest()
    }

    /// Top-left corner and edge length of the ring.
    pub fn frame(&self) -> (f64, f64, f64) {
        (self.x.position(), self.y.position(), self.size.position())
    }

    pub fn style(&self) -> String {
        let (x, y, size) = self.frame();
        format!(
            "transform: translate3d({x:.2}px, {y:.2}px, 0); width: {size:.2}px; height: {size:.2}px; \
             background-color: rgba(var(--primary-rgb), {fill}); border: 1px solid rgba(var(--primary-rgb), {border});",
            fill = self.variant.fill_alpha(),
            border = self.variant.border_alpha(),
        )
    }

    fn set_variant(&mut self, variant: CursorVariant) {
        self.variant = variant;
        self.size.set_target(variant.size_px());
        self.retarget();
    }

    fn retarget(&mut self) {
        let Some((client_x, client_y)) = self.pointer else {
            return;
        };
        let half = self.variant.size_px() / 2.0;
        self.x.set_target(client_x - half);
        self.y.set_target(client_y - half);
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new(default_cursor_spring())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(cursor: &mut CursorFollower) {
        for _ in 0..300 {
            cursor.step(1.0 / 60.0);
        }
    }

    #[test]
    fn hidden_until_first_pointer_move() {
        let mut cursor = CursorFollower::default();
        assert!(!cursor.is_visible());

        cursor.on_pointer_move(200.0, 100.0);
        assert!(cursor.is_visible());
        assert_eq!(cursor.frame(), (184.0, 84.0, 32.0));
    }

    #[test]
    fn ring_follows_pointer_on_spring() {
        let mut cursor = CursorFollower::default();
        cursor.on_pointer_move(200.0, 100.0);
        cursor.on_pointer_move(400.0, 100.0);
        assert!(cursor.is_animating());

        cursor.step(1.0 / 60.0);
        let (x, _, _) = cursor.frame();
        assert!(x > 184.0 && x < 384.0);

        settle(&mut cursor);
        assert_eq!(cursor.frame(), (384.0, 84.0, 32.0));
    }

    #[test]
    fn hovering_a_link_grows_and_recenters() {
        let mut cursor = CursorFollower::default();
        cursor.on_pointer_move(200.0, 100.0);
        cursor.on_link_enter();
        assert_eq!(cursor.variant(), CursorVariant::Hover);

        settle(&mut cursor);
        assert_eq!(cursor.frame(), (176.0, 76.0, 48.0));

        cursor.on_link_leave();
        settle(&mut cursor);
        assert_eq!(cursor.frame(), (184.0, 84.0, 32.0));
    }

    #[test]
    fn latest_event_picks_variant() {
        let mut cursor = CursorFollower::default();
        cursor.on_link_enter();
        cursor.on_pointer_down();
        assert_eq!(cursor.variant(), CursorVariant::Click);
        cursor.on_pointer_up();
        assert_eq!(cursor.variant(), CursorVariant::Default);
    }

    #[test]
    fn style_carries_variant_colors() {
        let mut cursor = CursorFollower::default();
        cursor.on_pointer_move(16.0, 16.0);
        cursor.on_pointer_down();
        let style = cursor.style();

        assert!(style.starts_with("transform: translate3d(0.00px, 0.00px, 0);"));
        assert!(style.contains("rgba(var(--primary-rgb), 0.2)"));
        assert!(style.contains("rgba(var(--primary-rgb), 0.7)"));
    }
}
