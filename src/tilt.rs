//! Pointer-driven 3D tilt for hover cards.

use crate::geometry::{map_range, Rect};
use crate::spring::{Spring, SpringConfig};

pub const DEFAULT_MAX_TILT_DEG: f64 = 10.0;
pub const DEFAULT_SHEEN_FADE_SECS: f64 = 0.2;
pub const CARD_PERSPECTIVE_PX: f64 = 800.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    pub max_tilt_deg: f64,
    pub spring: SpringConfig,
    pub sheen_fade_secs: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_tilt_deg: DEFAULT_MAX_TILT_DEG,
            spring: SpringConfig::critically_damped(300.0, 1.0),
            sheen_fade_secs: DEFAULT_SHEEN_FADE_SECS,
        }
    }
}

/// Pointer offset from the card center, `-1..1` across the card on each axis.
/// Points outside the card produce values past that range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x_norm: f64,
    pub y_norm: f64,
}

impl PointerState {
    pub fn from_client(client_x: f64, client_y: f64, bounds: Rect) -> Option<Self> {
        if !bounds.is_laid_out() || !client_x.is_finite() || !client_y.is_finite() {
            return None;
        }

        let (center_x, center_y) = bounds.center();
        Some(Self {
            x_norm: (client_x - center_x) / (bounds.width / 2.0),
            y_norm: (client_y - center_y) / (bounds.height / 2.0),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltRotation {
    pub x_deg: f64,
    pub y_deg: f64,
}

impl TiltRotation {
    /// Target rotation for a pointer position. Pointer below center tips
    /// the top edge toward the viewer; pointer right of center turns the
    /// right edge away.
    pub fn for_pointer(pointer: PointerState, max_tilt_deg: f64) -> Self {
        Self {
            x_deg: map_range(pointer.y_norm, (-1.0, 1.0), (max_tilt_deg, -max_tilt_deg)),
            y_deg: map_range(pointer.x_norm, (-1.0, 1.0), (-max_tilt_deg, max_tilt_deg)),
        }
    }

    pub fn to_css(self) -> String {
        format!("rotateX({:.3}deg) rotateY({:.3}deg)", self.x_deg, self.y_deg)
    }
}

pub struct PointerTiltController {
    config: TiltConfig,
    hovering: bool,
    pointer: PointerState,
    rotate_x: Spring,
    rotate_y: Spring,
    sheen_opacity: f64,
}

impl PointerTiltController {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            hovering: false,
            pointer: PointerState::default(),
            rotate_x: Spring::new(0.0, config.spring),
            rotate_y: Spring::new(0.0, config.spring),
            sheen_opacity: 0.0,
        }
    }

    pub fn on_pointer_enter(&mut self) {
        self.hovering = true;
        self.retarget();
    }

    /// Updates the pointer from client coordinates. A card that is not
    /// mounted or has no size yet leaves everything unchanged.
    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64, bounds: Option<Rect>) -> bool {
        let Some(pointer) =
            bounds.and_then(|bounds| PointerState::from_client(client_x, client_y, bounds))
        else {
            return false;
        };

        self.pointer = pointer;
        if self.hovering {
            self.retarget();
        }
        true
    }

    pub fn on_pointer_leave(&mut self) {
        self.hovering = false;
        self.pointer = PointerState::default();
        self.retarget();
        self.rotate_x.clamp_to_monotonic();
        self.rotate_y.clamp_to_monotonic();
    }

    /// Advances the springs and the sheen fade by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        self.rotate_x.step(dt);
        self.rotate_y.step(dt);

        let target = if self.hovering { 1.0 } else { 0.0 };
        let rate = if self.config.sheen_fade_secs > 0.0 {
            dt / self.config.sheen_fade_secs
        } else {
            1.0
        };
        self.sheen_opacity = if target > self.sheen_opacity {
            (self.sheen_opacity + rate).min(target)
        } else {
            (self.sheen_opacity - rate).max(target)
        };
    }

    pub fn rotation(&self) -> TiltRotation {
        TiltRotation {
            x_deg: self.rotate_x.position(),
            y_deg: self.rotate_y.position(),
        }
    }

    pub fn target_rotation(&self) -> TiltRotation {
        TiltRotation {
            x_deg: self.rotate_x.target(),
            y_deg: self.rotate_y.target(),
        }
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// The sheen overlay is mounted while hovered and while fading out.
    pub fn sheen_visible(&self) -> bool {
        self.hovering || self.sheen_opacity > 0.0
    }

    pub fn sheen_opacity(&self) -> f64 {
        self.sheen_opacity
    }

    /// Whether the host should keep requesting frames.
    pub fn is_animating(&self) -> bool {
        let sheen_target = if self.hovering { 1.0 } else { 0.0 };
        !self.rotate_x.is_at_rest()
            || !self.rotate_y.is_at_rest()
            || self.sheen_opacity != sheen_target
    }

    pub fn transform_css(&self) -> String {
        self.rotation().to_css()
    }

    fn retarget(&mut self) {
        let target = TiltRotation::for_pointer(self.pointer, self.config.max_tilt_deg);
        self.rotate_x.set_target(target.x_deg);
        self.rotate_y.set_target(target.y_deg);
    }
}

impl Default for PointerTiltController {
    fn default() -> Self {
        Self::new(TiltConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn card() -> Rect {
        Rect::new(100.0, 200.0, 400.0, 300.0)
    }

    fn settle(controller: &mut PointerTiltController) {
        for _ in 0..240 {
            controller.step(FRAME);
        }
    }

    #[test]
    fn pointer_at_center_yields_zero_rotation() {
        let mut controller = PointerTiltController::default();
        controller.on_pointer_enter();
        assert!(controller.on_pointer_move(300.0, 350.0, Some(card())));

        assert_eq!(controller.pointer(), PointerState::default());
        assert_eq!(controller.target_rotation(), TiltRotation::default());
    }

    #[test]
    fn pointer_at_corner_maps_to_max_tilt() {
        let mut controller = PointerTiltController::default();
        controller.on_pointer_enter();
        controller.on_pointer_move(500.0, 500.0, Some(card()));

        assert_eq!(
            controller.pointer(),
            PointerState {
                x_norm: 1.0,
                y_norm: 1.0
            }
        );
        assert_eq!(
            controller.target_rotation(),
            TiltRotation {
                x_deg: -10.0,
                y_deg: 10.0
            }
        );
    }

    #[test]
    fn pointer_outside_card_is_not_clamped_but_tilt_is() {
        let mut controller = PointerTiltController::default();
        controller.on_pointer_enter();
        controller.on_pointer_move(700.0, 50.0, Some(card()));

        let pointer = controller.pointer();
        assert_eq!(pointer.x_norm, 2.0);
        assert_eq!(pointer.y_norm, -2.0);
        assert_eq!(
            controller.target_rotation(),
            TiltRotation {
                x_deg: 10.0,
                y_deg: 10.0
            }
        );
    }

    #[test]
    fn rotation_eases_toward_target() {
        let mut controller = PointerTiltController::default();
        controller.on_pointer_enter();
        controller.on_pointer_move(500.0, 350.0, Some(card()));

        controller.step(FRAME);
        let first = controller.rotation().y_deg;
        assert!(first > 0.0 && first < 10.0);

        settle(&mut controller);
        assert_eq!(controller.rotation().y_deg, 10.0);
        assert!(!controller.is_animating());
    }

    #[test]
    fn leave_relaxes_rotation_monotonically() {
        let mut controller = PointerTiltController::default();
        controller.on_pointer_enter();
        controller.on_pointer_move(500.0, 200.0, Some(card()));
        settle(&mut controller);
        assert_eq!(controller.rotation(), TiltRotation { x_deg: 10.0, y_deg: 10.0 });

        controller.on_pointer_leave();
        assert_eq!(controller.pointer(), PointerState::default());
        assert_eq!(controller.rotation(), TiltRotation { x_deg: 10.0, y_deg: 10.0 });

        let mut previous = controller.rotation();
        for _ in 0..240 {
            controller.step(FRAME);
            let current = controller.rotation();
            assert!(current.x_deg <= previous.x_deg && current.x_deg >= 0.0);
            assert!(current.y_deg <= previous.y_deg && current.y_deg >= 0.0);
            previous = current;
        }
        assert_eq!(controller.rotation(), TiltRotation::default());
    }

    #[test]
    fn leave_mid_swing_does_not_cross_zero() {
        let mut controller = PointerTiltController::default();
        controller.on_pointer_enter();
        controller.on_pointer_move(500.0, 350.0, Some(card()));
        settle(&mut controller);
        assert!((controller.rotation().y_deg - 10.0).abs() < 1e-3);

        controller.on_pointer_move(100.0, 350.0, Some(card()));
        for _ in 0..3 {
            controller.step(FRAME);
        }
        let at_leave = controller.rotation().y_deg;
        assert!(at_leave > 0.0 && at_leave < 10.0);

        controller.on_pointer_leave();
        let mut previous = at_leave;
        for _ in 0..240 {
            controller.step(FRAME);
            let y = controller.rotation().y_deg;
            assert!(y >= 0.0, "rotation crossed zero to {y}");
            assert!(y <= previous + 1e-12, "rotation grew from {previous} to {y}");
            previous = y;
        }
        assert_eq!(controller.rotation(), TiltRotation::default());
    }

    #[test]
    fn move_without_hover_does_not_tilt() {
        let mut controller = PointerTiltController::default();
        controller.on_pointer_move(500.0, 500.0, Some(card()));

        assert_eq!(controller.target_rotation(), TiltRotation::default());
        assert!(!controller.is_animating());
    }

    #[test]
    fn missing_or_empty_bounds_are_a_no_op() {
        let mut controller = PointerTiltController::default();
        controller.on_pointer_enter();
        controller.on_pointer_move(500.0, 500.0, Some(card()));

        assert!(!controller.on_pointer_move(100.0, 100.0, None));
        assert!(!controller.on_pointer_move(100.0, 100.0, Some(Rect::new(0.0, 0.0, 0.0, 0.0))));
        assert_eq!(controller.pointer().x_norm, 1.0);
    }

    #[test]
    fn sheen_tracks_hover_and_fades_out() {
        let mut controller = PointerTiltController::default();
        assert!(!controller.sheen_visible());

        controller.on_pointer_enter();
        assert!(controller.sheen_visible());
        settle(&mut controller);
        assert_eq!(controller.sheen_opacity(), 1.0);

        controller.on_pointer_leave();
        assert!(controller.sheen_visible());
        controller.step(0.1);
        assert!(controller.sheen_opacity() > 0.0 && controller.sheen_opacity() < 1.0);

        controller.step(0.2);
        assert_eq!(controller.sheen_opacity(), 0.0);
        assert!(!controller.sheen_visible());
    }

    #[test]
    fn transform_css_formats_both_axes() {
        let rotation = TiltRotation {
            x_deg: -2.5,
            y_deg: 4.0,
        };
        assert_eq!(rotation.to_css(), "rotateX(-2.500deg) rotateY(4.000deg)");
    }
}
