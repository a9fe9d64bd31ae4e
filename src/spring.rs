//! Damped spring smoothing for pointer-driven motion.
//!
//! The spring follows the damped harmonic oscillator
//!
//!   m·x'' = -k·(x - target) - c·x'
//!
//! Each [`Spring::step`] advances the exact solution of that equation for the
//! current regime (under-, critically or over-damped), so the result does not
//! depend on how the host slices frames and large `dt` values stay stable.
//!
//! # Invariants
//!
//! 1. A spring at rest stays at rest until [`Spring::set_target`] moves the
//!    target or [`Spring::snap_to`] moves the position.
//! 2. Reaching rest snaps position to the target and zeroes velocity.
//! 3. A critically damped spring released from rest approaches the target
//!    monotonically.

/// Position delta under which the spring may settle.
const DEFAULT_REST_DELTA: f64 = 0.001;

/// Speed under which (together with the position delta) the spring settles.
const DEFAULT_REST_SPEED: f64 = 0.01;

const MIN_STIFFNESS: f64 = 0.1;
const MIN_MASS: f64 = 0.001;

/// Damping ratios this close to 1.0 use the critical solution.
const CRITICAL_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness: stiffness.max(MIN_STIFFNESS),
            damping: damping.max(0.0),
            mass: mass.max(MIN_MASS),
        }
    }

    /// Fastest convergence without overshoot: `c = 2·sqrt(k·m)`.
    pub fn critically_damped(stiffness: f64, mass: f64) -> Self {
        let stiffness = stiffness.max(MIN_STIFFNESS);
        let mass = mass.max(MIN_MASS);
        Self::new(stiffness, 2.0 * (stiffness * mass).sqrt(), mass)
    }

    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::critically_damped(300.0, 1.0)
    }
}

#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
    rest_delta: f64,
    rest_speed: f64,
    at_rest: bool,
}

impl Spring {
    /// A spring resting at `value`.
    pub fn new(value: f64, config: SpringConfig) -> Self {
        Self {
            config,
            position: value,
            velocity: 0.0,
            target: value,
            rest_delta: DEFAULT_REST_DELTA,
            rest_speed: DEFAULT_REST_SPEED,
            at_rest: true,
        }
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Change the target. Wakes the spring if it was at rest.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        if (self.target - target).abs() > f64::EPSILON {
            self.target = target;
            self.at_rest = (self.position - target).abs() < self.rest_delta
                && self.velocity.abs() < self.rest_speed;
            if self.at_rest {
                self.position = target;
                self.velocity = 0.0;
            }
        }
    }

    /// Jump to `value` with no motion.
    pub fn snap_to(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Limits the velocity so the spring reaches its target without first
    /// moving away from it or crossing it. An underdamped spring overshoots
    /// regardless and is left untouched.
    pub fn clamp_to_monotonic(&mut self) {
        let zeta = self.config.damping_ratio();
        if self.at_rest || zeta < 1.0 - CRITICAL_EPSILON {
            return;
        }

        let displacement = self.position - self.target;
        let slowest_decay =
            self.config.natural_frequency() * (zeta - (zeta * zeta - 1.0).max(0.0).sqrt());
        let toward = -displacement.signum();
        let speed = (self.velocity * toward).clamp(0.0, slowest_decay * displacement.abs());
        self.velocity = toward * speed;
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if self.at_rest || !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let displacement = self.position - self.target;
        let (displacement, velocity) = solve(self.config, displacement, self.velocity, dt);
        self.position = self.target + displacement;
        self.velocity = velocity;

        if displacement.abs() < self.rest_delta && velocity.abs() < self.rest_speed {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

/// Exact displacement and velocity after `t` seconds, starting from
/// displacement `x0` and velocity `v0`.
fn solve(config: SpringConfig, x0: f64, v0: f64, t: f64) -> (f64, f64) {
    let omega = config.natural_frequency();
    let zeta = config.damping_ratio();

    if (zeta - 1.0).abs() < CRITICAL_EPSILON {
        let decay = (-omega * t).exp();
        let b = v0 + omega * x0;
        let x = (x0 + b * t) * decay;
        let v = (v0 - omega * b * t) * decay;
        return (x, v);
    }

    if zeta < 1.0 {
        let damped = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * t).exp();
        let a = x0;
        let b = (v0 + zeta * omega * x0) / damped;
        let (sin, cos) = (damped * t).sin_cos();
        let x = decay * (a * cos + b * sin);
        let v = decay * (-zeta * omega * (a * cos + b * sin) + damped * (b * cos - a * sin));
        return (x, v);
    }

    let root = (zeta * zeta - 1.0).sqrt();
    let r1 = -omega * (zeta - root);
    let r2 = -omega * (zeta + root);
    let c1 = (v0 - r2 * x0) / (r1 - r2);
    let c2 = x0 - c1;
    let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
    (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
}
