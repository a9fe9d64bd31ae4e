//! Headless motion layer for the portfolio page.
//!
//! Three small controllers drive the page's interactive behavior:
//! [`entrance::EntranceController`] gates one-shot entrance animations,
//! [`sections::ActiveSectionTracker`] follows the section being read, and
//! [`tilt::PointerTiltController`] turns pointer position into a spring-eased
//! card tilt. None of them touch the DOM; layout comes in through
//! [`host::LayoutHost`] and results go out through [`signal::Signal`]s, so
//! they run (and are tested) on any target.

pub mod animation;
pub mod config;
pub mod content;
pub mod cursor;
pub mod entrance;
pub mod frame;
pub mod geometry;
pub mod host;
pub mod log;
pub mod sections;
pub mod signal;
pub mod spring;
pub mod tilt;
