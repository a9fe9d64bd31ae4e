//! One-shot viewport entrance detection.
//!
//! Every registered element owns a `Signal<bool>` that flips to `true` the
//! first time the element overlaps the (margin-adjusted) viewport. With
//! `trigger_once` the flag never flips back, so the entrance animation it
//! gates runs exactly once per mount.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::geometry::ViewportMargin;
use crate::host::{ElementId, LayoutHost};
use crate::signal::Signal;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserveOptions {
    pub threshold_margin: ViewportMargin,
    pub trigger_once: bool,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold_margin: ViewportMargin::ZERO,
            trigger_once: true,
        }
    }
}

impl ObserveOptions {
    pub fn once() -> Self {
        Self::default()
    }

    pub fn once_with_margin(threshold_margin: ViewportMargin) -> Self {
        Self {
            threshold_margin,
            trigger_once: true,
        }
    }
}

struct TrackedElement {
    options: ObserveOptions,
    has_entered: bool,
    visible: Signal<bool>,
}

impl TrackedElement {
    /// Returns the value to publish, or `None` when nothing changes.
    fn next_visibility(&mut self, intersecting: bool) -> Option<bool> {
        if self.options.trigger_once {
            if self.has_entered || !intersecting {
                return None;
            }
            self.has_entered = true;
            return Some(true);
        }

        if intersecting {
            self.has_entered = true;
        }
        (self.visible.get() != intersecting).then_some(intersecting)
    }
}

struct Registry {
    next_id: u64,
    running: bool,
    elements: BTreeMap<ElementId, TrackedElement>,
}

#[derive(Clone)]
pub struct EntranceController {
    registry: Rc<RefCell<Registry>>,
}

impl Default for EntranceController {
    fn default() -> Self {
        Self::new()
    }
}

impl EntranceController {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 1,
                running: true,
                elements: BTreeMap::new(),
            })),
        }
    }

    pub fn observe(&self, options: ObserveOptions) -> EntranceHandle {
        let mut registry = self.registry.borrow_mut();
        let id = ElementId(registry.next_id);
        registry.next_id += 1;

        let visible = Signal::new(false);
        registry.elements.insert(
            id,
            TrackedElement {
                options,
                has_entered: false,
                visible: visible.clone(),
            },
        );

        EntranceHandle {
            id,
            visible,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn unobserve(&self, element: ElementId) {
        self.registry.borrow_mut().elements.remove(&element);
    }

    pub fn start(&self) {
        self.registry.borrow_mut().running = true;
    }

    pub fn stop(&self) {
        self.registry.borrow_mut().running = false;
    }

    pub fn is_running(&self) -> bool {
        self.registry.borrow().running
    }

    pub fn observed_count(&self) -> usize {
        self.registry.borrow().elements.len()
    }

    /// Checks every tracked element against the current layout in one pass
    /// and returns how many signals changed.
    ///
    /// Elements that already entered with `trigger_once` are skipped without
    /// a geometry read. Elements without geometry are left untouched.
    pub fn evaluate(&self, host: &dyn LayoutHost) -> usize {
        let updates = {
            let mut registry = self.registry.borrow_mut();
            if !registry.running {
                return 0;
            }
            let Some(viewport) = host.viewport() else {
                return 0;
            };

            let mut updates = Vec::new();
            for (id, element) in registry.elements.iter_mut() {
                if element.options.trigger_once && element.has_entered {
                    continue;
                }
                let Some(bounds) = host.element_bounds(*id).filter(|rect| rect.is_laid_out()) else {
                    continue;
                };

                let intersecting =
                    bounds.intersects_viewport(viewport, element.options.threshold_margin);
                if let Some(next) = element.next_visibility(intersecting) {
                    updates.push((element.visible.clone(), next));
                }
            }
            updates
        };

        publish(updates)
    }

    /// Applies an intersection reported by a native observer, with the same
    /// once semantics as [`EntranceController::evaluate`].
    pub fn record_intersection(&self, element: ElementId, intersecting: bool) -> bool {
        let update = {
            let mut registry = self.registry.borrow_mut();
            if !registry.running {
                return false;
            }
            registry
                .elements
                .get_mut(&element)
                .and_then(|tracked| {
                    tracked
                        .next_visibility(intersecting)
                        .map(|next| (tracked.visible.clone(), next))
                })
        };

        publish(update.into_iter().collect()) > 0
    }

    /// Marks every element as entered, for hosts that skip motion entirely.
    pub fn reveal_all(&self) -> usize {
        let updates = {
            let mut registry = self.registry.borrow_mut();
            registry
                .elements
                .values_mut()
                .filter_map(|element| {
                    element
                        .next_visibility(true)
                        .map(|next| (element.visible.clone(), next))
                })
                .collect()
        };

        publish(updates)
    }
}

// Subscribers may drop handles, so signals are set after the registry
// borrow has ended.
fn publish(updates: Vec<(Signal<bool>, bool)>) -> usize {
    updates
        .into_iter()
        .filter(|(signal, next)| signal.set(*next))
        .count()
}

/// Registration for one element. Dropping it stops tracking.
pub struct EntranceHandle {
    id: ElementId,
    visible: Signal<bool>,
    registry: Weak<RefCell<Registry>>,
}

impl EntranceHandle {
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn is_visible(&self) -> Signal<bool> {
        self.visible.clone()
    }

    pub fn has_entered(&self) -> bool {
        self.registry
            .upgrade()
            .and_then(|registry| {
                registry
                    .borrow()
                    .elements
                    .get(&self.id)
                    .map(|element| element.has_entered)
            })
            .unwrap_or(false)
    }
}

impl Drop for EntranceHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.elements.remove(&self.id);
            }
        }
    }
}
