//! Scroll-driven active section tracking and navigation state.

use serde::Deserialize;

use crate::frame::FrameThrottle;
use crate::host::LayoutHost;
use crate::signal::Signal;

pub const DEFAULT_THRESHOLD_RATIO: f64 = 1.0 / 3.0;
pub const DEFAULT_SCROLLED_OFFSET_PX: f64 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SectionDescriptor {
    pub id: String,
    pub top_offset_px: f64,
}

/// Picks the active section from a single pass over `sections`.
///
/// A section qualifies once its top edge is above
/// `viewport_height * threshold_ratio`. When several qualify the last one in
/// document order wins, which is the section nearest the top while scrolling
/// down. Returns `None` when no section qualifies.
pub fn resolve_active(
    sections: &[SectionDescriptor],
    viewport_height: f64,
    threshold_ratio: f64,
) -> Option<&str> {
    let threshold = viewport_height * threshold_ratio;
    let mut active = None;
    for section in sections {
        if !section.id.is_empty() && section.top_offset_px < threshold {
            active = Some(section.id.as_str());
        }
    }
    active
}

/// Owns the page's single `active_id`. The scroll handler is its only writer.
pub struct ActiveSectionTracker {
    active: Signal<String>,
    threshold_ratio: f64,
    throttle: FrameThrottle,
    running: bool,
}

impl ActiveSectionTracker {
    pub fn new(default_id: impl Into<String>, threshold_ratio: f64) -> Self {
        Self {
            active: Signal::new(default_id.into()),
            threshold_ratio,
            throttle: FrameThrottle::new(),
            running: true,
        }
    }

    pub fn for_navigation(navigation: &NavigationModel, threshold_ratio: f64) -> Self {
        Self::new(navigation.default_section(), threshold_ratio)
    }

    pub fn active_id(&self) -> Signal<String> {
        self.active.clone()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.throttle.cancel();
    }

    /// Marks a pending evaluation. Returns `true` when the host should
    /// request an animation frame.
    pub fn on_scroll(&mut self) -> bool {
        self.running && self.throttle.request()
    }

    /// A resize moves the one-third line, so it needs the same pass as a
    /// scroll.
    pub fn on_resize(&mut self) -> bool {
        self.on_scroll()
    }

    /// Runs the pending evaluation, if any. Returns whether one ran.
    pub fn on_frame(&mut self, host: &dyn LayoutHost) -> bool {
        if !self.throttle.begin_frame() || !self.running {
            return false;
        }
        self.evaluate_now(host);
        true
    }

    /// Re-reads section geometry and publishes the active id. Keeps the
    /// previous id when nothing qualifies or the viewport is unknown.
    pub fn evaluate_now(&mut self, host: &dyn LayoutHost) -> bool {
        if !self.running {
            return false;
        }
        let Some(viewport) = host.viewport() else {
            return false;
        };

        let sections = host.sections();
        match resolve_active(&sections, viewport.height, self.threshold_ratio) {
            Some(id) => {
                let changed = self.active.with(|current| current != id);
                changed && self.active.set(id.to_string())
            }
            None => false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NavItem {
    pub name: String,
    pub href: String,
}

impl NavItem {
    /// The section id this item links to (`"#about"` → `"about"`).
    pub fn section_id(&self) -> &str {
        self.href.strip_prefix('#').unwrap_or(&self.href)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationModel {
    items: Vec<NavItem>,
}

impl NavigationModel {
    pub fn from_items(items: Vec<NavItem>) -> Result<Self, &'static str> {
        if items.is_empty() {
            return Err("navigation needs at least one item");
        }
        for item in &items {
            match item.href.strip_prefix('#') {
                Some(id) if !id.is_empty() && !id.contains(char::is_whitespace) => {}
                _ => return Err("navigation href must be an in-page anchor like #about"),
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn default_section(&self) -> &str {
        self.items
            .first()
            .map(NavItem::section_id)
            .unwrap_or_default()
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(NavItem::section_id)
    }

    pub fn is_active(&self, item: &NavItem, active_id: &str) -> bool {
        item.section_id() == active_id
    }
}

/// Floating navbar chrome: becomes opaque once the page has scrolled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavbarState {
    scrolled: bool,
    offset_px: f64,
}

impl NavbarState {
    pub fn new(offset_px: f64) -> Self {
        Self {
            scrolled: false,
            offset_px,
        }
    }

    /// Returns `true` when the scrolled flag changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > self.offset_px;
        if scrolled == self.scrolled {
            return false;
        }
        self.scrolled = scrolled;
        true
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }
}

impl Default for NavbarState {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLLED_OFFSET_PX)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Following a link from the mobile menu closes it.
    pub fn select<'a>(&mut self, item: &'a NavItem) -> &'a str {
        self.open = false;
        item.section_id()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;
    use crate::host::fake::FakeLayout;

    fn descriptors(offsets: &[(&str, f64)]) -> Vec<SectionDescriptor> {
        offsets
            .iter()
            .map(|(id, top)| SectionDescriptor {
                id: id.to_string(),
                top_offset_px: *top,
            })
            .collect()
    }

    fn nav(hrefs: &[&str]) -> Vec<NavItem> {
        hrefs
            .iter()
            .map(|href| NavItem {
                name: href.trim_start_matches('#').to_string(),
                href: href.to_string(),
            })
            .collect()
    }

    #[test]
    fn section_above_one_third_becomes_active() {
        let sections = descriptors(&[("home", -510.0), ("about", 290.0), ("skills", 1090.0)]);
        assert_eq!(
            resolve_active(&sections, 900.0, DEFAULT_THRESHOLD_RATIO),
            Some("about")
        );
    }

    #[test]
    fn exactly_at_threshold_does_not_qualify() {
        let sections = descriptors(&[("home", -600.0), ("about", 300.0)]);
        assert_eq!(resolve_active(&sections, 600.0, 0.5), Some("home"));
    }

    #[test]
    fn later_section_wins_when_several_qualify() {
        let sections = descriptors(&[("home", -900.0), ("about", -100.0), ("skills", 120.0)]);
        assert_eq!(
            resolve_active(&sections, 900.0, DEFAULT_THRESHOLD_RATIO),
            Some("skills")
        );
    }

    #[test]
    fn no_qualifying_section_resolves_to_none() {
        let sections = descriptors(&[("home", 400.0), ("about", 1200.0)]);
        assert_eq!(resolve_active(&sections, 900.0, DEFAULT_THRESHOLD_RATIO), None);
        assert_eq!(resolve_active(&[], 900.0, DEFAULT_THRESHOLD_RATIO), None);
    }

    #[test]
    fn tracker_follows_scroll_position() {
        let mut layout = FakeLayout::new(1280.0, 900.0)
            .section("home", 0.0)
            .section("about", 800.0)
            .section("skills", 1600.0);
        let mut tracker = ActiveSectionTracker::new("home", DEFAULT_THRESHOLD_RATIO);
        assert_eq!(tracker.active_id().get(), "home");

        layout.scroll_y = 510.0;
        assert!(tracker.on_scroll());
        assert!(tracker.on_frame(&layout));
        assert_eq!(tracker.active_id().get(), "about");

        layout.scroll_y = 1400.0;
        tracker.on_scroll();
        tracker.on_frame(&layout);
        assert_eq!(tracker.active_id().get(), "skills");

        layout.scroll_y = 0.0;
        tracker.on_scroll();
        tracker.on_frame(&layout);
        assert_eq!(tracker.active_id().get(), "home");
    }

    #[test]
    fn resize_re_evaluates_against_new_viewport_height() {
        let mut layout = FakeLayout::new(1280.0, 900.0)
            .section("home", 0.0)
            .section("about", 400.0);
        layout.viewport = Some(Viewport::new(1280.0, 600.0));
        let mut tracker = ActiveSectionTracker::new("home", DEFAULT_THRESHOLD_RATIO);
        tracker.evaluate_now(&layout);
        assert_eq!(tracker.active_id().get(), "home");

        layout.viewport = Some(Viewport::new(1280.0, 1500.0));
        assert!(!tracker.on_frame(&layout));
        assert_eq!(tracker.active_id().get(), "home");

        assert!(tracker.on_resize());
        assert!(tracker.on_frame(&layout));
        assert_eq!(tracker.active_id().get(), "about");
    }

    #[test]
    fn scroll_burst_evaluates_once_per_frame() {
        let layout = FakeLayout::new(1280.0, 900.0).section("home", 0.0);
        let mut tracker = ActiveSectionTracker::new("home", DEFAULT_THRESHOLD_RATIO);

        assert!(tracker.on_scroll());
        assert!(!tracker.on_scroll());
        assert!(!tracker.on_scroll());
        assert!(tracker.on_frame(&layout));
        assert!(!tracker.on_frame(&layout));
    }

    #[test]
    fn tracker_keeps_previous_id_when_nothing_qualifies() {
        let layout = FakeLayout::new(1280.0, 900.0).section("about", 800.0);
        let mut tracker = ActiveSectionTracker::new("home", DEFAULT_THRESHOLD_RATIO);

        assert!(!tracker.evaluate_now(&layout));
        assert_eq!(tracker.active_id().get(), "home");
    }

    #[test]
    fn tracker_without_viewport_is_a_no_op() {
        let mut layout = FakeLayout::new(1280.0, 900.0).section("about", 0.0);
        layout.viewport = None;
        let mut tracker = ActiveSectionTracker::new("home", DEFAULT_THRESHOLD_RATIO);

        assert!(!tracker.evaluate_now(&layout));
        assert_eq!(tracker.active_id().get(), "home");
    }

    #[test]
    fn stopped_tracker_ignores_scroll() {
        let layout = FakeLayout::new(1280.0, 900.0).section("about", 0.0);
        let mut tracker = ActiveSectionTracker::new("home", DEFAULT_THRESHOLD_RATIO);

        tracker.stop();
        assert!(!tracker.on_scroll());
        assert!(!tracker.on_frame(&layout));
        assert!(!tracker.evaluate_now(&layout));
        assert_eq!(tracker.active_id().get(), "home");
    }

    #[test]
    fn navigation_requires_anchor_hrefs() {
        assert!(NavigationModel::from_items(nav(&["#home", "#about"])).is_ok());
        assert!(NavigationModel::from_items(nav(&["#home", "/about"])).is_err());
        assert!(NavigationModel::from_items(nav(&["#"])).is_err());
        assert!(NavigationModel::from_items(Vec::new()).is_err());
    }

    #[test]
    fn navigation_defaults_to_first_section() {
        let model = NavigationModel::from_items(nav(&["#home", "#about", "#contact"]))
            .expect("valid navigation");
        let tracker = ActiveSectionTracker::for_navigation(&model, DEFAULT_THRESHOLD_RATIO);

        assert_eq!(model.default_section(), "home");
        assert_eq!(tracker.active_id().get(), "home");
        assert_eq!(
            model.section_ids().collect::<Vec<_>>(),
            vec!["home", "about", "contact"]
        );
        assert!(model.is_active(&model.items()[1], "about"));
        assert!(!model.is_active(&model.items()[0], "about"));
    }

    #[test]
    fn navbar_turns_scrolled_past_offset() {
        let mut navbar = NavbarState::default();
        assert!(!navbar.on_scroll(20.0));
        assert!(!navbar.is_scrolled());
        assert!(navbar.on_scroll(21.0));
        assert!(navbar.is_scrolled());
        assert!(!navbar.on_scroll(400.0));
        assert!(navbar.on_scroll(0.0));
        assert!(!navbar.is_scrolled());
    }

    #[test]
    fn selecting_menu_item_closes_menu() {
        let items = nav(&["#projects"]);
        let mut menu = MenuState::default();
        menu.open();
        assert!(menu.is_open());

        assert_eq!(menu.select(&items[0]), "projects");
        assert!(!menu.is_open());
    }
}
