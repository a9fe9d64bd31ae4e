use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use portfolio_motion::animation::{
    scroll_progress, EntranceTransition, HeroScrollFade, RevealSchedule,
};
use portfolio_motion::config::MotionConfig;
use portfolio_motion::content::{
    handoff_status, ContactDraft, Owner, Project, SiteContent, Skill,
};
use portfolio_motion::cursor::{default_cursor_spring, CursorFollower};
use portfolio_motion::entrance::{EntranceController, EntranceHandle, ObserveOptions};
use portfolio_motion::frame::{frame_delta_seconds, FrameThrottle};
use portfolio_motion::geometry::{Rect, Viewport, ViewportMargin};
use portfolio_motion::host::{ElementId, LayoutHost};
use portfolio_motion::log::{log_event, LogLevel};
use portfolio_motion::sections::{
    ActiveSectionTracker, MenuState, NavItem, NavbarState, NavigationModel, SectionDescriptor,
};
use portfolio_motion::signal::{Signal, Subscription};
use portfolio_motion::tilt::{PointerTiltController, TiltConfig, CARD_PERSPECTIVE_PX};
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, Event, EventTarget, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

const FALLBACK_SECTION: &str = "home";

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn viewport() -> Option<Viewport> {
    let win = window()?;
    let width = win.inner_width().ok()?.as_f64()?;
    let height = win.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width, height))
}

fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

fn document_height() -> f64 {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0)
}

fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn node_rect(node: &NodeRef) -> Option<Rect> {
    node.cast::<Element>().map(|element| element_rect(&element))
}

/// Live DOM geometry for the controllers.
#[derive(Default)]
struct DomLayout {
    nodes: RefCell<HashMap<ElementId, NodeRef>>,
}

impl DomLayout {
    fn bind(&self, element: ElementId, node: NodeRef) {
        self.nodes.borrow_mut().insert(element, node);
    }

    fn release(&self, element: ElementId) {
        self.nodes.borrow_mut().remove(&element);
    }
}

impl LayoutHost for DomLayout {
    fn viewport(&self) -> Option<Viewport> {
        viewport()
    }

    fn element_bounds(&self, element: ElementId) -> Option<Rect> {
        self.nodes.borrow().get(&element).and_then(node_rect)
    }

    fn sections(&self) -> Vec<SectionDescriptor> {
        let Some(document) = window().and_then(|w| w.document()) else {
            return Vec::new();
        };
        let Ok(nodes) = document.query_selector_all("section[id]") else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|section| SectionDescriptor {
                id: section.id(),
                top_offset_px: section.get_bounding_client_rect().top(),
            })
            .collect()
    }
}

/// Page-level motion state. One instance per page view, shared with the
/// components through context.
struct MotionRuntime {
    config: MotionConfig,
    reduced_motion: bool,
    layout: DomLayout,
    entrance: EntranceController,
    sections: RefCell<ActiveSectionTracker>,
    navbar: RefCell<NavbarState>,
    scrolled: Signal<bool>,
    scroll_progress: Signal<f64>,
    throttle: RefCell<FrameThrottle>,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
    _section_log: Subscription,
}

impl MotionRuntime {
    fn new(config: MotionConfig, navigation: Option<&NavigationModel>) -> Rc<Self> {
        let ratio = config.section_threshold_ratio;
        let tracker = match navigation {
            Some(navigation) => ActiveSectionTracker::for_navigation(navigation, ratio),
            None => ActiveSectionTracker::new(FALLBACK_SECTION, ratio),
        };
        let log_level = config.log_level;
        let section_log = tracker.active_id().subscribe(move |section: &String| {
            log_event(
                log_level,
                LogLevel::Debug,
                "active_section_changed",
                json!({ "section": section }),
            );
        });

        Rc::new(Self {
            reduced_motion: config.reduced_motion || prefers_reduced_motion(),
            navbar: RefCell::new(NavbarState::new(config.navbar_scrolled_px)),
            config,
            layout: DomLayout::default(),
            entrance: EntranceController::new(),
            sections: RefCell::new(tracker),
            scrolled: Signal::new(false),
            scroll_progress: Signal::new(0.0),
            throttle: RefCell::new(FrameThrottle::new()),
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            _section_log: section_log,
        })
    }

    fn active_id(&self) -> Signal<String> {
        self.sections.borrow().active_id()
    }

    fn start(self: &Rc<Self>) {
        if !self.listeners.borrow().is_empty() {
            return;
        }
        let Some(win) = window() else {
            return;
        };

        self.entrance.start();
        self.sections.borrow_mut().start();

        let runtime = Rc::downgrade(self);
        let scroll = EventListener::new(&win, "scroll", move |_| {
            if let Some(runtime) = runtime.upgrade() {
                runtime.on_scroll();
            }
        });
        let runtime = Rc::downgrade(self);
        let resize = EventListener::new(&win, "resize", move |_| {
            if let Some(runtime) = runtime.upgrade() {
                runtime.on_resize();
            }
        });
        self.listeners.borrow_mut().extend([scroll, resize]);

        if self.reduced_motion {
            self.entrance.reveal_all();
        }
        self.refresh();

        log_event(
            self.config.log_level,
            LogLevel::Info,
            "motion_started",
            json!({
                "observed": self.entrance.observed_count(),
                "reducedMotion": self.reduced_motion,
                "activeSection": self.active_id().get(),
            }),
        );
    }

    fn stop(&self) {
        self.listeners.borrow_mut().clear();
        self.frame.borrow_mut().take();
        self.throttle.borrow_mut().cancel();
        self.entrance.stop();
        self.sections.borrow_mut().stop();
        log_event(
            self.config.log_level,
            LogLevel::Debug,
            "motion_stopped",
            json!({}),
        );
    }

    fn on_scroll(self: &Rc<Self>) {
        let changed = self.navbar.borrow_mut().on_scroll(scroll_y());
        if changed {
            let scrolled = self.navbar.borrow().is_scrolled();
            self.scrolled.set(scrolled);
        }
        self.sections.borrow_mut().on_scroll();
        self.request_frame();
    }

    fn on_resize(self: &Rc<Self>) {
        self.sections.borrow_mut().on_resize();
        self.request_frame();
    }

    fn request_frame(self: &Rc<Self>) {
        if !self.throttle.borrow_mut().request() {
            return;
        }
        let runtime = Rc::downgrade(self);
        let handle = request_animation_frame(move |_| {
            if let Some(runtime) = runtime.upgrade() {
                runtime.run_frame();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn run_frame(&self) {
        self.frame.borrow_mut().take();
        if !self.throttle.borrow_mut().begin_frame() {
            return;
        }
        self.sections.borrow_mut().on_frame(&self.layout);
        self.entrance.evaluate(&self.layout);
        self.publish_scroll_progress();
    }

    fn publish_scroll_progress(&self) {
        let Some(viewport) = self.layout.viewport() else {
            return;
        };
        self.scroll_progress
            .set(scroll_progress(scroll_y(), document_height(), viewport.height));
    }

    /// Immediate evaluation, used on mount so in-view content and the
    /// restored scroll position are picked up without waiting for input.
    fn refresh(&self) {
        let changed = self.navbar.borrow_mut().on_scroll(scroll_y());
        if changed {
            let scrolled = self.navbar.borrow().is_scrolled();
            self.scrolled.set(scrolled);
        }
        self.sections.borrow_mut().evaluate_now(&self.layout);
        self.entrance.evaluate(&self.layout);
        self.publish_scroll_progress();
    }

    fn observe(self: &Rc<Self>, node: NodeRef, options: ObserveOptions) -> EntranceHandle {
        let handle = self.entrance.observe(options);
        self.layout.bind(handle.id(), node);
        if self.reduced_motion {
            self.entrance.record_intersection(handle.id(), true);
        } else {
            self.request_frame();
        }
        handle
    }

    fn release(&self, handle: EntranceHandle) {
        self.layout.release(handle.id());
        drop(handle);
    }
}

#[derive(Clone)]
struct MotionHandle(Rc<MotionRuntime>);

impl PartialEq for MotionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Drives a per-frame callback until it reports it has settled.
#[derive(Default)]
struct FrameLoop {
    handle: RefCell<Option<AnimationFrame>>,
    last_timestamp: Cell<Option<f64>>,
}

type FrameTick = Rc<dyn Fn(f64) -> bool>;

impl FrameLoop {
    fn ensure_running(self: &Rc<Self>, tick: FrameTick) {
        if self.handle.borrow().is_some() {
            return;
        }

        let frame_loop = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| {
            frame_loop.handle.borrow_mut().take();
            let dt = frame_delta_seconds(frame_loop.last_timestamp.get(), timestamp);
            if tick(dt) {
                frame_loop.last_timestamp.set(Some(timestamp));
                frame_loop.ensure_running(tick);
            } else {
                frame_loop.last_timestamp.set(None);
            }
        });
        *self.handle.borrow_mut() = Some(handle);
    }

    fn cancel(&self) {
        self.handle.borrow_mut().take();
        self.last_timestamp.set(None);
    }
}

#[hook]
fn use_signal<T>(signal: Signal<T>) -> T
where
    T: Clone + PartialEq + 'static,
{
    let value = use_state(|| signal.get());
    {
        let value = value.clone();
        use_effect_with(signal, move |signal| {
            value.set(signal.get());
            let subscription = signal.subscribe(move |next: &T| value.set(next.clone()));
            move || drop(subscription)
        });
    }
    (*value).clone()
}

/// `true` once `node` has scrolled into view. Without a motion runtime in
/// context everything renders as already visible.
#[hook]
fn use_in_view(node: NodeRef, options: ObserveOptions) -> bool {
    let motion = use_context::<MotionHandle>();
    let visible = use_state(|| motion.is_none());
    {
        let visible = visible.clone();
        use_effect_with((), move |_| {
            let registration = motion.map(|motion| {
                let runtime = motion.0;
                let handle = runtime.observe(node, options);
                let setter = visible.clone();
                let subscription = handle
                    .is_visible()
                    .subscribe(move |entered: &bool| setter.set(*entered));
                if handle.is_visible().get() {
                    visible.set(true);
                }
                (runtime, handle, subscription)
            });

            move || {
                if let Some((runtime, handle, subscription)) = registration {
                    drop(subscription);
                    runtime.release(handle);
                }
            }
        });
    }
    *visible
}

#[hook]
fn use_entrance_margin() -> ViewportMargin {
    use_context::<MotionHandle>()
        .map(|motion| motion.0.config.entrance_margin)
        .unwrap_or(ViewportMargin::ZERO)
}

#[derive(Properties, PartialEq)]
struct RevealProps {
    transition: EntranceTransition,
    #[prop_or_default]
    class: Classes,
    /// Wait until the element is past the configured entrance margin.
    #[prop_or(true)]
    inset: bool,
    #[prop_or_default]
    children: Html,
}

#[function_component(Reveal)]
fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let margin = use_entrance_margin();
    let margin = if props.inset {
        margin
    } else {
        ViewportMargin::ZERO
    };
    let visible = use_in_view(node.clone(), ObserveOptions::once_with_margin(margin));

    html! {
        <div ref={node} class={props.class.clone()} style={props.transition.style(visible)}>
            {props.children.clone()}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AnimatedSectionProps {
    id: AttrValue,
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    children: Html,
}

#[function_component(AnimatedSection)]
fn animated_section(props: &AnimatedSectionProps) -> Html {
    let node = use_node_ref();
    let margin = use_entrance_margin();
    let visible = use_in_view(node.clone(), ObserveOptions::once_with_margin(margin));

    html! {
        <section id={props.id.clone()} ref={node} class={classes!("page-section", props.class.clone())}>
            <div class="container" style={EntranceTransition::section().style(visible)}>
                {props.children.clone()}
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SectionHeadingProps {
    eyebrow: AttrValue,
    title: AttrValue,
}

#[function_component(SectionHeading)]
fn section_heading(props: &SectionHeadingProps) -> Html {
    html! {
        <Reveal transition={EntranceTransition::heading()} class="section-heading">
            <span class="badge">{props.eyebrow.clone()}</span>
            <h2>{props.title.clone()}</h2>
            <div class="heading-rule"></div>
        </Reveal>
    }
}

#[derive(Properties, PartialEq)]
struct TextRevealProps {
    text: AttrValue,
    #[prop_or_default]
    class: Classes,
}

#[function_component(TextReveal)]
fn text_reveal(props: &TextRevealProps) -> Html {
    let node = use_node_ref();
    let visible = use_in_view(node.clone(), ObserveOptions::once());
    let schedule = use_memo(props.text.clone(), |text| RevealSchedule::new(text));

    html! {
        <span ref={node} class={props.class.clone()} aria-label={props.text.clone()}>
            { for schedule.words().iter().map(|word| html! {
                <span class="reveal-word" aria-hidden="true">
                    { for word.iter().map(|glyph| html! {
                        <span class="reveal-glyph" style={RevealSchedule::glyph_transition(glyph).style(visible)}>
                            {glyph.ch.to_string()}
                        </span>
                    }) }
                </span>
            }) }
        </span>
    }
}

#[derive(Properties, PartialEq)]
struct SkillBarProps {
    skill: Skill,
}

#[function_component(SkillBar)]
fn skill_bar(props: &SkillBarProps) -> Html {
    let node = use_node_ref();
    let visible = use_in_view(node.clone(), ObserveOptions::once());
    let level = props.skill.level;

    html! {
        <div ref={node} class="skill-bar">
            <div class="skill-bar-label">
                <h4>{props.skill.name.clone()}</h4>
                <span class="muted">{format!("{level:.0}%")}</span>
            </div>
            <div class="skill-bar-track">
                <div class="skill-bar-fill" style={EntranceTransition::skill_bar(level).style(visible)}></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ThreeDCardProps {
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    children: Html,
}

#[function_component(ThreeDCard)]
fn three_d_card(props: &ThreeDCardProps) -> Html {
    let (tilt_config, enabled) = use_context::<MotionHandle>()
        .map(|motion| (motion.0.config.tilt, !motion.0.reduced_motion))
        .unwrap_or((TiltConfig::default(), true));
    let node = use_node_ref();
    let controller = use_mut_ref(move || PointerTiltController::new(tilt_config));
    let frames = use_memo((), |_| FrameLoop::default());
    let redraw = use_force_update();

    {
        let frames = frames.clone();
        use_effect_with((), move |_| move || frames.cancel());
    }

    let tick: FrameTick = {
        let controller = controller.clone();
        let redraw = redraw.clone();
        Rc::new(move |dt| {
            let animating = {
                let mut controller = controller.borrow_mut();
                controller.step(dt);
                controller.is_animating()
            };
            redraw.force_update();
            animating
        })
    };

    let onmouseenter = {
        let controller = controller.clone();
        let frames = frames.clone();
        let tick = tick.clone();
        Callback::from(move |_: MouseEvent| {
            if !enabled {
                return;
            }
            controller.borrow_mut().on_pointer_enter();
            frames.ensure_running(tick.clone());
        })
    };

    let onmousemove = {
        let controller = controller.clone();
        let frames = frames.clone();
        let tick = tick.clone();
        let node = node.clone();
        Callback::from(move |event: MouseEvent| {
            if !enabled {
                return;
            }
            let moved = controller.borrow_mut().on_pointer_move(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                node_rect(&node),
            );
            if moved {
                frames.ensure_running(tick.clone());
            }
        })
    };

    let onmouseleave = {
        let controller = controller.clone();
        let frames = frames.clone();
        Callback::from(move |_: MouseEvent| {
            if !enabled {
                return;
            }
            controller.borrow_mut().on_pointer_leave();
            frames.ensure_running(tick.clone());
        })
    };

    let tilt = controller.borrow();
    let sheen = tilt.sheen_visible().then(|| {
        html! {
            <div
                class="tilt-card-sheen"
                style={format!("opacity: {:.3};", tilt.sheen_opacity())}
                aria-hidden="true"
            />
        }
    });

    html! {
        <div
            ref={node}
            class={classes!("tilt-card", props.class.clone())}
            style={format!("perspective: {CARD_PERSPECTIVE_PX}px; transform-style: preserve-3d;")}
            onmouseenter={onmouseenter}
            onmousemove={onmousemove}
            onmouseleave={onmouseleave}
        >
            <div
                class="tilt-card-body"
                style={format!("transform: {}; transform-style: preserve-3d;", tilt.transform_css())}
            >
                {props.children.clone()}
                { for sheen }
            </div>
        </div>
    }
}

fn is_link_target(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest("a, button").ok().flatten())
        .is_some()
}

fn cursor_listener(
    target: &EventTarget,
    event_type: &'static str,
    cursor: &Rc<RefCell<CursorFollower>>,
    frames: &Rc<FrameLoop>,
    tick: &FrameTick,
    apply: fn(&mut CursorFollower, &Event),
) -> EventListener {
    let cursor = cursor.clone();
    let frames = frames.clone();
    let tick = tick.clone();
    EventListener::new(target, event_type, move |event| {
        apply(&mut cursor.borrow_mut(), event);
        frames.ensure_running(tick.clone());
    })
}

#[function_component(CustomCursor)]
fn custom_cursor() -> Html {
    let (spring, enabled) = use_context::<MotionHandle>()
        .map(|motion| (motion.0.config.cursor_spring, !motion.0.reduced_motion))
        .unwrap_or((default_cursor_spring(), true));
    let cursor = use_mut_ref(move || CursorFollower::new(spring));
    let frames = use_memo((), |_| FrameLoop::default());
    let redraw = use_force_update();

    {
        let cursor = cursor.clone();
        let frames = frames.clone();
        use_effect_with(enabled, move |enabled| {
            let mut listeners = Vec::new();
            let document = window().and_then(|w| w.document().map(|d| (w, d)));
            if let (true, Some((win, document))) = (*enabled, document) {
                let tick: FrameTick = {
                    let cursor = cursor.clone();
                    Rc::new(move |dt| {
                        let animating = {
                            let mut cursor = cursor.borrow_mut();
                            cursor.step(dt);
                            cursor.is_animating()
                        };
                        redraw.force_update();
                        animating
                    })
                };

                listeners.push(cursor_listener(
                    &win,
                    "mousemove",
                    &cursor,
                    &frames,
                    &tick,
                    |cursor, event| {
                        if let Some(event) = event.dyn_ref::<MouseEvent>() {
                            cursor.on_pointer_move(
                                f64::from(event.client_x()),
                                f64::from(event.client_y()),
                            );
                        }
                    },
                ));
                listeners.push(cursor_listener(
                    &win,
                    "mousedown",
                    &cursor,
                    &frames,
                    &tick,
                    |cursor, _| cursor.on_pointer_down(),
                ));
                listeners.push(cursor_listener(
                    &win,
                    "mouseup",
                    &cursor,
                    &frames,
                    &tick,
                    |cursor, _| cursor.on_pointer_up(),
                ));
                listeners.push(cursor_listener(
                    &document,
                    "mouseover",
                    &cursor,
                    &frames,
                    &tick,
                    |cursor, event| {
                        if is_link_target(event) {
                            cursor.on_link_enter();
                        }
                    },
                ));
                listeners.push(cursor_listener(
                    &document,
                    "mouseout",
                    &cursor,
                    &frames,
                    &tick,
                    |cursor, event| {
                        if is_link_target(event) {
                            cursor.on_link_leave();
                        }
                    },
                ));
            }

            move || {
                drop(listeners);
                frames.cancel();
            }
        });
    }

    let cursor = cursor.borrow();
    if !enabled || !cursor.is_visible() {
        return html! {};
    }

    html! {
        <div
            class={classes!("custom-cursor", cursor.variant().as_str())}
            style={cursor.style()}
            aria-hidden="true"
        />
    }
}

#[derive(Properties, PartialEq)]
struct FloatingNavbarProps {
    navigation: NavigationModel,
    active_id: AttrValue,
    scrolled: bool,
    on_open_menu: Callback<()>,
}

#[function_component(FloatingNavbar)]
fn floating_navbar(props: &FloatingNavbarProps) -> Html {
    html! {
        <div class={classes!("floating-nav", props.scrolled.then_some("is-scrolled"))}>
            <div class="floating-nav-pill">
                <nav class="nav-links" aria-label="Sections">
                    { for props.navigation.items().iter().map(|item| {
                        let active = props.navigation.is_active(item, &props.active_id);
                        html! {
                            <a
                                href={item.href.clone()}
                                class={classes!("nav-link", active.then_some("is-active"))}
                                aria-current={active.then_some("page")}
                            >
                                {item.name.clone()}
                            </a>
                        }
                    }) }
                </nav>
                <button
                    class="menu-button"
                    type="button"
                    aria-label="Open menu"
                    onclick={props.on_open_menu.reform(|_: MouseEvent| ())}
                >
                    <span aria-hidden="true">{"☰"}</span>
                </button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MobileMenuProps {
    navigation: NavigationModel,
    active_id: AttrValue,
    open: bool,
    owner: Owner,
    on_close: Callback<()>,
    on_select: Callback<NavItem>,
}

#[function_component(MobileMenu)]
fn mobile_menu(props: &MobileMenuProps) -> Html {
    html! {
        <div
            class={classes!("mobile-menu", props.open.then_some("is-open"))}
            aria-hidden={(!props.open).to_string()}
        >
            <button
                class="mobile-menu-close"
                type="button"
                aria-label="Close menu"
                onclick={props.on_close.reform(|_: MouseEvent| ())}
            >
                <span aria-hidden="true">{"✕"}</span>
            </button>
            <nav class="mobile-menu-links" aria-label="Sections">
                { for props.navigation.items().iter().map(|item| {
                    let active = props.navigation.is_active(item, &props.active_id);
                    let onclick = {
                        let item = item.clone();
                        props.on_select.reform(move |_: MouseEvent| item.clone())
                    };
                    html! {
                        <a
                            href={item.href.clone()}
                            class={classes!("mobile-menu-link", active.then_some("is-active"))}
                            onclick={onclick}
                        >
                            {item.name.clone()}
                        </a>
                    }
                }) }
            </nav>
            <SocialLinks owner={props.owner.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SocialLinksProps {
    owner: Owner,
}

#[function_component(SocialLinks)]
fn social_links(props: &SocialLinksProps) -> Html {
    let owner = &props.owner;
    html! {
        <div class="social-links">
            if let Some(github) = owner.github_url.clone() {
                <a class="social-link" href={github} target="_blank" rel="noopener noreferrer">{"GitHub"}</a>
            }
            if let Some(linkedin) = owner.linkedin_url.clone() {
                <a class="social-link" href={linkedin} target="_blank" rel="noopener noreferrer">{"LinkedIn"}</a>
            }
            <a class="social-link" href={format!("mailto:{}", owner.email)}>{"Email"}</a>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
    index: usize,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = &props.project;
    html! {
        <Reveal transition={EntranceTransition::list_item(props.index)} inset={false} class="project-card-slot">
            <article class="project-card">
                <div class="project-card-media">
                    <img src={project.image.clone()} alt={project.title.clone()} loading="lazy" />
                    <div class="project-card-overlay">
                        if let Some(github) = project.github_link.clone() {
                            <a class="icon-button" href={github} target="_blank" rel="noopener noreferrer">
                                {"GitHub"}
                                <span class="sr-only">{" (opens in a new tab)"}</span>
                            </a>
                        }
                    </div>
                </div>
                <div class="project-card-copy">
                    <h3>{project.title.clone()}</h3>
                    <p class="muted">{project.description.clone()}</p>
                    <ul class="tag-list">
                        { for project.tags.iter().map(|tag| html! { <li class="tag">{tag.clone()}</li> }) }
                    </ul>
                </div>
            </article>
        </Reveal>
    }
}

fn draft_field(
    draft: &UseStateHandle<ContactDraft>,
    apply: fn(&mut ContactDraft, String),
) -> Callback<InputEvent> {
    let draft = draft.clone();
    Callback::from(move |event: InputEvent| {
        let value = event
            .target_dyn_into::<HtmlInputElement>()
            .map(|input| input.value())
            .or_else(|| {
                event
                    .target_dyn_into::<HtmlTextAreaElement>()
                    .map(|area| area.value())
            })
            .unwrap_or_default();
        let mut next = (*draft).clone();
        apply(&mut next, value);
        draft.set(next);
    })
}

#[derive(Properties, PartialEq)]
struct ContactFormProps {
    recipient: AttrValue,
}

#[function_component(ContactForm)]
fn contact_form(props: &ContactFormProps) -> Html {
    let draft = use_state(ContactDraft::default);
    let status = use_state(|| None::<Result<(), String>>);
    let log_level = use_context::<MotionHandle>()
        .map(|motion| motion.0.config.log_level)
        .unwrap_or_default();

    let onsubmit = {
        let draft = draft.clone();
        let status = status.clone();
        let recipient = props.recipient.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            match draft.mailto_href(&recipient) {
                Ok(href) => {
                    let opened = window()
                        .map(|win| win.location().set_href(&href).is_ok())
                        .unwrap_or(false);
                    if opened {
                        log_event(log_level, LogLevel::Info, "contact_draft_opened", json!({}));
                    } else {
                        log_event(log_level, LogLevel::Warn, "contact_draft_failed", json!({}));
                    }
                    status.set(Some(handoff_status(opened, &recipient)));
                }
                Err(error) => status.set(Some(Err(error.to_string()))),
            }
        })
    };

    let message = match (*status).as_ref() {
        Some(Ok(())) => html! { <p class="form-status is-ok" role="status">{"Your mail app should open with the message ready to send."}</p> },
        Some(Err(error)) => html! { <p class="form-status is-error" role="alert">{error.clone()}</p> },
        None => html! {},
    };

    html! {
        <form class="contact-form" onsubmit={onsubmit} novalidate=true>
            <label>
                <span>{"Name"}</span>
                <input
                    type="text"
                    name="name"
                    autocomplete="name"
                    value={draft.name.clone()}
                    oninput={draft_field(&draft, |draft, value| draft.name = value)}
                />
            </label>
            <label>
                <span>{"Email"}</span>
                <input
                    type="email"
                    name="email"
                    autocomplete="email"
                    value={draft.email.clone()}
                    oninput={draft_field(&draft, |draft, value| draft.email = value)}
                />
            </label>
            <label>
                <span>{"Message"}</span>
                <textarea
                    name="message"
                    rows="5"
                    value={draft.message.clone()}
                    oninput={draft_field(&draft, |draft, value| draft.message = value)}
                />
            </label>
            <button class="primary-button" type="submit">{"Send message"}</button>
            {message}
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct HeroSectionProps {
    owner: Owner,
}

/// Plays a load cascade on mount and fades out as the page scrolls away.
#[function_component(HeroSection)]
fn hero_section(props: &HeroSectionProps) -> Html {
    let motion = use_context::<MotionHandle>();
    let reduced = motion
        .as_ref()
        .map(|motion| motion.0.reduced_motion)
        .unwrap_or(false);
    let progress = use_memo((), move |_| {
        motion
            .map(|motion| motion.0.scroll_progress.clone())
            .unwrap_or_else(|| Signal::new(0.0))
    });
    let progress = use_signal((*progress).clone());
    let content = use_node_ref();
    let loaded = use_state(|| reduced);

    {
        let loaded = loaded.clone();
        let content = content.clone();
        use_effect_with((), move |_| {
            // Flush layout so the hidden styles are applied before the
            // transition target is set.
            if let Some(element) = content.cast::<Element>() {
                element.get_bounding_client_rect();
            }
            loaded.set(true);
        });
    }

    let owner = &props.owner;
    let loaded = *loaded;
    let fade_style = if reduced {
        String::new()
    } else {
        HeroScrollFade::at(progress).style()
    };

    html! {
        <section id="home" class="hero">
            <div ref={content} class="hero-content" style={fade_style}>
                <div class="hero-badge" style={EntranceTransition::hero_badge().style(loaded)}>
                    <span class="badge">{owner.role.clone()}</span>
                </div>
                <h1 class="hero-title" style={EntranceTransition::hero_title().style(loaded)}>
                    <TextReveal text={owner.name.clone()} />
                </h1>
                <p class="hero-tagline" style={EntranceTransition::hero_tagline().style(loaded)}>
                    {owner.tagline.clone()}
                </p>
                <div class="hero-actions" style={EntranceTransition::hero_actions().style(loaded)}>
                    if let Some(github) = owner.github_url.clone() {
                        <a class="outline-button" href={github} target="_blank" rel="noopener noreferrer">
                            {"GitHub Profile"}
                        </a>
                    }
                </div>
            </div>
            <a class="scroll-hint" href="#about">
                <span class="muted">{"Scroll Down"}</span>
                <span class="scroll-hint-mouse" aria-hidden="true"><span class="scroll-hint-dot"></span></span>
            </a>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct PageProps {
    site: SiteContent,
}

#[function_component(Page)]
fn page(props: &PageProps) -> Html {
    let site = &props.site;
    let owner = &site.owner;

    html! {
        <main>
            <HeroSection owner={owner.clone()} />

            <AnimatedSection id="about">
                <SectionHeading eyebrow="About Me" title="Who I Am" />
                <div class="about-grid">
                    <Reveal transition={EntranceTransition::slide_from_left()}>
                        <ThreeDCard class="portrait-card">
                            <div class="portrait">
                                <img src="/portrait.jpg" alt={owner.name.clone()} />
                                <div class="portrait-caption">
                                    <h3>{owner.name.clone()}</h3>
                                    <p class="muted">{owner.role.clone()}</p>
                                </div>
                            </div>
                        </ThreeDCard>
                    </Reveal>
                    <Reveal transition={EntranceTransition::slide_from_right()} class="about-copy">
                        <h3>{format!("Hello, I'm {}!", owner.name)}</h3>
                        { for site.about.iter().map(|paragraph| html! { <p class="muted">{paragraph.clone()}</p> }) }
                        <dl class="fact-grid">
                            { for [
                                ("Name", owner.name.clone()),
                                ("Email", owner.email.clone()),
                                ("Location", owner.location.clone()),
                                ("Availability", owner.availability.clone()),
                            ].into_iter().map(|(label, value)| html! {
                                <div class="fact">
                                    <dt class="muted">{format!("{label}:")}</dt>
                                    <dd>{value}</dd>
                                </div>
                            }) }
                        </dl>
                        if let Some(cv) = owner.cv_url.clone() {
                            <a class="primary-button" href={cv} target="_blank" rel="noopener noreferrer">{"Download CV"}</a>
                        }
                    </Reveal>
                </div>
            </AnimatedSection>

            <AnimatedSection id="skills" class="section-tinted">
                <SectionHeading eyebrow="My Skills" title="Technical Expertise" />
                <div class="skills-grid">
                    { for site.skills.iter().enumerate().map(|(index, skill)| html! {
                        <Reveal transition={EntranceTransition::list_item(index)} inset={false}>
                            <SkillBar skill={skill.clone()} />
                        </Reveal>
                    }) }
                </div>
            </AnimatedSection>

            <AnimatedSection id="projects">
                <SectionHeading eyebrow="My Work" title="Featured Projects" />
                <div class="projects-grid">
                    { for site.projects.iter().enumerate().map(|(index, project)| html! {
                        <ProjectCard project={project.clone()} index={index} />
                    }) }
                </div>
            </AnimatedSection>

            <AnimatedSection id="contact" class="section-tinted">
                <SectionHeading eyebrow="Get In Touch" title="Contact Me" />
                <div class="contact-grid">
                    <Reveal transition={EntranceTransition::slide_from_left()} class="contact-copy">
                        <h3>{"Let's talk about your project"}</h3>
                        <p class="muted">{"Have a role, an idea or a question? Send a note and I'll get back to you."}</p>
                        <SocialLinks owner={owner.clone()} />
                    </Reveal>
                    <Reveal transition={EntranceTransition::slide_from_right()}>
                        <ContactForm recipient={owner.email.clone()} />
                    </Reveal>
                </div>
            </AnimatedSection>
        </main>
    }
}

fn load_motion_config() -> MotionConfig {
    let (config, error) = MotionConfig::embedded();
    if let Some(error) = error {
        log_event(
            config.log_level,
            LogLevel::Warn,
            "motion_config_fallback",
            json!({ "error": error }),
        );
    }
    config
}

#[function_component(App)]
fn app() -> Html {
    let site = use_memo((), |_| SiteContent::embedded());
    let motion = {
        let site = site.clone();
        use_memo((), move |_| {
            let config = load_motion_config();
            let navigation = (*site).as_ref().ok().map(|site| &site.navigation);
            MotionHandle(MotionRuntime::new(config, navigation))
        })
    };

    {
        let runtime = motion.0.clone();
        use_effect_with((), move |_| {
            runtime.start();
            move || runtime.stop()
        });
    }

    let active_id = use_signal(motion.0.active_id());
    let scrolled = use_signal(motion.0.scrolled.clone());
    let menu = use_state(MenuState::default);

    let site = match &*site {
        Ok(site) => site.clone(),
        Err(error) => {
            log_event(
                motion.0.config.log_level,
                LogLevel::Warn,
                "site_content_invalid",
                json!({ "error": error }),
            );
            return html! {
                <main class="load-error">
                    <p>{"This page could not load its content."}</p>
                </main>
            };
        }
    };

    let on_open_menu = {
        let menu = menu.clone();
        Callback::from(move |_: ()| {
            let mut next = *menu;
            next.open();
            menu.set(next);
        })
    };

    let on_close_menu = {
        let menu = menu.clone();
        Callback::from(move |_: ()| {
            let mut next = *menu;
            next.close();
            menu.set(next);
        })
    };

    let on_select = {
        let menu = menu.clone();
        let log_level = motion.0.config.log_level;
        Callback::from(move |item: NavItem| {
            let mut next = *menu;
            let section = next.select(&item).to_string();
            menu.set(next);
            log_event(
                log_level,
                LogLevel::Debug,
                "menu_navigate",
                json!({ "section": section }),
            );
        })
    };

    html! {
        <ContextProvider<MotionHandle> context={(*motion).clone()}>
            <a class="skip-link" href="#about">{"Skip to main content"}</a>
            <div class="page-backdrop" aria-hidden="true">
                <div class="blob blob-purple"></div>
                <div class="blob blob-blue"></div>
                <div class="blob blob-pink"></div>
            </div>
            <FloatingNavbar
                navigation={site.navigation.clone()}
                active_id={AttrValue::from(active_id.clone())}
                scrolled={scrolled}
                on_open_menu={on_open_menu}
            />
            <MobileMenu
                navigation={site.navigation.clone()}
                active_id={AttrValue::from(active_id)}
                open={menu.is_open()}
                owner={site.owner.clone()}
                on_close={on_close_menu}
                on_select={on_select}
            />
            <CustomCursor />
            <Page site={site.clone()} />
            <footer class="site-footer">
                <p class="muted">{format!("© {}", site.owner.name)}</p>
            </footer>
        </ContextProvider<MotionHandle>>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
