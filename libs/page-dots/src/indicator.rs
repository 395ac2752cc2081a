//! The page indicator widget
//!
//! `PageIndicator` ties the selection binding, gesture tracking, the
//! auto-advance timer, icons and style together. It is driven entirely by
//! the host: touch samples, visibility changes and `poll()` calls all come
//! from the host's event loop, with the current `Instant` passed in.

use crate::auto_advance::{AutoAdvanceTimer, EndBehavior, TimerState};
use crate::config::IndicatorConfig;
use crate::gesture::{GestureTracker, Intent, TouchEvent};
use crate::icons::{Icon, IconMap, NoIcon};
use crate::layout::{self, DotLayout};
use crate::render::{DotFrame, DrawTargetBackend, Frame, RenderBackend};
use crate::selection::{SelectionBinding, SelectionController};
use crate::style::{BackgroundStyle, Style};
use embedded_graphics::{
    Drawable,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point},
    primitives::Rectangle,
};
use embedded_layout::View;
use std::time::{Duration, Instant};

pub struct PageIndicator<B, I = NoIcon> {
    selection: SelectionController<B>,
    icons: IconMap<I>,
    style: Style,
    timer: AutoAdvanceTimer,
    end_behavior: EndBehavior,
    gestures: GestureTracker,
    bounds: Rectangle,
    visible: bool,
    torn_down: bool,
}

impl<B: SelectionBinding> PageIndicator<B> {
    /// Dot-only indicator for `total` pages
    pub fn new(binding: B, total: usize) -> Self {
        Self::from_parts(binding, total, IconMap::default())
    }
}

impl<B: SelectionBinding, I> PageIndicator<B, I> {
    /// Indicator with custom icons.
    ///
    /// `icon_for(page, is_selected)` runs once per page and state, here and
    /// never again. Only the first icon it yields is used; yielding nothing
    /// keeps the default dot.
    pub fn with_icons<F, T>(binding: B, total: usize, icon_for: F) -> Self
    where
        F: FnMut(usize, bool) -> T,
        T: IntoIterator<Item = I>,
    {
        Self::from_parts(binding, total, IconMap::build(total, icon_for))
    }

    fn from_parts(binding: B, total: usize, icons: IconMap<I>) -> Self {
        Self {
            selection: SelectionController::new(binding, total),
            icons,
            style: Style::default(),
            timer: AutoAdvanceTimer::disabled(),
            end_behavior: EndBehavior::default(),
            gestures: GestureTracker::default(),
            bounds: Rectangle::new(Point::zero(), layout::natural_size(total)),
            visible: false,
            torn_down: false,
        }
    }

    #[must_use]
    pub fn with_background_style(mut self, background: BackgroundStyle) -> Self {
        self.style = self.style.with_background_style(background);
        self
    }

    #[must_use]
    pub fn with_tints(mut self, current: BinaryColor, others: BinaryColor) -> Self {
        self.style = self.style.with_tints(current, others);
        self
    }

    /// Advance one page every `interval`. `None` or a zero interval turns
    /// auto-advance off. Takes effect at the next `on_shown`.
    #[must_use]
    pub fn with_auto_advance(mut self, interval: Option<Duration>) -> Self {
        self.timer = AutoAdvanceTimer::new(interval);
        self
    }

    #[must_use]
    pub fn with_end_behavior(mut self, end_behavior: EndBehavior) -> Self {
        self.end_behavior = end_behavior;
        self
    }

    /// Apply every setting from a loaded configuration
    #[must_use]
    pub fn with_config(mut self, config: &IndicatorConfig) -> Self {
        self.style = config.style();
        self.with_auto_advance(config.auto_advance())
            .with_end_behavior(config.end_behavior)
    }

    pub fn total(&self) -> usize {
        self.selection.total()
    }

    /// Host selection, clamped into range
    pub fn selection(&self) -> usize {
        self.selection.current()
    }

    /// Programmatic selection change; same clamping as gestures.
    pub fn set_selection(&mut self, index: usize) -> bool {
        self.selection.set_selection(index)
    }

    pub fn icons(&self) -> &IconMap<I> {
        &self.icons
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn end_behavior(&self) -> EndBehavior {
        self.end_behavior
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_interacting(&self) -> bool {
        self.gestures.is_active()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The view became visible
    pub fn on_shown(&mut self, now: Instant) {
        if self.torn_down {
            log::warn!("on_shown after teardown ignored");
            return;
        }
        self.visible = true;
        self.sync_timer(now);
    }

    /// The view was hidden. Any gesture in progress is dropped.
    pub fn on_hidden(&mut self) {
        self.visible = false;
        self.gestures.cancel();
        self.timer.pause();
    }

    /// The view is gone for good. No tick, touch or lifecycle event has any
    /// effect afterwards.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.visible = false;
        self.gestures.cancel();
        self.timer.teardown();
    }

    /// Feed a touch sample. Returns `true` if the selection changed.
    ///
    /// Touches work whether or not the view was shown; visibility only
    /// drives auto-advance.
    pub fn handle_touch(&mut self, event: TouchEvent, now: Instant) -> bool {
        if self.torn_down || self.total() == 0 {
            return false;
        }

        let intent = self.gestures.handle(event, self.bounds, self.selection());
        match intent {
            Intent::Ignore => false,
            Intent::Begin => {
                self.timer.pause();
                false
            }
            Intent::Seek { start_page, offset } => {
                self.selection.set_offset_from(start_page, offset)
            }
            Intent::Commit { start_page, offset } => {
                let changed = self.selection.set_offset_from(start_page, offset);
                self.sync_timer(now);
                changed
            }
            Intent::Tap(point) => {
                let changed = DotLayout::new(self.bounds, self.total())
                    .hit_test(point)
                    .is_some_and(|page| self.selection.set_selection(page));
                self.sync_timer(now);
                changed
            }
        }
    }

    /// Single-point touch, as delivered by touch panels that only report
    /// contact points. Treated as a press and release at `point`.
    pub fn tap(&mut self, point: Point, now: Instant) -> bool {
        self.handle_touch(TouchEvent::Press(point), now);
        self.handle_touch(TouchEvent::Release(point), now)
    }

    /// Abandon an in-progress gesture, keeping whatever it already selected.
    pub fn cancel_interaction(&mut self, now: Instant) {
        if self.gestures.cancel() {
            self.sync_timer(now);
        }
    }

    /// Run a due auto-advance tick. Returns `true` if the selection changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }

        let current = self.selection();
        let next = self.end_behavior.next(current, self.total());
        log::debug!("Auto-advance tick {current} -> {next}");
        self.selection.set_selection(next)
    }

    /// When the host loop should call `poll()` next
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.next_deadline()
    }

    /// Time left until the next tick, zero when overdue
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Describe the current appearance
    pub fn frame(&self) -> Frame<'_, I> {
        let total = self.total();
        if total == 0 {
            return Frame {
                bounds: self.bounds,
                background: None,
                tints: self.style.tints,
                dots: Vec::new(),
            };
        }

        let layout = DotLayout::new(self.bounds, total);
        let current = self.selection();
        let dots = (0..total)
            .map(|page| {
                let selected = page == current;
                DotFrame {
                    page,
                    bounds: layout.dot_bounds(page),
                    selected,
                    glyph: self.icons.glyph(page, selected),
                }
            })
            .collect();

        Frame {
            bounds: self.bounds,
            background: self
                .style
                .background
                .shows_background(self.is_interacting())
                .then(|| layout.background_bounds()),
            tints: self.style.tints,
            dots,
        }
    }

    pub fn render<R>(&self, backend: &mut R) -> Result<R::Output, R::Error>
    where
        R: RenderBackend<I>,
    {
        backend.render(&self.frame())
    }

    fn sync_timer(&mut self, now: Instant) {
        let should_run = self.visible
            && !self.torn_down
            && !self.gestures.is_active()
            && self.total() > 0;

        match (should_run, self.timer.state()) {
            (true, TimerState::Stopped) => self.timer.start(now),
            (true, TimerState::Paused) => self.timer.resume(now),
            (false, TimerState::Running) => self.timer.pause(),
            _ => {}
        }
    }
}

impl<B, I> View for PageIndicator<B, I> {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn translate_impl(&mut self, by: Point) {
        self.bounds.top_left += by;
    }
}

impl<B, I> Drawable for PageIndicator<B, I>
where
    B: SelectionBinding,
    I: Icon,
{
    type Color = BinaryColor;
    type Output = ();

    fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        self.render(&mut DrawTargetBackend::new(display))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PAGE_WIDTH;
    use crate::selection::SharedSelection;

    const TICK: Duration = Duration::from_secs(1);

    fn indicator(total: usize) -> (SharedSelection, PageIndicator<SharedSelection>) {
        let host = SharedSelection::new(0);
        let indicator = PageIndicator::new(host.clone(), total);
        (host, indicator)
    }

    fn dot_center<B: SelectionBinding, I>(indicator: &PageIndicator<B, I>, page: usize) -> Point {
        DotLayout::new(indicator.bounds, indicator.total())
            .dot_bounds(page)
            .center()
    }

    #[test]
    fn tap_selects_dot() {
        let (host, mut indicator) = indicator(5);
        let t = Instant::now();
        indicator.on_shown(t);

        for page in [3, 0, 4, 1] {
            let center = dot_center(&indicator, page);
            indicator.tap(center, t);
            assert_eq!(host.get(), page);
        }
    }

    #[test]
    fn tap_before_shown_selects_dot() {
        let (host, mut indicator) = indicator(5);
        let t = Instant::now();

        let center = dot_center(&indicator, 3);
        assert!(indicator.tap(center, t));
        assert_eq!(host.get(), 3);
        assert!(!indicator.is_interacting());
    }

    #[test]
    fn tap_while_hidden_leaves_auto_advance_paused() {
        let (host, indicator) = indicator(5);
        let mut indicator = indicator.with_auto_advance(Some(TICK));
        let t = Instant::now();
        indicator.on_shown(t);
        indicator.on_hidden();

        indicator.tap(dot_center(&indicator, 2), t);
        assert_eq!(host.get(), 2);
        assert_eq!(indicator.timer_state(), TimerState::Paused);
        assert!(!indicator.poll(t + TICK * 3));
    }

    #[test]
    fn drag_tracks_and_commits() {
        let (host, mut indicator) = indicator(5);
        let t = Instant::now();
        indicator.on_shown(t);
        host.set(1);

        let start = dot_center(&indicator, 1);
        indicator.handle_touch(TouchEvent::Press(start), t);
        indicator.handle_touch(TouchEvent::Move(start + Point::new(PAGE_WIDTH, 0)), t);
        assert_eq!(host.get(), 2);
        indicator.handle_touch(TouchEvent::Move(start + Point::new(2 * PAGE_WIDTH, 0)), t);
        assert_eq!(host.get(), 3);
        indicator.handle_touch(TouchEvent::Release(start + Point::new(2 * PAGE_WIDTH, 0)), t);

        assert_eq!(host.get(), 3);
        assert!(!indicator.is_interacting());
    }

    #[test]
    fn drag_under_half_a_page_keeps_selection() {
        let (host, mut indicator) = indicator(5);
        let t = Instant::now();
        indicator.on_shown(t);
        host.set(2);

        let start = dot_center(&indicator, 2);
        let end = start + Point::new(PAGE_WIDTH / 2 - 1, 0);
        indicator.handle_touch(TouchEvent::Press(start), t);
        indicator.handle_touch(TouchEvent::Move(end), t);
        indicator.handle_touch(TouchEvent::Release(end), t);

        assert_eq!(host.get(), 2);
    }

    #[test]
    fn interaction_pauses_and_resumes_auto_advance() {
        let (host, indicator) = indicator(5);
        let mut indicator = indicator.with_auto_advance(Some(TICK));
        let t = Instant::now();
        indicator.on_shown(t);
        assert_eq!(indicator.timer_state(), TimerState::Running);

        let center = dot_center(&indicator, 0);
        indicator.handle_touch(TouchEvent::Press(center), t);
        assert_eq!(indicator.timer_state(), TimerState::Paused);
        assert!(!indicator.poll(t + TICK * 3));

        let released = t + TICK * 3;
        indicator.handle_touch(TouchEvent::Release(center), released);
        assert_eq!(indicator.timer_state(), TimerState::Running);
        assert!(!indicator.poll(released + TICK / 2));
        assert!(indicator.poll(released + TICK));
        assert_eq!(host.get(), 1);
    }

    #[test]
    fn interaction_end_while_hidden_stays_paused() {
        let (_host, indicator) = indicator(5);
        let mut indicator = indicator.with_auto_advance(Some(TICK));
        let t = Instant::now();
        indicator.on_shown(t);

        let center = dot_center(&indicator, 0);
        indicator.handle_touch(TouchEvent::Press(center), t);
        indicator.on_hidden();
        indicator.cancel_interaction(t);

        assert_eq!(indicator.timer_state(), TimerState::Paused);
        assert!(indicator.next_deadline().is_none());
    }

    #[test]
    fn hidden_indicator_does_not_tick() {
        let (host, indicator) = indicator(5);
        let mut indicator = indicator.with_auto_advance(Some(TICK));
        let t = Instant::now();
        indicator.on_shown(t);
        indicator.on_hidden();

        assert!(!indicator.poll(t + TICK * 2));
        assert_eq!(host.get(), 0);

        let shown_again = t + TICK * 10;
        indicator.on_shown(shown_again);
        assert!(indicator.poll(shown_again + TICK));
        assert_eq!(host.get(), 1);
    }

    #[test]
    fn teardown_stops_everything() {
        let (host, indicator) = indicator(5);
        let mut indicator = indicator.with_auto_advance(Some(TICK));
        let t = Instant::now();
        indicator.on_shown(t);
        indicator.on_hidden();
        indicator.teardown();
        assert!(indicator.is_torn_down());

        indicator.on_shown(t);
        assert!(!indicator.poll(t + TICK * 5));
        let center = dot_center(&indicator, 3);
        assert!(!indicator.tap(center, t));
        assert_eq!(host.get(), 0);
        assert_eq!(indicator.timer_state(), TimerState::Stopped);
    }

    #[test]
    fn zero_pages_render_nothing_and_ignore_input() {
        let (host, indicator) = indicator(0);
        let mut indicator = indicator.with_auto_advance(Some(TICK));
        let t = Instant::now();
        indicator.on_shown(t);

        assert_eq!(indicator.timer_state(), TimerState::Stopped);
        assert!(!indicator.tap(Point::new(1, 1), t));
        assert!(indicator.frame().is_empty());
        assert_eq!(host.get(), 0);
    }

    #[test]
    fn frame_marks_selected_page() {
        let (host, indicator) = indicator(4);
        host.set(2);

        let frame = indicator.frame();
        assert_eq!(frame.dots.len(), 4);
        assert_eq!(frame.selected_page(), Some(2));
    }

    #[test]
    fn frame_clamps_stale_host_value() {
        let (host, indicator) = indicator(4);
        host.set(99);
        assert_eq!(indicator.frame().selected_page(), Some(3));
    }

    #[test]
    fn automatic_background_only_while_touching() {
        let (_host, mut indicator) = indicator(3);
        let t = Instant::now();
        indicator.on_shown(t);
        assert!(indicator.frame().background.is_none());

        let center = dot_center(&indicator, 1);
        indicator.handle_touch(TouchEvent::Press(center), t);
        assert!(indicator.frame().background.is_some());
        indicator.handle_touch(TouchEvent::Release(center), t);
        assert!(indicator.frame().background.is_none());
    }

    #[test]
    fn translate_moves_hit_area() {
        let (host, indicator) = indicator(3);
        let mut indicator = indicator.translate(Point::new(100, 50));
        let t = Instant::now();
        indicator.on_shown(t);

        assert_eq!(indicator.bounds().top_left, Point::new(100, 50));
        let center = dot_center(&indicator, 2);
        indicator.tap(center, t);
        assert_eq!(host.get(), 2);
    }
}
