//! Tap and horizontal drag recognition
//!
//! The tracker turns raw touch samples into page intents. It knows nothing
//! about the selection itself; the indicator applies the intents.

use crate::layout::PAGE_WIDTH;
use embedded_graphics::{
    prelude::Point,
    primitives::{ContainsPoint, Rectangle},
};

/// Horizontal movement below this many pixels still counts as a tap
pub const TAP_SLOP: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchEvent {
    Press(Point),
    Move(Point),
    Release(Point),
}

/// What a touch sample asks the indicator to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// A new interaction started
    Begin,
    /// Mid-drag: select `start_page + offset`
    Seek { start_page: usize, offset: isize },
    /// Drag released: commit `start_page + offset` and end the interaction
    Commit { start_page: usize, offset: isize },
    /// Tap released at `point`; ends the interaction
    Tap(Point),
    /// Sample not part of an interaction
    Ignore,
}

/// Whole pages covered by `dx` pixels, rounded half away from zero.
#[must_use]
pub fn page_offset(dx: i32) -> isize {
    let half = PAGE_WIDTH / 2;
    let pages = if dx >= 0 {
        dx.saturating_add(half) / PAGE_WIDTH
    } else {
        dx.saturating_sub(half) / PAGE_WIDTH
    };
    isize::try_from(pages).unwrap_or_default()
}

#[derive(Clone, Copy, Debug)]
struct Session {
    origin: Point,
    start_page: usize,
    dragging: bool,
    offset: isize,
}

#[derive(Debug, Default)]
pub struct GestureTracker {
    session: Option<Session>,
}

impl GestureTracker {
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some_and(|session| session.dragging)
    }

    /// Feed one touch sample. `bounds` is the indicator's area and
    /// `current_page` the selection at the time of the sample.
    pub fn handle(&mut self, event: TouchEvent, bounds: Rectangle, current_page: usize) -> Intent {
        match event {
            TouchEvent::Press(point) => {
                if !bounds.contains(point) {
                    return Intent::Ignore;
                }
                if self.session.is_some() {
                    // a second press without release restarts the gesture
                    log::debug!("Press during active gesture, restarting at {point:?}");
                }
                self.session = Some(Session {
                    origin: point,
                    start_page: current_page,
                    dragging: false,
                    offset: 0,
                });
                Intent::Begin
            }
            TouchEvent::Move(point) => {
                let Some(session) = self.session.as_mut() else {
                    return Intent::Ignore;
                };

                let dx = point.x.saturating_sub(session.origin.x);
                if !session.dragging && dx.abs() < TAP_SLOP {
                    return Intent::Ignore;
                }
                session.dragging = true;
                session.offset = page_offset(dx);
                log::trace!("Drag dx={dx} offset={}", session.offset);

                Intent::Seek {
                    start_page: session.start_page,
                    offset: session.offset,
                }
            }
            TouchEvent::Release(point) => match self.session.take() {
                None => Intent::Ignore,
                Some(session) if session.dragging => Intent::Commit {
                    start_page: session.start_page,
                    offset: session.offset,
                },
                Some(_) => Intent::Tap(point),
            },
        }
    }

    /// Drop any in-progress gesture. Returns `true` if one was active.
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }
}
