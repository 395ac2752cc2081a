use page_dots::TouchEvent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Touch(TouchEvent), // Raw touch sample in display coordinates
    TapPage(usize),    // Tap the center of a page's dot
    DragPages {
        from: usize,
        pages: i32,
    }, // Press on a dot, slide by whole page widths, release
    Goto(usize),       // Host-side selection change, bypassing the indicator
    Show,              // View became visible
    Hide,              // View was hidden
    Redraw,
    Help,
    Shutdown, // Signal to exit the application
}
