mod commands;
mod events;
mod framebuffer;
mod screen;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use embedded_graphics::prelude::Point;
use events::AppEvent;
use framebuffer::Framebuffer;
use page_dots::layout::PAGE_WIDTH;
use page_dots::{
    BackgroundStyle, EndBehavior, GlyphIcon, Icon, IndicatorConfig, PageIndicator,
    SharedSelection, TouchEvent, fonts,
};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long the loop sleeps when no auto-advance tick is scheduled
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);
/// Largest page count that still fits a terminal
const MAX_PAGES: u64 = 64;

/// Drive a page indicator from typed touch commands and print each frame
#[derive(Parser, Debug)]
#[command(name = "dots-sim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of pages
    #[arg(
        long,
        short,
        default_value_t = 5,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(0..=MAX_PAGES)
    )]
    pages: usize,

    /// Indicator configuration file (JSON)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Seconds between automatic page advances, overrides the config file
    #[arg(long, short)]
    auto_advance: Option<f64>,

    /// Stay on the last page instead of wrapping to the first
    #[arg(long)]
    stop_at_end: bool,

    /// Background style, overrides the config file
    #[arg(long, value_enum)]
    background: Option<BackgroundArg>,

    /// Draw key and warning glyphs for the first and last pages
    #[arg(long)]
    icons: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackgroundArg {
    /// Only while the indicator is being touched
    Automatic,
    /// Always
    Prominent,
    /// Never
    Minimal,
}

impl From<BackgroundArg> for BackgroundStyle {
    fn from(arg: BackgroundArg) -> Self {
        match arg {
            BackgroundArg::Automatic => BackgroundStyle::Automatic,
            BackgroundArg::Prominent => BackgroundStyle::Prominent,
            BackgroundArg::Minimal => BackgroundStyle::Minimal,
        }
    }
}

impl Cli {
    fn indicator_config(&self) -> Result<IndicatorConfig> {
        let mut config = match &self.config {
            Some(path) => IndicatorConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => IndicatorConfig::default(),
        };

        if let Some(secs) = self.auto_advance {
            config.auto_advance_secs = Some(secs);
        }
        if self.stop_at_end {
            config.end_behavior = EndBehavior::Stop;
        }
        if let Some(background) = self.background {
            config.background = background.into();
        }
        Ok(config)
    }
}

/// Key on the first page, warning triangle on the last one while selected
fn page_icon(page: usize, selected: bool, total: usize) -> Option<GlyphIcon> {
    if page == 0 {
        Some(GlyphIcon::new::<fonts::ICON_KEY>(if selected { '0' } else { '1' }))
    } else if page + 1 == total && selected {
        Some(GlyphIcon::new::<fonts::ICON_WARNING>('0'))
    } else {
        None
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.indicator_config()?;
    log::info!("Starting with {} pages, {config:?}", cli.pages);

    let (app_tx, app_rx) = crossbeam_channel::unbounded();

    // Set up signal handler - send shutdown event directly to UI loop
    let tx_for_signal = app_tx.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received Ctrl+C, shutting down...");
        let _ = tx_for_signal.send(AppEvent::Shutdown);
    }) {
        log::error!("Failed to set Ctrl-C handler: {e}");
    }

    let tx_for_input = app_tx;
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match commands::parse(&line) {
                Some(Ok(event)) => {
                    if tx_for_input.send(event).is_err() {
                        return;
                    }
                }
                Some(Err(e)) => eprintln!("{e}"),
                None => {}
            }
        }
        let _ = tx_for_input.send(AppEvent::Shutdown);
    });

    let selection = SharedSelection::new(0);
    let total = cli.pages;
    if cli.icons {
        let indicator = PageIndicator::with_icons(selection.clone(), total, |page, selected| {
            page_icon(page, selected, total)
        });
        run_ui_loop(indicator.with_config(&config), &selection, &app_rx)
    } else {
        let indicator = PageIndicator::new(selection.clone(), total);
        run_ui_loop(indicator.with_config(&config), &selection, &app_rx)
    }
}

fn present<I: Icon>(
    display: &mut Framebuffer,
    indicator: &PageIndicator<SharedSelection, I>,
) -> Result<()> {
    if !indicator.is_visible() {
        println!("(hidden)");
        return Ok(());
    }
    screen::draw(display, indicator)?;
    println!("{}", display.to_ascii());
    Ok(())
}

/// Press on a page's dot, slide one page width at a time, release
fn drag<I>(
    indicator: &mut PageIndicator<SharedSelection, I>,
    from: usize,
    pages: i32,
    now: Instant,
) -> bool {
    let Some(start) = screen::dot_center(indicator, from) else {
        log::warn!("No page {from} to drag from");
        return false;
    };

    let step = Point::new(PAGE_WIDTH * pages.signum(), 0);
    let mut point = start;
    indicator.handle_touch(TouchEvent::Press(point), now);
    for _ in 0..pages.unsigned_abs() {
        point += step;
        indicator.handle_touch(TouchEvent::Move(point), now);
    }
    indicator.handle_touch(TouchEvent::Release(point), now)
}

/// Apply one event, then run any auto-advance tick that fell due meanwhile.
///
/// Returns whether the screen needs redrawing, or `None` on shutdown.
fn handle_event<I>(
    indicator: &mut PageIndicator<SharedSelection, I>,
    selection: &SharedSelection,
    event: AppEvent,
    now: Instant,
) -> Option<bool> {
    let dirty = match event {
        AppEvent::Touch(touch) => {
            indicator.handle_touch(touch, now);
            true
        }
        AppEvent::TapPage(page) => match screen::dot_center(indicator, page) {
            Some(center) => indicator.tap(center, now),
            None => {
                log::warn!("No page {page} to tap");
                false
            }
        },
        AppEvent::DragPages { from, pages } => drag(indicator, from, pages, now),
        AppEvent::Goto(page) => {
            selection.set(page);
            true
        }
        AppEvent::Show => {
            indicator.on_shown(now);
            true
        }
        AppEvent::Hide => {
            indicator.on_hidden();
            true
        }
        AppEvent::Redraw => true,
        AppEvent::Help => {
            println!("{}", commands::HELP);
            false
        }
        AppEvent::Shutdown => return None,
    };

    // a steady stream of events must not hold back overdue ticks
    let ticked = indicator.poll(now);
    Some(dirty || ticked)
}

fn run_ui_loop<I: Icon>(
    indicator: PageIndicator<SharedSelection, I>,
    selection: &SharedSelection,
    rx: &crossbeam_channel::Receiver<AppEvent>,
) -> Result<()> {
    let size = screen::display_size(indicator.total());
    let mut display = Framebuffer::new(size.width, size.height);
    let mut indicator = screen::place(indicator, &display);

    indicator.on_shown(Instant::now());
    present(&mut display, &indicator)?;
    println!("{}", commands::HELP);
    let mut last_seen = indicator.selection();

    loop {
        let timeout = indicator
            .time_until_tick(Instant::now())
            .unwrap_or(IDLE_TIMEOUT);

        let event = match rx.recv_timeout(timeout) {
            Ok(event) => event,
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                if indicator.poll(Instant::now()) {
                    last_seen = indicator.selection();
                    log::info!("Auto-advanced to page {last_seen}");
                    present(&mut display, &indicator)?;
                }
                continue;
            }
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                log::info!("Event channel disconnected, exiting event loop");
                break;
            }
        };

        let Some(mut dirty) = handle_event(&mut indicator, selection, event, Instant::now()) else {
            log::info!("Shutting down UI...");
            break;
        };

        let current = indicator.selection();
        if current != last_seen {
            log::info!("Selection changed {last_seen} -> {current}");
            last_seen = current;
            dirty = true;
        }
        if dirty {
            present(&mut display, &indicator)?;
        }
    }

    indicator.teardown();
    log::info!("Shutdown complete on page {}", selection.get());
    Ok(())
}
