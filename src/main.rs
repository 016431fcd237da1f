use anyhow::Result;
use crossbeam_channel::{Receiver, TryRecvError};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use smooth_marquee::input::{PointerEvent, PointerKind};
use smooth_marquee::terminal::command::{self, Command, CommandError, HELP};
use smooth_marquee::terminal::render::render_line;
use smooth_marquee::terminal::surface::Surface;
use smooth_marquee::{Content, Marquee, MarqueeOptions, TextDocument, TextHost};

const REGION: &str = "#ticker";
const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60);
const SPEED_STEP: f32 = 1.25;
const DRAG_STEPS: u32 = 8;

type Ticker = Marquee<TextHost, String>;

fn columns() -> f32 {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse::<u16>().ok())
        .filter(|c| *c > 0)
        .unwrap_or(80) as f32
}

fn content(items: Vec<String>) -> Content<String, String> {
    Content::new(items, |item: &String, _| Ok(item.clone())).with_separator("·".to_string())
}

/// Watch the options file; a unit arrives on the channel when it changes.
fn watch_config(path: PathBuf) -> (Option<Receiver<()>>, Option<RecommendedWatcher>) {
    let (tx, rx) = crossbeam_channel::bounded::<()>(1);
    let watch_path = path.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            if (event.kind.is_modify() || event.kind.is_create())
                && event.paths.iter().any(|p| p == &watch_path)
            {
                let _ = tx.try_send(());
            }
        }
    })
    .ok();
    if let (Some(w), Some(dir)) = (watcher.as_mut(), path.parent()) {
        if let Err(e) = w.watch(dir, RecursiveMode::NonRecursive) {
            log::warn!("not watching {} for changes: {e}", dir.display());
            return (None, None);
        }
    }
    let rx = watcher.is_some().then_some(rx);
    (rx, watcher)
}

/// Replay a horizontal drag of `dx` columns as a short pointer gesture.
fn drag(ticker: &mut Ticker, dx: f32, now: Instant) {
    let step = Duration::from_millis(16);
    // ends at `now` so the glide picks up from the current frame
    let mut at = now.checked_sub(step * DRAG_STEPS).unwrap_or(now);
    if !ticker.on_pointer_down(PointerEvent::new(1, PointerKind::Mouse, 0.0, 0.0, at)) {
        log::info!("drag ignored: track is not draggable right now");
        return;
    }
    for i in 1..=DRAG_STEPS {
        at += step;
        let x = dx * i as f32 / DRAG_STEPS as f32;
        ticker.on_pointer_move(PointerEvent::new(1, PointerKind::Mouse, x, 0.0, at));
    }
    ticker.on_pointer_up(PointerEvent::new(1, PointerKind::Mouse, dx, 0.0, at));
}

fn apply(ticker: &mut Ticker, surface: &Arc<Mutex<Surface>>, cmd: Command, now: Instant) {
    match cmd {
        Command::Pause => ticker.pause(),
        Command::Play => ticker.play(),
        Command::Reverse => ticker.reverse(),
        Command::Speed(speed) => ticker.set_speed(speed),
        Command::Faster => ticker.set_speed(ticker.speed().max(1.0) * SPEED_STEP),
        Command::Slower => ticker.set_speed(ticker.speed() / SPEED_STEP),
        Command::Width(width) => {
            {
                let mut s = surface.lock();
                s.width = width.max(0.0);
                s.viewport_width = width.max(0.0);
            }
            ticker.on_resize(now);
        }
        Command::Scroll(y) => ticker.on_scroll(y),
        Command::Drag(dx) => drag(ticker, dx, now),
        Command::Hover(on) => ticker.on_hover(on),
        Command::Hide => ticker.on_intersection(false),
        Command::Show => ticker.on_intersection(true),
        Command::Items(items) => ticker.update_items(items),
        Command::Help => eprintln!("\r\n{HELP}"),
        Command::Quit => {}
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = MarqueeOptions::load_or_default();
    let mut items: Vec<String> = std::env::args().skip(1).collect();
    if items.is_empty() {
        items = vec!["smooth marquee".into(), "type `help` for commands".into()];
    }

    let mut document = TextDocument::new();
    let surface = document.add_region(REGION, columns());
    let mut ticker: Ticker = Marquee::attach(&mut document, REGION, options, content(items))?;
    ticker.on_event(|event| log::info!("{event:?}"));

    let commands = command::spawn_reader(io::BufReader::new(io::stdin()));
    let config_path = MarqueeOptions::config_path();
    let (config_rx, _config_watcher) = watch_config(config_path.clone());

    let mut out = io::stdout();
    'frames: loop {
        let now = Instant::now();

        loop {
            match commands.try_recv() {
                Ok(line) => match line.parse::<Command>() {
                    Ok(Command::Quit) => break 'frames,
                    Ok(cmd) => apply(&mut ticker, &surface, cmd, now),
                    Err(CommandError::Empty) => {}
                    Err(e) => log::warn!("{e}"),
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break 'frames,
            }
        }

        if config_rx.as_ref().is_some_and(|rx| rx.try_recv().is_ok()) {
            match MarqueeOptions::load(&config_path) {
                Ok(options) => {
                    if let Err(e) = ticker.apply_options(options) {
                        log::warn!("Rejected reloaded options: {e}");
                    }
                }
                Err(e) => log::warn!("Failed to reload options: {e:#}"),
            }
        }

        let (wakeup_due, frame_due) = {
            let mut s = surface.lock();
            (s.take_due_wakeup(now), s.take_frame())
        };
        if wakeup_due {
            ticker.poll(now);
        }
        if frame_due {
            ticker.frame(now);
        }

        let line = render_line(&surface.lock(), now);
        write!(out, "\r{line}")?;
        out.flush()?;

        std::thread::sleep(FRAME.saturating_sub(now.elapsed()));
    }

    ticker.destroy();
    writeln!(out)?;
    Ok(())
}
