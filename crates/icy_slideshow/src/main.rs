mod console;
mod scan;

use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use clap::Parser;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use icy_gallery::{CloseReason, MediaItem, OpenRequest, Options, SlideState, Viewer, ViewerFrame};
use semver::Version;

lazy_static::lazy_static! {
    pub static ref VERSION: Version = Version::parse(env!("CARGO_PKG_VERSION")).unwrap();
}

const FRAME_TIME: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(version, about = "Browse a folder of images and run slideshows from the terminal", long_about = None)]
pub struct Args {
    /// Image file or folder to open
    #[arg(value_name = "PATH", default_value = ".")]
    path: PathBuf,

    /// Image to start at (1-based)
    #[arg(long, value_name = "N")]
    start: Option<usize>,

    /// Start the slideshow right away
    #[arg(long, default_value_t = false)]
    autoplay: bool,

    /// Time per slide in milliseconds
    #[arg(long, value_name = "MS")]
    speed: Option<u64>,

    /// Show the metadata overlay
    #[arg(long, default_value_t = false)]
    info: bool,

    /// Include sub folders
    #[arg(short, long, default_value_t = false)]
    recursive: bool,

    /// Options file to use instead of the one in the config dir
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn get_log_dir() -> Option<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "GitHub", "icy_gallery")?;
    let dir = proj_dirs.config_dir().to_path_buf();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).ok()?;
    }
    Some(dir)
}

fn start_logger() -> Option<LoggerHandle> {
    let log_dir = get_log_dir()?;
    let logger = Logger::try_with_env_or_str("info")
        .ok()?
        .log_to_file(FileSpec::default().directory(&log_dir).basename("icy_slideshow").suffix("log").suppress_timestamp())
        .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
        .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
        .start();
    match logger {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn status_line(frame: &ViewerFrame, items: &[MediaItem], with_progress: bool) -> String {
    let name = items.get(frame.index).map(|item| item.display_name()).unwrap_or("");
    let state = match frame.current.as_ref().map(|slide| slide.state) {
        Some(SlideState::Ready { width, height }) => format!("{width}x{height}"),
        Some(SlideState::Placeholder) => "loading".to_string(),
        Some(SlideState::Broken) => "broken".to_string(),
        None => "-".to_string(),
    };
    let play = if frame.is_playing && with_progress {
        format!("▶ {:>3.0}% @{}ms", frame.progress, frame.speed_ms)
    } else if frame.is_playing {
        format!("▶ @{}ms", frame.speed_ms)
    } else {
        "⏸".to_string()
    };
    let strip = match (frame.thumbnails.first(), frame.thumbnails.last()) {
        (Some(first), Some(last)) => format!("strip {}-{}", first.index + 1, last.index + 1),
        _ => String::new(),
    };
    let mut line = format!("[{}] {} ({}) {} {}", frame.counter, name, state, play, strip);
    if !frame.controls_visible {
        line.push_str(" ·");
    }
    if frame.is_fullscreen {
        line.push_str(" [fullscreen]");
    }
    if let Some(meta) = &frame.metadata {
        let details: Vec<&str> = [meta.author.as_deref(), meta.dimensions.as_deref(), meta.size.as_deref(), meta.uploaded.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        line.push_str(&format!("\n    {}", details.join(" | ")));
    }
    line
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _logger = start_logger();
    log::info!("Starting icy_slideshow {}", *VERSION);

    let options = match &args.config {
        Some(path) => Options::load_from(path)?,
        None => Options::load_options(),
    };

    let (items, found_start) = scan::collect_items(&args.path, args.recursive)?;
    if items.is_empty() {
        anyhow::bail!("No images found in '{}'", args.path.display());
    }
    let start = args.start.map_or(found_start, |n| n.saturating_sub(1));

    let mut viewer = Viewer::with_file_loader(&options)?;
    let (closed_tx, closed_rx) = mpsc::channel();
    let mut request = OpenRequest::new(items)
        .at(start)
        .show_metadata(args.info)
        .on_close(move |reason| {
            let _ = closed_tx.send(reason);
        });
    if args.autoplay {
        request = request.autoplay(args.speed);
    }
    viewer.open(request);
    if let (false, Some(speed)) = (args.autoplay, args.speed) {
        viewer.set_speed(speed);
    }

    println!("{}", console::HELP);
    let input = console::spawn_reader();
    let mut last_status = String::new();

    loop {
        match input.recv_timeout(FRAME_TIME) {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => match console::parse_command(&line) {
                Ok(command) => console::apply(&mut viewer, command),
                Err(err) => println!("{err}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            // stdin closed
            Err(RecvTimeoutError::Disconnected) => viewer.close(CloseReason::Shutdown),
        }
        viewer.tick(Instant::now());

        for event in viewer.take_events() {
            log::info!("{event:?}");
        }
        if let Ok(reason) = closed_rx.try_recv() {
            println!("closed ({reason:?})");
            break;
        }

        let Some(frame) = viewer.frame() else {
            break;
        };
        // progress moves every tick, print only when anything else changed
        let key = status_line(&frame, viewer.items(), false);
        if key != last_status {
            println!("{}", status_line(&frame, viewer.items(), true));
            last_status = key;
        }
    }

    log::info!("Shutting down.");
    Ok(())
}
