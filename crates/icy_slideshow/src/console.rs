//! Line based input standing in for keyboard, pointer and buttons.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use icy_gallery::{CloseReason, Hotkey, Point, Viewer, ViewerCommand};

pub const HELP: &str = "\
commands:
  n, next / p, prev        next or previous image
  home, end                first or last image
  goto <n>                 jump to image n (1-based)
  play                     toggle the slideshow
  speed <ms>               time per slide
  faster, slower           change the slideshow speed
  info                     toggle the metadata overlay
  full                     toggle fullscreen
  key <hotkey>             press a key, e.g. 'key Shift+Right'
  swipe <dx> <dy>          swipe over the image
  tap                      tap the image
  leave                    pointer leaves the viewer
  close, backdrop          close via the close button or the backdrop
  q, quit                  end the session and exit";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCommand {
    Run(ViewerCommand),
    GoTo(usize),
    Speed(u64),
    Key(Hotkey),
    Swipe { dx: f32, dy: f32 },
    Tap,
    Leave,
    Close(CloseReason),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> anyhow::Result<ConsoleCommand> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        anyhow::bail!("empty command");
    };
    let rest: Vec<&str> = parts.collect();

    let cmd = match word.to_lowercase().as_str() {
        "n" | "next" => ConsoleCommand::Run(ViewerCommand::Next),
        "p" | "prev" | "previous" => ConsoleCommand::Run(ViewerCommand::Previous),
        "home" | "first" => ConsoleCommand::Run(ViewerCommand::First),
        "end" | "last" => ConsoleCommand::Run(ViewerCommand::Last),
        "play" | "pause" => ConsoleCommand::Run(ViewerCommand::TogglePlay),
        "faster" => ConsoleCommand::Run(ViewerCommand::SpeedUp),
        "slower" => ConsoleCommand::Run(ViewerCommand::SlowDown),
        "info" => ConsoleCommand::Run(ViewerCommand::ToggleMetadata),
        "full" | "fullscreen" => ConsoleCommand::Run(ViewerCommand::ToggleFullscreen),
        "goto" => {
            let n: usize = arg(&rest, 0)?.parse()?;
            if n == 0 {
                anyhow::bail!("images are counted from 1");
            }
            ConsoleCommand::GoTo(n - 1)
        }
        "speed" => ConsoleCommand::Speed(arg(&rest, 0)?.parse()?),
        "key" => {
            let binding = rest.join(" ");
            let Some(hotkey) = Hotkey::parse(&binding) else {
                anyhow::bail!("unknown key '{binding}'");
            };
            ConsoleCommand::Key(hotkey)
        }
        "swipe" => ConsoleCommand::Swipe {
            dx: arg(&rest, 0)?.parse()?,
            dy: rest.get(1).map(|s| s.parse()).transpose()?.unwrap_or(0.0),
        },
        "tap" => ConsoleCommand::Tap,
        "leave" => ConsoleCommand::Leave,
        "close" => ConsoleCommand::Close(CloseReason::CloseButton),
        "backdrop" => ConsoleCommand::Close(CloseReason::Backdrop),
        "h" | "help" | "?" => ConsoleCommand::Help,
        "q" | "quit" | "exit" => ConsoleCommand::Quit,
        other => anyhow::bail!("unknown command '{other}', try 'help'"),
    };
    Ok(cmd)
}

fn arg<'a>(args: &[&'a str], index: usize) -> anyhow::Result<&'a str> {
    args.get(index).copied().ok_or_else(|| anyhow::anyhow!("missing argument"))
}

/// Feed a command to the viewer. Quitting ends the session with
/// [`CloseReason::Shutdown`].
pub fn apply(viewer: &mut Viewer, command: ConsoleCommand) {
    match command {
        ConsoleCommand::Run(cmd) => {
            viewer.notify_activity();
            viewer.execute(cmd);
        }
        ConsoleCommand::GoTo(index) => viewer.select_thumbnail(index),
        ConsoleCommand::Speed(ms) => {
            viewer.notify_activity();
            let speed = viewer.set_speed(ms);
            println!("speed: {speed}ms");
        }
        ConsoleCommand::Key(hotkey) => {
            if !viewer.handle_key(hotkey.key, hotkey.modifiers) {
                println!("'{hotkey}' is not bound");
            }
        }
        ConsoleCommand::Swipe { dx, dy } => {
            let start = Point::new(500.0, 500.0);
            viewer.pointer_down(start);
            for step in 1..=4 {
                let f = step as f32 / 4.0;
                viewer.pointer_move(Point::new(start.x + dx * f, start.y + dy * f));
            }
            let outcome = viewer.pointer_up(Point::new(start.x + dx, start.y + dy));
            log::debug!("swipe {dx}/{dy} -> {outcome:?}");
        }
        ConsoleCommand::Tap => {
            viewer.pointer_down(Point::new(500.0, 500.0));
            viewer.pointer_up(Point::new(500.0, 500.0));
        }
        ConsoleCommand::Leave => viewer.pointer_left(),
        ConsoleCommand::Close(reason) => viewer.close(reason),
        ConsoleCommand::Help => println!("{HELP}"),
        ConsoleCommand::Quit => viewer.close(CloseReason::Shutdown),
    }
}

/// Read stdin lines on a background thread
pub fn spawn_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    let reader = thread::Builder::new().name("stdin".into()).spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    if let Err(err) = reader {
        log::error!("Failed to spawn stdin reader: {err}");
    }
    rx
}
