//! Voice Selector main entry point
//!
//! The main loop monitors three sources:
//! 1. stdin (user keyboard input) - routed through the key handlers
//! 2. the host waker - speech engine callbacks posted as host events
//! 3. signals (SIGWINCH for resize) - redraws at the new size

use log::{debug, error, info};
use mio::{Events, Interest, Poll, Token, Waker};
use nix::libc;
use nix::sys::signal::{self, SigHandler, Signal};
use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use voice_selector::input::{create_default_keymap, dispatch_input, BrowseHandler};
use voice_selector::speech::{EventSink, HostEvent};
use voice_selector::state::config::Config;
use voice_selector::state::SelectorState;
use voice_selector::terminal::util::{ENTER_SCREEN, LEAVE_SCREEN};
use voice_selector::terminal::{get_terminal_size, is_tty, render_frame, restore_termios, set_raw_mode};
use voice_selector::{Result, SelectorError};

/// Token for stdin in mio poll
const STDIN: Token = Token(0);
/// Token for host callbacks in mio poll
const HOST: Token = Token(1);

/// Poll timeout, bounds how late a resize is noticed
const TICK: Duration = Duration::from_millis(100);

/// Global flag set by SIGWINCH handler
static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

/// SIGWINCH handler - sets flag when terminal is resized
extern "C" fn handle_sigwinch(_: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

/// Parsed command line
struct Args {
    debug: bool,
    list: bool,
    config: Option<PathBuf>,
}

fn parse_args() -> std::result::Result<Args, String> {
    let mut args = Args {
        debug: false,
        list: false,
        config: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" | "-d" => args.debug = true,
            "--list" | "-l" => args.list = true,
            "--config" | "-c" => {
                let path = iter.next().ok_or("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("Usage: {} [--debug] [--config PATH] [--list]", voice_selector::APP_NAME);
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(args)
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Usage: {} [--debug] [--config PATH] [--list]", voice_selector::APP_NAME);
            process::exit(2);
        }
    };

    // Initialize logger
    if args.debug {
        // Debug mode: write to voice-selector.log, the screen belongs to the UI
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("voice-selector.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open voice-selector.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "Voice Selector version {} starting (debug mode, logging to voice-selector.log)",
            voice_selector::VERSION
        );
    } else if args.list {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    } else {
        // The screen belongs to the UI; failures show on its status line
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    let result = if args.list {
        list_voices(&args)
    } else {
        run(&args)
    };

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Print the host's voice catalog as JSON
fn list_voices(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let mut host = voice_selector::speech::create_host(config.poll_interval())?;
    let voices = host.voices()?;
    println!("{}", serde_json::to_string_pretty(&voices)?);
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    debug!("Initializing Voice Selector");

    let stdin_fd = io::stdin().as_raw_fd();
    if !is_tty(stdin_fd) {
        eprintln!("Error: Voice Selector requires an interactive terminal (stdin is not a TTY)");
        eprintln!("Use --list to print the voice catalog without a terminal");
        process::exit(1);
    }

    let config = load_config(args)?;
    info!("Configuration loaded from {:?}", config.path());

    let mut poll = Poll::new()?;
    let waker = Arc::new(Waker::new(poll.registry(), HOST)?);
    let (sink, host_events) = host_channel(Arc::clone(&waker));

    // Loads the catalog and subscribes to its changes
    let mut state = SelectorState::new(config, sink)?;
    info!("State initialized with {} voices", state.voices().len());

    let keymap = create_default_keymap();
    info!("Key handler initialized with {} bindings", keymap.len());
    let mut browse = BrowseHandler::new(keymap);

    // Raw mode lets the selector see every key, including Ctrl+C
    let original_termios = set_raw_mode(stdin_fd)?;
    let _guard = TermiosGuard {
        fd: stdin_fd,
        termios: original_termios,
    };
    write_screen(ENTER_SCREEN)?;

    unsafe {
        signal::signal(Signal::SIGWINCH, SigHandler::Handler(handle_sigwinch)).map_err(|e| {
            SelectorError::Terminal(format!("Failed to set SIGWINCH handler: {}", e))
        })?;
    }

    let mut stdin_source = mio::unix::SourceFd(&stdin_fd);
    poll.registry()
        .register(&mut stdin_source, STDIN, Interest::READABLE)?;
    let mut events = Events::with_capacity(16);

    let (mut cols, mut rows) = get_terminal_size(stdin_fd)?;
    info!("Terminal size: {}x{}", cols, rows);
    info!("Voice Selector ready - entering event loop");

    let mut dirty = true;
    while !state.quit {
        if RESIZE_PENDING.swap(false, Ordering::Relaxed) {
            (cols, rows) = get_terminal_size(stdin_fd)?;
            info!("Terminal resized to {}x{}", cols, rows);
            dirty = true;
        }

        if dirty {
            write_screen(&render_frame(&state, cols, rows))?;
            dirty = false;
        }

        match poll.poll(&mut events, Some(TICK)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                debug!("poll interrupted by signal");
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        // HOST wakeups need no handling here; the channel is drained below
        for event in events.iter() {
            if event.token() == STDIN {
                handle_stdin(&mut state, &mut browse)?;
                dirty = true;
            }
        }

        // Apply host callbacks one at a time, in delivery order
        for event in host_events.try_iter() {
            state.handle_host_event(event);
            dirty = true;
        }
    }

    info!("Shutting down");
    if let Err(e) = state.shutdown() {
        error!("Failed to detach from speech host: {}", e);
    }
    Ok(())
}

/// Build the event sink that host callbacks post into
///
/// Events go over a channel and the waker interrupts `poll`, so callbacks on
/// host threads never touch the selector state directly.
fn host_channel(waker: Arc<Waker>) -> (EventSink, Receiver<HostEvent>) {
    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    let sink = EventSink::new(move |event| {
        let sent = tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .send(event)
            .is_ok();
        if sent {
            if let Err(e) = waker.wake() {
                error!("Failed to wake event loop: {}", e);
            }
        }
    });
    (sink, rx)
}

/// Handle user input from stdin
fn handle_stdin(state: &mut SelectorState, browse: &mut BrowseHandler) -> Result<()> {
    let mut buf = [0u8; 1024];

    let n = io::stdin().read(&mut buf)?;
    if n == 0 {
        info!("stdin closed");
        state.quit = true;
        return Ok(());
    }

    dispatch_input(&buf[..n], state, browse)
}

fn write_screen(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// RAII guard to restore terminal on exit
///
/// Ensures the terminal is returned to normal mode even on error paths
struct TermiosGuard {
    fd: RawFd,
    termios: libc::termios,
}

impl Drop for TermiosGuard {
    fn drop(&mut self) {
        let _ = write_screen(LEAVE_SCREEN);
        restore_termios(self.fd, &self.termios);
        debug!("Terminal attributes restored");
    }
}
