//! Process-backed console over stdin/stdout file descriptors.

use std::io;
#[cfg(unix)]
use std::sync::{Arc, Mutex};
#[cfg(unix)]
use std::thread::{self, JoinHandle};

#[cfg(unix)]
use crate::config::EnvConfig;
use crate::core::console::Console;
#[cfg(unix)]
use crate::logging::WriteLog;

#[cfg(unix)]
use libc::c_int;
#[cfg(unix)]
use signal_hook::iterator::Signals;

#[cfg(unix)]
fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

#[cfg(unix)]
fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(unix)]
fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

#[cfg(unix)]
fn wait_writable(fd: c_int) -> io::Result<()> {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    };
    loop {
        let result = unsafe { libc::poll(&mut fds, 1, -1) };
        if result < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result == 0 {
            // Infinite timeout should not return 0, but avoid a tight loop if it does.
            continue;
        }
        if (fds.revents & libc::POLLOUT) != 0 {
            return Ok(());
        }

        return Err(io::Error::other(format!(
            "poll(POLLOUT) returned revents=0x{:x}",
            fds.revents
        )));
    }
}

#[cfg(unix)]
fn write_all_fd_with<FWrite, FWait>(
    fd: c_int,
    bytes: &[u8],
    mut write_once: FWrite,
    mut wait_writable: FWait,
) -> io::Result<()>
where
    FWrite: FnMut(c_int, &[u8]) -> io::Result<usize>,
    FWait: FnMut(c_int) -> io::Result<()>,
{
    let mut written = 0;
    while written < bytes.len() {
        match write_once(fd, &bytes[written..]) {
            Ok(0) => {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "write returned 0"));
            }
            Ok(count) => {
                let remaining = bytes.len() - written;
                if count > remaining {
                    return Err(io::Error::other("write returned more bytes than requested"));
                }
                written += count;
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => {
                wait_writable(fd)?;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

#[cfg(unix)]
fn write_fd(fd: c_int, data: &str) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    write_all_fd_with(
        fd,
        data.as_bytes(),
        |fd, buf| {
            let result = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };
            if result < 0 {
                Err(io::Error::last_os_error())
            } else {
                Ok(result as usize)
            }
        },
        wait_writable,
    )
}

/// Saved terminal mode, shared with out-of-band cleanup hooks so a signal or
/// panic can never leave the terminal raw.
#[cfg(unix)]
pub struct ModeSnapshot {
    fd: c_int,
    saved: Mutex<Option<libc::termios>>,
}

#[cfg(unix)]
impl ModeSnapshot {
    fn new(fd: c_int) -> Self {
        Self {
            fd,
            saved: Mutex::new(None),
        }
    }

    fn store(&self, termios: libc::termios) {
        match self.saved.lock() {
            Ok(mut saved) => *saved = Some(termios),
            Err(poisoned) => *poisoned.into_inner() = Some(termios),
        }
    }

    fn get(&self) -> Option<libc::termios> {
        match self.saved.lock() {
            Ok(saved) => *saved,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Restore the saved mode, ignoring failures. Safe to call from signal
    /// and panic cleanup paths.
    pub fn restore_best_effort(&self) {
        if let Some(termios) = self.get() {
            let _ = set_termios(self.fd, &termios);
        }
    }
}

#[cfg(unix)]
pub struct ProcessConsole {
    stdin_fd: c_int,
    stdout_fd: c_int,
    snapshot: Arc<ModeSnapshot>,
    columns_override: Option<u16>,
    write_log: Option<WriteLog>,
}

#[cfg(unix)]
impl ProcessConsole {
    pub fn new() -> Self {
        Self::with_config(&EnvConfig::from_env())
    }

    pub fn with_config(config: &EnvConfig) -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            snapshot: Arc::new(ModeSnapshot::new(libc::STDIN_FILENO)),
            columns_override: config.columns_override,
            write_log: config.write_log.as_deref().map(WriteLog::new),
        }
    }

    /// Handle for signal/panic cleanup hooks.
    pub fn mode_snapshot(&self) -> Arc<ModeSnapshot> {
        Arc::clone(&self.snapshot)
    }

    #[cfg(test)]
    fn for_fds(stdin_fd: c_int, stdout_fd: c_int) -> Self {
        Self {
            stdin_fd,
            stdout_fd,
            snapshot: Arc::new(ModeSnapshot::new(stdin_fd)),
            columns_override: None,
            write_log: None,
        }
    }
}

#[cfg(unix)]
impl Default for ProcessConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl Console for ProcessConsole {
    fn read_unit(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        loop {
            let result = unsafe { libc::read(self.stdin_fd, (&mut byte as *mut u8).cast(), 1) };
            if result < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(err);
            }
            if result == 0 {
                return Ok(None);
            }
            return Ok(Some(byte));
        }
    }

    fn write(&mut self, data: &str) {
        // Terminal I/O is assumed reliable within a session; a wedged stdout
        // leaves nothing sensible to do but stop.
        if let Err(err) = write_fd(self.stdout_fd, data) {
            panic!("failed to write to terminal: {err}");
        }
        if let Some(log) = self.write_log.as_mut() {
            log.record(data);
        }
    }

    fn columns(&self) -> u16 {
        if let Some(columns) = self.columns_override {
            return columns;
        }
        read_winsize(self.stdout_fd)
            .map(|(cols, _)| cols)
            .unwrap_or(80)
    }

    fn save_mode(&mut self) -> io::Result<()> {
        let termios = get_termios(self.stdin_fd)?;
        self.snapshot.store(termios);
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> io::Result<()> {
        let mut raw = get_termios(self.stdin_fd)?;
        // Per-character input without local echo. ICRNL stays set so Enter
        // arrives as 0x0A, and ISIG stays set so the signal cleanup hooks
        // remain reachable from the keyboard.
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;
        set_termios(self.stdin_fd, &raw)
    }

    fn restore_mode(&mut self) -> io::Result<()> {
        if let Some(termios) = self.snapshot.get() {
            set_termios(self.stdin_fd, &termios)?;
        }
        Ok(())
    }
}

/// Signal handler guard; the watcher thread runs the cleanup once on
/// SIGINT/SIGTERM and then terminates the process.
#[cfg(unix)]
pub struct SignalHookGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<JoinHandle<()>>,
}

#[cfg(unix)]
impl Drop for SignalHookGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Install SIGINT/SIGTERM cleanup. The terminal mode must be restored before
/// the process dies on an external interruption.
#[cfg(unix)]
pub fn install_signal_cleanup<F>(cleanup: F) -> SignalHookGuard
where
    F: Fn() + Send + Sync + 'static,
{
    let mut signals =
        Signals::new([libc::SIGINT, libc::SIGTERM]).expect("failed to register signal handlers");
    let handle = signals.handle();

    let thread = thread::spawn(move || {
        if signals.forever().next().is_some() {
            cleanup();
            std::process::exit(1);
        }
    });

    SignalHookGuard {
        handle,
        thread: Some(thread),
    }
}

/// Install a panic hook that runs `cleanup` once, then delegates to the
/// previous hook. Returns nothing; the hook stays for the process lifetime.
pub fn install_panic_cleanup<F>(cleanup: F)
where
    F: Fn() + Send + Sync + 'static,
{
    use std::sync::atomic::{AtomicBool, Ordering};

    let ran = AtomicBool::new(false);
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if !ran.swap(true, Ordering::SeqCst) {
            cleanup();
        }
        previous(info);
    }));
}

#[cfg(not(unix))]
pub struct ProcessConsole;

#[cfg(not(unix))]
impl ProcessConsole {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(unix))]
impl Console for ProcessConsole {
    fn read_unit(&mut self) -> io::Result<Option<u8>> {
        panic!("ProcessConsole is only supported on Unix platforms");
    }

    fn write(&mut self, _data: &str) {
        panic!("ProcessConsole is only supported on Unix platforms");
    }

    fn columns(&self) -> u16 {
        80
    }

    fn save_mode(&mut self) -> io::Result<()> {
        panic!("ProcessConsole is only supported on Unix platforms");
    }

    fn enter_raw_mode(&mut self) -> io::Result<()> {
        panic!("ProcessConsole is only supported on Unix platforms");
    }

    fn restore_mode(&mut self) -> io::Result<()> {
        panic!("ProcessConsole is only supported on Unix platforms");
    }
}
