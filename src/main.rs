//! driftline binary: banner, cleanup hooks, session loop.

use std::process;

use driftline::{install_panic_cleanup, install_signal_cleanup, ProcessConsole, Session};

fn main() {
    let console = ProcessConsole::new();

    // A signal or panic must never leave the terminal in raw mode.
    let snapshot = console.mode_snapshot();
    let _signals = install_signal_cleanup({
        let snapshot = snapshot.clone();
        move || snapshot.restore_best_effort()
    });
    install_panic_cleanup(move || snapshot.restore_best_effort());

    let mut session = Session::new(console);
    session.welcome();

    if let Err(err) = session.run() {
        eprintln!("driftline: session aborted: {err}");
        process::exit(1);
    }
}
