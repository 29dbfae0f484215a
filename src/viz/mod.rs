use std::{
    io,
    sync::mpsc::{self, Sender},
    thread::{self, JoinHandle},
};

use log::LevelFilter;

use crate::{
    algo::{Evaluation, PolicyEvaluatorConfig},
    gym::GridWorld,
};

pub use app::{App, Update};

mod app;
mod components;
mod tui;

/// Install the TUI logger and spawn the TUI on its own thread
///
/// Send [`Update`]s on the returned channel while evaluating; the thread runs until the user
/// quits. Hand both back to [`finish`] once the evaluation is done.
pub fn init(
    env: GridWorld,
    config: &PolicyEvaluatorConfig,
) -> (JoinHandle<io::Result<()>>, Sender<Update>) {
    // another logger may already be installed, in which case records simply don't reach the
    // Logs tab
    if tui_logger::init_logger(LevelFilter::Trace).is_ok() {
        tui_logger::set_default_level(LevelFilter::Trace);
    }

    let (tx, rx) = mpsc::channel();
    let (max_sweeps, tolerance) = (config.max_sweeps, config.tolerance);
    let handle = thread::spawn(move || App::new(env, max_sweeps, tolerance).run(rx));

    (handle, tx)
}

/// Send the final [`Evaluation`] to the TUI and wait for the user to close it
///
/// The TUI may already be gone, either because the user quit early or because the terminal
/// could not be set up, so a failed send is not an error. **Errors** with the TUI thread's own
/// error, or if the thread panicked.
pub fn finish(
    handle: JoinHandle<io::Result<()>>,
    tx: Sender<Update>,
    evaluation: Evaluation,
) -> io::Result<()> {
    let _ = tx.send(Update::Done(evaluation));
    drop(tx);

    handle
        .join()
        .map_err(|_| io::Error::other("viz thread panicked"))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algo::PolicyEvaluator, gym::Action, policy};

    fn evaluation() -> Evaluation {
        let env = GridWorld::new(3, (2, 2), [(1, 1)]).unwrap();
        PolicyEvaluator::default()
            .evaluate(&env, policy::uniform(&env, Action::Down))
            .unwrap()
    }

    #[test]
    fn finish_after_early_quit() {
        let (tx, rx) = mpsc::channel::<Update>();
        let handle = thread::spawn(move || {
            drop(rx);
            Ok(())
        });

        assert!(finish(handle, tx, evaluation()).is_ok(), "Quitting early is not an error");
    }

    #[test]
    fn finish_surfaces_tui_error() {
        let (tx, rx) = mpsc::channel::<Update>();
        let handle = thread::spawn(move || {
            drop(rx);
            Err(io::Error::other("no tty"))
        });

        let err = finish(handle, tx, evaluation()).unwrap_err();
        assert_eq!(err.to_string(), "no tty", "Error from the TUI thread is kept");
    }

    #[test]
    fn finish_surfaces_panic() {
        let (tx, rx) = mpsc::channel::<Update>();
        let handle = thread::spawn(move || -> io::Result<()> {
            drop(rx);
            panic!("render failed");
        });

        let err = finish(handle, tx, evaluation()).unwrap_err();
        assert_eq!(err.to_string(), "viz thread panicked", "Panic is reported");
    }

    #[test]
    fn finish_delivers_result() {
        let (tx, rx) = mpsc::channel::<Update>();
        let handle = thread::spawn(move || match rx.recv() {
            Ok(Update::Done(evaluation)) if evaluation.converged => Ok(()),
            _ => Err(io::Error::other("no result")),
        });

        assert!(finish(handle, tx, evaluation()).is_ok(), "Final evaluation is received");
    }
}
