//! Log events emitted by a scene and a colored console to print them.

use std::io::{stderr, Error as IoError, Stderr, Write};
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Info(String),
    Warn(String),
    Status(String),
    Done(String),
}

#[derive(Debug)]
pub struct Console<T: Write> {
    tty: T,
    verbose: bool,
}

impl Console<Stderr> {
    pub fn new_stderr(verbose: bool) -> Self {
        Self::new(stderr(), verbose)
    }
}

impl<T: Write> Console<T> {
    pub fn new(tty: T, verbose: bool) -> Self {
        Self { tty, verbose }
    }

    /// Prints one event. `Status` lines are only shown when verbose.
    pub fn log(&mut self, event: LogEvent) -> Result<(), IoError> {
        match event {
            LogEvent::Info(msg) => self.log_message("INFO", msg, termion::color::LightBlue),
            LogEvent::Warn(msg) => self.log_message("WARN", msg, termion::color::LightYellow),
            LogEvent::Status(msg) if self.verbose => {
                self.log_message("....", msg, termion::color::LightBlack)
            }
            LogEvent::Status(_) => Ok(()),
            LogEvent::Done(msg) => self.log_message("DONE", msg, termion::color::LightGreen),
        }
    }

    /// Prints every event currently waiting in `rx`.
    pub fn drain(&mut self, rx: &Receiver<LogEvent>) -> Result<(), IoError> {
        for event in rx.try_iter() {
            self.log(event)?;
        }
        Ok(())
    }

    fn log_message(
        &mut self,
        label: &'static str,
        msg: String,
        color: impl termion::color::Color,
    ) -> Result<(), IoError> {
        let msg = msg.replace('\t', "    ");
        let color = termion::color::Fg(color);
        let reset = termion::style::Reset;
        writeln!(self.tty, "{color}[{label}] {reset}{msg}")
    }
}
