// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use steward_app::{AdminCommand, AdminEvent, AdminState, Screen, UploadTicket};
use tracing::{debug, warn};

use crate::commands::{SessionCommand, parse_command};
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-driven admin session. Uploads complete on a timer thread and are
/// folded back into state whenever the session next polls.
pub struct Session<W: Write> {
    state: AdminState,
    out: W,
    upload_delay: Duration,
    upload_tx: Sender<UploadTicket>,
    upload_rx: Receiver<UploadTicket>,
}

impl<W: Write> Session<W> {
    pub fn new(state: AdminState, upload_delay: Duration, out: W) -> Self {
        let (upload_tx, upload_rx) = mpsc::channel();
        Self {
            state,
            out,
            upload_delay,
            upload_tx,
            upload_rx,
        }
    }

    pub fn state(&self) -> &AdminState {
        &self.state
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn print_dashboard(&mut self) -> Result<()> {
        let text = render::dashboard(&self.state.dashboard());
        self.write(&text)
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        for line in input.lines() {
            let line = line.context("read command line")?;
            if self.handle_line(&line)? == Flow::Quit {
                return Ok(());
            }
        }
        self.wait_for_upload()
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        self.poll_uploads()?;
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(error) => {
                warn!(line, error = %error, "command rejected");
                self.write(&format!("error: {error:#}\n"))?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            SessionCommand::Help => self.write(render::help())?,
            SessionCommand::Dashboard => self.print_dashboard()?,
            SessionCommand::Show(screen) => self.show(screen)?,
            SessionCommand::ProgressSummary => {
                let text = render::progress_summary(&self.state.progress.summary(self.state.now));
                self.write(&text)?;
            }
            SessionCommand::RequestCounts => {
                let text = render::request_counts(self.state.requests.counts());
                self.write(&text)?;
            }
            SessionCommand::Admin(command) => self.apply(command)?,
            SessionCommand::Wait => self.wait_for_upload()?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Folds every upload that has already finished into state.
    pub fn poll_uploads(&mut self) -> Result<()> {
        while let Ok(ticket) = self.upload_rx.try_recv() {
            self.apply(AdminCommand::FinishUpload(ticket))?;
        }
        Ok(())
    }

    pub fn wait_for_upload(&mut self) -> Result<()> {
        if !self.state.upload.is_busy() {
            return Ok(());
        }
        debug!("waiting for in-flight upload");
        let ticket = self
            .upload_rx
            .recv()
            .context("upload timer channel closed")?;
        self.apply(AdminCommand::FinishUpload(ticket))
    }

    fn apply(&mut self, command: AdminCommand) -> Result<()> {
        let events = self.state.dispatch(command);
        let rejected = events
            .iter()
            .any(|event| matches!(event, AdminEvent::Rejected(_)));
        for event in events {
            match event {
                AdminEvent::FilterChanged { screen, .. } | AdminEvent::FiltersCleared(screen) => {
                    self.show(screen)?;
                }
                AdminEvent::UploadStarted(ticket) => self.schedule_upload_finish(ticket),
                AdminEvent::Rejected(message) => self.write(&format!("error: {message}\n"))?,
                AdminEvent::StatusUpdated(message) if !rejected => {
                    self.write(&format!("{message}\n"))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn schedule_upload_finish(&self, ticket: UploadTicket) {
        let sender = self.upload_tx.clone();
        let delay = self.upload_delay;
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = sender.send(ticket);
        });
    }

    fn show(&mut self, screen: Screen) -> Result<()> {
        let text = match screen {
            Screen::Studies => render::studies(&self.state.studies),
            Screen::Progress => render::progress(&self.state.progress, self.state.now),
            Screen::Requests => render::requests(&self.state.requests),
        };
        self.write(&text)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .context("write session output")
    }
}

#[cfg(test)]
mod tests {
    use super::{Flow, Session};
    use anyhow::Result;
    use std::io::Cursor;
    use std::time::Duration;
    use steward_app::{AdminState, StudyId};

    fn session() -> Result<Session<Vec<u8>>> {
        Ok(Session::new(AdminState::seeded()?, Duration::ZERO, Vec::new()))
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8_lossy(&session.into_output()).into_owned()
    }

    #[test]
    fn filter_commands_print_the_view() -> Result<()> {
        let mut session = session()?;
        session.handle_line("studies filter locked")?;
        session.handle_line("studies search nonexistent-zzz")?;
        let text = output(session);
        assert!(text.contains("studies: 1 of 4 | filter: locked"), "{text}");
        assert!(text.contains("no studies match"), "{text}");
        Ok(())
    }

    #[test]
    fn mutations_report_status_and_not_found() -> Result<()> {
        let mut session = session()?;
        session.handle_line("studies delete 999")?;
        session.handle_line("studies lock 1")?;
        assert_eq!(session.state().studies.is_locked(StudyId::new(1)), Some(true));
        assert_eq!(session.state().studies.collection().len(), 4);
        let text = output(session);
        assert!(text.contains("no study with id 999"), "{text}");
        assert!(text.contains("study 1 locked"), "{text}");
        Ok(())
    }

    #[test]
    fn unlock_never_locks_and_lock_never_unlocks() -> Result<()> {
        let mut session = session()?;
        session.handle_line("studies unlock 1")?;
        assert_eq!(session.state().studies.is_locked(StudyId::new(1)), Some(false));
        session.handle_line("studies lock 2")?;
        assert_eq!(session.state().studies.is_locked(StudyId::new(2)), Some(true));
        session.handle_line("studies toggle 2")?;
        assert_eq!(session.state().studies.is_locked(StudyId::new(2)), Some(false));

        let text = output(session);
        assert!(text.contains("study 1 unlocked"), "{text}");
        assert!(!text.contains("study 1 locked"), "{text}");
        assert!(text.contains("study 2 locked"), "{text}");
        assert!(text.contains("study 2 unlocked"), "{text}");
        Ok(())
    }

    #[test]
    fn parse_errors_do_not_end_the_session() -> Result<()> {
        let mut session = session()?;
        assert_eq!(session.handle_line("studies lock x")?, Flow::Continue);
        assert_eq!(session.handle_line("quit")?, Flow::Quit);
        assert!(output(session).contains("error: expected a numeric study id"));
        Ok(())
    }

    #[test]
    fn upload_completes_after_wait() -> Result<()> {
        let mut session = session()?;
        session.handle_line("upload study title=Romans; chapter=Grace")?;
        assert!(session.state().upload.is_busy());
        session.handle_line("upload devotion title=x")?;
        session.handle_line("wait")?;
        assert!(!session.state().upload.is_busy());

        let text = output(session);
        assert!(text.contains("uploading study..."), "{text}");
        assert!(text.contains("error: devotion description is required"), "{text}");
        assert!(text.contains("Study uploaded successfully!"), "{text}");
        Ok(())
    }

    #[test]
    fn run_drains_pending_upload_at_end_of_input() -> Result<()> {
        let mut session = session()?;
        let script = "requests read 1\nupload sermon title=Hope; speaker=Lee; date=2024-02-04; summary=Waiting well\n";
        session.run(Cursor::new(script))?;
        assert!(!session.state().upload.is_busy());
        let text = output(session);
        assert!(text.contains("request 1 marked read"), "{text}");
        assert!(text.contains("Sermon uploaded successfully!"), "{text}");
        Ok(())
    }

    #[test]
    fn busy_upload_is_rejected() -> Result<()> {
        let mut session = Session::new(
            AdminState::seeded()?,
            Duration::from_secs(60),
            Vec::new(),
        );
        session.handle_line("upload study title=A")?;
        session.handle_line("upload study title=B")?;
        assert!(output(session).contains("already in progress"));
        Ok(())
    }
}
