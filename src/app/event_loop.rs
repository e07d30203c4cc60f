use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};

use crate::app::{App, Message, Model, parse_command, update};
use crate::link::PasswordPrompt;

/// Everything the session loop reacts to.
#[derive(Debug)]
pub(super) enum Event {
    /// A line typed by the user
    Line(String),
    /// Input reached end of file
    InputClosed,
    /// A message produced by a background worker
    Message(Message),
}

/// Single channel fed by the input reader and background workers.
pub(super) struct EventQueue {
    sender: Sender<Event>,
    receiver: Receiver<Event>,
    deferred: VecDeque<Event>,
}

impl EventQueue {
    pub(super) fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            deferred: VecDeque::new(),
        }
    }

    pub(super) fn sender(&self) -> Sender<Event> {
        self.sender.clone()
    }

    pub(super) fn next(&mut self) -> Option<Event> {
        self.deferred
            .pop_front()
            .or_else(|| self.receiver.recv().ok())
    }
}

/// Answers password prompts with the next input line. Worker messages that
/// arrive while waiting are replayed afterwards.
pub(super) struct ChannelPrompt<'a> {
    queue: &'a mut EventQueue,
    out: &'a mut dyn Write,
}

impl<'a> ChannelPrompt<'a> {
    pub(super) fn new(queue: &'a mut EventQueue, out: &'a mut dyn Write) -> Self {
        Self { queue, out }
    }
}

impl PasswordPrompt for ChannelPrompt<'_> {
    fn prompt(&mut self) -> io::Result<String> {
        write!(self.out, "This document is password protected. Password: ")?;
        self.out.flush()?;
        if self
            .queue
            .deferred
            .iter()
            .any(|event| matches!(event, Event::InputClosed))
        {
            return Err(no_password());
        }
        let mut held = Vec::new();
        let answer = loop {
            match self.queue.receiver.recv() {
                Ok(Event::Line(line)) => break Ok(line.trim_end_matches('\r').to_string()),
                Ok(Event::InputClosed) | Err(_) => {
                    held.push(Event::InputClosed);
                    break Err(no_password());
                }
                Ok(other) => held.push(other),
            }
        };
        self.queue.deferred.extend(held);
        answer
    }
}

fn no_password() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "no password entered")
}

impl App {
    /// Run an interactive session on stdin/stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(BufReader::new(io::stdin()), &mut out)?;
        Ok(())
    }

    /// Run a session reading commands from `input` and printing to `out`.
    ///
    /// The session ends on `quit`, or once input is exhausted and no
    /// shortening request is still in flight. Returns the final model.
    ///
    /// # Errors
    ///
    /// Returns an error if `out` cannot be written.
    pub fn run_with<R>(self, input: R, out: &mut dyn Write) -> Result<Model>
    where
        R: BufRead + Send + 'static,
    {
        let mut queue = EventQueue::new();
        spawn_input_reader(input, queue.sender());

        let mut model = self.initial_model();
        match self.initial.clone() {
            Some(msg) => model = self.dispatch(model, msg, &mut queue, out)?,
            None => present(&mut model, out)?,
        }

        let mut input_closed = false;
        while !model.should_quit && !(input_closed && !model.shortening) {
            let Some(event) = queue.next() else {
                break;
            };
            match event {
                Event::InputClosed => input_closed = true,
                Event::Line(line) => match parse_command(&line) {
                    Ok(Some(msg)) => model = self.dispatch(model, msg, &mut queue, out)?,
                    Ok(None) => present(&mut model, out)?,
                    Err(err) => {
                        writeln!(out, "{err}").context("Failed to write output")?;
                    }
                },
                Event::Message(msg) => model = self.dispatch(model, msg, &mut queue, out)?,
            }
        }
        Ok(model)
    }

    fn dispatch(
        &self,
        model: Model,
        msg: Message,
        queue: &mut EventQueue,
        out: &mut dyn Write,
    ) -> Result<Model> {
        let side_msg = msg.clone();
        let mut model = update(model, msg);
        let sender = queue.sender();
        let mut prompt = ChannelPrompt::new(queue, &mut *out);
        self.handle_message_side_effects(&mut model, &mut prompt, &sender, &side_msg);
        present(&mut model, out)?;
        Ok(model)
    }
}

fn spawn_input_reader<R>(input: R, sender: Sender<Event>)
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if sender.send(Event::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to read input");
                    break;
                }
            }
        }
        let _ = sender.send(Event::InputClosed);
    });
}

/// Print the current screen; toasts are shown once.
fn present(model: &mut Model, out: &mut dyn Write) -> Result<()> {
    let screen = crate::ui::view(model);
    model.take_toast();
    out.write_all(screen.as_bytes())
        .and_then(|()| out.flush())
        .context("Failed to write output")
}
