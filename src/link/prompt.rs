//! Password input for protected links.

use std::io::{self, BufRead, Write};

/// Source of the password typed by whoever opens a protected link.
pub trait PasswordPrompt {
    /// Ask for the password once.
    ///
    /// # Errors
    ///
    /// Returns an error if no input could be read.
    fn prompt(&mut self) -> io::Result<String>;
}

/// Reads one line from stdin after printing a prompt on stderr.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl PasswordPrompt for StdinPrompt {
    fn prompt(&mut self) -> io::Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "This document is password protected. Password: ")?;
        stderr.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no password entered",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Answers every prompt with a password known up front (`--password`).
#[derive(Debug, Default)]
pub struct FixedPassword {
    password: Option<String>,
    calls: usize,
}

impl FixedPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            calls: 0,
        }
    }

    /// A prompt that has no answer; protected links fail to open.
    pub fn none() -> Self {
        Self::default()
    }

    /// Number of times the password was asked for.
    pub const fn calls(&self) -> usize {
        self.calls
    }
}

impl PasswordPrompt for FixedPassword {
    fn prompt(&mut self) -> io::Result<String> {
        self.calls += 1;
        self.password.clone().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "link is password protected")
        })
    }
}
