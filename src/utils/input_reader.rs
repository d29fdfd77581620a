use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{error, warn};

use crate::utils::error::{AppError, AppResult};

/// Selection code returned when the operator's input cannot be read as a number.
pub const INVALID_SELECTION: i32 = -1;

/// Source of operator input for the parking flows.
pub trait InputReader {
    /// Reads a menu or vehicle type code. Unreadable input yields [`INVALID_SELECTION`].
    fn read_selection(&self) -> i32;

    fn read_vehicle_registration_number(&self) -> AppResult<String>;

    /// True once no further input can arrive.
    fn at_end_of_input(&self) -> bool {
        false
    }
}

/// Reads one line per call from the process's standard input.
#[derive(Debug, Default)]
pub struct StdinInputReader {
    eof: AtomicBool,
}

impl StdinInputReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_line(&self) -> io::Result<String> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            self.eof.store(true, Ordering::Relaxed);
        }
        Ok(line)
    }
}

impl InputReader for StdinInputReader {
    fn read_selection(&self) -> i32 {
        match self.read_line() {
            Ok(line) => parse_selection(&line),
            Err(e) => {
                error!(error = ?e, "Error while reading user input from shell");
                INVALID_SELECTION
            }
        }
    }

    fn read_vehicle_registration_number(&self) -> AppResult<String> {
        let line = self.read_line()?;
        parse_registration_number(&line)
    }

    fn at_end_of_input(&self) -> bool {
        self.eof.load(Ordering::Relaxed)
    }
}

/// Replays a fixed script of operator answers, in order.
///
/// Once a script runs dry, selections read as [`INVALID_SELECTION`] and
/// registration numbers fail validation.
#[derive(Debug, Default)]
pub struct ScriptedInputReader {
    selections: Mutex<VecDeque<i32>>,
    registrations: Mutex<VecDeque<String>>,
}

impl ScriptedInputReader {
    pub fn new<S, R>(selections: S, registrations: R) -> Self
    where
        S: IntoIterator<Item = i32>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            selections: Mutex::new(selections.into_iter().collect()),
            registrations: Mutex::new(registrations.into_iter().map(Into::into).collect()),
        }
    }

    pub fn push_registration(&self, registration: impl Into<String>) {
        if let Ok(mut queue) = self.registrations.lock() {
            queue.push_back(registration.into());
        }
    }
}

impl InputReader for ScriptedInputReader {
    fn read_selection(&self) -> i32 {
        self.selections
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or(INVALID_SELECTION)
    }

    fn read_vehicle_registration_number(&self) -> AppResult<String> {
        let next = self
            .registrations
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_default();
        parse_registration_number(&next)
    }

    fn at_end_of_input(&self) -> bool {
        self.selections
            .lock()
            .map(|queue| queue.is_empty())
            .unwrap_or(true)
    }
}

fn parse_selection(line: &str) -> i32 {
    match line.trim().parse::<i32>() {
        Ok(selection) => selection,
        Err(e) => {
            warn!(input = line.trim(), error = %e, "Invalid selection input");
            INVALID_SELECTION
        }
    }
}

fn parse_registration_number(line: &str) -> AppResult<String> {
    let registration = line.trim();
    if registration.is_empty() {
        return Err(AppError::ValidationError(
            "Invalid input provided: vehicle registration number is empty".to_string(),
        ));
    }
    Ok(registration.to_string())
}
