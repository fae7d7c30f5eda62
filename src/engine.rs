//! The allocation state machine.
//!
//! The engine eats `chunk_size` bytes per step until the allocator runs dry or the configured
//! byte limit is reached. Nothing it eats is ever given back.
//!
//! Once the allocator has failed with an out-of-memory error, the heap may not have room for
//! even a few bytes, so the out-of-memory path must not allocate: status lines are formatted
//! into a buffer reserved when the engine is built, and nothing is logged there.

use crate::alloc::{AllocError, Allocator};
use crate::config::{Config, DisplayUnit};
use crate::errors::EngineError;
use std::fmt::Write as _;
use std::io::Write;
use std::thread;
use std::time::Duration;

const LINE_CAPACITY: usize = 128;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    /// Growing one chunk per step.
    Eating,
    /// The allocator reported out of memory.
    Limited,
    /// The configured byte limit was reached by normal growth.
    Full,
    /// Exhausted and not asked to keep running.
    Quit,
}

/// How a run of the engine ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The allocator ran dry and the process should exit.
    Exhausted,
    /// The byte limit was reached and the process should exit.
    LimitReached,
    /// Nothing is left to do, but the eaten memory must stay held.
    Hold,
}

pub struct Engine<A, W> {
    allocator: A,
    out: W,
    keep_running: bool,
    poll_after_limit: bool,
    display_unit: DisplayUnit,
    byte_limit: u64,
    chunk_size: u64,
    poll_interval: Duration,
    cumulative_bytes: u64,
    state: State,
    line: String,
}

impl<A: Allocator, W: Write> Engine<A, W> {
    pub fn new(config: &Config, allocator: A, out: W) -> Self {
        Engine {
            allocator,
            out,
            keep_running: config.keep_running,
            poll_after_limit: config.poll_after_limit,
            display_unit: config.display_unit,
            byte_limit: config.byte_limit,
            chunk_size: config.chunk_size,
            poll_interval: config.poll_interval,
            cumulative_bytes: 0,
            state: State::Eating,
            line: String::with_capacity(LINE_CAPACITY),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn cumulative_bytes(&self) -> u64 {
        self.cumulative_bytes
    }

    /// Runs a single iteration of the state machine and returns the state it ended in.
    pub fn step(&mut self) -> Result<State, EngineError> {
        match self.state {
            State::Eating => self.eat()?,
            State::Limited if self.keep_running && self.poll_after_limit => self.poll()?,
            State::Limited | State::Full | State::Quit => {}
        }
        Ok(self.state)
    }

    /// Steps the engine until it has nothing more to do.
    ///
    /// While polling after the limit this only returns on error.
    pub fn run(&mut self) -> Result<Outcome, EngineError> {
        loop {
            match self.step()? {
                State::Eating => {}
                State::Limited if self.poll_after_limit => {
                    if !self.poll_interval.is_zero() {
                        thread::sleep(self.poll_interval);
                    }
                }
                State::Limited => return Ok(Outcome::Hold),
                State::Full if self.keep_running => return Ok(Outcome::Hold),
                State::Full => return Ok(Outcome::LimitReached),
                State::Quit => return Ok(Outcome::Exhausted),
            }
        }
    }

    fn eat(&mut self) -> Result<(), EngineError> {
        if self.cumulative_bytes >= self.byte_limit {
            log::info!(
                "byte limit reached after eating {} bytes",
                self.cumulative_bytes
            );
            self.state = State::Full;
            return Ok(());
        }

        match self.allocator.allocate(self.chunk_size) {
            Ok(()) => self.grow(),
            Err(AllocError::OutOfMemory) => {
                self.report("Limit reached at")?;
                self.state = if self.keep_running {
                    State::Limited
                } else {
                    State::Quit
                };
            }
            Err(err) => return Err(EngineError::Alloc(err)),
        }
        Ok(())
    }

    fn poll(&mut self) -> Result<(), EngineError> {
        match self.allocator.allocate(self.chunk_size) {
            Ok(()) => {
                self.grow();
                self.report("Limit break! How? Consuming memory from")?;
                self.state = State::Eating;
                Ok(())
            }
            Err(AllocError::OutOfMemory) => Ok(()),
            Err(err) => Err(EngineError::Alloc(err)),
        }
    }

    fn grow(&mut self) {
        self.cumulative_bytes = self.cumulative_bytes.saturating_add(self.chunk_size);
    }

    fn report(&mut self, message: &str) -> Result<(), EngineError> {
        self.line.clear();
        // Writing into a String can't fail.
        let _ = writeln!(
            self.line,
            "{} {} {}",
            message,
            self.display_unit.convert(self.cumulative_bytes),
            self.display_unit
        );
        self.out.write_all(self.line.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Parks the calling thread forever, keeping everything eaten so far resident.
pub fn hold() -> ! {
    loop {
        thread::park();
    }
}
