//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::collections::VecDeque;

use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Queue a follow-up message, processed before the next poll.
    Msg(Msg),
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait briefly for input and append whatever arrived to `queue`.
    fn poll_msgs(&mut self, queue: &mut VecDeque<Msg>) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Restore the back-end. Called exactly once, also after errors.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    prev: Grid,
    curr: Grid,
    queue: VecDeque<Msg>,
    done: bool,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            prev: Grid::new(config.width, config.height),
            curr: Grid::new(config.width, config.height),
            queue: VecDeque::new(),
            done: false,
        }
    }

    /// The model, for inspection after [`run`](App::run) returns.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the Model-View-Update loop until the model returns
    /// [`Effect::End`] or the driver fails.
    ///
    /// `Msg::Init` is delivered first; afterwards every iteration drains
    /// the queue through the model, redraws, flushes the diff and polls the
    /// driver for more input.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        self.queue.push_back(Msg::Init);
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            self.process_pending()?;
            if self.done {
                return Ok(());
            }
            self.driver.poll_msgs(&mut self.queue)?;
        }
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Some(msg) = self.queue.pop_front() {
            if let Msg::Screen { .. } = msg {
                // The back-end may have lost its contents; resend everything.
                self.prev = Grid::new(0, 0);
            }
            if let Some(effect) = self.model.update(msg) {
                self.handle_effect(effect);
            }
            if self.done {
                return Ok(());
            }
            needs_draw = true;
        }

        if needs_draw {
            self.curr.fill(Default::default());
            self.model.draw(&mut self.curr);
            let frame = compute_frame(&self.prev, &self.curr);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            self.prev = self.curr.clone();
        }
        Ok(())
    }

    fn handle_effect(&mut self, effect: Effect) {
        match effect {
            Effect::End => self.done = true,
            Effect::Msg(msg) => self.queue.push_back(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use crate::cell::Cell;
    use crate::messages::Key;

    /// Counts key presses, quits on Escape.
    #[derive(Default)]
    struct Counter {
        presses: usize,
        inits: usize,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::Init => {
                    self.inits += 1;
                    None
                }
                Msg::KeyDown {
                    key: Key::Escape, ..
                } => Some(Effect::End),
                Msg::KeyDown {
                    key: Key::Char('2'),
                    ..
                } => {
                    self.presses += 1;
                    Some(Effect::Msg(Msg::key(Key::Char('1'))))
                }
                Msg::KeyDown { .. } => {
                    self.presses += 1;
                    None
                }
                _ => None,
            }
        }

        fn draw(&self, grid: &mut Grid) {
            let digit = char::from_digit(self.presses as u32 % 10, 10).unwrap_or('?');
            grid.set(Point::new(0, 0), Cell::default().with_char(digit));
        }
    }

    /// Replays one batch of messages per poll.
    struct Scripted {
        batches: VecDeque<Vec<Msg>>,
        flushed: Vec<Frame>,
        closed: bool,
    }

    impl Driver for Scripted {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn poll_msgs(&mut self, queue: &mut VecDeque<Msg>) -> Result<(), Box<dyn std::error::Error>> {
            match self.batches.pop_front() {
                Some(batch) => {
                    queue.extend(batch);
                    Ok(())
                }
                None => Err("script exhausted".into()),
            }
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.flushed.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[test]
    fn run_processes_follow_up_messages_and_stops_on_end() {
        let driver = Scripted {
            batches: VecDeque::from(vec![
                vec![Msg::key(Key::Char('a'))],
                vec![Msg::key(Key::Char('2'))],
                vec![Msg::key(Key::Escape), Msg::key(Key::Char('z'))],
            ]),
            flushed: Vec::new(),
            closed: false,
        };
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver,
            width: 2,
            height: 1,
        });
        app.run().unwrap();
        assert_eq!(app.model().inits, 1);
        // 'a', '2' and its follow-up '1'; 'z' comes after End.
        assert_eq!(app.model().presses, 3);
        assert!(app.driver.closed);
        let last = app.driver.flushed.last().unwrap();
        assert_eq!(last.cells[0].cell.ch, '3');
    }

    #[test]
    fn driver_error_still_closes() {
        let driver = Scripted {
            batches: VecDeque::new(),
            flushed: Vec::new(),
            closed: false,
        };
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver,
            width: 1,
            height: 1,
        });
        assert!(app.run().is_err());
        assert!(app.driver.closed);
    }
}
