use std::{
    io,
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use crossterm::event::{self, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::{
    algo::{Evaluation, SweepStats},
    gym::GridWorld,
};

use super::{
    components::{help::render_help, key_press, Component, GridView, Logs, Plot},
    tui::Tui,
};

const TABS: [&str; 3] = ["Grid", "Convergence", "Logs"];

/// Message sent from the evaluating thread to the TUI
pub enum Update {
    /// A sweep finished
    Sweep(SweepStats),
    /// Evaluation finished
    Done(Evaluation),
}

#[derive(Default, PartialEq)]
enum State {
    #[default]
    Evaluating,
    Done,
    Error(&'static str),
    Quit,
}

/// The root TUI component which holds the main app state and runs the render loop
pub struct App {
    state: State,
    sweep: u32,
    max_sweeps: u32,
    selected_tab: usize,
    show_help: bool,
    grid: GridView,
    plot: Plot,
    logs: Logs,
}

impl App {
    pub fn new(env: GridWorld, max_sweeps: u32, tolerance: f32) -> Self {
        Self {
            state: State::default(),
            sweep: 0,
            max_sweeps,
            selected_tab: 0,
            show_help: false,
            grid: GridView::new(env),
            plot: Plot::new(max_sweeps, tolerance),
            logs: Logs::new(),
        }
    }

    /// Initialize the terminal and run the main loop until the user quits
    ///
    /// The terminal is restored on exit
    pub fn run(&mut self, rx: Receiver<Update>) -> io::Result<()> {
        let mut tui = Tui::enter()?;

        while self.state != State::Quit {
            self.receive(&rx);

            tui.terminal()
                .draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(Duration::from_millis(16))? {
                let event = event::read()?;
                self.handle_event(&event);
            }
        }

        Ok(())
    }

    fn receive(&mut self, rx: &Receiver<Update>) {
        if self.state != State::Evaluating {
            return;
        }

        loop {
            match rx.try_recv() {
                Ok(Update::Sweep(stats)) => {
                    self.sweep = stats.sweep;
                    self.plot.update(stats);
                }
                Ok(Update::Done(evaluation)) => {
                    self.sweep = evaluation.sweeps;
                    self.grid.set_evaluation(evaluation);
                    self.state = State::Done;
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.state = State::Error("Channel disconnected before evaluation finished.");
                    break;
                }
            }
        }
    }

    fn handle_event(&mut self, event: &event::Event) {
        let consumed = match self.selected_tab {
            0 => self.grid.handle_ui_event(event),
            2 => self.logs.handle_ui_event(event),
            _ => false,
        };
        if consumed {
            return;
        }

        match key_press(event) {
            Some(KeyCode::Char('q')) => self.state = State::Quit,
            Some(KeyCode::Char('h')) => self.show_help = !self.show_help,
            Some(KeyCode::Tab) => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            _ => {}
        }
    }

    fn progress(&self) -> Gauge<'_> {
        let (label, color) = match &self.state {
            State::Error(msg) => (String::from(*msg), Color::Red),
            State::Done if self.grid.is_ready() => {
                (format!("Finished after {} sweeps", self.sweep), Color::Green)
            }
            _ => (format!("Sweep {}/{}", self.sweep, self.max_sweeps), Color::Cyan),
        };

        Gauge::default()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Progress"),
            )
            .gauge_style(color)
            .label(label)
            .ratio((self.sweep as f64 / self.max_sweeps.max(1) as f64).clamp(0.0, 1.0))
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [menu_area, main_area, progress_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        match self.selected_tab {
            0 => self.grid.render_ref(main_area, buf),
            1 => self.plot.render(main_area, buf),
            2 => self.logs.render_ref(main_area, buf),
            _ => {}
        }

        self.progress().render(progress_area, buf);

        if self.show_help {
            render_help(area, buf, self.selected_tab);
        }
    }
}
