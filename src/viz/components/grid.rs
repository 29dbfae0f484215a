use crossterm::event::{Event, KeyCode};
use ratatui::{prelude::*, widgets::*};

use crate::{algo::Evaluation, ds::Pos, gym::GridWorld};

use super::{key_press, Component};

const CELL_WIDTH: u16 = 8;

/// Side by side view of the value matrix and the policy matrix, with a movable cursor
pub struct GridView {
    env: GridWorld,
    evaluation: Option<Evaluation>,
    cursor: Pos,
}

impl GridView {
    pub fn new(env: GridWorld) -> Self {
        Self {
            env,
            evaluation: None,
            cursor: (0, 0),
        }
    }

    pub fn set_evaluation(&mut self, evaluation: Evaluation) {
        self.evaluation = Some(evaluation);
    }

    pub fn is_ready(&self) -> bool {
        self.evaluation.is_some()
    }

    fn move_cursor(&mut self, (di, dj): (isize, isize)) {
        let last = self.env.size() - 1;
        let (i, j) = self.cursor;
        self.cursor = (
            i.saturating_add_signed(di).min(last),
            j.saturating_add_signed(dj).min(last),
        );
    }

    fn cell_style(&self, pos: Pos) -> Style {
        let style = if self.env.is_wall(pos) {
            Style::default().bg(Color::DarkGray)
        } else if pos == self.env.end() {
            Style::default().light_red().bold()
        } else {
            Style::default().cyan()
        };

        if pos == self.cursor {
            style.reversed()
        } else {
            style
        }
    }

    fn table<'a>(&self, title: &'a str, text: impl Fn(Pos) -> String) -> Table<'a> {
        let n = self.env.size();
        let rows = (0..n).map(|i| {
            Row::new((0..n).map(|j| {
                let pos = (i, j);
                Cell::from(Line::from(text(pos)).alignment(Alignment::Center))
                    .style(self.cell_style(pos))
            }))
            .height(2)
        });

        Table::new(rows, vec![Constraint::Length(CELL_WIDTH); n])
            .column_spacing(1)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(title)
                    .padding(Padding::uniform(1)),
            )
    }

    fn inspector(&self, evaluation: &Evaluation) -> Line<'_> {
        let pos = self.cursor;
        let kind = if self.env.is_wall(pos) {
            "wall"
        } else if pos == self.env.end() {
            "terminal"
        } else {
            "free"
        };

        Line::from(vec![
            Span::from(format!(" {pos:?} ")).light_cyan().bold(),
            Span::raw(format!(
                "{kind}, value {:.4}, action {:?} ",
                evaluation.value[pos], evaluation.policy[pos]
            )),
        ])
    }
}

impl WidgetRef for GridView {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let Some(evaluation) = &self.evaluation else {
            Paragraph::new("Evaluating...")
                .alignment(Alignment::Center)
                .block(Block::bordered().border_type(BorderType::Rounded))
                .render(area, buf);
            return;
        };

        let [tables_area, inspector_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let [value_area, policy_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(tables_area);

        let value = self.table("Value Matrix", |pos| {
            if self.env.is_wall(pos) {
                String::new()
            } else {
                format!("{:.2}", evaluation.value[pos])
            }
        });
        Widget::render(value, value_area, buf);

        let policy = self.table("Policy Matrix", |pos| {
            if self.env.is_wall(pos) {
                String::new()
            } else if pos == self.env.end() {
                String::from("★")
            } else {
                evaluation.policy[pos].arrow().to_string()
            }
        });
        Widget::render(policy, policy_area, buf);

        self.inspector(evaluation).render(inspector_area, buf);
    }
}

impl Component for GridView {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        let delta = match key_press(event) {
            Some(KeyCode::Up) => (-1, 0),
            Some(KeyCode::Down) => (1, 0),
            Some(KeyCode::Left) => (0, -1),
            Some(KeyCode::Right) => (0, 1),
            _ => return false,
        };

        self.move_cursor(delta);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_on_grid() {
        let mut view = GridView::new(GridWorld::new(3, (2, 2), [(1, 1)]).unwrap());
        view.move_cursor((-1, -1));
        assert_eq!(view.cursor, (0, 0), "Clamped at the top-left corner");

        for _ in 0..5 {
            view.move_cursor((1, 1));
        }
        assert_eq!(view.cursor, (2, 2), "Clamped at the bottom-right corner");

        view.move_cursor((0, -1));
        assert_eq!(view.cursor, (2, 1));
    }
}
