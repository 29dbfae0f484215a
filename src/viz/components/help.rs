use ratatui::{prelude::*, widgets::*};

fn key(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::from(key).light_cyan().bold(),
        Span::raw(" : "),
        Span::raw(description),
    ])
}

/// Render the key bindings for the selected tab as a centered popup
pub fn render_help(area: Rect, buf: &mut Buffer, selected_tab: usize) {
    let mut lines = vec![
        key("  q  ", "Exit viz"),
        key("  h  ", "Toggle help popup"),
        key(" Tab ", "Switch tabs"),
    ];

    match selected_tab {
        0 => lines.push(key("Arrows", "Move the cell inspector")),
        2 => lines.extend([
            key("  s  ", "Toggle the target selector"),
            key("  f  ", "Focus on the selected target only"),
            key("⬆ / ⬇", "Switch log target"),
            key("⬅ / ➡", "Show one level less/more for the target"),
            key("- / +", "Capture one level less/more for the target"),
            key("PgUp ", "Enter page mode and scroll up"),
            key("PgDn ", "Scroll down in page mode"),
            key(" Esc ", "Leave page mode"),
        ]),
        _ => {}
    }

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16 + 4),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, popup, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(72),
        Constraint::Fill(1),
    ])
    .areas(middle);

    Clear.render(popup, buf);

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::horizontal(1))
                .title("Help"),
        )
        .wrap(Wrap { trim: false })
        .render(popup, buf);
}
