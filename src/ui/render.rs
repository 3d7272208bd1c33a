use crate::ui::app::{App, Screen};
use crate::ui::editor::{EditorSession, Row};
use crate::ui::layout::{centered_rect, centered_rect_by_size, scroll_offset};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, LABEL_TEXT, POPUP_BORDER, SECTION_TEXT, STATUS_ERROR, STATUS_OK,
    VALUE_TEXT,
};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const LABEL_WIDTH: usize = 30;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    match app.screen() {
        Screen::Editor => {
            if let Some(session) = app.editor_state().session() {
                draw_editor(frame, session);
            }
        }
        Screen::DriverManager => draw_driver_manager(frame, app),
    }
}

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER))
}

fn draw_editor(frame: &mut Frame<'_>, session: &EditorSession) {
    let area = centered_rect(90, 90, frame.area());
    frame.render_widget(Clear, area);

    let title = if session.is_dirty() {
        format!("{} *", session.title)
    } else {
        session.title.clone()
    };
    let block = popup_block(&title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let rows = session.rows();
    let mut lines = Vec::new();
    let mut focused_line = 0;
    let mut section = None;
    for (index, row) in rows.iter().enumerate() {
        if section != Some(row.section) {
            if section.is_some() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                row.section.title(),
                Style::default()
                    .fg(SECTION_TEXT)
                    .add_modifier(Modifier::BOLD),
            )));
            section = Some(row.section);
        }
        let focused = index == session.focused;
        if focused {
            focused_line = lines.len();
        }
        lines.push(row_line(row, focused, session));
    }

    let body = Rect {
        height: inner.height - 1,
        ..inner
    };
    let offset = scroll_offset(focused_line, body.height as usize, lines.len());
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(offset)
        .take(body.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(visible), body);

    let hints = if session.editing.is_some() {
        "Enter: Apply  Esc: Cancel  Tab: Suggest"
    } else {
        "Up/Down: Move  Left/Right: Change  Enter: Edit  d: Remove  Ctrl+S: Save  Esc: Close"
    };
    let footer = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(SECTION_TEXT)))),
        footer,
    );

    if session.confirm_discard {
        let lines = vec![
            Line::from("You have unsaved changes. Discard them?"),
            Line::from(""),
            Line::from("y: Discard  Esc: Discard  any other key: Keep editing"),
        ];
        draw_popup(frame, area, "Unsaved Changes", lines);
    }
}

fn row_line(row: &Row, focused: bool, session: &EditorSession) -> Line<'static> {
    let value = match &session.editing {
        Some(editing) if focused => format!("{}_", editing.buffer),
        _ => row.value_text(),
    };
    let label = format!("  {:<width$}", row.label, width = LABEL_WIDTH);
    let mut spans = vec![
        Span::styled(label, Style::default().fg(LABEL_TEXT)),
        Span::styled(value, Style::default().fg(VALUE_TEXT)),
    ];
    if focused && row.is_removable() && session.editing.is_none() {
        spans.push(Span::styled("  (d: remove)", Style::default().fg(SECTION_TEXT)));
    }
    let line = Line::from(spans);
    if focused {
        line.style(Style::default().bg(ACTIVE_HIGHLIGHT))
    } else {
        line
    }
}

fn draw_driver_manager(frame: &mut Frame<'_>, app: &App) {
    let state = app.driver_manager_state();
    if !state.is_visible() {
        return;
    }
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("Import a custom graphics driver package")];
    if let Some(result) = state.last_result() {
        let color = if result.is_success() {
            STATUS_OK
        } else {
            STATUS_ERROR
        };
        lines.push(Line::from(Span::styled(
            result.message(),
            Style::default().fg(color),
        )));
    }

    let drivers = state.drivers();
    if drivers.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from("No custom drivers installed."));
    } else {
        lines.push(Line::from(""));
        lines.push(Line::from("Installed custom drivers:"));
        let focused = state.focused_driver();
        for id in drivers {
            let line = Line::from(format!("  {}", id));
            if Some(id.as_str()) == focused {
                lines.push(line.style(Style::default().bg(ACTIVE_HIGHLIGHT)));
            } else {
                lines.push(line);
            }
        }
    }

    lines.push(Line::from(""));
    match state.import_path() {
        Some(path) => {
            lines.push(Line::from(vec![
                Span::raw("Archive path: "),
                Span::styled(format!("{}_", path), Style::default().fg(VALUE_TEXT)),
            ]));
            lines.push(Line::from("Enter: Import  Esc: Cancel"));
        }
        None => lines.push(Line::from("i: Import ZIP  d: Delete  Up/Down: Move  Esc: Close")),
    }

    frame.render_widget(Paragraph::new(lines).block(popup_block("Driver Manager")), area);

    if let Some(id) = state.pending_delete() {
        let lines = vec![
            Line::from(format!(
                "Are you sure you want to remove driver '{}'? This cannot be undone.",
                id
            )),
            Line::from(""),
            Line::from("y: Delete  any other key: Cancel"),
        ];
        draw_popup(frame, area, "Confirm Delete", lines);
    }
}

fn draw_popup(frame: &mut Frame<'_>, parent: Rect, title: &str, lines: Vec<Line<'_>>) {
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let width = content_width.saturating_add(4);
    let height = (lines.len() as u16).saturating_add(2);
    let area = centered_rect_by_size(parent, width, height);
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(popup_block(title)), area);
}
