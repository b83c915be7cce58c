use crossterm::event::KeyCode;
use ndarray::Array2;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use regressor::{schema, Network, RegressorError, StandardScaler};

use crate::ui::theme::Theme;

use super::Action;

const TITLE: &str = "Прогнозирование соотношения матрица-наполнитель";
const PROMPT: &str = "Введите параметры материала:";
const CALC_LABEL: &str = "Рассчитать соотношение";
const CLEAR_LABEL: &str = "Очистить поля";

const FIELD_COUNT: usize = schema::FEATURE_COUNT;
// Focus order: the twelve fields, then the two buttons.
const FOCUS_CALC: usize = FIELD_COUNT;
const FOCUS_CLEAR: usize = FIELD_COUNT + 1;
const FOCUS_LAST: usize = FOCUS_CLEAR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Warning,
    Error,
}

/// Modal message box. While present it swallows every key.
#[derive(Debug, Clone)]
pub struct Dialog {
    pub kind: DialogKind,
    pub message: String,
}

pub struct FormState {
    network: Network,
    entries: Vec<String>,
    focus: usize,
    result: Option<String>,
    dialog: Option<Dialog>,
}

impl FormState {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            entries: vec![String::new(); FIELD_COUNT],
            focus: 0,
            result: None,
            dialog: None,
        }
    }
}

pub fn handle_key(state: &mut FormState, key: KeyCode) -> Action {
    // A dialog is modal: the first key press dismisses it, nothing else.
    if state.dialog.take().is_some() {
        return Action::None;
    }

    match key {
        KeyCode::Esc => Action::Quit,
        KeyCode::Up | KeyCode::BackTab => {
            state.focus = if state.focus == 0 {
                FOCUS_LAST
            } else {
                state.focus - 1
            };
            Action::None
        }
        KeyCode::Down | KeyCode::Tab => {
            state.focus = (state.focus + 1) % (FOCUS_LAST + 1);
            Action::None
        }
        KeyCode::Enter => {
            match state.focus {
                FOCUS_CALC => predict(state),
                FOCUS_CLEAR => clear(state),
                _ => state.focus += 1,
            }
            Action::None
        }
        KeyCode::Char(c) if state.focus < FIELD_COUNT => {
            state.entries[state.focus].push(c);
            Action::None
        }
        KeyCode::Backspace if state.focus < FIELD_COUNT => {
            state.entries[state.focus].pop();
            Action::None
        }
        _ => Action::None,
    }
}

/// Validates the entries in schema order, scales the sample and runs the
/// model. Every failure ends in a dialog; the entries are never touched.
fn predict(state: &mut FormState) {
    let mut values = Vec::with_capacity(FIELD_COUNT);

    for (entry, label) in state.entries.iter().zip(schema::FEATURES) {
        let text = entry.trim();
        if text.is_empty() {
            log::warn!("prediction rejected: field '{label}' is empty");
            state.dialog = Some(Dialog {
                kind: DialogKind::Warning,
                message: format!("Поле '{label}' не заполнено!"),
            });
            return;
        }
        match text.parse::<f32>() {
            Ok(v) => values.push(v),
            Err(_) => {
                log::warn!("prediction rejected: field '{label}' is not numeric");
                state.dialog = Some(Dialog {
                    kind: DialogKind::Error,
                    message: format!("Некорректное значение в поле '{label}'!"),
                });
                return;
            }
        }
    }

    match infer(&state.network, values) {
        Ok(y) => {
            log::debug!("prediction: {y}");
            state.result = Some(format!("{}: {y:.4}", schema::TARGET));
        }
        Err(e) => {
            log::warn!("inference failed: {e}");
            state.dialog = Some(Dialog {
                kind: DialogKind::Error,
                message: format!("Ошибка прогноза: {e}"),
            });
        }
    }
}

fn infer(network: &Network, values: Vec<f32>) -> Result<f32, RegressorError> {
    let row = Array2::from_shape_vec((1, values.len()), values)
        .map_err(|_| RegressorError::InvalidInput("bad sample shape"))?;

    // Fitted fresh to the single submitted row on every request.
    let scaler = StandardScaler::fit(row.view())?;
    let scaled = scaler.transform(row.row(0))?;

    network.predict(scaled.view())
}

fn clear(state: &mut FormState) {
    for entry in &mut state.entries {
        entry.clear();
    }
    state.result = None;
}

pub fn draw(f: &mut Frame, state: &FormState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(84, 96, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // title
            Constraint::Length(1),                  // prompt
            Constraint::Length(1),                  // spacer
            Constraint::Length(FIELD_COUNT as u16), // fields
            Constraint::Length(1),                  // spacer
            Constraint::Length(1),                  // buttons
            Constraint::Length(1),                  // spacer
            Constraint::Length(4),                  // result panel
            Constraint::Min(0),                     // spacer
            Constraint::Length(1),                  // hints
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Span::styled(TITLE, Theme::title())).alignment(Alignment::Center),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(PROMPT, Theme::dim())).alignment(Alignment::Center),
        chunks[1],
    );

    draw_fields(f, chunks[3], state);
    draw_buttons(f, chunks[5], state);
    draw_result(f, chunks[7], state);
    draw_hints(f, chunks[9]);

    if let Some(dialog) = &state.dialog {
        draw_dialog(f, area, dialog);
    }
}

fn draw_fields(f: &mut Frame, area: Rect, state: &FormState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); FIELD_COUNT])
        .split(area);

    for (i, (label, row)) in schema::FEATURES.iter().zip(rows.iter()).enumerate() {
        let focused = state.focus == i;

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(42), Constraint::Min(0)])
            .split(*row);

        let (prefix, label_style) = if focused {
            ("▶ ", Theme::focus())
        } else {
            ("  ", Theme::dim())
        };
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(prefix, label_style),
                Span::styled(*label, label_style),
            ])),
            cols[0],
        );

        let mut value = vec![Span::styled(state.entries[i].as_str(), Theme::text())];
        if focused {
            value.push(Span::styled("█", Theme::focus()));
        }
        f.render_widget(Paragraph::new(Line::from(value)), cols[1]);
    }
}

fn draw_buttons(f: &mut Frame, area: Rect, state: &FormState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let button = |label: &str, focused: bool| {
        let style = if focused { Theme::focus() } else { Theme::dim() };
        Paragraph::new(Span::styled(format!("[ {label} ]"), style))
            .alignment(Alignment::Center)
    };

    f.render_widget(button(CALC_LABEL, state.focus == FOCUS_CALC), cols[0]);
    f.render_widget(button(CLEAR_LABEL, state.focus == FOCUS_CLEAR), cols[1]);
}

fn draw_result(f: &mut Frame, area: Rect, state: &FormState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" Результат прогноза ")
        .title_style(Theme::title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let line = match &state.result {
        Some(text) => Line::from(Span::styled(text.as_str(), Theme::result())),
        None => Line::from(Span::styled("—", Theme::muted())),
    };
    f.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn draw_hints(f: &mut Frame, area: Rect) {
    let hint = Paragraph::new(Line::from(vec![
        Span::styled("↑↓ / tab", Theme::dim()),
        Span::styled("  navigate    ", Theme::muted()),
        Span::styled("enter", Theme::dim()),
        Span::styled("  confirm    ", Theme::muted()),
        Span::styled("esc", Theme::dim()),
        Span::styled("  quit", Theme::muted()),
    ]))
    .alignment(Alignment::Center);

    f.render_widget(hint, area);
}

fn draw_dialog(f: &mut Frame, area: Rect, dialog: &Dialog) {
    let (title, style) = match dialog.kind {
        DialogKind::Warning => (" Предупреждение ", Theme::warn()),
        DialogKind::Error => (" Ошибка ", Theme::error()),
    };

    let outer = centered_rect(52, 28, area);
    f.render_widget(Clear, outer);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
        .title_style(style)
        .style(Theme::base());

    let inner = block.inner(outer);
    f.render_widget(block, outer);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new(dialog.message.as_str())
            .style(Theme::text())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled("any key — dismiss", Theme::muted()))
            .alignment(Alignment::Center),
        chunks[1],
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use regressor::{Activation, DenseLayer};

    // 12 inputs -> 1 output, all weights 0.1, bias 0.75. After the
    // degenerate single-row scaling the network only ever sees zeros, so
    // every successful prediction is the bias.
    fn test_state() -> FormState {
        let layer = DenseLayer::new(
            Array2::from_elem((1, FIELD_COUNT), 0.1_f32),
            array![0.75_f32],
            Activation::Linear,
        )
        .unwrap();
        FormState::new(Network::new(vec![layer]).unwrap())
    }

    fn fill_all(state: &mut FormState, value: &str) {
        for entry in &mut state.entries {
            *entry = value.to_string();
        }
    }

    fn press_calculate(state: &mut FormState) {
        state.focus = FOCUS_CALC;
        handle_key(state, KeyCode::Enter);
    }

    #[test]
    fn valid_submission_formats_four_decimals() {
        let mut state = test_state();
        fill_all(&mut state, "3.5");
        press_calculate(&mut state);

        assert!(state.dialog.is_none());
        let result = state.result.as_deref().unwrap();
        assert_eq!(result, format!("{}: 0.7500", schema::TARGET));
    }

    #[test]
    fn first_empty_field_is_named_and_short_circuits() {
        let mut state = test_state();
        fill_all(&mut state, "1.0");
        state.entries[4].clear();
        state.entries[9].clear();
        press_calculate(&mut state);

        let dialog = state.dialog.as_ref().unwrap();
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert!(dialog.message.contains(schema::FEATURES[4]));
        assert!(!dialog.message.contains(schema::FEATURES[9]));
        assert!(state.result.is_none());
    }

    #[test]
    fn non_numeric_field_is_named() {
        let mut state = test_state();
        fill_all(&mut state, "2.0");
        state.entries[7] = "abc".to_string();
        press_calculate(&mut state);

        let dialog = state.dialog.as_ref().unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert!(dialog.message.contains(schema::FEATURES[7]));
        assert!(state.result.is_none());
    }

    #[test]
    fn failed_submission_keeps_entries() {
        let mut state = test_state();
        fill_all(&mut state, "1.25");
        state.entries[0].clear();
        press_calculate(&mut state);

        assert!(state.dialog.is_some());
        assert_eq!(state.entries[1], "1.25");
    }

    #[test]
    fn clear_empties_fields_and_result() {
        let mut state = test_state();
        fill_all(&mut state, "1.0");
        press_calculate(&mut state);
        assert!(state.result.is_some());

        state.focus = FOCUS_CLEAR;
        handle_key(&mut state, KeyCode::Enter);

        assert!(state.entries.iter().all(String::is_empty));
        assert!(state.result.is_none());
    }

    #[test]
    fn same_inputs_give_same_result() {
        let mut state = test_state();
        fill_all(&mut state, "7.125");
        press_calculate(&mut state);
        let first = state.result.clone();

        press_calculate(&mut state);
        assert_eq!(first, state.result);
    }

    #[test]
    fn typing_edits_the_focused_entry() {
        let mut state = test_state();
        for c in ['1', '.', '5'] {
            handle_key(&mut state, KeyCode::Char(c));
        }
        assert_eq!(state.entries[0], "1.5");

        handle_key(&mut state, KeyCode::Backspace);
        assert_eq!(state.entries[0], "1.");
    }

    #[test]
    fn dialog_swallows_the_next_key() {
        let mut state = test_state();
        press_calculate(&mut state); // all fields empty -> warning
        assert!(state.dialog.is_some());

        handle_key(&mut state, KeyCode::Char('x'));
        assert!(state.dialog.is_none());
        assert!(state.entries[0].is_empty()); // the 'x' was swallowed
    }

    #[test]
    fn esc_quits_only_without_a_dialog() {
        let mut state = test_state();
        press_calculate(&mut state);
        assert!(matches!(handle_key(&mut state, KeyCode::Esc), Action::None));
        assert!(matches!(handle_key(&mut state, KeyCode::Esc), Action::Quit));
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut state = test_state();
        handle_key(&mut state, KeyCode::Up);
        assert_eq!(state.focus, FOCUS_LAST);
        handle_key(&mut state, KeyCode::Down);
        assert_eq!(state.focus, 0);
    }
}
