use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{
    DisableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::style::Color::{DarkBlue, DarkGreen, DarkGrey, Reset, Yellow};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, event, queue, terminal, ExecutableCommand};

use super::types::{CycleDirection, ListAction, UiState, ViewportState};
use crate::command_selection::types::CycleDirection::{Down, Up};
use cherry_cuts_core::config::{Config, FilterMode};
use cherry_cuts_core::error::Result;
use cherry_cuts_core::selection::{truncate, visible_choices, Choice, SelectionOutcome};

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// What a key press asks for: leaving the list, a new state, or a focus move.
type KeyOutcome = (Option<ListAction>, Option<UiState>, Option<CycleDirection>);

/// Lets the user tick commits in `choices` until they confirm or cancel.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven.
pub fn prompt_for_commits(choices: &[Choice], config: &Config) -> Result<SelectionOutcome> {
    let mut stdout = stdout();

    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;

    let _raw_mode_guard = RawModeGuard; // When this goes out of scope, raw mode and mouse capture is disabled
    stdout.execute(event::EnableMouseCapture)?;

    let (width, height) = terminal::size()?;
    let mut ui_state = UiState::new(ViewportState::for_terminal(width, height, config.page_size));
    let mut visible = visible_choices(choices, &ui_state.filter_text, config.filter_mode);
    ui_state.focused = first_commit_row(&visible, choices).unwrap_or(0);

    let mut new_ui_state: Option<UiState> = None;
    let mut force_redraw = true;

    loop {
        if let Some(state) = new_ui_state.take() {
            if state.filter_text != ui_state.filter_text {
                visible = visible_choices(choices, &state.filter_text, config.filter_mode);
            }
            force_redraw |= state != ui_state;
            ui_state = state;
        }

        if force_redraw {
            redraw_ui(&ui_state, &visible, choices)?;
            force_redraw = false;
        }

        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        let mut direction = None;

        match event::read()? {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                let (action, state, new_direction) = handle_key_event(
                    key_event,
                    &ui_state,
                    &visible,
                    choices,
                    config.filter_mode,
                );

                if let Some(action) = action {
                    return Ok(finish(action, &ui_state, choices));
                }

                new_ui_state = state;
                direction = new_direction;
            }
            Event::Mouse(MouseEvent {
                kind,
                row,
                modifiers,
                ..
            }) if modifiers == KeyModifiers::NONE => match kind {
                MouseEventKind::ScrollDown => direction = Some(Down),
                MouseEventKind::ScrollUp => direction = Some(Up),
                MouseEventKind::Up(MouseButton::Left) => {
                    new_ui_state = handle_click(row, &ui_state, &visible, choices);
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                new_ui_state = Some(handle_resize(
                    width,
                    height,
                    config.page_size,
                    &ui_state,
                    visible.len(),
                ));
            }
            _ => {}
        }

        if let Some(direction) = direction {
            let base = new_ui_state.as_ref().unwrap_or(&ui_state);
            new_ui_state = Some(move_focus(base, &visible, choices, direction));
        }
    }
}

/// Turns the final state into the outcome handed back to the caller.
fn finish(action: ListAction, ui_state: &UiState, choices: &[Choice]) -> SelectionOutcome {
    match action {
        ListAction::Cancel => SelectionOutcome::Cancelled,
        ListAction::Confirm => SelectionOutcome::Selected(
            ui_state
                .selected
                .iter()
                .filter_map(|index| match choices.get(*index) {
                    Some(Choice::Commit(choice)) => Some(choice.commit.clone()),
                    _ => None,
                })
                .collect(),
        ),
    }
}

/// Handle keyboard events in the commit selection UI
fn handle_key_event(
    key_event: KeyEvent,
    ui_state: &UiState,
    visible: &[usize],
    choices: &[Choice],
    filter_mode: FilterMode,
) -> KeyOutcome {
    match key_event.code {
        KeyCode::Up => (None, None, Some(Up)),
        KeyCode::Down => (None, None, Some(Down)),
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            (Some(ListAction::Cancel), None, None)
        }
        KeyCode::Char(' ') => (None, Some(toggle_focused(ui_state, visible, choices)), None),
        KeyCode::Enter if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            (None, Some(updated_state), None)
        }
        KeyCode::Enter => (Some(ListAction::Confirm), None, None),
        KeyCode::Backspace if ui_state.is_filtering => {
            let mut filter_text = ui_state.filter_text.clone();
            if filter_text.pop().is_none() {
                return (None, None, None);
            }
            let updated_state = apply_filter(ui_state, filter_text, choices, filter_mode);
            (None, Some(updated_state), None)
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut filter_text = ui_state.filter_text.clone();
            filter_text.push(c);
            let updated_state = apply_filter(ui_state, filter_text, choices, filter_mode);
            (None, Some(updated_state), None)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = apply_filter(ui_state, String::new(), choices, filter_mode);
            updated_state.is_filtering = false;
            (None, Some(updated_state), None)
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            (None, Some(updated_state), None)
        }
        KeyCode::Esc | KeyCode::Char('q') => (Some(ListAction::Cancel), None, None),
        _ => (None, None, None),
    }
}

/// New state for `filter_text`, focused on the first matching commit.
fn apply_filter(
    ui_state: &UiState,
    filter_text: String,
    choices: &[Choice],
    filter_mode: FilterMode,
) -> UiState {
    let visible = visible_choices(choices, &filter_text, filter_mode);
    let mut updated_state = ui_state.clone();
    updated_state.filter_text = filter_text;
    updated_state.focused = first_commit_row(&visible, choices).unwrap_or(0);
    updated_state.viewport.offset = 0;
    updated_state
}

/// Ticks the focused commit, or unticks it if it was already ticked.
fn toggle_focused(ui_state: &UiState, visible: &[usize], choices: &[Choice]) -> UiState {
    let mut updated_state = ui_state.clone();

    if let Some(&index) = visible.get(ui_state.focused) {
        if matches!(choices.get(index), Some(Choice::Commit(_)))
            && !updated_state.selected.shift_remove(&index)
        {
            updated_state.selected.insert(index);
        }
    }

    updated_state
}

/// Focuses and toggles the commit under a clicked terminal row.
fn handle_click(
    row: u16,
    ui_state: &UiState,
    visible: &[usize],
    choices: &[Choice],
) -> Option<UiState> {
    if row == 0 {
        // Click on header
        return None;
    }

    let position = (row - 1) as usize + ui_state.viewport.offset;
    let viewport_end = ui_state.viewport.offset + ui_state.viewport.height as usize;
    if position >= visible.len() || position >= viewport_end {
        return None;
    }
    if choices[visible[position]].is_separator() {
        return None;
    }

    let mut focused_state = ui_state.clone();
    focused_state.focused = position;
    Some(toggle_focused(&focused_state, visible, choices))
}

/// Handle window resize events
fn handle_resize(
    width: u16,
    height: u16,
    page_size: u16,
    ui_state: &UiState,
    visible_length: usize,
) -> UiState {
    let mut ui_state = ui_state.clone();
    let mut viewport = ViewportState::for_terminal(width, height, page_size);
    viewport.offset = ui_state.viewport.offset;
    ui_state.viewport = viewport;
    scroll_to_focus(&mut ui_state, visible_length);
    ui_state
}

/// Moves the focus to the next commit row, skipping separators and wrapping around.
fn move_focus(
    ui_state: &UiState,
    visible: &[usize],
    choices: &[Choice],
    direction: CycleDirection,
) -> UiState {
    let commit_rows: Vec<usize> = (0..visible.len())
        .filter(|&position| !choices[visible[position]].is_separator())
        .collect();

    let (Some(&first), Some(&last)) = (commit_rows.first(), commit_rows.last()) else {
        return ui_state.clone();
    };

    let current = ui_state.focused;
    let new_focus = match direction {
        Up => commit_rows
            .iter()
            .rev()
            .find(|&&position| position < current)
            .copied()
            .unwrap_or(last),
        Down => commit_rows
            .iter()
            .find(|&&position| position > current)
            .copied()
            .unwrap_or(first),
    };

    let mut ui_state = ui_state.clone();
    ui_state.focused = new_focus;
    if new_focus == first {
        // Keep the separator above the first commit in view
        ui_state.viewport.offset = 0;
    }
    scroll_to_focus(&mut ui_state, visible.len());
    ui_state
}

/// Adjusts the viewport offset so the focused row is on screen.
fn scroll_to_focus(ui_state: &mut UiState, visible_length: usize) {
    let height = ui_state.viewport.height.max(1) as usize;
    let viewport = &mut ui_state.viewport;

    if ui_state.focused < viewport.offset {
        viewport.offset = ui_state.focused;
    } else if ui_state.focused >= viewport.offset + height {
        viewport.offset = ui_state.focused + 1 - height;
    }

    viewport.offset = viewport.offset.min(visible_length.saturating_sub(height));
}

fn first_commit_row(visible: &[usize], choices: &[Choice]) -> Option<usize> {
    visible
        .iter()
        .position(|&index| !choices[index].is_separator())
}

fn redraw_ui(ui_state: &UiState, visible: &[usize], choices: &[Choice]) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    let total = choices.iter().filter(|choice| !choice.is_separator()).count();
    print_header(ui_state, total)?;

    if visible.is_empty() {
        queue!(
            stdout,
            MoveTo(0, 1),
            SetForegroundColor(Color::Red),
            Print("No matching commits!".to_string()),
            SetAttribute(Attribute::Reset),
            cursor::MoveToNextLine(1)
        )?;
    } else {
        print_rows(ui_state, visible, choices)?;
    }

    if ui_state.is_filtering || !ui_state.filter_text.is_empty() {
        queue!(
            stdout,
            MoveTo(0, ui_state.viewport.height + 1),
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

/// Key help for the current mode followed by the `selected/total` commit count
fn header_instructions(ui_state: &UiState, total: usize) -> String {
    let count = format!("{}/{total} selected", ui_state.selected.len());

    if ui_state.is_filtering {
        format!("<enter>: Keep Filter   |   <esc>: Clear Filter   |   {count}")
    } else {
        format!(
            "<space>: Toggle   |   <enter>: Done   |   /: Filter   |   q: Quit   |   {count}"
        )
    }
}

/// Print the header for the commit selection UI
fn print_header(ui_state: &UiState, total: usize) -> Result<()> {
    let mut stdout = stdout();
    let width = ui_state.viewport.width as usize;

    let left_padding_size = 2usize;
    let left_padding = " ".repeat(left_padding_size);

    let instructions = header_instructions(ui_state, total);
    let instructions = truncate(&instructions, width.saturating_sub(left_padding_size));

    let right_padding =
        " ".repeat(width.saturating_sub(left_padding_size + instructions.chars().count()));

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Print the visible rows with the focused one highlighted
fn print_rows(ui_state: &UiState, visible: &[usize], choices: &[Choice]) -> Result<()> {
    let viewport = &ui_state.viewport;

    let rows = visible
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (row, (position, &index)) in rows.enumerate() {
        clear_and_write_row(
            row as u16 + 1,
            &choices[index],
            position == ui_state.focused,
            ui_state.selected.contains(&index),
            viewport.width,
        )?;
    }

    Ok(())
}

/// Clear and write one row of the selection list
fn clear_and_write_row(
    row: u16,
    choice: &Choice,
    is_focused: bool,
    is_selected: bool,
    terminal_width: u16,
) -> Result<()> {
    let mut stdout = stdout();
    let terminal_width = terminal_width as usize;

    queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

    let content = match choice {
        Choice::Separator(_) => format!("    {choice}"),
        Choice::Commit(_) => {
            let checkbox = if is_selected { "[x]" } else { "[ ]" };
            format!("{checkbox} {choice}")
        }
    };
    let content = truncate(&content, terminal_width);
    let padding = " ".repeat(terminal_width.saturating_sub(content.chars().count()));

    match choice {
        Choice::Separator(_) => {
            queue!(stdout, SetForegroundColor(DarkGrey), SetAttribute(Attribute::Dim))?;
        }
        Choice::Commit(_) if is_focused => {
            queue!(
                stdout,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            )?;
        }
        Choice::Commit(commit_choice) if commit_choice.included => {
            queue!(stdout, SetForegroundColor(DarkGrey))?;
        }
        Choice::Commit(_) => {}
    }

    queue!(stdout, Print(content), Print(padding))?;

    queue!(
        stdout,
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cherry_cuts_core::commit::Commit;
    use cherry_cuts_core::selection::CommitChoice;
    use chrono::NaiveDate;

    fn commit_choice(hash: &str, subject: &str) -> Choice {
        Choice::Commit(CommitChoice::new(
            Commit {
                source_branch: "develop".to_string(),
                timestamp_millis: 0,
                short_hash: hash.to_string(),
                full_hash: format!("{hash}000"),
                author_name: "Jane Doe".to_string(),
                subject: subject.to_string(),
            },
            false,
        ))
    }

    fn separator() -> Choice {
        Choice::Separator(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
    }

    /// a, |, b, c, |, d
    fn sample_choices() -> Vec<Choice> {
        vec![
            commit_choice("aaa", "Add payroll export"),
            separator(),
            commit_choice("bbb", "Tweak logging"),
            commit_choice("ccc", "Payroll rounding"),
            separator(),
            commit_choice("ddd", "Bump deps"),
        ]
    }

    fn state(height: u16) -> UiState {
        UiState::new(ViewportState::for_terminal(80, height + 2, height))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_move_focus_skips_separators() {
        let choices = sample_choices();
        let visible: Vec<usize> = (0..choices.len()).collect();
        let ui_state = state(10);

        let next = move_focus(&ui_state, &visible, &choices, Down);
        assert_eq!(next.focused, 2);

        let next = move_focus(&next, &visible, &choices, Down);
        let next = move_focus(&next, &visible, &choices, Down);
        assert_eq!(next.focused, 5);
    }

    #[test]
    fn test_move_focus_wraps() {
        let choices = sample_choices();
        let visible: Vec<usize> = (0..choices.len()).collect();
        let ui_state = state(10);

        let up = move_focus(&ui_state, &visible, &choices, Up);
        assert_eq!(up.focused, 5);

        let down = move_focus(&up, &visible, &choices, Down);
        assert_eq!(down.focused, 0);
    }

    #[test]
    fn test_move_focus_scrolls_viewport() {
        let choices = sample_choices();
        let visible: Vec<usize> = (0..choices.len()).collect();
        let mut ui_state = state(2);
        ui_state.focused = 2;
        ui_state.viewport.offset = 1;

        let next = move_focus(&ui_state, &visible, &choices, Down);
        assert_eq!(next.focused, 3);
        assert_eq!(next.viewport.offset, 2);

        let wrapped = move_focus(&state(2), &visible, &choices, Up);
        assert_eq!(wrapped.focused, 5);
        assert_eq!(wrapped.viewport.offset, 4);
    }

    #[test]
    fn test_move_focus_without_commits() {
        let choices = vec![separator()];
        let ui_state = state(10);
        assert_eq!(move_focus(&ui_state, &[], &choices, Down), ui_state);
    }

    #[test]
    fn test_space_toggles_in_insertion_order() {
        let choices = sample_choices();
        let visible: Vec<usize> = (0..choices.len()).collect();
        let mut ui_state = state(10);

        ui_state.focused = 5;
        let (_, toggled, _) = handle_key_event(
            key(KeyCode::Char(' ')),
            &ui_state,
            &visible,
            &choices,
            FilterMode::Substring,
        );
        let mut ui_state = toggled.unwrap();
        ui_state.focused = 0;
        ui_state = toggle_focused(&ui_state, &visible, &choices);
        assert_eq!(ui_state.selected.iter().copied().collect::<Vec<_>>(), vec![5, 0]);

        ui_state.focused = 5;
        ui_state = toggle_focused(&ui_state, &visible, &choices);
        assert_eq!(ui_state.selected.iter().copied().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_toggle_ignores_separators() {
        let choices = sample_choices();
        let visible: Vec<usize> = (0..choices.len()).collect();
        let mut ui_state = state(10);
        ui_state.focused = 1;

        assert!(toggle_focused(&ui_state, &visible, &choices).selected.is_empty());
    }

    #[test]
    fn test_typing_filters_and_refocuses() {
        let choices = sample_choices();
        let visible: Vec<usize> = (0..choices.len()).collect();
        let mut ui_state = state(10);
        ui_state.is_filtering = true;

        let (action, new_state, _) = handle_key_event(
            key(KeyCode::Char('t')),
            &ui_state,
            &visible,
            &choices,
            FilterMode::Substring,
        );
        assert!(action.is_none());
        let new_state = new_state.unwrap();
        assert_eq!(new_state.filter_text, "t");

        let (_, new_state, _) = handle_key_event(
            key(KeyCode::Char('w')),
            &new_state,
            &visible,
            &choices,
            FilterMode::Substring,
        );
        let new_state = new_state.unwrap();
        // Only "Tweak logging" matches: separator at 1, commit at 2
        assert_eq!(new_state.filter_text, "tw");
        assert_eq!(new_state.focused, 1);
    }

    #[test]
    fn test_escape_clears_filter_then_cancels() {
        let choices = sample_choices();
        let visible: Vec<usize> = (0..choices.len()).collect();
        let mut ui_state = state(10);
        ui_state.is_filtering = true;
        ui_state.filter_text = "pay".to_string();

        let (action, new_state, _) = handle_key_event(
            key(KeyCode::Esc),
            &ui_state,
            &visible,
            &choices,
            FilterMode::Substring,
        );
        assert!(action.is_none());
        let new_state = new_state.unwrap();
        assert!(!new_state.is_filtering);
        assert!(new_state.filter_text.is_empty());

        let (action, _, _) = handle_key_event(
            key(KeyCode::Esc),
            &new_state,
            &visible,
            &choices,
            FilterMode::Substring,
        );
        assert_eq!(action, Some(ListAction::Cancel));
    }

    #[test]
    fn test_enter_confirms_when_not_filtering() {
        let choices = sample_choices();
        let visible: Vec<usize> = (0..choices.len()).collect();
        let mut ui_state = state(10);

        let (action, _, _) = handle_key_event(
            key(KeyCode::Enter),
            &ui_state,
            &visible,
            &choices,
            FilterMode::Substring,
        );
        assert_eq!(action, Some(ListAction::Confirm));

        ui_state.is_filtering = true;
        let (action, new_state, _) = handle_key_event(
            key(KeyCode::Enter),
            &ui_state,
            &visible,
            &choices,
            FilterMode::Substring,
        );
        assert!(action.is_none());
        assert!(!new_state.unwrap().is_filtering);
    }

    #[test]
    fn test_ctrl_c_and_q_cancel() {
        let choices = sample_choices();
        let visible: Vec<usize> = (0..choices.len()).collect();
        let ui_state = state(10);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let (action, _, _) =
            handle_key_event(ctrl_c, &ui_state, &visible, &choices, FilterMode::Substring);
        assert_eq!(action, Some(ListAction::Cancel));

        let (action, _, _) = handle_key_event(
            key(KeyCode::Char('q')),
            &ui_state,
            &visible,
            &choices,
            FilterMode::Substring,
        );
        assert_eq!(action, Some(ListAction::Cancel));
    }

    #[test]
    fn test_finish_returns_commits_in_pick_order() {
        let choices = sample_choices();
        let mut ui_state = state(10);
        ui_state.selected.insert(5);
        ui_state.selected.insert(2);

        let SelectionOutcome::Selected(commits) =
            finish(ListAction::Confirm, &ui_state, &choices)
        else {
            panic!("Expected a selection");
        };
        let hashes: Vec<&str> = commits.iter().map(|c| c.short_hash.as_str()).collect();
        assert_eq!(hashes, vec!["ddd", "bbb"]);

        assert_eq!(
            finish(ListAction::Cancel, &ui_state, &choices),
            SelectionOutcome::Cancelled
        );
    }

    #[test]
    fn test_click_toggles_commit_row() {
        let choices = sample_choices();
        let visible: Vec<usize> = (0..choices.len()).collect();
        let ui_state = state(10);

        // Row 3 is position 2 ("bbb")
        let clicked = handle_click(3, &ui_state, &visible, &choices).unwrap();
        assert_eq!(clicked.focused, 2);
        assert!(clicked.selected.contains(&2));

        assert!(handle_click(0, &ui_state, &visible, &choices).is_none());
        assert!(handle_click(2, &ui_state, &visible, &choices).is_none());
    }

    #[test]
    fn test_header_shows_selected_of_total() {
        let mut ui_state = state(10);
        ui_state.selected.insert(2);
        ui_state.selected.insert(5);

        let instructions = header_instructions(&ui_state, 4);
        assert!(instructions.ends_with("2/4 selected"));
        assert!(instructions.starts_with("<space>: Toggle"));

        ui_state.is_filtering = true;
        let instructions = header_instructions(&ui_state, 4);
        assert!(instructions.starts_with("<enter>: Keep Filter"));
        assert!(instructions.ends_with("2/4 selected"));
    }

    #[test]
    fn test_resize_keeps_focus_visible() {
        let mut ui_state = state(10);
        ui_state.focused = 5;

        let resized = handle_resize(80, 4, 20, &ui_state, 6);
        assert_eq!(resized.viewport.height, 2);
        assert_eq!(resized.viewport.offset, 4);
    }
}
