use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{AppScreen, AppState};

/// Main event handler that dispatches to the appropriate screen handler.
pub fn handle_event(event: Event, state: &mut AppState) {
    if let Event::Key(key_event) = event {
        if key_event.kind == KeyEventKind::Release {
            return;
        }

        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            state.should_quit = true;
            return;
        }

        match state.screen {
            AppScreen::Browse => handle_browse(key_event, state),
            AppScreen::AuthForm => handle_auth_form(key_event, state),
            AppScreen::Details => handle_details(key_event, state),
            AppScreen::Notice => handle_notice(key_event, state),
            _ => {}
        }
    }
}

fn handle_browse(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up => state.move_row(false),
        KeyCode::Down => state.move_row(true),
        KeyCode::Left => state.move_column(false),
        KeyCode::Right => state.move_column(true),
        KeyCode::Char('a') => {
            if let Some((movie, true)) = state.selected_movie() {
                let movie_id = movie.id;
                state.clear_error();
                state.screen = AppScreen::AddingToList { movie_id };
            }
        }
        KeyCode::Char('i') | KeyCode::Enter => {
            if let Some((movie, _)) = state.selected_movie() {
                let movie_id = movie.id;
                state.clear_error();
                state.screen = AppScreen::LoadingDetails { movie_id };
            }
        }
        KeyCode::Char('l') => {
            if !state.session.is_signed_in() {
                state.auth_form.error = None;
                state.screen = AppScreen::AuthForm;
            }
        }
        KeyCode::Char('o') => {
            if state.session.is_signed_in() {
                state.clear_error();
                state.sign_out();
            }
        }
        KeyCode::Char('s') => {
            if state.session.is_signed_in() {
                state.clear_error();
                state.screen = AppScreen::Seeding;
            }
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
        }
        _ => {}
    }
}

fn handle_auth_form(event: KeyEvent, state: &mut AppState) {
    let form = &mut state.auth_form;
    match event.code {
        KeyCode::Char('t') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            form.toggle_mode();
        }
        KeyCode::Char(c)
            if !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            form.focused_value_mut().push(c);
        }
        KeyCode::Backspace => {
            form.focused_value_mut().pop();
        }
        KeyCode::Tab | KeyCode::Down => form.cycle_focus(true),
        KeyCode::BackTab | KeyCode::Up => form.cycle_focus(false),
        KeyCode::Enter => {
            form.error = None;
            state.screen = AppScreen::SubmittingAuth;
        }
        KeyCode::Esc => {
            state.screen = AppScreen::Browse;
        }
        _ => {}
    }
}

fn handle_details(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('i') => {
            state.home.hide_details();
            state.screen = AppScreen::Browse;
        }
        KeyCode::Char('q') => {
            state.should_quit = true;
        }
        _ => {}
    }
}

fn handle_notice(event: KeyEvent, state: &mut AppState) {
    if matches!(event.code, KeyCode::Enter | KeyCode::Esc) {
        state.notice = None;
        state.screen = AppScreen::Browse;
    }
}
