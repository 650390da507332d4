use super::state::{AppScreen, AppState};

/// Process the current state (e.g., fetch data during loading screens).
///
/// Called once per frame after drawing, so the pending screen has been
/// rendered before the blocking request starts.
pub fn process_state(state: &mut AppState) {
    match state.screen {
        AppScreen::Browse => {
            if state.home.needs_reload(state.session.session()) {
                state.screen = AppScreen::LoadingHome;
            }
        }
        AppScreen::LoadingHome => {
            if let Err(e) = state.load_home() {
                state.set_error(e.to_string());
            }
            state.screen = AppScreen::Browse;
        }
        AppScreen::Seeding => {
            if let Err(e) = state.seed() {
                state.set_error(e.to_string());
            }
            state.screen = AppScreen::Browse;
        }
        AppScreen::AddingToList { movie_id } => {
            state.screen = AppScreen::Browse;
            if let Err(e) = state.add_to_list(movie_id) {
                state.set_error(e.to_string());
            }
        }
        AppScreen::LoadingDetails { movie_id } => match state.show_details(movie_id) {
            Ok(()) => {
                state.screen = AppScreen::Details;
            }
            Err(e) => {
                state.set_error(e.to_string());
                state.screen = AppScreen::Browse;
            }
        },
        AppScreen::SubmittingAuth => match state.submit_auth() {
            Ok(()) => {
                state.auth_form.error = None;
                state.clear_error();
                state.screen = AppScreen::Browse;
            }
            Err(e) => {
                state.auth_form.error = Some(e.to_string());
                state.screen = AppScreen::AuthForm;
            }
        },
        _ => {}
    }
}
