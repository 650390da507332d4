use crate::{
    AddOutcome, ClientConfig, FlixClient, HomeState, Movie, MovieRow, Result, Session,
    SessionStore, SIGN_IN_REQUIRED_NOTICE,
};

/// Represents the current screen being displayed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppScreen {
    /// Hero and rows; the resting screen.
    Browse,
    /// Running the home load sequence.
    LoadingHome,
    /// Seeding the catalog, then reloading.
    Seeding,
    /// Saving a title to the personal list.
    AddingToList { movie_id: i64 },
    /// Fetching a single title for the details panel.
    LoadingDetails { movie_id: i64 },
    /// "More info" panel.
    Details,
    /// Sign-in / sign-up form.
    AuthForm,
    /// Waiting for the backend to answer the auth form.
    SubmittingAuth,
    /// Blocking notice; must be dismissed.
    Notice,
}

/// Whether the auth form signs in or creates an account.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AuthMode {
    SignIn,
    SignUp,
}

/// Field of the auth form that receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AuthField {
    Name,
    Email,
    Password,
}

/// Sign-in / sign-up form contents.
#[derive(Debug, Clone)]
pub(crate) struct AuthFormState {
    pub(crate) mode: AuthMode,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) focus: AuthField,
    /// Backend message of the last failed submission, shown inline.
    pub(crate) error: Option<String>,
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self {
            mode: AuthMode::SignIn,
            name: String::new(),
            email: "demo@flix.com".to_string(),
            password: "demo".to_string(),
            focus: AuthField::Email,
            error: None,
        }
    }
}

impl AuthFormState {
    /// Fields in tab order for the current mode.
    pub(crate) fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::SignIn => &[AuthField::Email, AuthField::Password],
            AuthMode::SignUp => &[AuthField::Name, AuthField::Email, AuthField::Password],
        }
    }

    pub(crate) fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Name => &mut self.name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub(crate) fn cycle_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % fields.len()
        } else {
            (pos + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    pub(crate) fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        if !self.fields().contains(&self.focus) {
            self.focus = AuthField::Email;
        }
        self.error = None;
    }

    /// Name sent on sign-up; blank becomes "Demo User".
    pub(crate) fn signup_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            "Demo User"
        } else {
            name
        }
    }
}

/// Main application state.
pub struct AppState {
    /// Current screen being displayed.
    pub(crate) screen: AppScreen,
    /// Backend client.
    pub(crate) client: FlixClient,
    /// Current session, shared by every part of the view.
    pub(crate) session: SessionStore,
    /// Catalog slices and personal list.
    pub(crate) home: HomeState,
    /// Index of the focused row.
    pub(crate) focused_row: usize,
    /// Selected column of each row.
    pub(crate) selections: Vec<usize>,
    /// Auth form contents.
    pub(crate) auth_form: AuthFormState,
    /// Message of the blocking notice.
    pub(crate) notice: Option<String>,
    /// Error message to display.
    pub(crate) error_message: Option<String>,
    /// Should the application quit?
    pub should_quit: bool,
}

impl AppState {
    /// Create the application state for the configured backend.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            screen: AppScreen::Browse,
            client: FlixClient::new(&config.backend_url)?,
            session: SessionStore::new(),
            home: HomeState::new(),
            focused_row: 0,
            selections: Vec::new(),
            auth_form: AuthFormState::default(),
            notice: None,
            error_message: None,
            should_quit: false,
        })
    }

    pub fn session(&self) -> &Session {
        self.session.session()
    }

    pub fn home(&self) -> &HomeState {
        &self.home
    }

    /// True when no work is pending and no modal is open.
    pub fn is_browsing(&self) -> bool {
        self.screen == AppScreen::Browse
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn auth_error(&self) -> Option<&str> {
        self.auth_form.error.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub(crate) fn rows(&self) -> Vec<MovieRow<'_>> {
        self.home.rows(self.session.session())
    }

    pub(crate) fn selection(&self, row: usize) -> usize {
        self.selections.get(row).copied().unwrap_or(0)
    }

    /// Movie under the cursor and whether its row offers "+ My List".
    pub(crate) fn selected_movie(&self) -> Option<(&Movie, bool)> {
        let rows = self.rows();
        let row = rows.get(self.focused_row).copied()?;
        let movie = row.items.get(self.selection(self.focused_row))?;
        Some((movie, row.allows_add))
    }

    pub(crate) fn move_row(&mut self, down: bool) {
        let count = self.rows().len();
        if down {
            if self.focused_row + 1 < count {
                self.focused_row += 1;
            }
        } else {
            self.focused_row = self.focused_row.saturating_sub(1);
        }
    }

    pub(crate) fn move_column(&mut self, right: bool) {
        let len = match self.rows().get(self.focused_row) {
            Some(row) => row.items.len(),
            None => return,
        };
        let row = self.focused_row;
        if self.selections.len() <= row {
            self.selections.resize(row + 1, 0);
        }
        let current = self.selections[row];
        self.selections[row] = if right {
            (current + 1).min(len.saturating_sub(1))
        } else {
            current.saturating_sub(1)
        };
    }

    /// Keep focus and selections inside the rows that exist now.
    pub(crate) fn clamp_cursor(&mut self) {
        let lens: Vec<usize> = self.rows().iter().map(|r| r.items.len()).collect();
        self.focused_row = self.focused_row.min(lens.len().saturating_sub(1));
        self.selections.resize(lens.len(), 0);
        for (sel, len) in self.selections.iter_mut().zip(lens) {
            *sel = (*sel).min(len.saturating_sub(1));
        }
    }

    pub(crate) fn load_home(&mut self) -> Result<()> {
        let result = self.home.load(&self.client, self.session.session());
        self.clamp_cursor();
        result
    }

    pub(crate) fn seed(&mut self) -> Result<()> {
        let result = self.home.seed(&self.client, self.session.session());
        self.clamp_cursor();
        result
    }

    pub(crate) fn add_to_list(&mut self, movie_id: i64) -> Result<()> {
        let outcome = self
            .home
            .add_to_list(&self.client, self.session.session(), movie_id)?;
        if outcome == AddOutcome::SignInRequired {
            self.show_notice(SIGN_IN_REQUIRED_NOTICE);
        }
        Ok(())
    }

    pub(crate) fn show_details(&mut self, movie_id: i64) -> Result<()> {
        self.home.show_details(&self.client, movie_id)
    }

    /// Submit the auth form; on success the session is replaced.
    pub(crate) fn submit_auth(&mut self) -> Result<()> {
        let form = &self.auth_form;
        let auth = match form.mode {
            AuthMode::SignIn => self.client.auth().login(&form.email, &form.password)?,
            AuthMode::SignUp => {
                self.client
                    .auth()
                    .register(form.signup_name(), &form.email, &form.password)?
            }
        };
        self.session.sign_in(auth)
    }

    pub(crate) fn sign_out(&mut self) {
        self.session.sign_out();
    }

    pub(crate) fn show_notice(&mut self, message: &str) {
        self.notice = Some(message.to_string());
        self.screen = AppScreen::Notice;
    }

    /// Clear any error message.
    pub(crate) fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set an error message.
    pub(crate) fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Movie, User};

    fn movie(id: i64) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            description: String::new(),
            thumbnail_url: String::new(),
            genre: "Drama".into(),
            featured: false,
        }
    }

    fn state() -> AppState {
        AppState::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap()
    }

    #[test]
    fn auth_form_defaults_to_demo_credentials() {
        let form = AuthFormState::default();
        assert_eq!(form.mode, AuthMode::SignIn);
        assert_eq!(form.email, "demo@flix.com");
        assert_eq!(form.password, "demo");
    }

    #[test]
    fn signup_name_defaults_when_blank() {
        let mut form = AuthFormState::default();
        assert_eq!(form.signup_name(), "Demo User");
        form.name = "Ada".into();
        assert_eq!(form.signup_name(), "Ada");
    }

    #[test]
    fn toggling_mode_moves_focus_off_hidden_name_field() {
        let mut form = AuthFormState::default();
        form.toggle_mode();
        form.focus = AuthField::Name;
        form.toggle_mode();
        assert_eq!(form.mode, AuthMode::SignIn);
        assert_eq!(form.focus, AuthField::Email);
    }

    #[test]
    fn focus_cycles_through_visible_fields() {
        let mut form = AuthFormState::default();
        form.cycle_focus(true);
        assert_eq!(form.focus, AuthField::Password);
        form.cycle_focus(true);
        assert_eq!(form.focus, AuthField::Email);
        form.cycle_focus(false);
        assert_eq!(form.focus, AuthField::Password);
    }

    #[test]
    fn column_selection_stays_inside_row() {
        let mut state = state();
        state.home.movies = vec![movie(1), movie(2)];
        state.move_column(true);
        state.move_column(true);
        state.move_column(true);
        assert_eq!(state.selection(0), 1);
        assert_eq!(state.selected_movie().map(|(m, _)| m.id), Some(2));
        state.move_column(false);
        state.move_column(false);
        assert_eq!(state.selection(0), 0);
    }

    #[test]
    fn clamp_drops_focus_from_vanished_my_list_row() {
        let mut state = state();
        state.session.sign_in(crate::AuthResponse {
            token: "t1".into(),
            user: User {
                id: 1,
                name: "Demo".into(),
                email: "demo@flix.com".into(),
            },
        })
        .unwrap();
        state.home.my_list = vec![movie(5)];
        state.move_row(true);
        state.move_row(true);
        assert_eq!(state.focused_row, 2);

        state.sign_out();
        state.clamp_cursor();
        assert_eq!(state.focused_row, 1);
    }
}
