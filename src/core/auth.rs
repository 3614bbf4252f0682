use crate::core::credentials::CredentialStore;
use crate::core::session::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A modal message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: &'static str,
}

impl Notice {
    pub const fn info(title: &'static str, message: &'static str) -> Self {
        Self { level: NoticeLevel::Info, title, message }
    }

    pub const fn error(title: &'static str, message: &'static str) -> Self {
        Self { level: NoticeLevel::Error, title, message }
    }
}

/// Work the credential store has to do for a submitted form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login { username: String, password: String },
    Signup { username: String, password: String },
}

/// Result of running an [`AuthRequest`] against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    LoginChecked(bool),
    SignedUp,
    /// The store could not be read or written
    StoreFailed,
}

/// What the screen should do after an auth step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub notice: Notice,
    pub navigate: Option<Screen>,
}

/// The combined login/signup form and its two-state mode
#[derive(Debug, Clone)]
pub struct AuthForm {
    mode: AuthMode,
    pub username: String,
    pub password: String,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            username: String::new(),
            password: String::new(),
        }
    }
}

impl AuthForm {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Login Page",
            AuthMode::Signup => "Signup Page",
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Signup",
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Don't have an account? Signup Here",
            AuthMode::Signup => "Already have an account? Login Here",
        }
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
    }

    /// Validate the form for the current mode.
    /// Signup with an empty field never reaches the store.
    pub fn submit(&self) -> Result<AuthRequest, Notice> {
        let username = self.username.clone();
        let password = self.password.clone();
        match self.mode {
            AuthMode::Login => Ok(AuthRequest::Login { username, password }),
            AuthMode::Signup if username.is_empty() || password.is_empty() => Err(Notice::error(
                "Signup",
                "Please enter valid credentials",
            )),
            AuthMode::Signup => Ok(AuthRequest::Signup { username, password }),
        }
    }

    /// Apply the store's answer
    pub fn complete(&mut self, outcome: AuthOutcome) -> AuthResponse {
        match outcome {
            AuthOutcome::LoginChecked(true) => AuthResponse {
                notice: Notice::info("Login", "Login Successful"),
                navigate: Some(Screen::Home),
            },
            AuthOutcome::LoginChecked(false) => AuthResponse {
                notice: Notice::error("Login", "Invalid Credentials"),
                navigate: None,
            },
            AuthOutcome::SignedUp => {
                self.mode = AuthMode::Login;
                AuthResponse {
                    notice: Notice::info("Signup", "Account created successfully!"),
                    navigate: None,
                }
            }
            AuthOutcome::StoreFailed => AuthResponse {
                notice: Notice::error("Account", "Could not access the user database"),
                navigate: None,
            },
        }
    }
}

/// Run a submitted request against the store. Store errors are logged
/// and reported as [`AuthOutcome::StoreFailed`].
pub async fn execute(store: &CredentialStore, request: AuthRequest) -> AuthOutcome {
    let result = match &request {
        AuthRequest::Login { username, password } => store
            .validate(username, password)
            .await
            .map(AuthOutcome::LoginChecked),
        AuthRequest::Signup { username, password } => store
            .save(username, password)
            .await
            .map(|()| AuthOutcome::SignedUp),
    };

    result.unwrap_or_else(|e| {
        log::error!("User store request failed: {:#}", e);
        AuthOutcome::StoreFailed
    })
}
