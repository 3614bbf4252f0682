pub mod auth;
pub mod credentials;
pub mod session;

pub use auth::{AuthForm, AuthMode, AuthOutcome, AuthRequest, AuthResponse, Notice, NoticeLevel};
pub use credentials::CredentialStore;
pub use session::{MAX_FAILED_TICKS, Screen, Session};
