use std::sync::Arc;

use iced::widget::image::Handle;
use image::DynamicImage;

use crate::core::{AuthForm, CredentialStore, Session};
use crate::speech::SpeechNotifier;

/// Everything the screens read and mutate
pub struct AppState {
    pub session: Session,
    pub auth: AuthForm,
    pub store: Arc<CredentialStore>,
    pub speech: SpeechNotifier,
    preview: Option<Handle>,
}

impl AppState {
    pub fn new(session: Session, store: CredentialStore, speech: SpeechNotifier) -> Self {
        Self {
            session,
            auth: AuthForm::default(),
            store: Arc::new(store),
            speech,
            preview: None,
        }
    }

    /// Image handle for the current display frame
    pub fn preview(&self) -> Option<&Handle> {
        self.preview.as_ref()
    }

    /// Rebuild the preview after the session's display changed
    pub fn refresh_preview(&mut self) {
        self.preview = self.session.display().map(|frame| {
            let rgba = DynamicImage::ImageRgb8(frame.clone()).to_rgba8();
            let (width, height) = rgba.dimensions();
            Handle::from_rgba(width, height, rgba.into_raw())
        });
    }
}
