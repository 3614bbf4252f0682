use crate::core::Screen;
use crate::gui::screens::{
    PageMessage, about::AboutPage, auth::AuthPage, home::HomePage,
};

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Screen),
    Home(PageMessage<HomePage>),
    Auth(PageMessage<AuthPage>),
    About(PageMessage<AboutPage>),
    WebcamTick,
    NoticeClosed,
}
