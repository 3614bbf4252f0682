pub mod about;
pub mod auth;
pub mod home;

use iced::{Element, Task};

use crate::core::{Notice, Screen};
use crate::gui::AppState;

#[derive(Debug, Clone)]
pub enum PageMessage<P: Page> {
    PageMessage(P::Message),
    ParentMessage(P::ParentMessage),
}

/// Requests a page makes of the application
#[derive(Debug, Clone)]
pub enum ParentMessage {
    Navigate(Screen),
    Notify(Notice),
    Exit,
}

pub trait Page: Sized {
    type Message: std::fmt::Debug + Clone;
    type ParentMessage: std::fmt::Debug + Clone;
    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, PageMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState) -> Task<PageMessage<Self>>;
}
