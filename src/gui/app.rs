use std::time::Duration;

use iced::{Element, Subscription, Task, Theme};
use rfd::{AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::core::{Notice, NoticeLevel, Screen};
use crate::gui::{
    AppState, Message,
    screens::{
        Page, PageMessage, ParentMessage, about::AboutPage, auth::AuthPage, home::HomePage,
    },
    widgets::layout,
};

pub struct RupeeLensApp {
    state: AppState,
    home: HomePage,
    auth: AuthPage,
    about: AboutPage,
    tick: Duration,
}

impl RupeeLensApp {
    pub fn new(state: AppState, preview_size: (u32, u32), tick: Duration) -> Self {
        Self {
            state,
            home: HomePage { preview_size },
            auth: AuthPage,
            about: AboutPage,
            tick,
        }
    }

    pub fn title(&self) -> String {
        "Indian Currency Detector".to_string()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(screen) => {
                self.state.session.show(screen);
                Task::none()
            }
            Message::Home(PageMessage::PageMessage(msg)) => {
                self.home.update(msg, &mut self.state).map(Message::Home)
            }
            Message::Auth(PageMessage::PageMessage(msg)) => {
                self.auth.update(msg, &mut self.state).map(Message::Auth)
            }
            Message::Home(PageMessage::ParentMessage(parent))
            | Message::Auth(PageMessage::ParentMessage(parent)) => self.handle_parent(parent),
            Message::About(PageMessage::PageMessage(never))
            | Message::About(PageMessage::ParentMessage(never)) => match never {},
            Message::WebcamTick => {
                match self.state.session.tick() {
                    Ok(true) => self.state.refresh_preview(),
                    Ok(false) => {}
                    // Warn once per run of failures, or when capture was given up
                    Err(e) if self.state.session.failed_ticks() == 1
                        || !self.state.session.webcam_active() =>
                    {
                        log::warn!("Webcam frame failed: {:#}", e)
                    }
                    Err(e) => log::debug!("Webcam frame failed again: {:#}", e),
                }
                Task::none()
            }
            Message::NoticeClosed => Task::none(),
        }
    }

    fn handle_parent(&mut self, message: ParentMessage) -> Task<Message> {
        match message {
            ParentMessage::Navigate(screen) => {
                self.state.session.show(screen);
                Task::none()
            }
            ParentMessage::Notify(notice) => show_notice(notice),
            ParentMessage::Exit => {
                self.state.session.stop_webcam();
                iced::exit()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let screen = self.state.session.screen();
        let content = match screen {
            Screen::Home => self.home.view(&self.state).map(Message::Home),
            Screen::Auth => self.auth.view(&self.state).map(Message::Auth),
            Screen::About => self.about.view(&self.state).map(Message::About),
        };
        layout(screen, content)
    }

    /// Webcam polling only exists while the capture session is active
    pub fn subscription(&self) -> Subscription<Message> {
        if self.state.session.webcam_active() {
            iced::time::every(self.tick).map(|_| Message::WebcamTick)
        } else {
            Subscription::none()
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn show_notice(notice: Notice) -> Task<Message> {
    let level = match notice.level {
        NoticeLevel::Info => MessageLevel::Info,
        NoticeLevel::Error => MessageLevel::Error,
    };
    Task::perform(
        AsyncMessageDialog::new()
            .set_level(level)
            .set_title(notice.title)
            .set_description(notice.message)
            .set_buttons(MessageButtons::Ok)
            .show(),
        |_| Message::NoticeClosed,
    )
}
