use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, text, text_input},
};

use crate::core::auth::{self, AuthOutcome};
use crate::gui::{
    AppState,
    screens::{Page, PageMessage, ParentMessage},
};

const FIELD_WIDTH: f32 = 240.0;

#[derive(Debug, Clone)]
pub struct AuthPage;

#[derive(Debug, Clone)]
pub enum AuthMessage {
    UsernameChanged(String),
    PasswordChanged(String),
    Submit,
    Toggle,
    Completed(AuthOutcome),
}

impl Page for AuthPage {
    type Message = AuthMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, PageMessage<Self>> {
        let form = &state.auth;
        let submit = PageMessage::PageMessage(AuthMessage::Submit);

        let content = column![
            text(form.title()).size(24),
            text("Username"),
            text_input("", &form.username)
                .on_input(|value| PageMessage::PageMessage(AuthMessage::UsernameChanged(value)))
                .on_submit(submit.clone())
                .width(Length::Fixed(FIELD_WIDTH)),
            text("Password"),
            text_input("", &form.password)
                .secure(true)
                .on_input(|value| PageMessage::PageMessage(AuthMessage::PasswordChanged(value)))
                .on_submit(submit.clone())
                .width(Length::Fixed(FIELD_WIDTH)),
            button(text(form.action_label()))
                .width(Length::Fixed(FIELD_WIDTH))
                .style(button::success)
                .on_press(submit),
            button(text(form.toggle_label()))
                .style(button::text)
                .on_press(PageMessage::PageMessage(AuthMessage::Toggle)),
        ]
        .spacing(10)
        .padding(50)
        .align_x(Center);

        container(content).center_x(Length::Fill).into()
    }

    fn update(&mut self, message: Self::Message, state: &mut AppState) -> Task<PageMessage<Self>> {
        match message {
            AuthMessage::UsernameChanged(value) => {
                state.auth.username = value;
                Task::none()
            }
            AuthMessage::PasswordChanged(value) => {
                state.auth.password = value;
                Task::none()
            }
            AuthMessage::Toggle => {
                state.auth.toggle();
                Task::none()
            }
            AuthMessage::Submit => match state.auth.submit() {
                Err(notice) => Task::done(PageMessage::ParentMessage(ParentMessage::Notify(notice))),
                Ok(request) => {
                    let store = state.store.clone();
                    Task::perform(
                        async move { auth::execute(&store, request).await },
                        |outcome| PageMessage::PageMessage(AuthMessage::Completed(outcome)),
                    )
                }
            },
            AuthMessage::Completed(outcome) => {
                let response = state.auth.complete(outcome);
                let notify = Task::done(PageMessage::ParentMessage(ParentMessage::Notify(
                    response.notice,
                )));
                match response.navigate {
                    Some(screen) => notify.chain(Task::done(PageMessage::ParentMessage(
                        ParentMessage::Navigate(screen),
                    ))),
                    None => notify,
                }
            }
        }
    }
}
