use std::path::PathBuf;

use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, image, row, text},
};
use iced_widget::container::bordered_box;
use rfd::AsyncFileDialog;

use crate::capture::IMAGE_EXTENSIONS;
use crate::gui::{
    AppState,
    screens::{Page, PageMessage, ParentMessage},
};

const BUTTON_WIDTH: f32 = 180.0;
const RESET_PHRASE: &str = "Spoken notes reset";

#[derive(Debug, Clone)]
pub struct HomePage {
    /// Size of the image panel, matching the session's display size
    pub preview_size: (u32, u32),
}

#[derive(Debug, Clone)]
pub enum HomeMessage {
    UploadImage,
    ImagePicked(Option<PathBuf>),
    StartWebcam,
    StopWebcam,
    ClearResults,
    ResetSpokenNotes,
    Exit,
}

fn action<'a>(
    label: &'a str,
    message: HomeMessage,
    style: fn(&iced::Theme, button::Status) -> button::Style,
) -> Element<'a, PageMessage<HomePage>> {
    button(text(label))
        .width(Length::Fixed(BUTTON_WIDTH))
        .style(style)
        .on_press(PageMessage::PageMessage(message))
        .into()
}

impl Page for HomePage {
    type Message = HomeMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, PageMessage<Self>> {
        let (width, height) = self.preview_size;
        let preview: Element<'a, PageMessage<Self>> = match state.preview() {
            Some(handle) => image(handle.clone()).into(),
            None => text("").into(),
        };
        let preview = container(preview)
            .width(Length::Fixed(width as f32))
            .height(Length::Fixed(height as f32))
            .style(bordered_box);

        let content = column![
            text("Indian Currency Detector").size(24),
            preview,
            text(state.session.summary()).size(14),
            row![
                action("Upload Image", HomeMessage::UploadImage, button::success),
                action("Start Webcam", HomeMessage::StartWebcam, button::primary),
            ]
            .spacing(10),
            row![
                action("Stop Webcam", HomeMessage::StopWebcam, button::secondary),
                action("Clear Results", HomeMessage::ClearResults, button::secondary),
            ]
            .spacing(10),
            action("Reset Spoken Notes", HomeMessage::ResetSpokenNotes, button::primary),
            action("Exit", HomeMessage::Exit, button::danger),
        ]
        .spacing(10)
        .padding(10)
        .align_x(Center);

        container(content).center_x(Length::Fill).into()
    }

    fn update(&mut self, message: Self::Message, state: &mut AppState) -> Task<PageMessage<Self>> {
        match message {
            HomeMessage::UploadImage => Task::perform(
                AsyncFileDialog::new()
                    .add_filter("Image files", IMAGE_EXTENSIONS)
                    .pick_file(),
                |handle| {
                    PageMessage::PageMessage(HomeMessage::ImagePicked(
                        handle.map(|data| data.path().to_path_buf()),
                    ))
                },
            ),
            HomeMessage::ImagePicked(Some(path)) => {
                match state.session.show_image(&path) {
                    Ok(()) => state.refresh_preview(),
                    Err(e) => log::error!("Detection failed for {:?}: {:#}", path, e),
                }
                Task::none()
            }
            HomeMessage::ImagePicked(None) => Task::none(),
            HomeMessage::StartWebcam => {
                match state.session.start_webcam() {
                    Ok(true) => {}
                    Ok(false) => log::debug!("Webcam already running"),
                    Err(e) => log::error!("Could not start webcam: {:#}", e),
                }
                Task::none()
            }
            HomeMessage::StopWebcam => {
                state.session.stop_webcam();
                Task::none()
            }
            HomeMessage::ClearResults => {
                state.session.clear_results();
                state.refresh_preview();
                Task::none()
            }
            HomeMessage::ResetSpokenNotes => {
                state.speech.speak(RESET_PHRASE);
                Task::none()
            }
            HomeMessage::Exit => Task::done(PageMessage::ParentMessage(ParentMessage::Exit)),
        }
    }
}
