use std::convert::Infallible;

use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{column, container, text},
};

use crate::gui::{
    AppState,
    screens::{Page, PageMessage},
};

const DESCRIPTION: &str = "This application helps visually challenged users detect Indian currency \
                           using computer vision and voice output.";

#[derive(Debug, Clone)]
pub struct AboutPage;

impl Page for AboutPage {
    type Message = Infallible;
    type ParentMessage = Infallible;

    fn view<'a>(&'a self, _state: &'a AppState) -> Element<'a, PageMessage<Self>> {
        let content = column![
            text("About This App").size(24),
            text(DESCRIPTION).width(Length::Fixed(700.0)),
        ]
        .spacing(40)
        .padding(50)
        .align_x(Center);

        container(content).center_x(Length::Fill).into()
    }

    fn update(&mut self, message: Self::Message, _state: &mut AppState) -> Task<PageMessage<Self>> {
        match message {}
    }
}
