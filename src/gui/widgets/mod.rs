use iced::{
    Element, Length, Theme,
    widget::{button, column, container, row, text},
};
use iced_widget::container::bordered_box;

use crate::core::Screen;
use crate::gui::Message;

const NAV_ITEMS: [(&str, Screen); 3] = [
    ("Home", Screen::Home),
    ("Login/Signup", Screen::Auth),
    ("About", Screen::About),
];

/// Top navigation bar, shown above every screen
fn navbar<'a>(current: Screen) -> Element<'a, Message> {
    let items = NAV_ITEMS.iter().map(|(label, screen)| -> Element<'a, Message> {
        let style: fn(&Theme, button::Status) -> button::Style =
            if *screen == current { button::primary } else { button::text };
        button(text(*label))
            .style(style)
            .padding([10, 20])
            .on_press(Message::Navigate(*screen))
            .into()
    });

    container(row(items).spacing(10))
        .width(Length::Fill)
        .padding(5)
        .style(bordered_box)
        .into()
}

/// Navigation bar over the current screen's content
pub fn layout<'a>(current: Screen, content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    column![navbar(current), container(content.into()).height(Length::Fill)].into()
}
