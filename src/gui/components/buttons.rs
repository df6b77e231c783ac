use crate::gui::widget::{Button, Container, Text};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::button;
use iced::{Padding, Theme};

/// Visual weight of an [`ActionButton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Secondary,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensions {
    Small,
    Medium,
    Large,
}

pub struct ActionButton {
    label: String,
    kind: ButtonKind,
    dim: Dimensions,
}

impl ActionButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ButtonKind::Primary,
            dim: Dimensions::Medium,
        }
    }

    pub fn kind(mut self, kind: ButtonKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn dim(mut self, dim: Dimensions) -> Self {
        self.dim = dim;
        self
    }

    pub fn build<'a, Message: Clone + 'a>(self, on_press: Message) -> Button<'a, Message> {
        self.build_maybe(Some(on_press))
    }

    /// A `None` message renders the button disabled.
    pub fn build_maybe<'a, Message: Clone + 'a>(self, on_press: Option<Message>) -> Button<'a, Message> {
        let style = match self.kind {
            ButtonKind::Primary => button::primary,
            ButtonKind::Secondary => button::secondary,
            ButtonKind::Danger => button::danger,
        } as fn(&Theme, button::Status) -> button::Style;

        Button::new(
            Container::new(Text::new(self.label).size(15))
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center),
        )
        .padding(Padding {
            top: 8.0,
            right: 22.0,
            bottom: 8.0,
            left: 22.0,
        })
        .width(match self.dim {
            Dimensions::Small => 90,
            Dimensions::Medium => 140,
            Dimensions::Large => 170,
        })
        .style(style)
        .on_press_maybe(on_press)
    }
}
