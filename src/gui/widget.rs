use iced::widget as w;

pub type Theme = iced::Theme;
pub type IcedRenderer = iced::Renderer;

pub type Element<'a, Message> = iced::Element<'a, Message, Theme, IcedRenderer>;

pub type Container<'a, Message> = w::Container<'a, Message, Theme, IcedRenderer>;
pub type Row<'a, Message> = w::Row<'a, Message, Theme, IcedRenderer>;
pub type Column<'a, Message> = w::Column<'a, Message, Theme, IcedRenderer>;

pub type Text<'a> = w::Text<'a, Theme, IcedRenderer>;
pub type Button<'a, Message> = w::Button<'a, Message, Theme, IcedRenderer>;

pub trait IcedParentExt<'a, Message> {
    fn push_if<E>(self, condition: bool, element: impl FnOnce() -> E) -> Self
    where
        E: Into<Element<'a, Message>>;
}

impl<'a, Message> IcedParentExt<'a, Message> for Column<'a, Message> {
    fn push_if<E>(self, condition: bool, element: impl FnOnce() -> E) -> Self
    where
        E: Into<Element<'a, Message>>,
    {
        if condition {
            self.push(element().into())
        } else {
            self
        }
    }
}
