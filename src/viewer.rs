use iced::widget::{container, image as iced_image};
use iced::{event, keyboard, Element, Event, Length, Size, Subscription, Task};
use image::{DynamicImage, RgbImage};

#[derive(Debug, Clone)]
pub enum Message {
    KeyPressed,
}

struct Viewer {
    handle: iced_image::Handle,
}

impl Viewer {
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::KeyPressed => iced::exit(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        container(iced_image(self.handle.clone()))
            .center(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(on_event)
    }
}

fn on_event(event: Event, _status: event::Status, _window: iced::window::Id) -> Option<Message> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { .. }) => Some(Message::KeyPressed),
        _ => None,
    }
}

/// Show the image in a window and block until a key is pressed or the window is closed
pub fn show(title: &'static str, img: &RgbImage) -> anyhow::Result<()> {
    let rgba = DynamicImage::ImageRgb8(img.clone()).into_rgba8();
    let size = Size::new(rgba.width() as f32, rgba.height() as f32);
    let handle = iced_image::Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw());

    iced::application(
        move || Viewer {
            handle: handle.clone(),
        },
        Viewer::update,
        Viewer::view,
    )
    .title(title)
    .subscription(Viewer::subscription)
    .window_size(size)
    .run()
    .map_err(|e| anyhow::anyhow!("Image viewer failed: {}", e))
}
