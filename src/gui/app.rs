use std::path::PathBuf;

use iced::widget::{button, column, container, image as image_widget, row, text};
use iced::{Element, Length, Task, Theme};
use image::DynamicImage;

use super::Message;
use crate::adjust::Adjustment;
use crate::detect::{DetectionOutput, PassthroughDetector};
use crate::viewer::ViewerSession;

/// Launch the viewer window, optionally preloading an image.
pub fn run(preload: Option<PathBuf>) -> iced::Result {
    iced::application(App::title, App::update, App::view)
        .theme(App::theme)
        .run_with(move || {
            let task = match preload.clone() {
                Some(path) => Task::done(Message::ImagePicked(Some(path))),
                None => Task::none(),
            };
            (App::new(), task)
        })
}

struct App {
    session: ViewerSession<PassthroughDetector>,
    original: Option<image_widget::Handle>,
    annotated: Option<image_widget::Handle>,
    status: String,
}

impl App {
    fn new() -> Self {
        Self {
            session: ViewerSession::new(PassthroughDetector),
            original: None,
            annotated: None,
            status: "Load an image to start".to_string(),
        }
    }

    fn title(&self) -> String {
        "Roadsight - Vehicle Detection Viewer".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenImage => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .add_filter("images", &["jpg", "jpeg", "png", "bmp"])
                            .pick_file()
                            .await
                            .map(|file| file.path().to_path_buf())
                    },
                    Message::ImagePicked,
                );
            }
            Message::ImagePicked(Some(path)) => match self.session.load_image(&path) {
                Ok(output) => {
                    self.show(output);
                    self.status = format!("Loaded {}", path.display());
                }
                Err(err) => self.fail(err),
            },
            Message::ImagePicked(None) => {}
            Message::Apply(op) => match self.session.apply(op) {
                Ok(output) => {
                    self.show(output);
                    self.status = status_for(op, self.session.state());
                }
                Err(err) => self.fail(err),
            },
            Message::Reset => match self.session.reset() {
                Ok(output) => {
                    self.show(output);
                    self.status = "Adjustments reset".to_string();
                }
                Err(err) => self.fail(err),
            },
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let loaded = self.session.has_image();
        let controls = row![
            button(text("Load Image")).on_press(Message::OpenImage),
            button(text("Sharpen"))
                .on_press_maybe(loaded.then_some(Message::Apply(Adjustment::Sharpen))),
            button(text("Rotate"))
                .on_press_maybe(loaded.then_some(Message::Apply(Adjustment::Rotate))),
            button(text("Grayscale"))
                .on_press_maybe(loaded.then_some(Message::Apply(Adjustment::Grayscale))),
            button(text("Brightness+"))
                .on_press_maybe(loaded.then_some(Message::Apply(Adjustment::Brightness))),
            button(text("Contrast+"))
                .on_press_maybe(loaded.then_some(Message::Apply(Adjustment::Contrast))),
            button(text("Reset")).on_press_maybe(loaded.then_some(Message::Reset)),
        ]
        .spacing(10);

        let panes = row![
            pane("Original", self.original.as_ref()),
            pane("Detection", self.annotated.as_ref()),
        ]
        .spacing(20)
        .height(Length::Fill);

        let content = column![controls, panes, text(&self.status)]
            .spacing(15)
            .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn show(&mut self, output: DetectionOutput) {
        self.original = Some(to_handle(&output.original));
        self.annotated = Some(to_handle(&output.annotated));
    }

    // Failures surface in the status line and clear the panes; the
    // application keeps running.
    fn fail(&mut self, err: crate::error::Error) {
        self.status = err.to_string();
        self.original = None;
        self.annotated = None;
    }
}

fn pane<'a>(label: &'a str, handle: Option<&image_widget::Handle>) -> Element<'a, Message> {
    let body: Element<'a, Message> = match handle {
        Some(handle) => image_widget(handle.clone()).into(),
        None => text("No content").into(),
    };
    column![text(label), body]
        .spacing(5)
        .width(Length::Fill)
        .into()
}

fn status_for(op: Adjustment, state: &crate::adjust::AdjustState) -> String {
    match op {
        Adjustment::Rotate => format!("Rotated to {}°", state.rotation_degrees),
        Adjustment::Grayscale if state.grayscale => "Grayscale on".to_string(),
        Adjustment::Grayscale => "Grayscale off".to_string(),
        Adjustment::Sharpen => format!("Sharpen x{:.1}", state.sharpen),
        Adjustment::Brightness => format!("Brightness x{:.1}", state.brightness),
        Adjustment::Contrast => format!("Contrast x{:.1}", state.contrast),
    }
}

fn to_handle(img: &DynamicImage) -> image_widget::Handle {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    image_widget::Handle::from_rgba(width, height, rgba.into_raw())
}
