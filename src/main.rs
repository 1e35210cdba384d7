use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, slider, text, text_input, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;

use image_processor::{logging, ImageKind, JsonFileLog, Session, SessionError, SessionResult};

mod ui;

use ui::paths::AppDirs;
use ui::settings::Settings;

/// Main application state
struct ImageProcessor {
    /// The editing session; every image operation goes through it
    session: Session<JsonFileLog>,
    /// Control values persisted between runs
    settings: Settings,
    dirs: AppDirs,
    /// Downscaled copies for display
    original_preview: Option<Handle>,
    current_preview: Option<Handle>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    LoadImage,
    SaveImage,
    Undo,
    ResetToOriginal,
    NoiseChanged(u8),
    ApplyDenoise,
    Grayscale,
    WidthChanged(String),
    HeightChanged(String),
    Resize,
}

impl ImageProcessor {
    /// Create a new instance of the application
    fn new(dirs: AppDirs) -> (Self, Task<Message>) {
        let settings = Settings::load_or_default(&dirs.settings_file);
        let session = Session::new(JsonFileLog::in_dir(&dirs.logs));

        log::info!("Image processor started, actions logged to {}", dirs.logs.display());

        (
            ImageProcessor {
                session,
                settings,
                dirs,
                original_preview: None,
                current_preview: None,
                status: "Ready. Load an image to begin.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LoadImage => {
                let file = FileDialog::new()
                    .set_title("Select an image")
                    .add_filter("Supported images", ImageKind::extensions())
                    .add_filter("PNG", &["png"])
                    .add_filter("JPEG", &["jpg", "jpeg"])
                    .add_filter("BMP", &["bmp"])
                    .pick_file();

                if let Some(path) = file {
                    let result = self.session.load(&path);
                    if result.is_ok() {
                        self.save_settings();
                    }
                    self.report(result, format!("Image loaded: {}", path.display()));
                }
            }
            Message::SaveImage => {
                if self.session.current().is_none() {
                    self.status = "No image to save".to_string();
                    return Task::none();
                }

                let file = FileDialog::new()
                    .set_title("Save image")
                    .set_directory(&self.dirs.output)
                    .set_file_name("result.jpg")
                    .add_filter("JPEG", &["jpg", "jpeg"])
                    .add_filter("PNG", &["png"])
                    .add_filter("BMP", &["bmp"])
                    .save_file();

                if let Some(path) = file {
                    let result = self.session.save(&path);
                    self.report(result, format!("Image saved: {}", path.display()));
                }
            }
            Message::Undo => {
                let result = self.session.undo();
                self.report(result, "Last action undone");
            }
            Message::ResetToOriginal => {
                let result = self.session.reset_to_original();
                self.report(result, "Image reset to original");
            }
            Message::NoiseChanged(strength) => {
                self.settings.noise_strength = strength;
            }
            Message::ApplyDenoise => {
                let result = self
                    .session
                    .apply_denoise(i32::from(self.settings.noise_strength));
                self.report(result, "Noise reduction applied");
            }
            Message::Grayscale => {
                let result = self.session.convert_to_grayscale();
                self.report(result, "Image converted to grayscale");
            }
            Message::WidthChanged(width) => {
                self.settings.width = width;
            }
            Message::HeightChanged(height) => {
                self.settings.height = height;
            }
            Message::Resize => {
                let width = self.settings.width.trim().parse::<i64>();
                let height = self.settings.height.trim().parse::<i64>();

                match (width, height) {
                    (Ok(width), Ok(height)) => {
                        let result = self.session.resize(width, height);
                        self.report(result, format!("Resized to {}x{}", width, height));
                    }
                    _ => {
                        self.status = "Enter whole numbers for width and height".to_string();
                    }
                }
            }
        }

        Task::none()
    }

    /// Show the outcome of a session call and refresh the previews
    fn report(&mut self, result: SessionResult<()>, success: impl Into<String>) {
        self.status = match result {
            Ok(()) => {
                self.refresh_previews();
                success.into()
            }
            Err(SessionError::NothingToUndo) => "Nothing to undo".to_string(),
            Err(SessionError::NoImageLoaded) => "Load an image first".to_string(),
            Err(e) => format!("Error: {}", e),
        };
    }

    fn refresh_previews(&mut self) {
        self.original_preview = self.session.original().map(ui::preview::handle);
        self.current_preview = self.session.current().map(ui::preview::handle);
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.dirs.settings_file) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let previews = column![
            preview_pane(
                "Original image",
                self.original_preview.as_ref(),
                "Load an image\n\nUse the 'Load image' button",
            ),
            preview_pane(
                "Processed image",
                self.current_preview.as_ref(),
                "The processing result appears here",
            ),
        ]
        .spacing(10)
        .width(Length::Fill);

        let controls: Column<Message> = column![
            text("Controls").size(18),
            wide_button("Load image", Message::LoadImage),
            wide_button("Save result", Message::SaveImage),
            wide_button("Undo", Message::Undo),
            wide_button("Reset to original", Message::ResetToOriginal),
            text("Noise reduction").size(18),
            row![
                text("Strength:"),
                text(self.settings.noise_strength.to_string()),
            ]
            .spacing(10),
            slider(1..=7, self.settings.noise_strength, Message::NoiseChanged),
            wide_button("Apply noise reduction", Message::ApplyDenoise),
            text("Transforms").size(18),
            wide_button("Convert to grayscale", Message::Grayscale),
            row![
                text("Width:").width(Length::Fill),
                text_input("800", &self.settings.width)
                    .on_input(Message::WidthChanged)
                    .width(Length::Fixed(90.0)),
            ]
            .align_y(Alignment::Center),
            row![
                text("Height:").width(Length::Fill),
                text_input("600", &self.settings.height)
                    .on_input(Message::HeightChanged)
                    .width(Length::Fixed(90.0)),
            ]
            .align_y(Alignment::Center),
            wide_button("Resize", Message::Resize),
            text("Image information").size(18),
            text(ui::info::info_text(self.session.get_info().as_ref())).size(13),
        ]
        .spacing(8)
        .width(Length::Fixed(300.0));

        let content = column![
            text("Image Processor").size(28),
            row![previews, controls].spacing(20).height(Length::Fill),
            text(&self.status).size(14),
        ]
        .spacing(15)
        .padding(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn wide_button(label: &str, message: Message) -> Element<'_, Message> {
    button(text(label))
        .on_press(message)
        .width(Length::Fill)
        .padding(6)
        .into()
}

/// Titled pane showing a preview, or a placeholder before the first load
fn preview_pane<'a>(
    title: &'a str,
    handle: Option<&Handle>,
    placeholder: &'a str,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match handle {
        Some(handle) => iced::widget::image::Image::<Handle>::new(handle.clone()).into(),
        None => text(placeholder).into(),
    };

    column![
        text(title).size(16),
        container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    ]
    .spacing(5)
    .height(Length::Fill)
    .into()
}

fn main() -> iced::Result {
    let dirs = AppDirs::resolve();
    if let Err(e) = dirs.create() {
        eprintln!("Failed to create application directories: {}", e);
    }

    match logging::init(&dirs.logs) {
        Ok(path) => log::info!("Logging to {}", path.display()),
        Err(e) => eprintln!("Logging disabled: {}", e),
    }

    iced::application("Image Processor", ImageProcessor::update, ImageProcessor::view)
        .theme(ImageProcessor::theme)
        .window_size((1000.0, 700.0))
        .centered()
        .run_with(move || ImageProcessor::new(dirs))
}
