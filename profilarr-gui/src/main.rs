use std::sync::Arc;

use iced::{
    Color, Element,
    Length::{self, Fill},
    Task, Theme, application,
    widget::{center, column, container, mouse_area, opaque, stack},
};
use parking_lot::RwLock;
use profilarr_lib::{
    Backend, HttpBackend,
    config::{ClientConfig, DEFAULT_BACKEND_URL},
    page::Destination,
};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::{
    components::{
        profile_page::{self, ProfilePage},
        settings::{self, Settings},
    },
    config::GuiConfig,
};

pub mod components;
pub mod config;

fn main() -> iced::Result {
    application(App::new, App::update, App::view)
        .theme(App::theme)
        .title(App::title)
        .run()
}

#[derive(Debug, Clone)]
enum Message {
    ProfilePage(profile_page::Message),
    Settings(settings::Message),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Profiles,
    Settings,
}

struct App {
    title: String,
    cfg: config::Cfg,
    screen: Screen,
    // Components
    profile_page: ProfilePage,
    settings: Settings,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        // Human friendly panicking in release mode
        human_panic::setup_panic!();

        // Logging
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::TRACE)
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");

        let cfg = Arc::new(RwLock::new(GuiConfig::load().unwrap_or_else(|err| {
            error!("Failed to load GUI configuration, using defaults: {err}");
            GuiConfig::default()
        })));

        let client_cfg = ClientConfig::load().unwrap_or_else(|err| {
            error!("Failed to load client configuration, using defaults: {err}");
            ClientConfig::default()
        });

        let backend = connect(&client_cfg.backend_url);
        let (profile_page, profile_page_task) = ProfilePage::new(backend);
        let settings = Settings::new(cfg.clone(), client_cfg);

        (
            Self {
                title: "Profilarr".into(),
                cfg,
                screen: Screen::Profiles,
                profile_page,
                settings,
            },
            profile_page_task.map(Message::ProfilePage),
        )
    }

    // Update application state based on messages passed by view()
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ProfilePage(msg) => match self.profile_page.update(msg) {
                profile_page::Action::None => Task::none(),
                profile_page::Action::Run(task) => task.map(Message::ProfilePage),
                profile_page::Action::Navigate(Destination::Settings) => {
                    info!("Navigating to {}", Destination::Settings);
                    self.profile_page.deactivate();
                    self.screen = Screen::Settings;
                    Task::none()
                }
            },
            Message::Settings(msg) => match self.settings.update(msg) {
                settings::Action::None => Task::none(),
                settings::Action::BackendChanged(url) => {
                    self.profile_page.set_backend(connect(&url));
                    Task::none()
                }
                settings::Action::Back => {
                    // Coming back re-evaluates the gate
                    self.screen = Screen::Profiles;
                    self.profile_page.activate().map(Message::ProfilePage)
                }
            },
        }
    }

    // Render the application and pass along messages from components to update()
    pub fn view(&self) -> Element<'_, Message> {
        let content = match self.screen {
            Screen::Profiles => self.profile_page.view().map(Message::ProfilePage),
            Screen::Settings => self.settings.view().map(Message::Settings),
        };

        container(column![content].height(Fill)).padding(20).into()
    }

    pub fn title(&self) -> String {
        self.title.clone()
    }

    pub fn theme(&self) -> Theme {
        self.cfg.read().theme()
    }
}

/// Build a backend client, falling back to the default URL when `url` doesn't parse.
fn connect(url: &str) -> Arc<dyn Backend> {
    let backend = HttpBackend::new(url).or_else(|err| {
        error!("{err}, falling back to {DEFAULT_BACKEND_URL}");
        HttpBackend::new(DEFAULT_BACKEND_URL)
    });

    Arc::new(backend.expect("the default backend URL must be valid"))
}

pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_click_outside: Option<Message>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let mouse_area = mouse_area(center(opaque(content)).style(|_theme| {
        container::Style {
            background: Some(
                Color {
                    a: 0.8,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }
    }));

    stack![
        base.into(),
        opaque(if let Some(msg) = on_click_outside {
            mouse_area.on_press(msg)
        } else {
            mouse_area
        })
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
