use iced::{
    Element,
    widget::{button, column, container, pick_list, row, space, text, text_input},
};
use profilarr_lib::{HttpBackend, config::ClientConfig};
use strum::IntoEnumIterator;
use tracing::{error, info};

use crate::config::{Cfg, Theme};

#[derive(Debug, Clone)]
pub enum Message {
    BackendUrlInput(String),
    ThemeSelected(Theme),
    SavePressed,
    BackPressed,
}

/// Action used for communicating with the parent component
pub enum Action {
    None,
    BackendChanged(String),
    Back,
}

/// Connection and appearance settings. Also where users are sent to resolve merge conflicts.
pub struct Settings {
    cfg: Cfg,
    client: ClientConfig,
    backend_url: String,
    status: Option<Result<String, String>>,
}

impl Settings {
    pub fn new(cfg: Cfg, client: ClientConfig) -> Self {
        Self {
            cfg,
            backend_url: client.backend_url.clone(),
            client,
            status: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::BackendUrlInput(content) => {
                self.backend_url = content;
                Action::None
            }
            Message::ThemeSelected(theme) => {
                self.cfg.write().theme = theme;
                if let Err(err) = self.cfg.read().save() {
                    error!("Failed to save GUI configuration: {err}");
                }
                Action::None
            }
            Message::SavePressed => {
                let url = self.backend_url.trim().to_owned();

                if let Err(err) = HttpBackend::new(&url) {
                    self.status = Some(Err(err.to_string()));
                    return Action::None;
                }

                self.client.backend_url = url.clone();
                match self.client.save() {
                    Ok(()) => {
                        info!("Backend URL set to {url}");
                        self.status = Some(Ok("Saved".into()));
                    }
                    Err(err) => {
                        error!("Failed to save client configuration: {err}");
                        self.status = Some(Err(err.to_string()));
                    }
                }

                Action::BackendChanged(url)
            }
            Message::BackPressed => {
                self.status = None;
                Action::Back
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let status = match &self.status {
            Some(Ok(msg)) => text(msg.as_str()).style(text::success),
            Some(Err(msg)) => text(msg.as_str()).style(text::danger),
            None => text(""),
        };

        column![
            row![
                text("Settings").size(24),
                space::horizontal(),
                button("Back to profiles").on_press(Message::BackPressed),
            ],
            container(
                column![
                    text("Repository").size(18),
                    text(
                        "Merge conflicts in the configuration repository lock the profile page. \
                         Resolve them in the repository, then return to profiles to re-check."
                    ),
                ]
                .spacing(8)
            )
            .padding(16)
            .style(container::rounded_box),
            row![
                text("Backend URL"),
                text_input(&self.client.backend_url, &self.backend_url)
                    .on_input(Message::BackendUrlInput)
                    .on_submit(Message::SavePressed),
                button("Save").on_press(Message::SavePressed),
            ]
            .spacing(8),
            status,
            row![
                text("Theme"),
                pick_list(
                    Theme::iter().collect::<Vec<_>>(),
                    Some(self.cfg.read().theme),
                    Message::ThemeSelected
                ),
            ]
            .spacing(8),
        ]
        .spacing(16)
        .into()
    }
}
