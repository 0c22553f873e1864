use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl From<&Theme> for iced::Theme {
    fn from(theme: &Theme) -> Self {
        match theme {
            Theme::Light => iced::Theme::Light,
            Theme::Dark => iced::Theme::Dark,
        }
    }
}
