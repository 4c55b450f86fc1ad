use crate::utils::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub(crate) const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    /// Stored preference, `None` meaning "follow the browser".
    pub(crate) fn current() -> Option<Self> {
        LocalOrDefault::local_or_default()
    }

    pub(crate) fn init() {
        Self::update_html(Self::current());
    }

    pub(crate) fn apply(theme: Option<Self>) {
        theme.local_save();
        Self::update_html(theme);
    }

    fn update_html(theme: Option<Self>) {
        use gloo::utils::document;
        let Some(html) = document().document_element() else {
            return;
        };
        let result = match theme {
            Some(theme) => {
                log::debug!("theme-scheme: {}", theme.scheme());
                html.set_attribute(Self::ATTR_NAME, theme.scheme())
            }
            None => {
                log::debug!("no theme preference");
                html.remove_attribute(Self::ATTR_NAME)
            }
        };
        if let Err(err) = result {
            log::error!("failed to set theme: {:?}", err);
        }
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "gwiazdka:theme";
}
