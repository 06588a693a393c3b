// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration around the panorama viewer.
//!
//! The `App` struct wires together the domains (viewer, localization,
//! persisted preferences) and translates viewer effects into side effects
//! like config persistence. Policy decisions (window sizing, persistence
//! format, locale switching) stay close to the main update loop so
//! user-facing behavior is easy to audit.

use crate::config;
use crate::i18n::fluent::I18n;
use crate::sources::SourceRegistry;
use crate::ui::viewer::component;
use crate::ui::viewer::subcomponents::control_source::HostProbe;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root Iced application state bridging the viewer, localization, and
/// persisted preferences.
pub struct App {
    pub i18n: I18n,
    viewer: component::State,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("current_index", &self.viewer.navigator().current_index())
            .finish()
    }
}

/// Top-level messages consumed by [`App::update`]. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(component::Message),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 360;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    iced::application(move || App::new(flags.clone()), App::update, App::view)
        .title(|state: &App| state.title())
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state from persisted preferences and starts
    /// loading the first panorama.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let brightness = config
            .brightness_percent
            .unwrap_or(config::DEFAULT_BRIGHTNESS_PERCENT);
        let motion_permission = config.motion_permission.unwrap_or(false);

        let viewer = component::State::new(
            SourceRegistry::builtin(),
            brightness,
            motion_permission,
            &HostProbe,
        );

        (App { i18n, viewer }, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        self.viewer.subscription().map(Message::Viewer)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Viewer(viewer_message) => {
                let (effect, task) = self.viewer.handle_message(viewer_message);
                let effect_task = match effect {
                    component::Effect::PersistPreferences => self.persist_preferences(),
                    component::Effect::None => Task::none(),
                };
                Task::batch([task.map(Message::Viewer), effect_task])
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        self.viewer
            .view(component::ViewEnv { i18n: &self.i18n })
            .map(Message::Viewer)
    }

    /// Persists the current viewer preferences to disk.
    ///
    /// Guarded during tests to keep isolation: unit tests exercise the logic
    /// by calling the viewer directly rather than through `Effect`s.
    fn persist_preferences(&self) -> Task<Message> {
        if cfg!(test) {
            return Task::none();
        }

        let mut cfg = config::load().unwrap_or_default();
        cfg.brightness_percent = Some(self.viewer.brightness().percent());
        cfg.motion_permission = Some(self.viewer.motion_permission());

        if let Err(error) = config::save(&cfg) {
            eprintln!("Failed to save config: {:?}", error);
        }

        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{self, LoadId};
    use crate::panorama_navigation::LoadPhase;

    fn new_app() -> App {
        let (app, _task) = App::new(Flags::default());
        app
    }

    #[test]
    fn new_app_starts_loading_first_panorama() {
        let app = new_app();
        assert_eq!(app.viewer.navigator().current_index(), 0);
        assert!(app.viewer.navigator().is_loading());
        assert!(app.viewer.overlay().is_visible());
    }

    #[test]
    fn title_is_localized() {
        let app = new_app();
        assert!(!app.title().is_empty());
        assert!(!app.title().starts_with("MISSING"));
    }

    #[test]
    fn viewer_messages_are_routed_through_update() {
        let mut app = new_app();
        let generation = app.viewer.navigator().load_generation();

        let _ = app.update(Message::Viewer(component::Message::Load(
            loader::Event::Progress {
                id: LoadId(generation),
                percent: 40,
            },
        )));

        assert_eq!(
            app.viewer.navigator().phase(),
            LoadPhase::Loading { progress: 40 }
        );
    }
}
