// SPDX-License-Identifier: MPL-2.0
//! Viewer component encapsulating state and update logic.
//!
//! The component owns the navigator state machine and its collaborators
//! (overlay, brightness, control source, current texture) and translates
//! pointer input and loader events into transitions. Side effects the
//! application must perform come back as [`Effect`] values.

use crate::i18n::fluent::I18n;
use crate::loader::{self, LoadId, TextureData};
use crate::panorama_navigation::PanoramaNavigator;
use crate::scene::SceneDescription;
use crate::sources::SourceRegistry;
use crate::ui::viewer::pane::PanoramaPane;
use crate::ui::viewer::subcomponents::control_source::{
    ControlSource, OrientationProbe, ProbedCapability,
};
use crate::ui::viewer::subcomponents::{brightness, overlay};
use iced::widget::{checkbox, container, slider, text, Canvas, Column, Container, Row, Stack};
use iced::{Color, Element, Length, Point, Subscription, Task, Theme};

/// Messages emitted by viewer widgets and the texture loader.
#[derive(Debug, Clone)]
pub enum Message {
    /// A navigation marker was clicked.
    MarkerClicked(usize),
    BrightnessChanged(u8),
    /// Event from the active texture fetch.
    Load(loader::Event),
    /// The delayed overlay dismissal for this load generation fired.
    OverlayDismissElapsed(u64),
    OrbitDragStarted(Point),
    OrbitDragMoved(Point),
    OrbitDragEnded,
    /// Absolute orientation sample from the host sensor.
    OrientationSample { yaw: f32, pitch: f32 },
    MotionPermissionToggled(bool),
}

/// Side effects the application should perform after handling a viewer message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    PersistPreferences,
}

/// Environment information required to render the viewer.
pub struct ViewEnv<'a> {
    pub i18n: &'a I18n,
}

/// Viewer state: the navigator plus everything needed to render it.
pub struct State {
    registry: SourceRegistry,
    navigator: PanoramaNavigator,
    overlay: overlay::State,
    brightness: brightness::State,
    control: ControlSource,
    sensor: ProbedCapability,
    motion_permission: bool,
    /// Texture of the current panorama. Replaced (and thereby released)
    /// when a navigation supersedes the load that produced it.
    texture: Option<TextureData>,
}

impl State {
    /// Creates the viewer on source 0 and starts its texture load.
    #[must_use]
    pub fn new(
        registry: SourceRegistry,
        brightness_percent: u8,
        motion_permission: bool,
        probe: &dyn OrientationProbe,
    ) -> Self {
        let sensor = ProbedCapability(probe.is_available());
        let mut navigator = PanoramaNavigator::new(registry.len());
        navigator.start_load();
        let mut overlay = overlay::State::default();
        overlay.load_started();

        Self {
            registry,
            navigator,
            overlay,
            brightness: brightness::State::new(brightness_percent),
            control: ControlSource::select(&sensor, motion_permission),
            sensor,
            motion_permission,
            texture: None,
        }
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::MarkerClicked(index) => {
                if self.navigator.select_target(index).is_some() {
                    // The superseded texture is released here; the new
                    // fetch starts through the subscription key change.
                    self.texture = None;
                    self.overlay.load_started();
                }
                (Effect::None, Task::none())
            }
            Message::BrightnessChanged(percent) => {
                self.brightness.set_percent(percent);
                (Effect::PersistPreferences, Task::none())
            }
            Message::Load(event) => (Effect::None, self.handle_load_event(event)),
            Message::OverlayDismissElapsed(generation) => {
                if self.overlay.dismiss_elapsed(generation) {
                    self.navigator.finish_load(generation);
                }
                (Effect::None, Task::none())
            }
            Message::OrbitDragStarted(position) => {
                if let ControlSource::PointerOrbit(control) = &mut self.control {
                    control.begin_drag(position);
                }
                (Effect::None, Task::none())
            }
            Message::OrbitDragMoved(position) => {
                if let ControlSource::PointerOrbit(control) = &mut self.control {
                    control.drag_to(position);
                }
                (Effect::None, Task::none())
            }
            Message::OrbitDragEnded => {
                if let ControlSource::PointerOrbit(control) = &mut self.control {
                    control.end_drag();
                }
                (Effect::None, Task::none())
            }
            Message::OrientationSample { yaw, pitch } => {
                if let ControlSource::Orientation(control) = &mut self.control {
                    control.apply_sample(yaw, pitch);
                }
                (Effect::None, Task::none())
            }
            Message::MotionPermissionToggled(granted) => {
                self.motion_permission = granted;
                self.control = ControlSource::select(&self.sensor, granted);
                (Effect::PersistPreferences, Task::none())
            }
        }
    }

    fn handle_load_event(&mut self, event: loader::Event) -> Task<Message> {
        let generation = self.navigator.load_generation();
        match event {
            loader::Event::Progress { id, percent } if id.0 == generation => {
                self.record_progress(generation, percent)
            }
            loader::Event::Completed { id, texture } if id.0 == generation => {
                self.texture = Some(texture);
                self.record_progress(generation, 100)
            }
            loader::Event::Failed { id, .. } if id.0 == generation => {
                // Best-effort visual: the failure was already logged by the
                // loader; the overlay dismisses and no texture is shown.
                self.record_progress(generation, 100)
            }
            // Late event from a superseded load.
            _ => Task::none(),
        }
    }

    fn record_progress(&mut self, generation: u64, percent: u8) -> Task<Message> {
        self.navigator.report_progress(percent);
        if percent < 100 {
            return Task::none();
        }
        match self.overlay.progress_complete(generation) {
            overlay::Effect::ScheduleDismiss(generation) => {
                Task::perform(tokio::time::sleep(overlay::DISMISS_DELAY), move |()| {
                    Message::OverlayDismissElapsed(generation)
                })
            }
            overlay::Effect::None => Task::none(),
        }
    }

    /// Texture-fetch subscription for the active load, keyed by generation.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.navigator.is_loading() {
            if let Some(source) = self.registry.get(self.navigator.current_index()) {
                return loader::fetch(
                    source.location.to_string(),
                    LoadId(self.navigator.load_generation()),
                )
                .map(Message::Load);
            }
        }
        Subscription::none()
    }

    pub fn view(&self, env: ViewEnv<'_>) -> Element<'_, Message> {
        let scene = SceneDescription::compose(
            &self.navigator,
            self.texture.as_ref(),
            self.brightness.multiplier(),
        );

        let background: Element<'_, Message> = match &self.texture {
            Some(texture) => iced::widget::image(texture.handle.clone())
                .content_fit(iced::ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => Container::new(text(env.i18n.tr("no-panorama-message")).color(Color::WHITE))
                .center(Length::Fill)
                .style(|_: &Theme| container::Style {
                    background: Some(Color::BLACK.into()),
                    ..container::Style::default()
                })
                .into(),
        };

        let dragging = matches!(
            &self.control,
            ControlSource::PointerOrbit(control) if control.is_dragging()
        );
        let pane = Canvas::new(PanoramaPane::new(scene, self.control.orientation(), dragging))
            .width(Length::Fill)
            .height(Length::Fill);

        let mut layers = Stack::new().push(background).push(pane);

        if self.overlay.is_visible() {
            layers = layers.push(self.progress_overlay(&env));
        }

        Column::new()
            .push(
                Container::new(layers)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .push(self.bottom_bar(&env))
            .into()
    }

    fn progress_overlay(&self, env: &ViewEnv<'_>) -> Element<'_, Message> {
        let progress = self.navigator.progress();
        let label = format!("{}: {}%", env.i18n.tr("loading-label"), progress);

        let card = Container::new(
            Column::new()
                .push(text(label).color(Color::WHITE))
                .push(iced::widget::progress_bar(0.0..=100.0, f32::from(progress)))
                .spacing(6)
                .width(Length::Fixed(160.0)),
        )
        .padding(10)
        .style(|_: &Theme| container::Style {
            background: Some(
                Color {
                    a: 0.7,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        });

        Container::new(card)
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Right)
            .padding(10)
            .into()
    }

    fn bottom_bar(&self, env: &ViewEnv<'_>) -> Element<'_, Message> {
        let current = self.navigator.current_index();
        let position_label = match self.registry.get(current) {
            Some(source) => format!("[ {} / {} ] {}", current + 1, self.registry.len(), source.id),
            None => String::new(),
        };

        let hint_key = match self.control {
            ControlSource::PointerOrbit(_) => "controls-pointer",
            ControlSource::Orientation(_) => "controls-orientation",
        };

        let brightness_control = Row::new()
            .push(text(env.i18n.tr("brightness-label")))
            .push(
                slider(1.0..=100.0, f32::from(self.brightness.percent()), |value| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    Message::BrightnessChanged(value.round() as u8)
                })
                .width(Length::Fixed(160.0)),
            )
            .spacing(8)
            .align_y(iced::alignment::Vertical::Center);

        let mut bar = Row::new()
            .push(text(position_label))
            .push(iced::widget::space::horizontal())
            .push(text(env.i18n.tr(hint_key)))
            .push(brightness_control)
            .spacing(16)
            .padding(8)
            .align_y(iced::alignment::Vertical::Center);

        if self.sensor.is_available() {
            bar = bar.push(
                checkbox(self.motion_permission)
                    .label(env.i18n.tr("motion-permission-label"))
                    .on_toggle(Message::MotionPermissionToggled),
            );
        }

        bar.into()
    }

    #[must_use]
    pub fn navigator(&self) -> &PanoramaNavigator {
        &self.navigator
    }

    #[must_use]
    pub fn overlay(&self) -> &overlay::State {
        &self.overlay
    }

    #[must_use]
    pub fn brightness(&self) -> &brightness::State {
        &self.brightness
    }

    #[must_use]
    pub fn control(&self) -> &ControlSource {
        &self.control
    }

    #[must_use]
    pub fn motion_permission(&self) -> bool {
        self.motion_permission
    }

    #[must_use]
    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    #[must_use]
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }
}
