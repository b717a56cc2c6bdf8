use clap::Parser;
use iced::{
    time,
    widget::{button, column, row, scrollable, text, text_input, Canvas, Column, Container},
    Alignment, Color, Element, Length, Subscription, Task, Theme,
};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use travelmapcore::map::{NotificationKind, TOKEN_HELP_URL};
use travelmapcore::prelude::ControlPosition;
use travelmapcore::provider::{ContainerId, MarkerHandle, MarkerStyle};
use travelmapcore::{LifecycleState, MapComponent};

mod canvas_map;
mod links;
mod map_view;
mod scenario;
mod toast;

use canvas_map::{CanvasProvider, MAP_HEIGHT, MAP_WIDTH};
use map_view::MapCanvas;
use scenario::{MapOptionsWatch, Scenario};
use toast::Toasts;

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Desktop host for the travelmap component")]
struct Args {
    /// Destinations and safety zones to show (YAML or JSON), reloaded on every
    /// tick. Its `map:` section is read at startup only.
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Seconds between scenario reloads
    #[arg(long, default_value_t = 1)]
    tick_secs: u64,
}

fn main() -> iced::Result {
    env_logger::init();
    let args = Args::parse();

    iced::application(
        move || Visualizer::boot(&args),
        Visualizer::update,
        Visualizer::view,
    )
    .title(application_title)
    .subscription(application_subscription)
    .theme(application_theme)
    .run()
}

fn application_title(_: &Visualizer) -> String {
    "Travelmap".into()
}

fn application_subscription(state: &Visualizer) -> Subscription<Message> {
    let reload = time::every(state.tick).map(|_| Message::Tick);
    if state.toasts.is_empty() {
        reload
    } else {
        Subscription::batch([
            reload,
            time::every(TOAST_CHECK_INTERVAL).map(Message::ExpireToasts),
        ])
    }
}

fn application_theme(_: &Visualizer) -> Theme {
    Theme::Light
}

const TOAST_CHECK_INTERVAL: Duration = Duration::from_millis(250);

struct Visualizer {
    component: MapComponent<CanvasProvider>,
    scenario_path: Option<PathBuf>,
    map_watch: MapOptionsWatch,
    tick: Duration,
    toasts: Toasts,
    status: String,
    history: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    ExpireToasts(Instant),
    TokenChanged(String),
    OpenTokenPage,
    Initialize,
    ScenarioLoaded(Result<Scenario, String>),
    ZoomIn,
    ZoomOut,
    ResetView,
    TogglePopup(MarkerHandle),
}

impl Visualizer {
    fn boot(args: &Args) -> (Self, Task<Message>) {
        let mut status = "Enter an access token to load the map.".to_string();
        let scenario = match &args.scenario {
            Some(path) => Scenario::load(path).unwrap_or_else(|err| {
                log::warn!("{err:#}");
                status = format!("Scenario error: {err:#}");
                Scenario::default()
            }),
            None => Scenario::default(),
        };

        let map_watch = MapOptionsWatch::new(scenario.map.clone());
        let component =
            MapComponent::new(CanvasProvider::default(), ContainerId::new("map"), scenario.map)
                .with_props(scenario.props);

        (
            Visualizer {
                component,
                scenario_path: args.scenario.clone(),
                map_watch,
                tick: Duration::from_secs(args.tick_secs.max(1)),
                toasts: Toasts::default(),
                status,
                history: Vec::new(),
            },
            Task::none(),
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => match &state.scenario_path {
                Some(path) => Task::perform(reload_scenario(path.clone()), Message::ScenarioLoaded),
                None => Task::none(),
            },
            Message::ExpireToasts(now) => {
                state.toasts.expire(now);
                Task::none()
            }
            Message::TokenChanged(token) => {
                state.component.set_token(token);
                Task::none()
            }
            Message::OpenTokenPage => {
                if !links::open_token_page() {
                    state.status = format!("Could not open a browser, visit {TOKEN_HELP_URL}");
                }
                Task::none()
            }
            Message::Initialize => {
                if state.component.can_initialize() {
                    match state.component.initialize() {
                        Ok(()) => {
                            state.status = "Map ready.".into();
                            state.push_history(format!(
                                "Initialized with {} markers",
                                state.component.marker_count()
                            ));
                        }
                        Err(err) => state.status = err.to_string(),
                    }
                    let notices = state.component.take_notifications();
                    state.toasts.extend(notices);
                }
                Task::none()
            }
            Message::ScenarioLoaded(Ok(scenario)) => {
                if state.map_watch.observe(&scenario.map) {
                    log::warn!("scenario map options changed, they apply on the next start");
                    state.push_history("Map options changed, restart to apply".into());
                }
                if &scenario.props != state.component.props() {
                    let summary = state.component.set_props(scenario.props);
                    let props = state.component.props();
                    state.push_history(format!(
                        "Scenario: {} destinations / {} zones",
                        props.destinations.len(),
                        props.safety_zones.len()
                    ));
                    if let Some(summary) = summary {
                        state.status = format!("Redrawn {} markers", summary.marker_count());
                    }
                }
                Task::none()
            }
            Message::ScenarioLoaded(Err(err)) => {
                state.status = format!("Scenario error: {err}");
                Task::none()
            }
            Message::ZoomIn => {
                if let Some(widget) = state.component.widget_mut() {
                    widget.zoom_by(1.0);
                }
                Task::none()
            }
            Message::ZoomOut => {
                if let Some(widget) = state.component.widget_mut() {
                    widget.zoom_by(-1.0);
                }
                Task::none()
            }
            Message::ResetView => {
                if let Some(widget) = state.component.widget_mut() {
                    widget.reset_view();
                }
                Task::none()
            }
            Message::TogglePopup(handle) => {
                if let Some(widget) = state.component.widget_mut() {
                    widget.toggle_popup(handle);
                }
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match (state.component.state(), state.component.widget())
        {
            (LifecycleState::Active, Some(widget)) => {
                let canvas = Canvas::new(MapCanvas::new(widget))
                    .width(Length::Fixed(MAP_WIDTH as f32))
                    .height(Length::Fixed(MAP_HEIGHT as f32));

                let mut map_column = Column::new().spacing(6);
                let mut below = None;
                if let Some(position) = widget.navigation_position() {
                    let docked = navigation_control(position);
                    match position {
                        ControlPosition::TopLeft | ControlPosition::TopRight => {
                            map_column = map_column.push(docked);
                        }
                        ControlPosition::BottomLeft | ControlPosition::BottomRight => {
                            below = Some(docked);
                        }
                    }
                }
                map_column = map_column.push(canvas);
                if let Some(docked) = below {
                    map_column = map_column.push(docked);
                }

                let marker_list = widget.markers().fold(
                    Column::new().spacing(4),
                    |col, (handle, spec)| {
                        let label = match spec.style {
                            MarkerStyle::Destination => spec.popup.text.clone(),
                            MarkerStyle::SafetyZone(_) => format!("Zone: {}", spec.popup.text),
                        };
                        col.push(
                            button(text(label).size(12))
                                .on_press(Message::TogglePopup(handle))
                                .padding(4),
                        )
                    },
                );

                row![
                    map_column,
                    column![
                        text("Markers").size(18),
                        scrollable(marker_list).height(Length::Fixed(360.0)),
                    ]
                    .spacing(8)
                    .width(Length::Fixed(240.0)),
                ]
                .spacing(16)
                .into()
            }
            _ => column![
                text("Enter your Mapbox token").size(26),
                text_input("pk.eyJ1...", state.component.token())
                    .on_input(Message::TokenChanged)
                    .on_submit(Message::Initialize)
                    .padding(8),
                button("Initialize Map")
                    .on_press_maybe(
                        state
                            .component
                            .can_initialize()
                            .then_some(Message::Initialize)
                    )
                    .padding(10),
                row![
                    text("Get your token at").size(12),
                    button(text(TOKEN_HELP_URL).size(12))
                        .on_press(Message::OpenTokenPage)
                        .style(button::text)
                        .padding(0),
                ]
                .spacing(4)
                .align_y(Alignment::Center),
            ]
            .spacing(10)
            .width(Length::Fixed(420.0))
            .into(),
        };

        let toasts = state
            .toasts
            .iter()
            .fold(Column::new().spacing(4), |col, toast| {
                let color = match toast.notification.kind {
                    NotificationKind::Success => Color::from_rgb(0.1, 0.55, 0.25),
                    NotificationKind::Error => Color::from_rgb(0.8, 0.15, 0.15),
                };
                col.push(text(toast.notification.message.clone()).size(14).color(color))
            });

        let metrics = state.component.metrics();
        let history_list = if state.history.is_empty() {
            Column::new().push(text("No activity yet").size(12))
        } else {
            state
                .history
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let layout = column![
            toasts,
            body,
            text(&state.status).size(14),
            text(format!(
                "redraws {} | markers {} | failed attempts {}",
                metrics.redraws, metrics.markers_drawn, metrics.initialization_failures
            ))
            .size(12),
            Container::new(scrollable(history_list).height(Length::Fixed(90.0))).padding(6),
        ]
        .spacing(12)
        .align_x(Alignment::Start)
        .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn push_history(&mut self, entry: String) {
        self.history.push(entry);
        if self.history.len() > 20 {
            self.history.remove(0);
        }
    }
}

/// Zoom buttons docked to the corner the navigation control was added at.
fn navigation_control<'a>(position: ControlPosition) -> Container<'a, Message> {
    let buttons = row![
        button("+").on_press(Message::ZoomIn).padding(6),
        button("-").on_press(Message::ZoomOut).padding(6),
        button("Reset").on_press(Message::ResetView).padding(6),
    ]
    .spacing(4);
    let width = Length::Fixed(MAP_WIDTH as f32);
    match position {
        ControlPosition::TopLeft | ControlPosition::BottomLeft => {
            Container::new(buttons).width(width)
        }
        ControlPosition::TopRight | ControlPosition::BottomRight => {
            Container::new(buttons).align_right(width)
        }
    }
}

async fn reload_scenario(path: PathBuf) -> Result<Scenario, String> {
    Scenario::load_async(path)
        .await
        .map_err(|err| format!("{err:#}"))
}
