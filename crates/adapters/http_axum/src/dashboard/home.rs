//! Dashboard home page: every widget, the command buttons, the
//! service-control form and the instruments' input forms.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use dex_app::age_tracker::AgeTracker;
use dex_app::dashboard::Dashboard;
use dex_app::ports::CommandPoster;
use dex_domain::command::ServiceCommand;
use dex_domain::time::{Timestamp, now};
use dex_domain::view::Element;

use crate::state::AppState;

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    refresh_seconds: u32,
    sections: Vec<WidgetSection>,
    instruments: Vec<String>,
    services: Vec<ServiceRow>,
    buttons: Vec<ButtonView>,
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// One widget: its anchor, heading and flattened view.
pub struct WidgetSection {
    name: String,
    title: String,
    nodes: Vec<Node>,
}

/// An opening or closing tag of a flattened view tree.
///
/// An opening node carries the element's own text; its children follow
/// until the matching closing node.
pub struct Node {
    tag: &'static str,
    id: String,
    class: String,
    text: String,
    close: bool,
}

pub struct ServiceRow {
    name: String,
    options: Vec<ServiceOption>,
}

pub struct ServiceOption {
    value: &'static str,
    checked: bool,
}

pub struct ButtonView {
    id: String,
    label: String,
}

/// `GET /`: the whole dashboard.
pub async fn index<P>(State(state): State<AppState<P>>) -> HomeTemplate
where
    P: CommandPoster + Send + Sync + 'static,
{
    HomeTemplate::build(&state.dashboard.lock(), now(), state.refresh_seconds)
}

impl HomeTemplate {
    /// Snapshot `dashboard` into a page, with ages evaluated at `at`.
    #[must_use]
    pub fn build(dashboard: &Dashboard, at: Timestamp, refresh_seconds: u32) -> Self {
        let sections = dashboard
            .widgets()
            .map(|widget| {
                let name = widget.descriptor.name.as_str().to_string();
                let mut nodes = Vec::new();
                flatten(&widget.view, &name, true, dashboard.ages(), at, &mut nodes);
                WidgetSection {
                    title: widget.descriptor.title.clone(),
                    name,
                    nodes,
                }
            })
            .collect();

        let services = dashboard
            .services()
            .choices()
            .map(|(service, current)| ServiceRow {
                name: service.to_string(),
                options: ServiceCommand::ALL
                    .into_iter()
                    .map(|choice| ServiceOption {
                        value: choice.as_str(),
                        checked: choice == current,
                    })
                    .collect(),
            })
            .collect();

        let buttons = dashboard
            .buttons()
            .map(|button| ButtonView {
                id: button.id.clone(),
                label: button.label.clone(),
            })
            .collect();

        Self {
            refresh_seconds,
            sections,
            instruments: dashboard.instruments().to_vec(),
            services,
            buttons,
        }
    }
}

/// Text shown for an age: one decimal and a unit, or `?` when unknown.
#[must_use]
pub fn format_age(age_s: Option<f64>) -> String {
    age_s.map_or_else(|| "?".to_string(), |age| format!("{age:.1}s"))
}

/// Append the nodes of `element` to `out`.
///
/// The root takes the widget name as its id so the navigation can link to
/// it; every other id is prefixed with `widget`, keeping ids unique across
/// the page. Age-bound elements show the current age instead of their text.
fn flatten(
    element: &Element,
    widget: &str,
    root: bool,
    ages: &AgeTracker,
    at: Timestamp,
    out: &mut Vec<Node>,
) {
    let id = match &element.id {
        _ if root => widget.to_string(),
        Some(id) => format!("{widget}.{id}"),
        None => String::new(),
    };
    let text = match &element.age {
        Some(label) => format_age(ages.current_age(label, at)),
        None => element.text.clone().unwrap_or_default(),
    };
    let tag = element.tag.as_str();
    out.push(Node {
        tag,
        id,
        class: element.class.clone().unwrap_or_default(),
        text,
        close: false,
    });
    for child in &element.children {
        flatten(child, widget, false, ages, at, out);
    }
    out.push(Node {
        tag,
        id: String::new(),
        class: String::new(),
        text: String::new(),
        close: true,
    });
}
