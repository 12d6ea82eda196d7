use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::entities::{LocationId, LocationRecord};

pub const NO_RESULTS: &str = "No locations found";
pub const CURRENT_LOCATION_LABEL: &str = "My Current Location";
pub const CURRENT_LOCATION_POPUP: &str = "Your Current Location";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "id", rename_all = "snake_case")]
pub enum PopupAction {
    ShowDetails(LocationId),
    DirectionsTo(LocationId),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopupView {
    pub title: String,
    pub type_label: Option<String>,
    pub description: Option<String>,
    pub actions: Vec<PopupAction>,
}

impl PopupView {
    pub fn for_location(record: &LocationRecord) -> Self {
        Self {
            title: record.name.clone(),
            type_label: Some(record.location_type.display_name()),
            description: record.description.clone(),
            actions: vec![
                PopupAction::ShowDetails(record.id),
                PopupAction::DirectionsTo(record.id),
            ],
        }
    }

    pub fn current_location() -> Self {
        Self {
            title: CURRENT_LOCATION_POPUP.into(),
            type_label: None,
            description: None,
            actions: vec![],
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"location-popup\">");
        let _ = write!(html, "<h4>{}</h4>", escape(&self.title));

        if let Some(label) = &self.type_label {
            let _ = write!(html, "<p class=\"location-type\">{}</p>", escape(label));
        }
        if let Some(description) = &self.description {
            let _ = write!(html, "<p>{}</p>", escape(description));
        }

        if !self.actions.is_empty() {
            html.push_str("<div class=\"popup-actions\">");
            for action in &self.actions {
                let (class, name, label, id) = match action {
                    PopupAction::ShowDetails(id) => ("btn-primary", "details", "Details", id),
                    PopupAction::DirectionsTo(id) => ("btn-success", "directions", "Directions", id),
                };
                let _ = write!(
                    html,
                    "<button class=\"btn {} btn-sm\" data-action=\"{}\" data-id=\"{}\">{}</button>",
                    class, name, id, label
                );
            }
            html.push_str("</div>");
        }

        html.push_str("</div>");
        html
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListItemView {
    pub id: LocationId,
    pub name: String,
    pub type_label: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationListView {
    pub items: Vec<ListItemView>,
}

impl LocationListView {
    pub fn new<'a>(records: impl IntoIterator<Item = &'a LocationRecord>) -> Self {
        let items = records
            .into_iter()
            .map(|r| ListItemView {
                id: r.id,
                name: r.name.clone(),
                type_label: r.location_type.display_name(),
                description: r.description.clone(),
            })
            .collect();

        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_html(&self) -> String {
        if self.is_empty() {
            return format!("<p class=\"no-results\">{}</p>", NO_RESULTS);
        }

        self.items
            .iter()
            .map(|item| {
                let mut html = format!(
                    "<div class=\"location-item\" data-id=\"{}\"><div class=\"location-name\">{}</div><div class=\"location-type\">{}</div>",
                    item.id,
                    escape(&item.name),
                    escape(&item.type_label)
                );
                if let Some(description) = &item.description {
                    let _ = write!(
                        html,
                        "<div class=\"location-description\">{}</div>",
                        escape(description)
                    );
                }
                html.push_str("</div>");
                html
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailsView {
    pub id: LocationId,
    pub title: String,
    pub type_label: String,
    pub coordinates: String,
    pub description: Option<String>,
}

impl DetailsView {
    pub fn new(record: &LocationRecord) -> Self {
        Self {
            id: record.id,
            title: record.name.clone(),
            type_label: record.location_type.display_name(),
            coordinates: record.coordinates().into(),
            description: record.description.clone(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"location-details\">");
        let _ = write!(
            html,
            "<p><strong>Type:</strong> {}</p><p><strong>Coordinates:</strong> {}</p>",
            escape(&self.type_label),
            self.coordinates
        );
        if let Some(description) = &self.description {
            let _ = write!(
                html,
                "<p><strong>Description:</strong> {}</p>",
                escape(description)
            );
        }
        html.push_str("</div>");
        html
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<option value=\"{}\">{}</option>",
            escape(&self.value),
            escape(&self.label)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSelectors {
    pub from: Vec<SelectOption>,
    pub to: Vec<SelectOption>,
}

impl RouteSelectors {
    pub fn new(records: &[LocationRecord]) -> Self {
        let mut from = vec![
            SelectOption::new("", "Select starting point..."),
            SelectOption::new("current", CURRENT_LOCATION_LABEL),
        ];
        let mut to = vec![SelectOption::new("", "Select destination...")];

        for record in records {
            let option = SelectOption::new(record.id.to_string(), record.name.clone());
            from.push(option.clone());
            to.push(option);
        }

        Self { from, to }
    }
}

/// HTML-escapes text that ends up inside element content or attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
fn record(name: &str, description: &str) -> LocationRecord {
    use crate::entities::LocationType;

    LocationRecord::new(42, name, description, 5.6475, -0.185, LocationType::ResidentialHall)
}

#[test]
fn popup_escapes_record_text() {
    let popup = PopupView::for_location(&record(
        "<script>alert(1)</script>",
        "Known as 'Vandals' & more",
    ));
    let html = popup.to_html();

    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("Known as &#x27;Vandals&#x27; &amp; more"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("data-action=\"directions\" data-id=\"42\""));
}

#[test]
fn popup_omits_missing_description() {
    let popup = PopupView::for_location(&record("Commonwealth Hall", ""));
    assert_eq!(popup.description, None);
    assert!(!popup.to_html().contains("<p></p>"));
    assert_eq!(popup.type_label.as_deref(), Some("Residential Hall"));
}

#[test]
fn empty_list_shows_no_results() {
    let list = LocationListView::new(&Vec::<LocationRecord>::new());
    assert_eq!(list.to_html(), "<p class=\"no-results\">No locations found</p>");
}

#[test]
fn details_format_coordinates_to_six_places() {
    let details = DetailsView::new(&record("Commonwealth Hall", "Vandals"));
    assert_eq!(details.coordinates, "5.647500, -0.185000");
    assert!(details.to_html().contains("<strong>Description:</strong> Vandals"));
}

#[test]
fn selectors_offer_current_location_on_from_side_only() {
    let selectors = RouteSelectors::new(&[record("Commonwealth Hall", "")]);

    assert_eq!(selectors.from.len(), 3);
    assert_eq!(selectors.to.len(), 2);
    assert_eq!(selectors.from[1].value, "current");
    assert_eq!(selectors.to[1].to_html(), "<option value=\"42\">Commonwealth Hall</option>");
}
