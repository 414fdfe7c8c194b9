//! Display-ready values for the dashboard page. Everything here is already
//! formatted; templates only lay it out.

/// "Current conditions" panel
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub place: String,
    pub day_label: String,
    pub temperature: String,
    pub feels_like: String,
    pub high: String,
    pub low: String,
    pub description: String,
    pub icon_url: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub visibility: String,
    pub precipitation: String,
    pub sunrise: String,
    pub sunset: String,
}

/// One entry of the 3-day outlook
#[derive(Debug, Clone, PartialEq)]
pub struct OutlookDay {
    pub day_name: String,
    pub date: String,
    pub high: String,
    pub low: String,
    pub average: String,
    pub description: String,
    pub icon_url: String,
}

/// A link the page renders, e.g. the unit toggle
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// Everything the dashboard template needs
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Query value of the active unit system
    pub units: String,
    pub units_label: String,
    pub city_input: String,
    pub error: Option<String>,
    pub current: Option<CurrentConditions>,
    pub outlook: Vec<OutlookDay>,
    pub unit_toggle: Link,
}
