//! Turns dashboard state into display values.

use crate::{
    models::{
        CurrentConditions, DailyForecast, DashboardView, Forecast, Link, Locator, OutlookDay, Units,
    },
    services::dashboard::DashboardState,
    utils::format,
};
use url::form_urlencoded;

/// Number of days shown after today
pub const OUTLOOK_DAYS: usize = 3;

/// Page-relative href for a locator and unit system
pub fn dashboard_href(locator: Option<&Locator>, units: Units) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(locator) = locator {
        for (key, value) in locator.query_pairs() {
            serializer.append_pair(key, &value);
        }
    }
    serializer.append_pair("units", units.as_str());
    format!("/?{}", serializer.finish())
}

fn current_conditions(forecast: &Forecast, units: Units) -> Option<CurrentConditions> {
    let today = forecast.today()?;
    let now = forecast.current()?;
    let condition = now.primary_condition();

    Some(CurrentConditions {
        place: forecast.city_info.display_name(),
        day_label: format!("{}, {}", today.day_name, today.date),
        temperature: format::temperature(now.main.temp, units),
        feels_like: format::temperature(now.main.feels_like, units),
        high: format::temperature(today.max_temp, units),
        low: format::temperature(today.min_temp, units),
        description: condition
            .map(|c| format::capitalize(&c.description))
            .unwrap_or_default(),
        icon_url: condition
            .map(|c| format::icon_url(&c.icon))
            .unwrap_or_default(),
        humidity: format!("{}%", now.main.humidity),
        wind: format::wind(now.wind.speed, now.wind.deg, units),
        pressure: format!("{} hPa", now.main.pressure.round()),
        visibility: format::visibility(now.visibility),
        precipitation: format::precipitation_chance(now.pop),
        sunrise: format::local_time(forecast.city.sunrise, forecast.city.timezone),
        sunset: format::local_time(forecast.city.sunset, forecast.city.timezone),
    })
}

fn outlook_day(day: &DailyForecast, units: Units) -> OutlookDay {
    OutlookDay {
        day_name: day.day_name.clone(),
        date: day.date.clone(),
        high: format::temperature(day.max_temp, units),
        low: format::temperature(day.min_temp, units),
        average: format::temperature(day.avg_temp, units),
        description: format::capitalize(&day.weather.description),
        icon_url: format::icon_url(&day.weather.icon),
    }
}

/// Build the page view. The unit toggle link carries the refetch locator, so
/// following it refetches by coordinates once they are known.
pub fn build_view(state: &DashboardState) -> DashboardView {
    let units = state.units();
    let forecast = state.forecast();

    let current = forecast.and_then(|f| current_conditions(f, units));
    let outlook = forecast
        .map(|f| {
            f.daily_forecasts
                .iter()
                .skip(1)
                .take(OUTLOOK_DAYS)
                .map(|day| outlook_day(day, units))
                .collect()
        })
        .unwrap_or_default();

    let toggled = units.toggled();
    let unit_toggle = Link {
        label: format!("Show {}", toggled.temperature_label()),
        href: dashboard_href(state.refetch_locator().as_ref(), toggled),
    };

    DashboardView {
        units: units.as_str().to_string(),
        units_label: units.temperature_label().to_string(),
        city_input: state.last_city().unwrap_or_default().to_string(),
        error: state.error().map(str::to_string),
        current,
        outlook,
        unit_toggle,
    }
}
