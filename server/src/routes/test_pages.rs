use axum::extract::{Query, State};
use maud::{html, Markup};
use serde::Deserialize;
use tracing::error;

use crate::{
    components::{
        layout::Page,
        ui::{
            badge::{Badge, BadgeColor},
            button::Button,
            heading::Heading,
        },
    },
    intervals::{self, IntervalsClient},
    state::AppState,
    strava::{client::unix_date_range, StravaActivity, StravaClient},
};

#[derive(Debug, Deserialize)]
pub struct StravaTestParams {
    pub access_token: Option<String>,
    pub days: Option<i64>,
}

fn km(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

fn duration(seconds: i64) -> String {
    format!("{}h {:02}m", seconds / 3600, (seconds % 3600) / 60)
}

fn error_panel(message: &str) -> Markup {
    html! {
        div class="bg-red-50 border border-red-200 rounded-lg p-6" {
            (Heading::h2("Request failed").with_color("text-red-900"))
            p class="text-red-800" { (message) }
        }
    }
}

fn activities_table(activities: &[StravaActivity]) -> Markup {
    html! {
        table class="w-full text-left text-sm" {
            thead {
                tr class="border-b text-gray-500" {
                    th class="py-2 pr-4" { "Date" }
                    th class="py-2 pr-4" { "Name" }
                    th class="py-2 pr-4" { "Type" }
                    th class="py-2 pr-4" { "Distance" }
                    th class="py-2 pr-4" { "Moving time" }
                    th class="py-2" { "Avg power" }
                }
            }
            tbody {
                @for activity in activities {
                    tr class="border-b last:border-0" {
                        td class="py-2 pr-4 text-gray-500" { (activity.start_date_local.chars().take(10).collect::<String>()) }
                        td class="py-2 pr-4 font-medium text-gray-900" { (activity.name) }
                        td class="py-2 pr-4" { (Badge::new(&activity.sport_type, BadgeColor::Orange)) }
                        td class="py-2 pr-4" { (km(activity.distance)) }
                        td class="py-2 pr-4" { (duration(activity.moving_time)) }
                        td class="py-2" {
                            @if let Some(watts) = activity.average_watts {
                                (format!("{watts:.0} W"))
                            } @else {
                                span class="text-gray-400" { "—" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// `GET /test/strava` — demo page that fetches activities with a
/// caller-supplied token and renders them as a table.
pub async fn strava_test_page(
    State(state): State<AppState>,
    Query(params): Query<StravaTestParams>,
) -> Page {
    let days = params.days.unwrap_or(30);

    let body = match params.access_token.as_deref().filter(|t| !t.is_empty()) {
        None => token_instructions(),
        Some(access_token) => {
            let (after, before) = unix_date_range(days);
            let client = StravaClient::new(&state.http, &state.strava, access_token);

            match client.get_activities(1, 200, Some(before), Some(after)).await {
                Ok(activities) => html! {
                    div class="bg-white rounded-lg shadow-sm border border-gray-200 p-6" {
                        (Heading::h2(&format!("Your Activities (last {days} days)")))
                        p class="text-sm text-gray-600 mb-4" {
                            (activities.len()) " activities found"
                        }
                        @if activities.is_empty() {
                            p class="text-gray-500 italic" { "No activities in this window." }
                        } @else {
                            (activities_table(&activities))
                        }
                    }
                },
                Err(err) => {
                    error!(error = %err, "Strava test page fetch failed");
                    error_panel(&err.to_string())
                }
            }
        }
    };

    let content = html! {
        main class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8 py-8" {
            div class="mb-8" {
                (Heading::h1("Strava API Test"))
                p class="mt-2 text-gray-600" { "Test fetching data directly from the Strava API" }
            }
            (body)
        }
    };

    Page::new("Strava API Test - Virtual Coach".to_string(), Box::new(content))
}

fn token_instructions() -> Markup {
    html! {
        div class="bg-white rounded-lg shadow-sm border border-gray-200 p-6" {
            (Heading::h2("Strava Access Token"))
            p class="text-sm text-gray-600 mb-4" {
                "Append your Strava access token to this page's URL to fetch "
                "your activities. The token is only used for this request and "
                "is not stored."
            }
            div class="bg-gray-100 rounded p-3 mb-4" {
                code class="text-xs" { "/test/strava?access_token=YOUR_TOKEN&days=30" }
            }
            div class="bg-blue-50 border border-blue-200 rounded-lg p-4 mb-6" {
                p class="text-sm text-blue-900 font-semibold mb-2" { "How to get your access token:" }
                ol class="text-sm text-blue-800 space-y-1 list-decimal list-inside" {
                    li { "Connect your account on the connect page (recommended), or" }
                    li {
                        "Go to "
                        a href="https://www.strava.com/settings/api" target="_blank" class="underline" {
                            "strava.com/settings/api"
                        }
                        " and use the access token of your own app"
                    }
                }
            }
            (Button::strava("Connect with Strava", "/connect"))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IntervalsTestParams {
    pub days: Option<i64>,
}

/// `GET /test/intervals` — demo page over the Intervals.icu API using the
/// server-side credentials.
pub async fn intervals_test_page(
    State(state): State<AppState>,
    Query(params): Query<IntervalsTestParams>,
) -> Page {
    let days = params.days.unwrap_or(90);

    let body = match &state.intervals {
        None => html! {
            div class="bg-yellow-50 border border-yellow-200 rounded-lg p-6" {
                (Heading::h2("Intervals.icu not configured").with_color("text-yellow-900"))
                p class="text-yellow-800" {
                    "Set the " code { "INTERVALS_ICU_API_KEY" } " and "
                    code { "INTERVALS_ICU_ATHLETE_ID" }
                    " environment variables to enable this page."
                }
            }
        },
        Some(config) => {
            let (oldest, newest) = intervals::date_range(days);
            let client = IntervalsClient::new(&state.http, config);

            match client.get_fitness(&oldest, &newest).await {
                Ok(data) => {
                    let latest = data.last();
                    html! {
                        div class="bg-white rounded-lg shadow-sm border border-gray-200 p-6 mb-8" {
                            (Heading::h2("Current Fitness"))
                            @match latest {
                                Some(fitness) => {
                                    div class="grid grid-cols-3 gap-4 text-center" {
                                        div {
                                            div class="text-3xl font-bold text-blue-600" {
                                                (fitness.ctl.map(|v| format!("{v:.0}")).unwrap_or_else(|| "—".to_string()))
                                            }
                                            div class="text-sm text-gray-600" { "CTL (Fitness)" }
                                        }
                                        div {
                                            div class="text-3xl font-bold text-orange-500" {
                                                (fitness.atl.map(|v| format!("{v:.0}")).unwrap_or_else(|| "—".to_string()))
                                            }
                                            div class="text-sm text-gray-600" { "ATL (Fatigue)" }
                                        }
                                        div {
                                            div class="text-3xl font-bold text-green-600" {
                                                (fitness.tsb.map(|v| format!("{v:.0}")).unwrap_or_else(|| "—".to_string()))
                                            }
                                            div class="text-sm text-gray-600" { "TSB (Form)" }
                                        }
                                    }
                                    p class="text-xs text-gray-500 mt-4" { "As of " (fitness.date) }
                                }
                                None => {
                                    p class="text-gray-500 italic" { "No fitness data in this window." }
                                }
                            }
                        }
                    }
                }
                Err(err) => {
                    error!(error = %err, "Intervals.icu test page fetch failed");
                    error_panel(&err.to_string())
                }
            }
        }
    };

    let content = html! {
        main class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8 py-8" {
            div class="mb-8" {
                (Heading::h1("Intervals.icu API Test"))
                p class="mt-2 text-gray-600" { "Test fetching fitness data from Intervals.icu" }
            }
            (body)
        }
    };

    Page::new(
        "Intervals.icu API Test - Virtual Coach".to_string(),
        Box::new(content),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_km_formatting() {
        assert_eq!(km(40230.5), "40.2 km");
        assert_eq!(km(0.0), "0.0 km");
    }

    #[test]
    fn test_duration_formatting() {
        assert_eq!(duration(5400), "1h 30m");
        assert_eq!(duration(59), "0h 00m");
        assert_eq!(duration(3661), "1h 01m");
    }
}
