use axum::routing::get;
use maud::html;

use crate::{
    components::{
        layout::Page,
        ui::{
            feature_card::FeatureCard,
            heading::Heading,
            stat_card::{StatCard, StatColor},
        },
    },
    state::AppState,
};

pub mod api;
pub mod connect;
pub mod test_pages;

/// Build the application router with all routes
pub fn routes(app_state: AppState) -> axum::Router {
    axum::Router::new()
        // Public pages
        .route("/", get(home_page))
        .route("/dashboard", get(dashboard_page))
        // Strava OAuth flow
        .route("/connect", get(connect::connect_page))
        .route("/connect/strava", get(connect::start))
        .route("/connect/callback", get(connect::callback))
        // API test pages
        .route("/test/strava", get(test_pages::strava_test_page))
        .route("/test/intervals", get(test_pages::intervals_test_page))
        // JSON pass-through endpoints
        .route("/api/strava/activities", get(api::strava_activities))
        .route("/api/intervals/activities", get(api::intervals_activities))
        .route("/api/intervals/fitness", get(api::intervals_fitness))
        // Add trace layer for debugging
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Root page handler - the marketing homepage
async fn home_page() -> Page {
    let content = html! {
        // Hero
        section class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8 py-20" {
            div class="text-center" {
                h1 class="text-5xl font-bold tracking-tight text-gray-900 sm:text-6xl" {
                    "Your AI-Powered"
                    span class="block text-transparent bg-clip-text bg-gradient-to-r from-blue-600 to-orange-500" {
                        "Cycling Coach"
                    }
                }
                p class="mt-6 text-lg leading-8 text-gray-600 max-w-2xl mx-auto" {
                    "Train smarter with personalized coaching powered by AI. Get honest feedback, "
                    "custom training plans, and automatic workout sync to Zwift and Garmin."
                }
                div class="mt-10 flex flex-wrap items-center justify-center gap-4" {
                    a href="/dashboard" class="rounded-lg bg-blue-600 px-6 py-3 text-base font-semibold text-white shadow-sm hover:bg-blue-500 transition-colors" {
                        "View Dashboard"
                    }
                    a href="/connect" class="rounded-lg bg-orange-600 px-6 py-3 text-base font-semibold text-white shadow-sm hover:bg-orange-700 transition-colors" {
                        "Connect Strava"
                    }
                    a href="/test/intervals" class="rounded-lg bg-green-600 px-6 py-3 text-base font-semibold text-white shadow-sm hover:bg-green-500 transition-colors" {
                        "Test Intervals.icu"
                    }
                }
            }
        }

        // Stats
        section class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8 py-12" {
            div class="grid grid-cols-1 gap-8 sm:grid-cols-3" {
                (StatCard::new("Phase 1", "Currently Building", "AI Coach Chat & Data Sync", StatColor::Blue))
                (StatCard::new("3 Weeks", "To MVP", "Full working coach system", StatColor::Orange))
                (StatCard::new("$10-30", "Per Month", "vs $200-500 for real coach", StatColor::Green))
            }
        }

        // Features
        section id="features" class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8 py-20" {
            h2 class="text-3xl font-bold text-center text-gray-900 mb-12" {
                "What Makes Virtual Coach Different?"
            }
            div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-8" {
                (FeatureCard::new(
                    "AI-Powered Coaching",
                    "Uses Claude AI to analyze your training and provide personalized feedback with tough love when needed.",
                    "🧠"
                ))
                (FeatureCard::new(
                    "Data-Driven Insights",
                    "Tracks CTL, ATL, TSB and other advanced metrics to optimize your training load.",
                    "📊"
                ))
                (FeatureCard::new(
                    "Auto-Sync Everything",
                    "Workouts automatically sync to Zwift and Garmin via Intervals.icu. Zero manual steps.",
                    "🔄"
                ))
                (FeatureCard::new(
                    "Smart Planning",
                    "Generates training plans based on your goals, availability, and current fitness level.",
                    "📅"
                ))
            }
        }

        // How it works
        section id="how-it-works" class="bg-white py-20" {
            div class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8" {
                h2 class="text-3xl font-bold text-center text-gray-900 mb-12" { "How It Works" }
                div class="grid grid-cols-1 md:grid-cols-3 gap-8" {
                    div class="text-center" {
                        div class="mx-auto w-12 h-12 rounded-full bg-blue-100 flex items-center justify-center text-blue-600 text-xl font-bold mb-4" { "1" }
                        h3 class="text-lg font-semibold text-gray-900 mb-2" { "Connect Your Data" }
                        p class="text-gray-600" { "Link your Strava and Intervals.icu accounts to import your training history." }
                    }
                    div class="text-center" {
                        div class="mx-auto w-12 h-12 rounded-full bg-orange-100 flex items-center justify-center text-orange-600 text-xl font-bold mb-4" { "2" }
                        h3 class="text-lg font-semibold text-gray-900 mb-2" { "Set Your Goals" }
                        p class="text-gray-600" { "Tell the coach what you're training for and when you're available to ride." }
                    }
                    div class="text-center" {
                        div class="mx-auto w-12 h-12 rounded-full bg-green-100 flex items-center justify-center text-green-600 text-xl font-bold mb-4" { "3" }
                        h3 class="text-lg font-semibold text-gray-900 mb-2" { "Train Smarter" }
                        p class="text-gray-600" { "Get a personalized plan that adapts to your progress, with workouts synced to your devices." }
                    }
                }
            }
        }

        // Roadmap
        section id="roadmap" class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8 py-20" {
            h2 class="text-3xl font-bold text-center text-gray-900 mb-12" { "Roadmap" }
            div class="max-w-2xl mx-auto space-y-4" {
                div class="bg-white rounded-xl p-6 shadow-sm border border-gray-200" {
                    div class="flex items-center justify-between" {
                        h3 class="font-semibold text-gray-900" { "Phase 1: Foundation" }
                        span class="text-sm text-blue-600 font-semibold" { "In Progress" }
                    }
                    p class="mt-2 text-gray-600" { "Strava connection, data sync, basic dashboard." }
                }
                div class="bg-white rounded-xl p-6 shadow-sm border border-gray-200" {
                    div class="flex items-center justify-between" {
                        h3 class="font-semibold text-gray-900" { "Phase 2: AI Coach" }
                        span class="text-sm text-gray-400 font-semibold" { "Planned" }
                    }
                    p class="mt-2 text-gray-600" { "Coach chat, training plan generation, workout structure." }
                }
                div class="bg-white rounded-xl p-6 shadow-sm border border-gray-200" {
                    div class="flex items-center justify-between" {
                        h3 class="font-semibold text-gray-900" { "Phase 3: Integrations" }
                        span class="text-sm text-gray-400 font-semibold" { "Planned" }
                    }
                    p class="mt-2 text-gray-600" { "Zwift workout export, Garmin sync, wellness tracking." }
                }
            }
        }
    };

    Page::new(
        "Virtual Coach - AI-Powered Cycling Coaching".to_string(),
        Box::new(content),
    )
}

/// Dashboard page handler - mocked preview of the coaching dashboard
async fn dashboard_page() -> Page {
    let content = html! {
        main class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8 py-8" {
            // Welcome banner
            div class="bg-gradient-to-r from-blue-600 to-orange-500 rounded-xl p-8 text-white mb-8" {
                h1 class="text-3xl font-bold mb-2" { "Welcome to Your Virtual Coach" }
                p class="text-blue-100" { "Your personal AI cycling coach is being built. Phase 1 in progress!" }
            }

            // Status grid
            div class="grid grid-cols-1 md:grid-cols-3 gap-6 mb-8" {
                div class="bg-white rounded-lg p-6 shadow-sm border border-gray-200" {
                    div class="flex items-center gap-3 mb-4" {
                        div class="w-10 h-10 bg-blue-100 rounded-lg flex items-center justify-center text-blue-600 text-xl" { "⚙️" }
                        (Heading::h3("System Status"))
                    }
                    div class="space-y-2" {
                        div class="flex items-center justify-between text-sm" {
                            span class="text-gray-600" { "Web App" }
                            span class="text-green-600 font-semibold" { "✓ Running" }
                        }
                        div class="flex items-center justify-between text-sm" {
                            span class="text-gray-600" { "Strava Connection" }
                            span class="text-green-600 font-semibold" { "✓ Available" }
                        }
                        div class="flex items-center justify-between text-sm" {
                            span class="text-gray-600" { "AI Coach" }
                            span class="text-yellow-600 font-semibold" { "⏳ Coming Soon" }
                        }
                    }
                }

                div class="bg-white rounded-lg p-6 shadow-sm border border-gray-200" {
                    div class="flex items-center gap-3 mb-4" {
                        div class="w-10 h-10 bg-orange-100 rounded-lg flex items-center justify-center text-orange-600 text-xl" { "📊" }
                        (Heading::h3("Development Progress"))
                    }
                    div class="space-y-3" {
                        div {
                            div class="flex items-center justify-between text-sm mb-1" {
                                span class="text-gray-600" { "Phase 1 MVP" }
                                span class="text-gray-900 font-semibold" { "25%" }
                            }
                            div class="w-full bg-gray-200 rounded-full h-2" {
                                div class="bg-blue-600 h-2 rounded-full" style="width: 25%" {}
                            }
                        }
                        p class="text-xs text-gray-500" {
                            "Strava connection live. Data sync and coach chat coming next."
                        }
                    }
                }

                div class="bg-white rounded-lg p-6 shadow-sm border border-gray-200" {
                    div class="flex items-center gap-3 mb-4" {
                        div class="w-10 h-10 bg-green-100 rounded-lg flex items-center justify-center text-green-600 text-xl" { "🎯" }
                        (Heading::h3("Next Milestone"))
                    }
                    div class="space-y-2 text-sm" {
                        p class="text-gray-600" { "Week 1, Day 1-3:" }
                        ul class="space-y-1 text-gray-700" {
                            li { "• Activity storage" }
                            li { "• Authentication system" }
                            li { "• User profiles" }
                        }
                    }
                }
            }

            // Feature previews
            div class="grid grid-cols-1 lg:grid-cols-2 gap-6" {
                div class="bg-white rounded-lg p-6 shadow-sm border border-gray-200" {
                    (Heading::h3("🤖 AI Coach Chat (Coming in Week 3)"))
                    div class="bg-gray-50 rounded-lg p-4 space-y-3" {
                        div class="bg-white rounded-lg p-3 shadow-sm" {
                            p class="text-sm text-gray-600 mb-1" { "You" }
                            p class="text-gray-900" { "How did my ride yesterday look?" }
                        }
                        div class="bg-blue-50 rounded-lg p-3 shadow-sm" {
                            p class="text-sm text-blue-600 mb-1" { "Coach" }
                            p class="text-gray-900" {
                                "Your 2-hour endurance ride was solid! You held 220W normalized power "
                                "(88% FTP) and accumulated 145 TSS. Heart rate stayed in zone 2-3 as "
                                "planned. Good discipline on the pacing."
                            }
                        }
                    }
                }

                div class="bg-white rounded-lg p-6 shadow-sm border border-gray-200" {
                    (Heading::h3("🚴 Recent Activities (Preview)"))
                    div class="space-y-3" {
                        div class="flex items-center justify-between p-3 bg-gray-50 rounded-lg" {
                            div {
                                p class="font-medium text-gray-900" { "Morning Endurance Ride" }
                                p class="text-sm text-gray-500" { "2h 00m · 56.3 km · 145 TSS" }
                            }
                            span class="text-sm text-blue-600 font-semibold" { "Zone 2" }
                        }
                        div class="flex items-center justify-between p-3 bg-gray-50 rounded-lg" {
                            div {
                                p class="font-medium text-gray-900" { "VO2max Intervals" }
                                p class="text-sm text-gray-500" { "1h 15m · 32.1 km · 98 TSS" }
                            }
                            span class="text-sm text-orange-600 font-semibold" { "Zone 5" }
                        }
                        div class="flex items-center justify-between p-3 bg-gray-50 rounded-lg" {
                            div {
                                p class="font-medium text-gray-900" { "Recovery Spin" }
                                p class="text-sm text-gray-500" { "0h 45m · 18.7 km · 22 TSS" }
                            }
                            span class="text-sm text-green-600 font-semibold" { "Zone 1" }
                        }
                        p class="text-xs text-gray-500 italic" {
                            "Mock data. Connect Strava to see your own rides here."
                        }
                    }
                }
            }
        }
    };

    Page::new("Dashboard - Virtual Coach".to_string(), Box::new(content))
}
