use maud::{html, Markup, Render};

/// Full HTML page: shared head, header nav, content, footer.
pub struct Page {
    pub title: String,
    pub content: Box<dyn Render>,
}

impl Page {
    pub fn new(title: String, content: Box<dyn Render>) -> Self {
        Self { title, content }
    }
}

impl Render for Page {
    fn render(&self) -> Markup {
        html! {
            head {
                title { (self.title) }
                script src="https://unpkg.com/@tailwindcss/browser@4" {}
                meta name="viewport" content="width=device-width, initial-scale=1.0";
            }

            div class="min-h-screen bg-gradient-to-br from-blue-50 via-white to-orange-50" {
                // Header with logo and nav
                header class="border-b bg-white/80 backdrop-blur-sm" {
                    div class="mx-auto max-w-7xl px-4 sm:px-6 lg:px-8" {
                        div class="flex h-16 items-center justify-between" {
                            a href="/" class="flex items-center gap-2" {
                                div class="h-8 w-8 rounded-lg bg-gradient-to-br from-blue-600 to-orange-500" {}
                                span class="text-xl font-bold text-gray-900" { "Virtual Coach" }
                            }
                            nav class="hidden md:flex items-center gap-8" {
                                a href="/" class="text-gray-600 hover:text-gray-900" { "Home" }
                                a href="/dashboard" class="text-gray-600 hover:text-gray-900" { "Dashboard" }
                                a href="/connect" class="text-gray-600 hover:text-gray-900" { "Connect Strava" }
                            }
                        }
                    }
                }

                (self.content.render())

                // Footer credit
                footer class="mt-8 py-6 text-center text-sm" {
                    p class="text-gray-500" { "© 2026 Virtual Coach - AI-Powered Cycling Coaching" }
                }
            }
        }
    }
}

impl axum::response::IntoResponse for Page {
    fn into_response(self) -> axum::response::Response {
        self.render().into_response()
    }
}

pub struct Card {
    pub content: Box<dyn Render>,
    pub max_width: Option<String>,
}

impl Card {
    pub fn new(content: impl Render + 'static) -> Self {
        Self {
            content: Box::new(content),
            max_width: None,
        }
    }

    pub fn with_max_width(mut self, max_width: &str) -> Self {
        self.max_width = Some(max_width.to_string());
        self
    }
}

impl Render for Card {
    fn render(&self) -> Markup {
        let width_class = self.max_width.as_deref().unwrap_or("max-w-3xl");

        html! {
            div class={(width_class) " mx-auto bg-white rounded-lg shadow-sm border border-gray-200 overflow-hidden w-full"} {
                (self.content.render())
            }
        }
    }
}

pub struct ContentSection {
    pub padding: String,
    pub content: Box<dyn Render>,
}

impl ContentSection {
    pub fn new(content: impl Render + 'static) -> Self {
        Self {
            padding: "px-8 py-6".to_string(),
            content: Box::new(content),
        }
    }

    pub fn with_padding(mut self, padding: &str) -> Self {
        self.padding = padding.to_string();
        self
    }
}

impl Render for ContentSection {
    fn render(&self) -> Markup {
        html! {
            div class=(self.padding) {
                (self.content.render())
            }
        }
    }
}

/// The Strava wordmark arrow, inlined so no static asset pipeline is needed.
pub fn strava_glyph(class: &str) -> Markup {
    html! {
        svg class=(class) fill="currentColor" viewBox="0 0 24 24" {
            path d="M15.387 17.944l-2.089-4.116h-3.065L15.387 24l5.15-10.172h-3.066m-7.008-5.599l2.836 5.598h4.172L10.463 0l-7 13.828h4.169" {}
        }
    }
}
