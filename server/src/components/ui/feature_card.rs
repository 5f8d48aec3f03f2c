use maud::{html, Markup, Render};

pub struct FeatureCard {
    pub title: String,
    pub description: String,
    pub emoji: String,
}

impl FeatureCard {
    pub fn new(title: &str, description: &str, emoji: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            emoji: emoji.to_string(),
        }
    }
}

impl Render for FeatureCard {
    fn render(&self) -> Markup {
        html! {
            div class="bg-white rounded-xl p-6 shadow-sm border border-gray-200" {
                div class="text-2xl mb-4" { (self.emoji) }
                h3 class="text-lg font-semibold text-gray-900 mb-2" { (self.title) }
                p class="text-gray-600" { (self.description) }
            }
        }
    }
}
