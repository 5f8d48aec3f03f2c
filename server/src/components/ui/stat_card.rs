use maud::{html, Markup, Render};

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum StatColor {
    Blue,
    Orange,
    Green,
}

/// Headline number with a label and a one-line detail, for stat rows.
pub struct StatCard {
    pub value: String,
    pub label: String,
    pub detail: String,
    pub color: StatColor,
}

impl StatCard {
    pub fn new(value: &str, label: &str, detail: &str, color: StatColor) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            detail: detail.to_string(),
            color,
        }
    }

    fn value_color(&self) -> &'static str {
        match self.color {
            StatColor::Blue => "text-blue-600",
            StatColor::Orange => "text-orange-500",
            StatColor::Green => "text-green-600",
        }
    }
}

impl Render for StatCard {
    fn render(&self) -> Markup {
        html! {
            div class="bg-white rounded-xl p-6 shadow-sm border border-gray-200" {
                div class={"text-3xl font-bold " (self.value_color())} { (self.value) }
                div class="mt-2 text-sm text-gray-600" { (self.label) }
                div class="mt-4 text-gray-900" { (self.detail) }
            }
        }
    }
}
