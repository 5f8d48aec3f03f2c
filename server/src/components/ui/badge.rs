use maud::{html, Markup, Render};

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum BadgeColor {
    Blue,
    Green,
    Red,
    Yellow,
    Orange,
    Gray,
}

pub struct Badge {
    pub text: String,
    pub color: BadgeColor,
    pub rounded: bool,
}

impl Badge {
    pub fn new(text: &str, color: BadgeColor) -> Self {
        Self {
            text: text.to_string(),
            color,
            rounded: false,
        }
    }

    pub fn rounded(mut self, rounded: bool) -> Self {
        self.rounded = rounded;
        self
    }

    fn color_classes(&self) -> &'static str {
        match self.color {
            BadgeColor::Blue => "bg-blue-100 text-blue-800",
            BadgeColor::Green => "bg-green-100 text-green-800",
            BadgeColor::Red => "bg-red-100 text-red-800",
            BadgeColor::Yellow => "bg-yellow-100 text-yellow-800",
            BadgeColor::Orange => "bg-orange-100 text-orange-800",
            BadgeColor::Gray => "bg-gray-100 text-gray-800",
        }
    }
}

impl Render for Badge {
    fn render(&self) -> Markup {
        let rounded = if self.rounded { "rounded-full" } else { "rounded" };

        html! {
            span class={"inline-block px-2.5 py-0.5 text-sm font-medium " (self.color_classes()) " " (rounded)} {
                (self.text)
            }
        }
    }
}
