use maud::{html, Markup, Render};

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum ButtonVariant {
    Primary,
    Strava,
    Success,
    Danger,
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum ButtonSize {
    Small,
    Medium,
    Large,
}

/// Anchor styled as a button; every action in this app is a plain GET.
pub struct Button {
    pub text: String,
    pub href: String,
    pub variant: ButtonVariant,
    pub size: ButtonSize,
    pub full_width: bool,
    pub icon: Option<Markup>,
}

impl Button {
    pub fn new(text: &str, href: &str) -> Self {
        Self {
            text: text.to_string(),
            href: href.to_string(),
            variant: ButtonVariant::Primary,
            size: ButtonSize::Medium,
            full_width: false,
            icon: None,
        }
    }

    pub fn primary(text: &str, href: &str) -> Self {
        Self::new(text, href)
    }

    pub fn strava(text: &str, href: &str) -> Self {
        Self::new(text, href).variant(ButtonVariant::Strava)
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    #[allow(dead_code)]
    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn icon(mut self, icon: Markup) -> Self {
        self.icon = Some(icon);
        self
    }

    fn variant_classes(&self) -> &'static str {
        match self.variant {
            ButtonVariant::Primary => "bg-blue-600 text-white hover:bg-blue-500",
            ButtonVariant::Strava => "bg-orange-600 text-white hover:bg-orange-700",
            ButtonVariant::Success => "bg-green-600 text-white hover:bg-green-500",
            ButtonVariant::Danger => "bg-red-600 text-white hover:bg-red-700",
            ButtonVariant::Secondary => "bg-white text-gray-900 ring-1 ring-gray-300 hover:bg-gray-50",
        }
    }

    fn size_classes(&self) -> &'static str {
        match self.size {
            ButtonSize::Small => "px-3 py-1.5 text-sm",
            ButtonSize::Medium => "px-4 py-2 text-base",
            ButtonSize::Large => "px-8 py-4 text-lg font-semibold",
        }
    }
}

impl Render for Button {
    fn render(&self) -> Markup {
        let width = if self.full_width { "w-full justify-center" } else { "" };

        html! {
            a href=(self.href)
              class={"inline-flex items-center rounded-lg font-semibold shadow-sm transition-colors "
                     (self.variant_classes()) " " (self.size_classes()) " " (width)} {
                @if let Some(icon) = &self.icon {
                    span class="mr-2" { (icon) }
                }
                (self.text)
            }
        }
    }
}
