use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub active: Srgba<f64>,
    pub border: Srgba<f64>,
    pub icon: Srgba<f64>,
    pub text: Srgba<f64>,
    pub deadzone_outer: Srgba<f64>,
    pub deadzone_inner: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 0.6),
                Some(0.6),
            ),
            active: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
            border: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.05, 0.05, 0.05, 0.8),
                Some(0.8),
            ),
            icon: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.25, 0.25, 0.25, 0.95),
                Some(0.95),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            deadzone_outer: Self::lookup_color(
                context,
                "success_color",
                Srgba::new(0.5, 1.0, 0.5, 0.47),
                Some(0.47),
            ),
            deadzone_inner: Self::lookup_color(
                context,
                "error_color",
                Srgba::new(1.0, 0.5, 0.5, 0.47),
                Some(0.47),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.glide-window, .glide-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
