use ratatui::style::Color;

use crate::{
    chart::{canvas::Rgba, geometry::ChartStyle},
    domain::occupancy::StatusTier,
};

pub const BRAND_ORANGE: Rgba = Rgba::rgb(0xff, 0x6a, 0x00);
pub const DARK_BACKGROUND: Rgba = Rgba::rgb(0x10, 0x10, 0x10);
pub const GRID: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
pub const TEXT_PRIMARY: Rgba = Rgba::WHITE;
pub const TEXT_SECONDARY: Rgba = Rgba::rgb(0xaa, 0xaa, 0xaa);

const FORECAST_FILL_ALPHA: f64 = 0.25;
const NOW_MARKER_ALPHA: f64 = 0.7;

#[must_use]
pub fn tier_color(tier: StatusTier) -> Rgba {
    match tier {
        StatusTier::NoData => Rgba::rgb(0x77, 0x77, 0x77),
        StatusTier::NotBusy => Rgba::rgb(0x2e, 0xcc, 0x71),
        StatusTier::ModeratelyBusy => Rgba::rgb(0xf1, 0xc4, 0x0f),
        StatusTier::Busy => Rgba::rgb(0xe6, 0x7e, 0x22),
        StatusTier::VeryBusy => Rgba::rgb(0xe7, 0x4c, 0x3c),
    }
}

#[must_use]
pub fn chart_style() -> ChartStyle {
    ChartStyle {
        grid: GRID,
        forecast_fill: BRAND_ORANGE.with_alpha(FORECAST_FILL_ALPHA),
        forecast_swatch: BRAND_ORANGE,
        realtime: Rgba::WHITE,
        now_marker: Rgba::WHITE.with_alpha(NOW_MARKER_ALPHA),
        legend_text: TEXT_SECONDARY,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

#[must_use]
pub fn detect_color_capability() -> ColorCapability {
    detect_color_capability_from(
        std::env::var("TERM").ok().as_deref(),
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("NO_COLOR").ok().as_deref(),
    )
}

#[must_use]
pub fn detect_color_capability_from(
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    let term = term.unwrap_or_default().to_lowercase();
    if no_color.is_some_and(|value| !value.is_empty()) || term == "dumb" {
        return ColorCapability::Basic16;
    }
    let colorterm = colorterm.unwrap_or_default().to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        ColorCapability::TrueColor
    } else if term.contains("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub capability: ColorCapability,
    pub background: Color,
    pub brand: Color,
    pub text: Color,
    pub muted_text: Color,
    pub chip_text: Color,
}

#[must_use]
pub fn theme_for(capability: ColorCapability) -> Theme {
    Theme {
        capability,
        background: quantize(DARK_BACKGROUND, capability),
        brand: quantize(BRAND_ORANGE, capability),
        text: quantize(TEXT_PRIMARY, capability),
        muted_text: quantize(TEXT_SECONDARY, capability),
        chip_text: quantize(DARK_BACKGROUND, capability),
    }
}

impl Theme {
    /// Terminal cells have no alpha, so translucent colors are flattened onto
    /// the widget background first.
    #[must_use]
    pub fn color(&self, rgba: Rgba) -> Color {
        quantize(rgba.over(DARK_BACKGROUND), self.capability)
    }

    #[must_use]
    pub fn tier(&self, tier: StatusTier) -> Color {
        self.color(tier_color(tier))
    }
}

#[must_use]
pub fn quantize(rgba: Rgba, capability: ColorCapability) -> Color {
    let Rgba { r, g, b, .. } = rgba;
    match capability {
        ColorCapability::TrueColor => Color::Rgb(r, g, b),
        ColorCapability::Xterm256 => {
            let to_cube = |v: u8| -> u8 { ((f32::from(v) / 255.0) * 5.0).round() as u8 };
            Color::Indexed(16 + 36 * to_cube(r) + 6 * to_cube(g) + to_cube(b))
        }
        ColorCapability::Basic16 => nearest_basic16(r, g, b),
    }
}

const BASIC16: [(Color, (u8, u8, u8)); 16] = [
    (Color::Black, (0, 0, 0)),
    (Color::Red, (170, 0, 0)),
    (Color::Green, (0, 170, 0)),
    (Color::Yellow, (170, 85, 0)),
    (Color::Blue, (0, 0, 170)),
    (Color::Magenta, (170, 0, 170)),
    (Color::Cyan, (0, 170, 170)),
    (Color::Gray, (170, 170, 170)),
    (Color::DarkGray, (85, 85, 85)),
    (Color::LightRed, (255, 85, 85)),
    (Color::LightGreen, (85, 255, 85)),
    (Color::LightYellow, (255, 255, 85)),
    (Color::LightBlue, (85, 85, 255)),
    (Color::LightMagenta, (255, 85, 255)),
    (Color::LightCyan, (85, 255, 255)),
    (Color::White, (255, 255, 255)),
];

fn nearest_basic16(r: u8, g: u8, b: u8) -> Color {
    let distance = |(pr, pg, pb): (u8, u8, u8)| {
        let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).pow(2);
        d(r, pr) + d(g, pg) + d(b, pb)
    };
    BASIC16
        .iter()
        .min_by_key(|(_, rgb)| distance(*rgb))
        .map_or(Color::White, |(color, _)| *color)
}
