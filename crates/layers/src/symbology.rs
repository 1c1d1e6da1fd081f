use serde::{Deserialize, Serialize};

use crate::pin::GeoPin;

/// Badge glyph used for event pins.
pub const EVENT_GLYPH: &str = "🎭";

/// Map colour scheme.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl std::fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown theme: {:?} (expected light or dark)", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl std::str::FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

/// Small square image shown for a pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    Avatar { url: String },
    /// First letter of the name when an artist has no avatar.
    Initial(char),
    Glyph(&'static str),
}

impl Thumbnail {
    pub fn for_pin(pin: &GeoPin) -> Self {
        if !pin.kind.is_artist() {
            return Thumbnail::Glyph(EVENT_GLYPH);
        }
        match pin.avatar_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Thumbnail::Avatar {
                url: url.to_string(),
            },
            _ => Thumbnail::Initial(pin.initial()),
        }
    }
}

/// How the marker body is drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerTreatment {
    /// Circular avatar with an accent ring (artists).
    Avatar,
    /// Filled circle with a fixed glyph (events and other kinds).
    Badge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerVisual {
    pub treatment: MarkerTreatment,
    pub thumbnail: Thumbnail,
    pub size_px: f32,
    /// Member count; present only for stacks.
    pub count_badge: Option<usize>,
    pub scale: f32,
    /// Layered drop shadow for stacks.
    pub stacked_shadow: bool,
}

pub const ARTIST_MARKER_PX: f32 = 40.0;
pub const EVENT_MARKER_PX: f32 = 32.0;
pub const EXPANDED_SCALE: f32 = 1.1;
pub const HOVER_SCALE: f32 = 1.05;

impl MarkerVisual {
    /// Visual for a marker showing `face` on behalf of `count` pins.
    pub fn new(face: &GeoPin, count: usize, expanded: bool, hovered: bool) -> Self {
        let (treatment, size_px) = if face.kind.is_artist() {
            (MarkerTreatment::Avatar, ARTIST_MARKER_PX)
        } else {
            (MarkerTreatment::Badge, EVENT_MARKER_PX)
        };
        let scale = if expanded {
            EXPANDED_SCALE
        } else if hovered {
            HOVER_SCALE
        } else {
            1.0
        };
        Self {
            treatment,
            thumbnail: Thumbnail::for_pin(face),
            size_px,
            count_badge: (count > 1).then_some(count),
            scale,
            stacked_shadow: count > 1,
        }
    }
}

/// Paint properties of one line layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineLayerStyle {
    pub id: &'static str,
    pub source: &'static str,
    pub color: &'static str,
    pub width: f32,
    pub opacity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
}

pub const BORDER_SOURCE: &str = "ukraine-border";

impl LineLayerStyle {
    const fn new(id: &'static str, color: &'static str, width: f32, opacity: f32) -> Self {
        Self {
            id,
            source: BORDER_SOURCE,
            color,
            width,
            opacity,
            blur: None,
        }
    }

    const fn blurred(mut self, blur: f32) -> Self {
        self.blur = Some(blur);
        self
    }
}

/// Country border strokes, bottom layer first.
///
/// Dark: glowing amber with a white highlight. Light: charcoal over a white
/// outline.
pub fn border_layers(theme: Theme) -> Vec<LineLayerStyle> {
    match theme {
        Theme::Dark => vec![
            LineLayerStyle::new("ukraine-border-glow-outer", "#F5C647", 8.0, 0.3).blurred(4.0),
            LineLayerStyle::new("ukraine-border-main", "#F5C647", 3.0, 0.9),
            LineLayerStyle::new("ukraine-border-highlight", "#FFFFFF", 1.5, 0.4),
        ],
        Theme::Light => vec![
            LineLayerStyle::new("ukraine-border-outline", "#FFFFFF", 3.5, 0.6),
            LineLayerStyle::new("ukraine-border-main", "#28282B", 2.5, 1.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::PinKind;

    #[test]
    fn artist_without_avatar_uses_initial() {
        let p = GeoPin::new("1", PinKind::Artist, None, None, "Onuka");
        assert_eq!(Thumbnail::for_pin(&p), Thumbnail::Initial('O'));
        let p = p.with_avatar("https://cdn/o.png");
        assert_eq!(
            Thumbnail::for_pin(&p),
            Thumbnail::Avatar {
                url: "https://cdn/o.png".into()
            }
        );
    }

    #[test]
    fn events_always_use_glyph() {
        let p = GeoPin::new("1", PinKind::Event, None, None, "Fest").with_avatar("x");
        assert_eq!(Thumbnail::for_pin(&p), Thumbnail::Glyph(EVENT_GLYPH));
        let v = MarkerVisual::new(&p, 1, false, false);
        assert_eq!(v.treatment, MarkerTreatment::Badge);
        assert_eq!(v.size_px, EVENT_MARKER_PX);
    }

    #[test]
    fn count_badge_only_for_stacks() {
        let p = GeoPin::new("1", PinKind::Artist, None, None, "A");
        assert_eq!(MarkerVisual::new(&p, 1, false, false).count_badge, None);
        let v = MarkerVisual::new(&p, 3, true, false);
        assert_eq!(v.count_badge, Some(3));
        assert_eq!(v.scale, EXPANDED_SCALE);
        assert!(v.stacked_shadow);
    }

    #[test]
    fn border_layers_per_theme() {
        let dark = border_layers(Theme::Dark);
        assert_eq!(dark.len(), 3);
        assert_eq!(dark[0].blur, Some(4.0));
        let light = border_layers(Theme::Light);
        assert_eq!(light[1].color, "#28282B");
        assert!(light.iter().all(|l| l.source == BORDER_SOURCE));
        assert_eq!("DARK".parse::<Theme>(), Ok(Theme::Dark));
    }

    #[test]
    fn unknown_theme_is_reported() {
        assert_eq!(" light ".parse::<Theme>(), Ok(Theme::Light));
        let err = "sepia".parse::<Theme>().unwrap_err();
        assert_eq!(err, UnknownTheme("sepia".to_string()));
        assert_eq!(err.to_string(), "unknown theme: \"sepia\" (expected light or dark)");
    }
}
