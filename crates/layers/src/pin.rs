use foundation::LngLat;
use serde::{Deserialize, Serialize};

/// What a pin points at.
///
/// Serialized as the API's upper-case tag; unknown tags are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PinKind {
    Artist,
    Event,
    Other(String),
}

impl PinKind {
    pub fn as_str(&self) -> &str {
        match self {
            PinKind::Artist => "ARTIST",
            PinKind::Event => "EVENT",
            PinKind::Other(s) => s,
        }
    }

    pub fn is_artist(&self) -> bool {
        matches!(self, PinKind::Artist)
    }

    /// Label shown in the pin preview.
    pub fn display_label(&self) -> &str {
        match self {
            PinKind::Artist => "Артист",
            PinKind::Event => "Подія",
            PinKind::Other(s) => s,
        }
    }
}

impl From<String> for PinKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ARTIST" => PinKind::Artist,
            "EVENT" => PinKind::Event,
            _ => PinKind::Other(s),
        }
    }
}

impl From<&str> for PinKind {
    fn from(s: &str) -> Self {
        PinKind::from(s.to_string())
    }
}

impl From<PinKind> for String {
    fn from(k: PinKind) -> Self {
        match k {
            PinKind::Other(s) => s,
            k => k.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A geo-located artist or event, as delivered by one pin fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPin {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PinKind,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl GeoPin {
    pub fn new(
        id: impl Into<String>,
        kind: PinKind,
        latitude: Option<f64>,
        longitude: Option<f64>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            latitude,
            longitude,
            name: name.into(),
            avatar_url: None,
            style: None,
            slug: None,
            audio_url: None,
        }
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_audio(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    /// Valid WGS84 position, `None` if a coordinate is missing or out of range.
    pub fn position(&self) -> Option<LngLat> {
        LngLat::from_lat_lng(self.latitude, self.longitude)
    }

    /// Placeholder letter for pins without an avatar.
    pub fn initial(&self) -> char {
        self.name.trim().chars().next().unwrap_or('?')
    }
}
