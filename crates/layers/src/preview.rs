use crate::pin::GeoPin;
use crate::symbology::Thumbnail;

/// What the preview drawer shows for its pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDetails<'a> {
    pub name: &'a str,
    pub kind_label: &'a str,
    pub thumbnail: Thumbnail,
    pub style: Option<&'a str>,
    pub audio_url: Option<&'a str>,
    pub profile_path: Option<String>,
}

/// Detail drawer for a single selected pin.
#[derive(Debug, Default)]
pub struct PinPreview {
    pin: Option<GeoPin>,
}

impl PinPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `pin`, replacing any pin already open.
    pub fn open(&mut self, pin: GeoPin) {
        self.pin = Some(pin);
    }

    pub fn close(&mut self) {
        self.pin = None;
    }

    pub fn is_open(&self) -> bool {
        self.pin.is_some()
    }

    pub fn pin(&self) -> Option<&GeoPin> {
        self.pin.as_ref()
    }

    /// Profile route; only artists with a slug have one.
    pub fn profile_path(&self) -> Option<String> {
        self.pin.as_ref().and_then(profile_path)
    }

    /// Navigates to the profile, closing the drawer on the way.
    pub fn view_profile(&mut self) -> Option<String> {
        let path = self.profile_path()?;
        self.close();
        Some(path)
    }

    pub fn details(&self) -> Option<PreviewDetails<'_>> {
        let pin = self.pin.as_ref()?;
        Some(PreviewDetails {
            name: &pin.name,
            kind_label: pin.kind.display_label(),
            thumbnail: Thumbnail::for_pin(pin),
            style: pin.style.as_deref().filter(|s| !s.is_empty()),
            audio_url: pin.audio_url.as_deref().filter(|s| !s.is_empty()),
            profile_path: profile_path(pin),
        })
    }
}

fn profile_path(pin: &GeoPin) -> Option<String> {
    if !pin.kind.is_artist() {
        return None;
    }
    let slug = pin.slug.as_deref()?.trim();
    (!slug.is_empty()).then(|| format!("/artists/{slug}"))
}
