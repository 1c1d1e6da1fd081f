//! Wire format of the map pin endpoint.
//!
//! `GET /api/v1/map/pins` answers with a JSON array of [`MapPinDto`]. Ids may
//! arrive as numbers or strings; both decode to the string id used by
//! [`GeoPin`].

use layers::{GeoPin, PinKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Text(String),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Int(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPinDto {
    pub id: WireId,
    #[serde(rename = "type")]
    pub kind: PinKind,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
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

impl From<MapPinDto> for GeoPin {
    fn from(dto: MapPinDto) -> Self {
        GeoPin {
            id: dto.id.into(),
            kind: dto.kind,
            latitude: dto.latitude,
            longitude: dto.longitude,
            name: dto.name,
            avatar_url: dto.avatar_url,
            style: dto.style,
            slug: dto.slug,
            audio_url: dto.audio_url,
        }
    }
}

/// Decodes a pin response body.
pub fn decode_pins(body: &[u8]) -> Result<Vec<GeoPin>, serde_json::Error> {
    let dtos: Vec<MapPinDto> = serde_json::from_slice(body)?;
    Ok(dtos.into_iter().map(GeoPin::from).collect())
}

#[cfg(test)]
mod tests {
    use super::decode_pins;
    use layers::PinKind;

    #[test]
    fn decodes_numeric_and_string_ids() {
        let body = br#"[
            {"id": 12, "type": "ARTIST", "latitude": 50.45, "longitude": 30.52,
             "name": "Jamala", "avatarUrl": "https://cdn/j.jpg", "slug": "jamala"},
            {"id": "ev-3", "type": "EVENT", "latitude": null, "longitude": 24.0,
             "name": "Fest"}
        ]"#;
        let pins = decode_pins(body).unwrap();
        assert_eq!(pins[0].id, "12");
        assert_eq!(pins[0].avatar_url.as_deref(), Some("https://cdn/j.jpg"));
        assert_eq!(pins[1].id, "ev-3");
        assert_eq!(pins[1].kind, PinKind::Event);
        assert_eq!(pins[1].latitude, None);
    }

    #[test]
    fn missing_coordinates_and_unknown_kinds_decode() {
        let body = br#"[{"id": 1, "type": "VENUE", "name": "Club"}]"#;
        let pins = decode_pins(body).unwrap();
        assert_eq!(pins[0].kind, PinKind::Other("VENUE".into()));
        assert!(pins[0].position().is_none());
    }

    #[test]
    fn rejects_non_array_bodies() {
        assert!(decode_pins(br#"{"error": "nope"}"#).is_err());
    }
}
