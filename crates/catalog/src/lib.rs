use std::collections::BTreeMap;
use std::str::FromStr;

use foundation::{GeoBounds, LngLat};
use serde::{Deserialize, Serialize};

/// Camera zoom suggested when framing a single oblast.
pub const REGION_ZOOM: f64 = 8.0;

/// Known regions (oblasts) of the covered territory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionKey {
    Kyiv,
    Lviv,
    Odesa,
    Kharkiv,
    Dnipropetrovsk,
    Donetsk,
    Zaporizhzhia,
    Luhansk,
    Poltava,
    Cherkasy,
    Chernihiv,
    Sumy,
    Zhytomyr,
    Vinnytsia,
    Rivne,
    Volyn,
    Khmelnytskyi,
    Chernivtsi,
    Ternopil,
    IvanoFrankivsk,
    Zakarpattia,
    Kirovohrad,
    Mykolaiv,
    Kherson,
    Crimea,
}

impl RegionKey {
    /// Every key, in catalog order.
    pub const ALL: [RegionKey; 25] = [
        RegionKey::Kyiv,
        RegionKey::Lviv,
        RegionKey::Odesa,
        RegionKey::Kharkiv,
        RegionKey::Dnipropetrovsk,
        RegionKey::Donetsk,
        RegionKey::Zaporizhzhia,
        RegionKey::Luhansk,
        RegionKey::Poltava,
        RegionKey::Cherkasy,
        RegionKey::Chernihiv,
        RegionKey::Sumy,
        RegionKey::Zhytomyr,
        RegionKey::Vinnytsia,
        RegionKey::Rivne,
        RegionKey::Volyn,
        RegionKey::Khmelnytskyi,
        RegionKey::Chernivtsi,
        RegionKey::Ternopil,
        RegionKey::IvanoFrankivsk,
        RegionKey::Zakarpattia,
        RegionKey::Kirovohrad,
        RegionKey::Mykolaiv,
        RegionKey::Kherson,
        RegionKey::Crimea,
    ];

    /// Wire/filter identifier, e.g. `"IVANO_FRANKIVSK"`.
    pub fn as_str(self) -> &'static str {
        match self {
            RegionKey::Kyiv => "KYIV",
            RegionKey::Lviv => "LVIV",
            RegionKey::Odesa => "ODESA",
            RegionKey::Kharkiv => "KHARKIV",
            RegionKey::Dnipropetrovsk => "DNIPROPETROVSK",
            RegionKey::Donetsk => "DONETSK",
            RegionKey::Zaporizhzhia => "ZAPORIZHZHIA",
            RegionKey::Luhansk => "LUHANSK",
            RegionKey::Poltava => "POLTAVA",
            RegionKey::Cherkasy => "CHERKASY",
            RegionKey::Chernihiv => "CHERNIHIV",
            RegionKey::Sumy => "SUMY",
            RegionKey::Zhytomyr => "ZHYTOMYR",
            RegionKey::Vinnytsia => "VINNYTSIA",
            RegionKey::Rivne => "RIVNE",
            RegionKey::Volyn => "VOLYN",
            RegionKey::Khmelnytskyi => "KHMELNYTSKYI",
            RegionKey::Chernivtsi => "CHERNIVTSI",
            RegionKey::Ternopil => "TERNOPIL",
            RegionKey::IvanoFrankivsk => "IVANO_FRANKIVSK",
            RegionKey::Zakarpattia => "ZAKARPATTIA",
            RegionKey::Kirovohrad => "KIROVOHRAD",
            RegionKey::Mykolaiv => "MYKOLAIV",
            RegionKey::Kherson => "KHERSON",
            RegionKey::Crimea => "CRIMEA",
        }
    }

    /// Default Ukrainian label shown by the region filter.
    pub fn default_label(self) -> &'static str {
        match self {
            RegionKey::Kyiv => "Київська область",
            RegionKey::Lviv => "Львівська область",
            RegionKey::Odesa => "Одеська область",
            RegionKey::Kharkiv => "Харківська область",
            RegionKey::Dnipropetrovsk => "Дніпропетровська область",
            RegionKey::Donetsk => "Донецька область",
            RegionKey::Zaporizhzhia => "Запорізька область",
            RegionKey::Luhansk => "Луганська область",
            RegionKey::Poltava => "Полтавська область",
            RegionKey::Cherkasy => "Черкаська область",
            RegionKey::Chernihiv => "Чернігівська область",
            RegionKey::Sumy => "Сумська область",
            RegionKey::Zhytomyr => "Житомирська область",
            RegionKey::Vinnytsia => "Вінницька область",
            RegionKey::Rivne => "Рівненська область",
            RegionKey::Volyn => "Волинська область",
            RegionKey::Khmelnytskyi => "Хмельницька область",
            RegionKey::Chernivtsi => "Чернівецька область",
            RegionKey::Ternopil => "Тернопільська область",
            RegionKey::IvanoFrankivsk => "Івано-Франківська область",
            RegionKey::Zakarpattia => "Закарпатська область",
            RegionKey::Kirovohrad => "Кіровоградська область",
            RegionKey::Mykolaiv => "Миколаївська область",
            RegionKey::Kherson => "Херсонська область",
            RegionKey::Crimea => "Автономна Республіка Крим",
        }
    }
}

impl std::fmt::Display for RegionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRegion(pub String);

impl std::fmt::Display for UnknownRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown region key: {:?}", self.0)
    }
}

impl std::error::Error for UnknownRegion {}

impl FromStr for RegionKey {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegionKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

/// Geometry used to frame one region on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub key: RegionKey,
    /// Fallback camera target.
    pub center: LngLat,
    pub bounds: GeoBounds,
    pub zoom: f64,
}

impl Region {
    const fn new(key: RegionKey, center: [f64; 2], bounds: [[f64; 2]; 2]) -> Self {
        Self {
            key,
            center: LngLat::new(center[0], center[1]),
            bounds: GeoBounds::from_corners(bounds),
            zoom: REGION_ZOOM,
        }
    }

    pub fn for_key(key: RegionKey) -> &'static Region {
        // REGIONS is laid out in `RegionKey::ALL` order.
        &REGIONS[key as usize]
    }
}

/// Static region table: `[lng, lat]` centers, `[[minLng, minLat], [maxLng, maxLat]]` bounds.
pub static REGIONS: [Region; 25] = [
    Region::new(RegionKey::Kyiv, [30.5234, 50.4501], [[29.2, 49.8], [31.8, 51.5]]),
    Region::new(RegionKey::Lviv, [24.0297, 49.8397], [[22.5, 49.0], [25.5, 50.7]]),
    Region::new(RegionKey::Odesa, [30.7233, 46.4825], [[28.5, 45.2], [32.0, 47.8]]),
    Region::new(RegionKey::Kharkiv, [36.2304, 49.9935], [[35.0, 49.0], [38.0, 51.0]]),
    Region::new(RegionKey::Dnipropetrovsk, [35.0462, 48.4647], [[33.5, 47.5], [36.5, 49.5]]),
    Region::new(RegionKey::Donetsk, [37.8028, 48.0159], [[36.5, 46.8], [39.5, 49.2]]),
    Region::new(RegionKey::Zaporizhzhia, [35.1396, 47.8388], [[33.5, 46.5], [37.0, 48.5]]),
    Region::new(RegionKey::Luhansk, [39.3078, 48.5740], [[37.5, 48.0], [40.2, 49.8]]),
    Region::new(RegionKey::Poltava, [34.5514, 49.5883], [[32.5, 48.8], [35.5, 50.5]]),
    Region::new(RegionKey::Cherkasy, [32.0617, 49.4445], [[30.5, 48.5], [33.0, 50.2]]),
    Region::new(RegionKey::Chernihiv, [31.2893, 51.4982], [[30.0, 50.5], [33.5, 52.4]]),
    Region::new(RegionKey::Sumy, [34.8008, 50.9077], [[32.5, 50.2], [35.5, 51.9]]),
    Region::new(RegionKey::Zhytomyr, [28.6587, 50.2547], [[27.0, 49.5], [30.5, 51.5]]),
    Region::new(RegionKey::Vinnytsia, [28.4682, 49.2331], [[26.5, 48.0], [30.0, 50.0]]),
    Region::new(RegionKey::Rivne, [26.2517, 50.6199], [[24.5, 50.0], [27.5, 51.5]]),
    Region::new(RegionKey::Volyn, [25.3254, 50.7472], [[23.5, 50.2], [26.5, 51.6]]),
    Region::new(RegionKey::Khmelnytskyi, [26.9871, 49.4229], [[25.5, 48.5], [28.5, 50.5]]),
    Region::new(RegionKey::Chernivtsi, [25.9358, 48.2921], [[25.0, 47.5], [27.0, 48.9]]),
    Region::new(RegionKey::Ternopil, [25.5948, 49.5535], [[24.5, 48.8], [26.5, 50.2]]),
    Region::new(RegionKey::IvanoFrankivsk, [24.7111, 48.9226], [[23.5, 48.0], [26.0, 49.3]]),
    Region::new(RegionKey::Zakarpattia, [23.2532, 48.6208], [[22.1, 47.9], [24.6, 49.1]]),
    Region::new(RegionKey::Kirovohrad, [32.2623, 48.5079], [[30.5, 47.5], [33.5, 49.5]]),
    Region::new(RegionKey::Mykolaiv, [31.9946, 46.9750], [[30.0, 46.0], [33.0, 48.0]]),
    Region::new(RegionKey::Kherson, [32.6178, 46.6354], [[31.0, 45.5], [34.5, 47.5]]),
    Region::new(RegionKey::Crimea, [34.1021, 45.0355], [[32.5, 44.4], [36.6, 46.2]]),
];

/// Looks up region geometry by key.
///
/// `None`, an empty key, or an unknown key all yield `None`; callers treat that
/// as "no region selected" and fall back to the whole-territory view.
pub fn lookup_region(key: Option<&str>) -> Option<&'static Region> {
    let key = key?;
    if key.is_empty() {
        return None;
    }
    key.parse::<RegionKey>().ok().map(Region::for_key)
}

/// `{key, label}` pair used to populate the region filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLabel {
    pub key: String,
    pub label: String,
}

/// Built-in labels, in catalog order.
pub fn region_labels() -> Vec<RegionLabel> {
    RegionKey::ALL
        .iter()
        .map(|k| RegionLabel {
            key: k.as_str().to_string(),
            label: k.default_label().to_string(),
        })
        .collect()
}

/// Region labels joined with the static geometry table.
///
/// Labels can come from a remote lookup endpoint; geometry never does. The two
/// are joined on `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCatalog {
    labels: BTreeMap<RegionKey, String>,
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RegionCatalog {
    pub fn builtin() -> Self {
        Self {
            labels: RegionKey::ALL
                .iter()
                .map(|k| (*k, k.default_label().to_string()))
                .collect(),
        }
    }

    /// Builds a catalog from externally sourced labels.
    ///
    /// Returns the catalog plus the labels that were skipped because no
    /// geometry exists for their key. Regions with geometry but no label keep
    /// their built-in label.
    pub fn with_labels(labels: Vec<RegionLabel>) -> (Self, Vec<RegionLabel>) {
        let mut catalog = Self::builtin();
        let mut skipped = Vec::new();
        for l in labels {
            match l.key.parse::<RegionKey>() {
                Ok(k) if !l.label.trim().is_empty() => {
                    catalog.labels.insert(k, l.label.trim().to_string());
                }
                _ => skipped.push(l),
            }
        }
        (catalog, skipped)
    }

    pub fn label(&self, key: RegionKey) -> &str {
        self.labels
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_label())
    }

    pub fn lookup(&self, key: Option<&str>) -> Option<&'static Region> {
        lookup_region(key)
    }

    /// `(label, geometry)` for every region, in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &'static Region)> + '_ {
        RegionKey::ALL
            .iter()
            .map(|k| (self.label(*k), Region::for_key(*k)))
    }

    pub fn labels(&self) -> Vec<RegionLabel> {
        self.entries()
            .map(|(label, r)| RegionLabel {
                key: r.key.as_str().to_string(),
                label: label.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_is_in_key_order() {
        for (i, k) in RegionKey::ALL.iter().enumerate() {
            assert_eq!(REGIONS[i].key, *k);
            assert_eq!(Region::for_key(*k).key, *k);
        }
    }

    #[test]
    fn every_region_is_well_formed() {
        for r in &REGIONS {
            assert!(r.bounds.is_valid(), "{} bounds", r.key);
            assert!(r.bounds.contains(r.center), "{} center", r.key);
            assert_eq!(r.zoom, REGION_ZOOM);
        }
    }

    #[test]
    fn lookup_known_key() {
        let lviv = lookup_region(Some("LVIV")).unwrap();
        assert_eq!(lviv.key, RegionKey::Lviv);
        assert_eq!(lviv.bounds.as_corners(), [[22.5, 49.0], [25.5, 50.7]]);
        assert_eq!(lviv.center, LngLat::new(24.0297, 49.8397));
    }

    #[test]
    fn lookup_unknown_or_empty_is_none() {
        assert!(lookup_region(Some("NONEXISTENT_KEY")).is_none());
        assert!(lookup_region(Some("")).is_none());
        assert!(lookup_region(None).is_none());
        assert!(lookup_region(Some("lviv")).is_none());
        assert!(lookup_region(Some(" LVIV ")).is_none());
    }

    #[test]
    fn keys_round_trip_through_strings_and_serde() {
        for k in RegionKey::ALL {
            assert_eq!(k.as_str().parse::<RegionKey>(), Ok(k));
            let json = serde_json::to_string(&k).unwrap();
            assert_eq!(json, format!("\"{}\"", k.as_str()));
        }
        assert_eq!(
            "NOWHERE".parse::<RegionKey>(),
            Err(UnknownRegion("NOWHERE".to_string()))
        );
    }

    #[test]
    fn remote_labels_override_and_unknown_keys_are_skipped() {
        let remote: Vec<RegionLabel> = serde_json::from_str(
            r#"[{"key":"LVIV","label":"Львівщина"},{"key":"ATLANTIS","label":"?"}]"#,
        )
        .unwrap();
        let (catalog, skipped) = RegionCatalog::with_labels(remote);
        assert_eq!(catalog.label(RegionKey::Lviv), "Львівщина");
        assert_eq!(catalog.label(RegionKey::Kyiv), "Київська область");
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].key, "ATLANTIS");
        assert_eq!(catalog.labels().len(), 25);
    }

    #[test]
    fn builtin_labels_match_keys() {
        let labels = region_labels();
        assert_eq!(labels.len(), RegionKey::ALL.len());
        assert_eq!(labels[0].key, "KYIV");
        assert_eq!(labels[24].label, "Автономна Республіка Крим");
    }
}
