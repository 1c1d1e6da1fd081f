//! Spatial grouping of pins that share a (rounded) location.
//!
//! Ordering contract:
//! - Groups appear in the order their key is first seen in the input.
//! - Members keep input order.
//! - Pins without a valid position are dropped and never appear in any group.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use foundation::LngLat;
use foundation::math::CoordKey;

use crate::pin::GeoPin;

/// Decimals kept when keying coordinates (~0.1 m at the equator).
pub const COORD_DECIMALS: u32 = 6;

/// One or more pins rendered as a single marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PinGroup {
    key: CoordKey,
    members: Vec<GeoPin>,
}

impl PinGroup {
    pub fn key(&self) -> CoordKey {
        self.key
    }

    /// The shared (rounded) position.
    pub fn position(&self) -> LngLat {
        self.key.position()
    }

    pub fn latitude(&self) -> f64 {
        self.position().lat
    }

    pub fn longitude(&self) -> f64 {
        self.position().lng
    }

    pub fn members(&self) -> &[GeoPin] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The member shown on the marker itself.
    pub fn first(&self) -> Option<&GeoPin> {
        self.members.first()
    }

    pub fn is_stack(&self) -> bool {
        self.members.len() > 1
    }
}

/// Groups pins by their position rounded to [`COORD_DECIMALS`].
pub fn group_pins(pins: &[GeoPin]) -> Vec<PinGroup> {
    group_pins_with_precision(pins, COORD_DECIMALS)
}

pub fn group_pins_with_precision(pins: &[GeoPin], decimals: u32) -> Vec<PinGroup> {
    let mut slots: HashMap<CoordKey, usize> = HashMap::new();
    let mut groups: Vec<PinGroup> = Vec::new();

    for pin in pins {
        let Some(key) = pin.position().and_then(|p| CoordKey::new(p, decimals)) else {
            continue;
        };
        match slots.entry(key) {
            Entry::Occupied(slot) => groups[*slot.get()].members.push(pin.clone()),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(PinGroup {
                    key,
                    members: vec![pin.clone()],
                });
            }
        }
    }

    groups
}

/// Recomputes groups only when the pin list's content changes.
///
/// The memo key is a blake3 hash over every pin field, so an identical list
/// fetched again reuses the previous result while any edit invalidates it.
#[derive(Debug)]
pub struct GroupingMemo {
    decimals: u32,
    content: Option<blake3::Hash>,
    groups: Vec<PinGroup>,
    recomputations: u64,
}

impl Default for GroupingMemo {
    fn default() -> Self {
        Self::with_precision(COORD_DECIMALS)
    }
}

impl GroupingMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(decimals: u32) -> Self {
        Self {
            decimals,
            content: None,
            groups: Vec::new(),
            recomputations: 0,
        }
    }

    pub fn groups(&mut self, pins: &[GeoPin]) -> &[PinGroup] {
        let hash = content_hash(pins);
        if self.content != Some(hash) {
            self.groups = group_pins_with_precision(pins, self.decimals);
            self.content = Some(hash);
            self.recomputations += 1;
        }
        &self.groups
    }

    /// Number of times grouping actually ran.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

fn content_hash(pins: &[GeoPin]) -> blake3::Hash {
    let mut h = blake3::Hasher::new();
    h.update(&(pins.len() as u64).to_le_bytes());
    for p in pins {
        put_str(&mut h, &p.id);
        put_str(&mut h, p.kind.as_str());
        put_f64(&mut h, p.latitude);
        put_f64(&mut h, p.longitude);
        put_str(&mut h, &p.name);
        for field in [&p.avatar_url, &p.style, &p.slug, &p.audio_url] {
            match field {
                Some(s) => {
                    h.update(&[1]);
                    put_str(&mut h, s);
                }
                None => {
                    h.update(&[0]);
                }
            }
        }
    }
    h.finalize()
}

fn put_str(h: &mut blake3::Hasher, s: &str) {
    h.update(&(s.len() as u64).to_le_bytes());
    h.update(s.as_bytes());
}

fn put_f64(h: &mut blake3::Hasher, v: Option<f64>) {
    match v {
        Some(v) => {
            h.update(&[1]);
            h.update(&v.to_bits().to_le_bytes());
        }
        None => {
            h.update(&[0]);
        }
    }
}
