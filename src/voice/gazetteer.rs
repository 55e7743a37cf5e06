// Static gazetteer - known place names checked before external geocoding
//
// Recognition regularly mangles place names, so lookup is exact first
// and then fuzzy over normalized Levenshtein similarity. Only clear
// near-misses match; everything else falls through to the geocoder.

use crate::geo::LatLng;
use crate::nav_constants::GAZETTEER_FUZZY_THRESHOLD;
use strsim::normalized_levenshtein;

/// A gazetteer match
#[derive(Debug, Clone, PartialEq)]
pub struct GazetteerHit {
    /// Canonical place name
    pub name: &'static str,
    pub position: LatLng,
    /// 1.0 for an exact match, otherwise the similarity score
    pub score: f64,
}

/// Known Indonesian cities and Jakarta-area landmarks
const PLACES: &[(&str, f64, f64)] = &[
    ("jakarta", -6.2088, 106.8456),
    ("bandung", -6.9175, 107.6191),
    ("surabaya", -7.2575, 112.7521),
    ("yogyakarta", -7.7956, 110.3695),
    ("semarang", -6.9667, 110.4167),
    ("medan", 3.5952, 98.6722),
    ("bogor", -6.5971, 106.8060),
    ("depok", -6.4025, 106.7942),
    ("tangerang", -6.1783, 106.6319),
    ("bekasi", -6.2383, 106.9756),
    ("monas", -6.1754, 106.8272),
    ("bundaran hi", -6.1951, 106.8230),
    ("stasiun gambir", -6.1767, 106.8306),
    ("pasar baru", -6.1645, 106.8341),
    ("malioboro", -7.7928, 110.3658),
    ("kota tua", -6.1352, 106.8133),
    ("ancol", -6.1227, 106.8308),
    ("ragunan", -6.3119, 106.8201),
];

/// Static name-to-coordinate lookup
pub struct Gazetteer {
    fuzzy_threshold: f64,
}

impl Gazetteer {
    /// Create a gazetteer with the default fuzzy threshold
    pub fn new() -> Self {
        Self {
            fuzzy_threshold: GAZETTEER_FUZZY_THRESHOLD,
        }
    }

    /// Create a gazetteer with a custom fuzzy threshold
    pub fn with_threshold(fuzzy_threshold: f64) -> Self {
        Self { fuzzy_threshold }
    }

    /// Look up a normalized place name, exact match then fuzzy.
    pub fn lookup(&self, query: &str) -> Option<GazetteerHit> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        for (name, lat, lng) in PLACES {
            if *name == query {
                return Some(GazetteerHit {
                    name,
                    position: LatLng::new(*lat, *lng),
                    score: 1.0,
                });
            }
        }

        let mut best: Option<GazetteerHit> = None;
        for (name, lat, lng) in PLACES {
            let score = normalized_levenshtein(&query, name);
            if score >= self.fuzzy_threshold
                && best.as_ref().map(|b| score > b.score).unwrap_or(true)
            {
                best = Some(GazetteerHit {
                    name,
                    position: LatLng::new(*lat, *lng),
                    score,
                });
            }
        }
        if let Some(hit) = &best {
            crate::debug!(
                "[voice] Gazetteer fuzzy match {:?} -> {:?} ({:.2})",
                query,
                hit.name,
                hit.score
            );
        }
        best
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "gazetteer_test.rs"]
mod tests;
