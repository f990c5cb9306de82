use crate::key::CollisionKey;
use crate::options::{OffsetAxis, ResolveOptions};
use crate::record::{CoordinateCheck, LatLng, PlacementResult, PointRecord};
use rustc_hash::FxHashMap;

/// Per-call occupancy tracker: how many markers already sit on each spot.
#[derive(Debug, Default)]
struct Occupancy {
    counts: FxHashMap<CollisionKey, usize>,
}

impl Occupancy {
    fn with_capacity(capacity: usize) -> Self {
        let mut counts = FxHashMap::default();
        counts.reserve(capacity);
        Self { counts }
    }

    /// Returns the rank of the new occupant (0 for the first marker on the spot).
    fn claim(&mut self, key: CollisionKey) -> usize {
        let count = self.counts.entry(key).or_insert(0);
        let rank = *count;
        *count += 1;
        rank
    }

    fn spots(&self) -> usize {
        self.counts.len()
    }
}

fn offset(at: LatLng, rank: usize, options: &ResolveOptions) -> LatLng {
    if rank == 0 {
        return at;
    }
    let shift = options.offset_step * rank as f64;
    match options.offset_axis {
        OffsetAxis::Longitude => LatLng {
            longitude: at.longitude + shift,
            ..at
        },
        OffsetAxis::Latitude => LatLng {
            latitude: at.latitude + shift,
            ..at
        },
    }
}

/// Assigns a final marker position to every record, in input order.
///
/// Records whose rounded coordinates match an earlier record are shifted by
/// `offset_step * rank` along `offset_axis`; the first record on a spot keeps its exact
/// coordinates. Records without usable coordinates come back with `has_placement == false` and
/// do not occupy any spot.
///
/// The function is total: it never fails and never touches shared state, so repeated calls with
/// the same input give identical output.
pub fn resolve_placements(
    records: &[PointRecord],
    options: &ResolveOptions,
) -> Vec<PlacementResult> {
    let precision = options.effective_precision();
    let mut occupancy = Occupancy::with_capacity(records.len());
    let mut out = Vec::with_capacity(records.len());
    let mut unplaced = 0usize;

    for record in records {
        match record.coordinates() {
            CoordinateCheck::Valid(at) => {
                let rank = occupancy.claim(CollisionKey::quantize(at, precision));
                out.push(PlacementResult::placed(
                    record,
                    offset(at, rank, options),
                    rank,
                ));
            }
            CoordinateCheck::Absent => {
                unplaced += 1;
                tracing::warn!(
                    id = %record.id,
                    name = record.name.as_deref().unwrap_or(""),
                    "record has no usable latitude/longitude; no marker will be placed"
                );
                out.push(PlacementResult::unplaced(record));
            }
        }
    }

    let placed = records.len() - unplaced;
    tracing::debug!(
        records = records.len(),
        placed,
        collided = placed - occupancy.spots(),
        unplaced,
        offset_axis = options.offset_axis.as_str(),
        "resolved marker placements"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupancy_ranks_are_per_key() {
        let a = CollisionKey::quantize(
            LatLng {
                latitude: 1.0,
                longitude: 2.0,
            },
            6,
        );
        let b = CollisionKey::quantize(
            LatLng {
                latitude: 2.0,
                longitude: 1.0,
            },
            6,
        );
        let mut occupancy = Occupancy::default();
        assert_eq!(occupancy.claim(a), 0);
        assert_eq!(occupancy.claim(b), 0);
        assert_eq!(occupancy.claim(a), 1);
        assert_eq!(occupancy.claim(a), 2);
        assert_eq!(occupancy.spots(), 2);
    }

    #[test]
    fn offset_moves_only_the_configured_axis() {
        let at = LatLng {
            latitude: 10.0,
            longitude: 20.0,
        };
        let lon = offset(at, 2, &ResolveOptions::default().with_offset_step(0.5));
        assert_eq!(
            lon,
            LatLng {
                latitude: 10.0,
                longitude: 21.0
            }
        );
        let lat = offset(
            at,
            2,
            &ResolveOptions::default()
                .with_offset_step(0.5)
                .with_offset_axis(OffsetAxis::Latitude),
        );
        assert_eq!(
            lat,
            LatLng {
                latitude: 11.0,
                longitude: 20.0
            }
        );
        assert_eq!(offset(at, 0, &ResolveOptions::default()), at);
    }
}
