//! Point reduction for long historical windows.

use std::collections::BTreeMap;

use chrono::Datelike;

use super::yields_model::{HistoricalYieldPoint, Period, Sampling};

/// Reduce `points` to the density `period` calls for.
///
/// Within each bucket (ISO week or calendar month) the point with the latest
/// date is kept. The result is sorted by date ascending.
pub fn downsample(points: Vec<HistoricalYieldPoint>, period: Period) -> Vec<HistoricalYieldPoint> {
    let bucket: fn(&HistoricalYieldPoint) -> (i32, u32) = match period.sampling() {
        Sampling::Daily => {
            let mut points = points;
            points.sort_by_key(|p| p.date);
            return points;
        }
        Sampling::Weekly => |p| {
            let week = p.date.iso_week();
            (week.year(), week.week())
        },
        Sampling::Monthly => |p| (p.date.year(), p.date.month()),
    };

    let mut buckets: BTreeMap<(i32, u32), HistoricalYieldPoint> = BTreeMap::new();
    for point in points {
        let key = bucket(&point);
        match buckets.get(&key) {
            Some(existing) if existing.date >= point.date => {}
            _ => {
                buckets.insert(key, point);
            }
        }
    }

    let mut sampled: Vec<HistoricalYieldPoint> = buckets.into_values().collect();
    sampled.sort_by_key(|p| p.date);
    sampled
}
