//! Segment planning
//!
//! Splits a source of known length into fixed-length reels. Every segment
//! requests the full configured length; the trim tool clamps the final one
//! at end of stream.

use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::domain::model::{Segment, SegmentDuration, SegmentPlan};

/// Upper bound on segments in one plan
pub const MAX_SEGMENTS: u32 = 100_000;

/// Planner for fixed-duration reel segments
#[derive(Debug, Default, Clone, Copy)]
pub struct SegmentPlanner;

impl SegmentPlanner {
    /// Create a new segment planner
    pub fn new() -> Self {
        Self
    }

    /// Number of segments needed to cover `total_duration`, or `None` past
    /// [`MAX_SEGMENTS`]
    pub fn segment_count(total_duration: f64, segment_duration: SegmentDuration) -> Option<u32> {
        let count = (total_duration / segment_duration.as_secs_f64()).ceil();
        if count > f64::from(MAX_SEGMENTS) {
            return None;
        }
        Some(count as u32)
    }

    /// Plan the segments for a source of `total_duration` seconds
    pub fn plan(
        &self,
        total_duration: f64,
        segment_duration: SegmentDuration,
    ) -> Result<SegmentPlan, DomainError> {
        if !total_duration.is_finite() || total_duration < 0.0 {
            return Err(DomainError::Probe(format!(
                "Media duration must be a non-negative number, got {}",
                total_duration
            )));
        }

        let count = Self::segment_count(total_duration, segment_duration).ok_or_else(|| {
            DomainError::Probe(format!(
                "Media duration {}s would need more than {} segments of {}",
                total_duration, MAX_SEGMENTS, segment_duration
            ))
        })?;
        let step = segment_duration.as_secs_f64();

        let segments: Vec<Segment> = (0..count)
            .map(|i| Segment {
                index: i + 1,
                start: i as f64 * step,
                duration: step,
            })
            .collect();

        info!(
            "Planned {} segment(s) of {} for {:.2}s of media",
            count, segment_duration, total_duration
        );
        for segment in &segments {
            debug!(
                index = segment.index,
                start = segment.start,
                duration = segment.duration,
                "Planned segment"
            );
        }

        Ok(SegmentPlan {
            total_duration,
            segment_duration,
            segments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: u32) -> SegmentDuration {
        SegmentDuration::from_secs(value).unwrap()
    }

    #[test]
    fn test_plan_200_by_80() {
        let plan = SegmentPlanner::new().plan(200.0, secs(80)).unwrap();
        let starts: Vec<f64> = plan.iter().map(|s| s.start).collect();
        assert_eq!(plan.len(), 3);
        assert_eq!(starts, vec![0.0, 80.0, 160.0]);
    }

    #[test]
    fn test_plan_100_by_80_yields_two() {
        let plan = SegmentPlanner::new().plan(100.0, secs(80)).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.segments[0].start, 0.0);
        assert_eq!(plan.segments[0].end(), 80.0);
        assert_eq!(plan.segments[1].start, 80.0);
        // Requested length is not clamped here
        assert_eq!(plan.segments[1].duration, 80.0);
        assert_eq!(plan.effective_duration(&plan.segments[1]), 20.0);
    }

    #[test]
    fn test_plan_exact_multiple() {
        let plan = SegmentPlanner::new().plan(160.0, secs(80)).unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_plan_fractional_total() {
        let plan = SegmentPlanner::new().plan(80.25, secs(80)).unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_plan_shorter_than_one_segment() {
        let plan = SegmentPlanner::new().plan(12.5, secs(80)).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.segments[0].index, 1);
    }

    #[test]
    fn test_plan_zero_total_is_empty() {
        let plan = SegmentPlanner::new().plan(0.0, secs(80)).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_rejects_invalid_total() {
        let planner = SegmentPlanner::new();
        assert!(matches!(planner.plan(-1.0, secs(80)), Err(DomainError::Probe(_))));
        assert!(planner.plan(f64::NAN, secs(80)).is_err());
        assert!(planner.plan(f64::INFINITY, secs(80)).is_err());
    }

    #[test]
    fn test_plan_rejects_absurd_segment_count() {
        let planner = SegmentPlanner::new();
        let err = planner.plan(1e12, secs(1)).unwrap_err();
        assert!(matches!(err, DomainError::Probe(_)));
        assert_eq!(SegmentPlanner::segment_count(1e12, secs(1)), None);
    }

    #[test]
    fn test_plan_at_segment_cap_is_allowed() {
        let plan = SegmentPlanner::new()
            .plan(f64::from(MAX_SEGMENTS), secs(1))
            .unwrap();
        assert_eq!(plan.len(), MAX_SEGMENTS as usize);
        assert!(SegmentPlanner::new()
            .plan(f64::from(MAX_SEGMENTS) + 0.5, secs(1))
            .is_err());
    }

    #[test]
    fn test_count_matches_ceiling_for_integer_inputs() {
        for total in 1..=400u32 {
            for seg in [1u32, 7, 30, 80, 333] {
                let expected = (total + seg - 1) / seg;
                assert_eq!(
                    SegmentPlanner::segment_count(total as f64, secs(seg)),
                    Some(expected),
                    "total={} seg={}",
                    total,
                    seg
                );
            }
        }
    }

    #[test]
    fn test_starts_increase_by_segment_duration() {
        let plan = SegmentPlanner::new().plan(1000.0, secs(90)).unwrap();
        for pair in plan.segments.windows(2) {
            assert_eq!(pair[1].start - pair[0].start, 90.0);
            assert_eq!(pair[1].index, pair[0].index + 1);
        }
    }
}
