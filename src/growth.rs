/*
Growth-stage estimation.
Translates a crop's planting window into a coarse progress indicator:
a 0-100 percentage plus a stage label derived from fixed thresholds.
*/

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageLabel {
    Unknown,
    Planted,
    Growing,
    Ready,
}

impl StageLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageLabel::Unknown => "unknown",
            StageLabel::Planted => "planted",
            StageLabel::Growing => "growing",
            StageLabel::Ready => "ready",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowthStage {
    pub stage: StageLabel,
    pub progress: u8, // 0..=100
}

// Progress through the planting window, clamped to [0, 100] and rounded.
// Stage thresholds: > 75 ready, > 25 growing, otherwise planted. The
// estimator never reports "harvested" — an explicit harvested status on
// the crop record overrides the computed stage at the response edge.
//
// A window whose harvest date is not after its planting date is treated
// as already past: progress 100, stage ready.
pub fn growth_stage(
    planting: Option<DateTime<FixedOffset>>,
    harvest: Option<DateTime<FixedOffset>>,
    now: DateTime<FixedOffset>,
) -> GrowthStage {
    let (Some(planting), Some(harvest)) = (planting, harvest) else {
        return GrowthStage {
            stage: StageLabel::Unknown,
            progress: 0,
        };
    };

    let total_days = (harvest.date_naive() - planting.date_naive()).num_days();
    if total_days <= 0 {
        return GrowthStage {
            stage: StageLabel::Ready,
            progress: 100,
        };
    }

    let elapsed = (now.date_naive() - planting.date_naive()).num_days();
    let progress = (elapsed as f64 / total_days as f64 * 100.0)
        .clamp(0.0, 100.0)
        .round() as u8;

    let stage = if progress > 75 {
        StageLabel::Ready
    } else if progress > 25 {
        StageLabel::Growing
    } else {
        StageLabel::Planted
    };

    GrowthStage { stage, progress }
}

// Whole days from now until the expected harvest. Negative once the
// harvest date has passed; None when the window is incomplete.
pub fn days_until_harvest(
    planting: Option<DateTime<FixedOffset>>,
    harvest: Option<DateTime<FixedOffset>>,
    now: DateTime<FixedOffset>,
) -> Option<i64> {
    let (Some(_planting), Some(harvest)) = (planting, harvest) else {
        return None;
    };
    Some((harvest.date_naive() - now.date_naive()).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 0, 0, 0)
            .unwrap()
    }

    #[test]
    fn midway_through_the_window_is_growing_at_fifty_percent() {
        let g = growth_stage(
            Some(at(2024, 1, 1)),
            Some(at(2024, 1, 11)),
            at(2024, 1, 6),
        );
        assert_eq!(g.progress, 50);
        assert_eq!(g.stage, StageLabel::Growing);
    }

    #[test]
    fn stage_thresholds() {
        let planting = Some(at(2024, 1, 1));
        let harvest = Some(at(2024, 4, 10)); // 100 days

        // day 20 -> 20%
        let early = growth_stage(planting, harvest, at(2024, 1, 21));
        assert_eq!(early.stage, StageLabel::Planted);

        // day 50 -> 50%
        let mid = growth_stage(planting, harvest, at(2024, 2, 20));
        assert_eq!(mid.stage, StageLabel::Growing);

        // day 80 -> 80%
        let late = growth_stage(planting, harvest, at(2024, 3, 21));
        assert_eq!(late.stage, StageLabel::Ready);
    }

    #[test]
    fn missing_dates_are_unknown_with_zero_progress() {
        let g = growth_stage(None, Some(at(2024, 1, 11)), at(2024, 1, 6));
        assert_eq!(g.stage, StageLabel::Unknown);
        assert_eq!(g.progress, 0);

        let g = growth_stage(Some(at(2024, 1, 1)), None, at(2024, 1, 6));
        assert_eq!(g.stage, StageLabel::Unknown);
        assert_eq!(g.progress, 0);
    }

    #[test]
    fn progress_is_clamped_outside_the_window() {
        let planting = Some(at(2024, 1, 10));
        let harvest = Some(at(2024, 1, 20));

        let before = growth_stage(planting, harvest, at(2024, 1, 1));
        assert_eq!(before.progress, 0);
        assert_eq!(before.stage, StageLabel::Planted);

        let after = growth_stage(planting, harvest, at(2024, 6, 1));
        assert_eq!(after.progress, 100);
        assert_eq!(after.stage, StageLabel::Ready);
    }

    #[test]
    fn progress_never_decreases_as_now_advances() {
        let planting = Some(at(2024, 1, 1));
        let harvest = Some(at(2024, 3, 1));

        let mut last = 0;
        for day in 1..=31 {
            let g = growth_stage(planting, harvest, at(2024, 1, day));
            assert!(g.progress >= last);
            last = g.progress;
        }
        for day in 1..=29 {
            let g = growth_stage(planting, harvest, at(2024, 2, day));
            assert!(g.progress >= last);
            last = g.progress;
        }
    }

    #[test]
    fn inverted_window_is_fully_grown_instead_of_dividing_by_zero() {
        let g = growth_stage(
            Some(at(2024, 5, 1)),
            Some(at(2024, 5, 1)),
            at(2024, 5, 2),
        );
        assert_eq!(g.progress, 100);
        assert_eq!(g.stage, StageLabel::Ready);

        let g = growth_stage(
            Some(at(2024, 5, 10)),
            Some(at(2024, 5, 1)),
            at(2024, 5, 2),
        );
        assert_eq!(g.progress, 100);
        assert_eq!(g.stage, StageLabel::Ready);
    }

    #[test]
    fn days_until_harvest_counts_whole_days() {
        assert_eq!(
            days_until_harvest(Some(at(2024, 1, 1)), Some(at(2024, 1, 11)), at(2024, 1, 6)),
            Some(5)
        );
        assert_eq!(
            days_until_harvest(Some(at(2024, 1, 1)), Some(at(2024, 1, 11)), at(2024, 1, 15)),
            Some(-4)
        );
        assert_eq!(
            days_until_harvest(None, Some(at(2024, 1, 11)), at(2024, 1, 6)),
            None
        );
    }
}
