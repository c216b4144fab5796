//! Coverage heatmap rendering
//!
//! A pure view over the coverage grid: two fixed axes (6 time buckets by
//! 10 topic buckets), scores 0-100, and a 6-step shade quantization.
//! Missing cells read as score 0; every axis combination renders exactly
//! once, so the output shape is independent of the input cell list.

use crate::api::types::CoverageCell;

use colored::Colorize;
use prettytable::{row, Cell, Table};
use std::collections::HashMap;

/// Time axis, ordered youngest to oldest
pub const TIME_BUCKETS: [&str; 6] = ["pre10", "10s", "20s", "30s", "40s", "50plus"];

/// Topic axis, in display order
pub const TOPIC_BUCKETS: [&str; 10] = [
    "family_of_origin",
    "friendships",
    "romantic_love",
    "children",
    "work_career",
    "money_status",
    "health_body",
    "creativity_play",
    "beliefs_values",
    "crises_turning_points",
];

/// Short display label for a topic bucket
pub fn topic_label(topic: &str) -> &str {
    match topic {
        "family_of_origin" => "Family",
        "friendships" => "Friends",
        "romantic_love" => "Love",
        "children" => "Children",
        "work_career" => "Career",
        "money_status" => "Money",
        "health_body" => "Health",
        "creativity_play" => "Creativity",
        "beliefs_values" => "Beliefs",
        "crises_turning_points" => "Turning Points",
        other => other,
    }
}

/// Six-step quantization of a coverage score
///
/// Thresholds are closed at 0, 20, 40, 60, and 80: a score of exactly 20
/// falls into `Light`, exactly 80 into `Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageShade {
    /// Score 0: nothing recorded
    Empty,
    /// 1..=19
    Faint,
    /// 20..=39
    Light,
    /// 40..=59
    Medium,
    /// 60..=79
    Strong,
    /// 80..=100
    Full,
}

impl CoverageShade {
    /// Quantize a score into its shade band
    pub fn for_score(score: i64) -> Self {
        if score <= 0 {
            Self::Empty
        } else if score < 20 {
            Self::Faint
        } else if score < 40 {
            Self::Light
        } else if score < 60 {
            Self::Medium
        } else if score < 80 {
            Self::Strong
        } else {
            Self::Full
        }
    }

    fn paint(&self, score: i64) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Faint => score.to_string().bright_black().to_string(),
            Self::Light => score.to_string().cyan().to_string(),
            Self::Medium => score.to_string().bright_blue().to_string(),
            Self::Strong => score.to_string().blue().to_string(),
            Self::Full => score.to_string().blue().bold().to_string(),
        }
    }
}

/// The full 6x10 coverage grid built from an unordered cell list
///
/// Duplicate cells for the same combination keep the last score seen;
/// cells naming buckets outside the fixed axes are ignored.
pub struct CoverageGrid {
    scores: HashMap<(String, String), i64>,
}

impl CoverageGrid {
    /// Build the grid from the server's cell list
    pub fn from_cells(cells: &[CoverageCell]) -> Self {
        let mut scores = HashMap::new();
        for cell in cells {
            scores.insert(
                (cell.time_bucket.clone(), cell.topic_bucket.clone()),
                cell.score,
            );
        }
        Self { scores }
    }

    /// Score for one combination; missing cells read as 0
    pub fn score(&self, time_bucket: &str, topic_bucket: &str) -> i64 {
        self.scores
            .get(&(time_bucket.to_string(), topic_bucket.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Every axis combination with its score, in fixed row-major order
    /// (topics outermost, matching the rendered table)
    pub fn cells(&self) -> Vec<(&'static str, &'static str, i64)> {
        let mut all = Vec::with_capacity(TIME_BUCKETS.len() * TOPIC_BUCKETS.len());
        for topic in TOPIC_BUCKETS {
            for time in TIME_BUCKETS {
                all.push((time, topic, self.score(time, topic)));
            }
        }
        all
    }

    /// Render the grid as a terminal table
    ///
    /// One header row plus one row per topic; deterministic for a given
    /// cell list.
    pub fn render(&self) -> Table {
        let mut table = Table::new();

        let mut header = row![b => "Topic / Age"];
        for time in TIME_BUCKETS {
            header.add_cell(Cell::new(time).style_spec("b"));
        }
        table.add_row(header);

        for topic in TOPIC_BUCKETS {
            let mut data_row = row![topic_label(topic)];
            for time in TIME_BUCKETS {
                let score = self.score(time, topic);
                let shade = CoverageShade::for_score(score);
                data_row.add_cell(Cell::new(&shade.paint(score)));
            }
            table.add_row(data_row);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(time: &str, topic: &str, score: i64) -> CoverageCell {
        CoverageCell {
            user_id: "u1".to_string(),
            time_bucket: time.to_string(),
            topic_bucket: topic.to_string(),
            score,
        }
    }

    #[test]
    fn test_grid_exposes_exactly_sixty_cells() {
        let grid = CoverageGrid::from_cells(&[]);
        assert_eq!(grid.cells().len(), 60);
    }

    #[test]
    fn test_missing_cells_read_as_zero() {
        let grid = CoverageGrid::from_cells(&[cell("20s", "work_career", 55)]);
        assert_eq!(grid.score("20s", "work_career"), 55);
        assert_eq!(grid.score("20s", "friendships"), 0);
        assert_eq!(grid.score("pre10", "work_career"), 0);
    }

    #[test]
    fn test_every_combination_present_despite_sparse_input() {
        let grid = CoverageGrid::from_cells(&[cell("10s", "children", 12)]);
        let cells = grid.cells();
        assert_eq!(cells.len(), 60);
        let nonzero: Vec<_> = cells.iter().filter(|(_, _, s)| *s > 0).collect();
        assert_eq!(nonzero.len(), 1);
        assert_eq!(*nonzero[0], ("10s", "children", 12));
    }

    #[test]
    fn test_cells_order_is_deterministic() {
        let grid = CoverageGrid::from_cells(&[cell("30s", "health_body", 70)]);
        let first = grid.cells();
        let second = grid.cells();
        assert_eq!(first, second);
        assert_eq!(first[0], ("pre10", "family_of_origin", 0));
        assert_eq!(first[59], ("50plus", "crises_turning_points", 0));
    }

    #[test]
    fn test_duplicate_cells_keep_last_score() {
        let grid = CoverageGrid::from_cells(&[
            cell("40s", "money_status", 10),
            cell("40s", "money_status", 90),
        ]);
        assert_eq!(grid.score("40s", "money_status"), 90);
    }

    #[test]
    fn test_unknown_buckets_do_not_leak_into_grid() {
        let grid = CoverageGrid::from_cells(&[cell("90s", "time_travel", 99)]);
        assert!(grid.cells().iter().all(|(_, _, s)| *s == 0));
    }

    #[test]
    fn test_shade_threshold_boundaries() {
        assert_eq!(CoverageShade::for_score(0), CoverageShade::Empty);
        assert_eq!(CoverageShade::for_score(1), CoverageShade::Faint);
        assert_eq!(CoverageShade::for_score(19), CoverageShade::Faint);
        assert_eq!(CoverageShade::for_score(20), CoverageShade::Light);
        assert_eq!(CoverageShade::for_score(39), CoverageShade::Light);
        assert_eq!(CoverageShade::for_score(40), CoverageShade::Medium);
        assert_eq!(CoverageShade::for_score(59), CoverageShade::Medium);
        assert_eq!(CoverageShade::for_score(60), CoverageShade::Strong);
        assert_eq!(CoverageShade::for_score(79), CoverageShade::Strong);
        assert_eq!(CoverageShade::for_score(80), CoverageShade::Full);
        assert_eq!(CoverageShade::for_score(100), CoverageShade::Full);
    }

    #[test]
    fn test_render_has_header_plus_topic_rows() {
        let grid = CoverageGrid::from_cells(&[cell("20s", "romantic_love", 45)]);
        let table = grid.render();
        assert_eq!(table.len(), 1 + TOPIC_BUCKETS.len());
    }

    #[test]
    fn test_render_is_deterministic() {
        let cells = vec![
            cell("20s", "work_career", 55),
            cell("pre10", "family_of_origin", 80),
        ];
        let first = CoverageGrid::from_cells(&cells).render().to_string();
        let second = CoverageGrid::from_cells(&cells).render().to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_topic_label_known_and_unknown() {
        assert_eq!(topic_label("crises_turning_points"), "Turning Points");
        assert_eq!(topic_label("unmapped_topic"), "unmapped_topic");
    }
}
