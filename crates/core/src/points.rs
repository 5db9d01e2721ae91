//! Point award schedule.
//!
//! Filing a found-document report always earns the base award; naming one
//! or more possible matching documents earns the match bonus on top.

/// Points awarded for filing any found-document report.
pub const FOUND_REPORT_AWARD: i32 = 20;

/// Additional points when the report names possible matching documents.
pub const FOUND_MATCH_BONUS: i32 = 30;

/// Total award for a found-document report.
pub fn found_report_award(has_possible_matches: bool) -> i32 {
    if has_possible_matches {
        FOUND_REPORT_AWARD + FOUND_MATCH_BONUS
    } else {
        FOUND_REPORT_AWARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_award_without_matches() {
        assert_eq!(found_report_award(false), 20);
    }

    #[test]
    fn bonus_award_with_matches() {
        assert_eq!(found_report_award(true), 50);
    }
}
