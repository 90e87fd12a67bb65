use crate::modules::kb_revisions::core::watermark::RevisionWatermark;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollingVerdict {
    NoChange,
    SignificantChange,
}

/// Outcome of one poll. Derived on every poll, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingDecision {
    pub baseline: RevisionWatermark,
    pub current: RevisionWatermark,
    pub verdict: PollingVerdict,
}

impl PollingDecision {
    pub fn decide(baseline: RevisionWatermark, current: RevisionWatermark) -> Self {
        let verdict = if current.is_newer_than(&baseline) {
            PollingVerdict::SignificantChange
        } else {
            PollingVerdict::NoChange
        };
        Self {
            baseline,
            current,
            verdict,
        }
    }

    pub fn should_build(&self) -> bool {
        self.verdict == PollingVerdict::SignificantChange
    }
}

#[cfg(test)]
mod polling_decision_tests {
    use super::*;
    use crate::modules::kb_revisions::core::watermark::MIN_WATERMARK;
    use crate::tests::fixtures::watermarks::watermark;
    use rstest::rstest;

    #[rstest]
    #[case::advanced(5, 8, PollingVerdict::SignificantChange)]
    #[case::unchanged(5, 5, PollingVerdict::NoChange)]
    #[case::went_back(8, 5, PollingVerdict::NoChange)]
    #[case::first_revision(0, 1, PollingVerdict::SignificantChange)]
    fn the_verdict_depends_only_on_the_revision_numbers(
        #[case] baseline: u64,
        #[case] current: u64,
        #[case] expected: PollingVerdict,
    ) {
        let decision = PollingDecision::decide(watermark(baseline, 100), watermark(current, 0));
        assert_eq!(decision.verdict, expected);
        assert_eq!(decision.should_build(), expected == PollingVerdict::SignificantChange);
    }

    #[rstest]
    fn any_real_revision_is_significant_against_the_min_watermark() {
        let decision = PollingDecision::decide(MIN_WATERMARK, watermark(1, 0));
        assert!(decision.should_build());
    }

    #[rstest]
    fn it_should_keep_both_watermarks() {
        let decision = PollingDecision::decide(watermark(5, 10), watermark(8, 20));
        assert_eq!(decision.baseline, watermark(5, 10));
        assert_eq!(decision.current, watermark(8, 20));
    }
}
