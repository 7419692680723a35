use twogroup_model::{NormalityResult, TestMethod, TestPolicy};

/// Test method for one variable, from both groups' normality and the policy.
///
/// Under [`TestPolicy::Auto`] the Welch t-test is chosen only when both
/// groups are determined normal; non-normal and undetermined groups both
/// lead to Mann–Whitney U.
pub fn select_method(
    normality_a: &NormalityResult,
    normality_b: &NormalityResult,
    policy: TestPolicy,
) -> TestMethod {
    match policy {
        TestPolicy::ForceWelch => TestMethod::WelchT,
        TestPolicy::ForceMannWhitney => TestMethod::MannWhitney,
        TestPolicy::Auto if normality_a.is_normal() && normality_b.is_normal() => {
            TestMethod::WelchT
        }
        TestPolicy::Auto => TestMethod::MannWhitney,
    }
}

#[cfg(test)]
mod tests {
    use twogroup_model::NormalityStatus;

    use super::*;

    fn with_status(status: NormalityStatus) -> NormalityResult {
        match status {
            NormalityStatus::Undetermined => NormalityResult::undetermined("n < 3"),
            _ => NormalityResult {
                statistic: Some(0.95),
                p_value: Some(0.2),
                status,
                note: None,
            },
        }
    }

    #[test]
    fn auto_requires_both_groups_normal() {
        let normal = with_status(NormalityStatus::Normal);
        let non_normal = with_status(NormalityStatus::NonNormal);
        let undetermined = with_status(NormalityStatus::Undetermined);

        assert_eq!(
            select_method(&normal, &normal, TestPolicy::Auto),
            TestMethod::WelchT
        );
        assert_eq!(
            select_method(&normal, &non_normal, TestPolicy::Auto),
            TestMethod::MannWhitney
        );
        assert_eq!(
            select_method(&undetermined, &normal, TestPolicy::Auto),
            TestMethod::MannWhitney
        );
    }

    #[test]
    fn forced_policies_ignore_normality() {
        let normal = with_status(NormalityStatus::Normal);
        let undetermined = with_status(NormalityStatus::Undetermined);

        assert_eq!(
            select_method(&undetermined, &undetermined, TestPolicy::ForceWelch),
            TestMethod::WelchT
        );
        assert_eq!(
            select_method(&normal, &normal, TestPolicy::ForceMannWhitney),
            TestMethod::MannWhitney
        );
    }
}
