//! Numeric procedures for independent two-group comparisons.
//!
//! Every function here is pure: it reads slices and returns values or an
//! [`AnalysisError`](twogroup_model::AnalysisError) describing why the
//! statistic is undefined for the given input.

pub mod contingency;
pub mod correction;
pub mod descriptive;
pub mod distribution;
pub mod effect_size;
pub mod mann_whitney;
pub mod shapiro;
pub mod welch;

pub use contingency::{
    ChiSquareTest, ContingencyTable, MIN_EXPECTED_COUNT, chi_square_independence,
};
pub use correction::{benjamini_hochberg, holm};
pub use descriptive::{describe, mean, quantile_sorted, sample_variance};
pub use effect_size::{cohens_d, cramers_v, rank_biserial};
pub use mann_whitney::{EXACT_MAX_GROUP_SIZE, MannWhitney, mann_whitney_u};
pub use shapiro::{ShapiroWilk, shapiro_wilk};
pub use welch::{WelchTest, welch_t_test};
