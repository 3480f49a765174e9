//! spendlens-finance: validation, spending analyses and dashboard assembly

pub mod analyzer;
pub mod dashboard;
pub mod income;
pub mod projection;
pub mod rating;
pub mod recurring;
pub mod spending_cuts;
pub mod validation;

pub use analyzer::{ReportSettings, SpendingAnalyzer};
pub use dashboard::{Dashboard, Summary};
pub use income::IncomePrediction;
pub use projection::{InvestmentProjection, Projection, Scenario};
pub use rating::TransactionRating;
pub use recurring::RecurringPayment;
pub use spending_cuts::{Recommendation, SpendingCutSuggestion};
pub use validation::ValidatedLedger;
