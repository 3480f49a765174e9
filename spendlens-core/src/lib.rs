//! spendlens-core: transaction model, necessity table and shared helpers

pub mod error;
pub mod money;
pub mod necessity;
pub mod notice;
pub mod transaction;

pub use error::{Error, Result};
pub use money::round2;
pub use necessity::{Assessment, NecessityTable, category_key, DEFAULT_NECESSITY};
pub use notice::{Notice, NoticeLevel};
pub use transaction::{Transaction, INCOME_KEYWORDS, is_income_category};
