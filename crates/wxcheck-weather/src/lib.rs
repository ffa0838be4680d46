//! Weather checks for wxcheck
//!
//! Fetches an Environment Canada city report and runs a fixed set of
//! pass/fail checks over it.

pub mod accessor;
pub mod error;
pub mod feed;
pub mod inquiry;
pub mod places;
pub mod predicates;
pub mod provider;
pub mod types;

pub use error::{FetchError, ReportError};
pub use inquiry::{Inquiry, InquiryResult, Verdict};
pub use predicates::{evaluate, Rule, RULES};
pub use provider::{FeedRequest, WeatherProvider};
pub use types::*;
