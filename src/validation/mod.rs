//! Validation functionality
//!
//! Provides guideline checks for integration flows: naming convention,
//! error handling, complexity and hardcoded URLs.

pub mod guidelines;

pub use guidelines::{
    GUIDELINE_RULES, GuidelineChecker, GuidelineRule, check_guidelines, evaluate,
};
