//! Skill engine: taxonomy, extraction, level estimation, gap analysis and ATS scoring.

pub mod analysis;
pub mod ats;
pub mod extractor;
pub mod gaps;
pub mod handlers;
pub mod level;
pub mod prompts;
pub mod taxonomy;
