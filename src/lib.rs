//! people-protocol - Turn taxonomy skills into People Protocol proficiency rubrics
//!
//! Fetches skill records from the Lightcast open skills catalog, asks an LLM to
//! describe each skill at five proficiency levels, checks that every response is
//! well formed, and exports the results as one framework JSON document.

pub mod cli;
pub mod config;
pub mod export;
pub mod lightcast;
pub mod llm;
pub mod pipeline;
pub mod selection;
pub mod skill;
pub mod util;
