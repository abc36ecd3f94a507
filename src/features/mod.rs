//! Feature engineering
//!
//! Each module owns one derived feature family; the pipeline wires them
//! together in dependency order.

pub mod defense;
pub mod home_away;
pub mod player_form;
pub mod rolling;
pub mod scoring;
pub mod team_scoring;
pub mod vegas;

pub use defense::DefenseVsPosition;
pub use home_away::HomeAwayIndex;
pub use player_form::PlayerForm;
pub use scoring::ScoringRules;
pub use team_scoring::TeamWeekScore;
pub use vegas::VegasRow;
