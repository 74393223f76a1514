pub mod event_scoring;
pub mod pick_submission;
pub mod scoring;
pub mod stats_computation;
