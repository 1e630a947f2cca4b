pub mod schedule;
pub mod scoring;
pub mod simulate;
