pub mod answer;
pub mod safety;
pub mod trigger_log;
