pub mod stage1_score;
pub mod stage2_report;
