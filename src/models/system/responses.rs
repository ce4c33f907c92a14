use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 管理端首页统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct StatsResponse {
    pub classes: u64,
    pub teachers: u64,
    pub students: u64,
}
