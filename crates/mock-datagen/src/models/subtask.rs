//! 变更子任务记录

use chrono::NaiveDateTime;

use super::TabularRecord;
use crate::sampling::DATETIME_FORMAT;

/// 挂在变更记录下的子任务
#[derive(Debug, Clone)]
pub struct Subtask {
    pub id: String,
    pub change_id: String,
    pub assignee: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub description: String,
}

impl TabularRecord for Subtask {
    const HEADER: &'static [&'static str] = &[
        "CTASK_ID",
        "CR_ID",
        "CTASK_Assigned_To_User",
        "CTASK_Start_Time",
        "CTASK_End_Time",
        "CTASK_Description",
    ];

    fn primary_id(&self) -> &str {
        &self.id
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.id.clone(),
            self.change_id.clone(),
            self.assignee.clone(),
            self.start_time.format(DATETIME_FORMAT).to_string(),
            self.end_time.format(DATETIME_FORMAT).to_string(),
            self.description.clone(),
        ]]
    }
}
