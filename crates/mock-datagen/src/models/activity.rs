//! 问题活动日志记录

use chrono::NaiveDateTime;

use super::TabularRecord;
use crate::sampling::DATETIME_FORMAT;

/// 挂在问题下的活动日志
#[derive(Debug, Clone)]
pub struct Activity {
    pub id: String,
    pub issue_id: String,
    pub comment: String,
    pub timestamp: NaiveDateTime,
    pub user: String,
}

impl TabularRecord for Activity {
    const HEADER: &'static [&'static str] = &[
        "Activity_ID",
        "JIRA_ID",
        "Activity_Comment",
        "Activity_Timestamp",
        "Activity_User",
    ];

    fn primary_id(&self) -> &str {
        &self.id
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.id.clone(),
            self.issue_id.clone(),
            self.comment.clone(),
            self.timestamp.format(DATETIME_FORMAT).to_string(),
            self.user.clone(),
        ]]
    }
}
