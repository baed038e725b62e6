//! 问题（issue tracker）记录
//!
//! 一个问题输出一行基础行，外加 0-2 行链接子行和 0-3 行关注人子行。
//! 子行复制基础行的全部字段，每行只携带链接或关注人之一。

use chrono::NaiveDate;

use super::TabularRecord;
use crate::sampling::{DATE_FORMAT, join_list, optional_cell};

/// 问题之间的有类型链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLink {
    pub target_id: String,
    pub link_type: String,
}

/// 问题记录
#[derive(Debug, Clone)]
pub struct Issue {
    pub id: String,
    pub issue_type: String,
    pub priority: String,
    pub components: Vec<String>,
    pub labels: Vec<String>,
    pub sprint: String,
    pub app_name: Option<String>,
    pub reporter: String,
    pub assignee: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    pub title: String,
    pub description: String,
    pub fix_version: String,
    pub team: String,
    pub confidence: Option<u8>,
    pub created_date: NaiveDate,
    pub updated_date: NaiveDate,
    pub story_points: Option<u8>,
    /// 反向关联的变更记录
    pub change_id: Option<String>,
    pub links: Vec<IssueLink>,
    pub watchers: Vec<String>,
}

impl Issue {
    /// 基础字段（不含链接/关注人三列）
    fn base_cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.issue_type.clone(),
            self.priority.clone(),
            join_list(&self.components),
            join_list(&self.labels),
            self.sprint.clone(),
            optional_cell(&self.app_name),
            self.reporter.clone(),
            self.assignee.clone(),
            self.start_date.format(DATE_FORMAT).to_string(),
            self.end_date.format(DATE_FORMAT).to_string(),
            self.status.clone(),
            self.title.clone(),
            self.description.clone(),
            self.fix_version.clone(),
            self.team.clone(),
            optional_cell(&self.confidence),
            self.created_date.format(DATE_FORMAT).to_string(),
            self.updated_date.format(DATE_FORMAT).to_string(),
            optional_cell(&self.story_points),
            optional_cell(&self.change_id),
        ]
    }

    fn row_with(base: &[String], target: &str, link_type: &str, watcher: &str) -> Vec<String> {
        let mut row = base.to_vec();
        row.push(target.to_string());
        row.push(link_type.to_string());
        row.push(watcher.to_string());
        row
    }
}

impl TabularRecord for Issue {
    const HEADER: &'static [&'static str] = &[
        "JIRA_ID",
        "JIRA_Type",
        "JIRA_Priority",
        "JIRA_Components",
        "JIRA_Labels",
        "JIRA_Sprint",
        "JIRA_App_Name",
        "JIRA_Reporter",
        "JIRA_Assignee",
        "JIRA_Start_Date",
        "JIRA_End_Date",
        "JIRA_Status",
        "JIRA_Title",
        "JIRA_Description",
        "JIRA_Release_Fix_Version",
        "JIRA_Team",
        "JIRA_Confidence",
        "JIRA_Created_Date",
        "JIRA_Updated_Date",
        "JIRA_Effort_Story_Points",
        "CR_ID_Link_From_CSV_Example",
        "JIRA_Linked_Issue_ID_Target",
        "JIRA_Link_Type",
        "JIRA_Watcher_User",
    ];

    fn primary_id(&self) -> &str {
        &self.id
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let base = self.base_cells();
        let mut rows = Vec::with_capacity(1 + self.links.len() + self.watchers.len());

        rows.push(Self::row_with(&base, "", "", ""));
        for link in &self.links {
            rows.push(Self::row_with(&base, &link.target_id, &link.link_type, ""));
        }
        for watcher in &self.watchers {
            rows.push(Self::row_with(&base, "", "", watcher));
        }
        rows
    }
}
