//! 文档（wiki 页面）记录

use chrono::NaiveDate;

use super::TabularRecord;
use crate::sampling::{DATE_FORMAT, join_list, optional_cell};

/// 文档记录
///
/// 父页面引用构成森林：父页面总是更早生成，且不会是自身。
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub owner: String,
    pub last_edited_by: String,
    pub space: String,
    pub team: String,
    pub summary: String,
    pub linked_issue_ids: Vec<String>,
    pub linked_change_ids: Vec<String>,
    pub parent_id: Option<String>,
    pub created_date: NaiveDate,
    pub modified_date: NaiveDate,
}

impl TabularRecord for Document {
    const HEADER: &'static [&'static str] = &[
        "Confluence_ID",
        "Confluence_Title",
        "Confluence_Owner_Member",
        "Confluence_Last_Edited_By",
        "Confluence_Space",
        "Confluence_Team_Association",
        "Confluence_Content_Summary",
        "Confluence_Linked_Jira_ID",
        "Confluence_Linked_CR_ID",
        "Confluence_Parent_Page_ID",
        "Confluence_Created_Date",
        "Confluence_Last_Modified_Date",
    ];

    fn primary_id(&self) -> &str {
        &self.id
    }

    fn rows(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.id.clone(),
            self.title.clone(),
            self.owner.clone(),
            self.last_edited_by.clone(),
            self.space.clone(),
            self.team.clone(),
            self.summary.clone(),
            join_list(&self.linked_issue_ids),
            join_list(&self.linked_change_ids),
            optional_cell(&self.parent_id),
            self.created_date.format(DATE_FORMAT).to_string(),
            self.modified_date.format(DATE_FORMAT).to_string(),
        ]]
    }
}
