//! 变更记录模型
//!
//! 一个变更记录携带 1-3 次状态流转，每次流转输出为一行，共享变更 ID 和标题。

use chrono::NaiveDate;

use super::TabularRecord;
use crate::sampling::{DATE_FORMAT, join_list, optional_cell};

/// 变更状态
///
/// 固定顺序的状态词汇，流转只能逐级前进，不能跳过或重复
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeState {
    New,
    Assess,
    Authorise,
    Scheduled,
    Implement,
    Closed,
}

impl ChangeState {
    /// 按流转顺序排列的全部状态
    pub const ORDERED: [ChangeState; 6] = [
        Self::New,
        Self::Assess,
        Self::Authorise,
        Self::Scheduled,
        Self::Implement,
        Self::Closed,
    ];

    /// 获取状态名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Assess => "Assess",
            Self::Authorise => "Authorise",
            Self::Scheduled => "Scheduled",
            Self::Implement => "Implement",
            Self::Closed => "Closed",
        }
    }

    /// 获取下一个状态
    ///
    /// Closed 已是终态，返回 None
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::New => Some(Self::Assess),
            Self::Assess => Some(Self::Authorise),
            Self::Authorise => Some(Self::Scheduled),
            Self::Scheduled => Some(Self::Implement),
            Self::Implement => Some(Self::Closed),
            Self::Closed => None,
        }
    }
}

/// 单次状态流转
#[derive(Debug, Clone)]
pub struct StatusTransition {
    pub state: ChangeState,
    pub linked_issue_id: Option<String>,
    pub linked_document_id: Option<String>,
    pub requested_by: String,
    pub assigned_to: String,
    pub environment: String,
    pub impacted_departments: Vec<String>,
    pub change_type: String,
    pub category: String,
    pub risk: String,
    pub risk_percentage: Option<u8>,
    pub lead_time_days: u16,
    pub conflict_status: String,
    pub description: String,
    /// 本次流转的派生结束日期，不早于 `created_at`
    pub end_date: NaiveDate,
    pub implementation_plan: String,
    pub backout_plan: String,
    pub updated_by: String,
    /// 本次流转的时间戳
    pub created_at: NaiveDate,
}

/// 变更记录
#[derive(Debug, Clone)]
pub struct ChangeRecord {
    pub id: String,
    pub title: String,
    pub team: String,
    /// 变更整体开始日期，所有流转共享
    pub start_date: NaiveDate,
    pub transitions: Vec<StatusTransition>,
}

impl TabularRecord for ChangeRecord {
    const HEADER: &'static [&'static str] = &[
        "CR_ID",
        "CR_Title",
        "Linked_Jira_ID",
        "Linked_Confluence_ID",
        "CR_State",
        "CR_Requested_By",
        "CR_Team_Assignment_Group",
        "CR_Assigned_To_User",
        "CR_Impacted_Environment",
        "CR_Impacted_Departments",
        "CR_Type",
        "CR_Category",
        "CR_Risk",
        "CR_Risk_Percentage",
        "CR_Lead_Time_Days",
        "CR_Conflict_Status",
        "CR_Description",
        "CR_Start_Date",
        "CR_End_Date",
        "CR_Implementation_Plan_Summary",
        "CR_Backout_Plan_Summary",
        "CR_Updated_By_User_From_CSV_Example",
        "CR_Created_At_From_CSV_Example",
    ];

    fn primary_id(&self) -> &str {
        &self.id
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let start = self.start_date.format(DATE_FORMAT).to_string();
        self.transitions
            .iter()
            .map(|t| {
                vec![
                    self.id.clone(),
                    self.title.clone(),
                    optional_cell(&t.linked_issue_id),
                    optional_cell(&t.linked_document_id),
                    t.state.name().to_string(),
                    t.requested_by.clone(),
                    self.team.clone(),
                    t.assigned_to.clone(),
                    t.environment.clone(),
                    join_list(&t.impacted_departments),
                    t.change_type.clone(),
                    t.category.clone(),
                    t.risk.clone(),
                    optional_cell(&t.risk_percentage),
                    t.lead_time_days.to_string(),
                    t.conflict_status.clone(),
                    t.description.clone(),
                    start.clone(),
                    t.end_date.format(DATE_FORMAT).to_string(),
                    t.implementation_plan.clone(),
                    t.backout_plan.clone(),
                    t.updated_by.clone(),
                    t.created_at.format(DATE_FORMAT).to_string(),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_walk_covers_vocabulary() {
        let mut walked = vec![ChangeState::New];
        while let Some(next) = walked.last().and_then(|s| s.next()) {
            walked.push(next);
        }
        assert_eq!(walked, ChangeState::ORDERED.to_vec());
        assert!(ChangeState::Closed.next().is_none());
    }

    #[test]
    fn test_state_names_are_distinct_and_ordered() {
        let names: Vec<_> = ChangeState::ORDERED.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            ["New", "Assess", "Authorise", "Scheduled", "Implement", "Closed"]
        );
        assert!(ChangeState::New < ChangeState::Closed);
    }

    #[test]
    fn test_one_row_per_transition() {
        let day = |d| NaiveDate::from_ymd_opt(2023, 3, d).unwrap();
        let transition = |state, created| StatusTransition {
            state,
            linked_issue_id: None,
            linked_document_id: Some("CONF-KB-002".to_string()),
            requested_by: "Ann_B".to_string(),
            assigned_to: "Bob_C".to_string(),
            environment: "Staging".to_string(),
            impacted_departments: vec!["Payments".to_string()],
            change_type: "Normal".to_string(),
            category: "Audit".to_string(),
            risk: "Low".to_string(),
            risk_percentage: None,
            lead_time_days: 12,
            conflict_status: "Resolved".to_string(),
            description: "desc".to_string(),
            end_date: day(28),
            implementation_plan: "Details in Confluence".to_string(),
            backout_plan: "Standard rollback".to_string(),
            updated_by: "Cid_D".to_string(),
            created_at: created,
        };
        let record = ChangeRecord {
            id: "CR-FS-001".to_string(),
            title: "Quia dolor sit".to_string(),
            team: "Team Phoenix".to_string(),
            start_date: day(1),
            transitions: vec![
                transition(ChangeState::New, day(2)),
                transition(ChangeState::Assess, day(9)),
            ],
        };

        let rows = record.rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == ChangeRecord::HEADER.len()));
        assert!(rows.iter().all(|r| r[0] == "CR-FS-001" && r[1] == "Quia dolor sit"));
        assert_eq!(rows[0][4], "New");
        assert_eq!(rows[1][4], "Assess");
        assert_eq!(rows[1][17], "2023-03-01");
        assert_eq!(rows[1][22], "2023-03-09");
        assert_eq!(rows[0][2], "");
        assert_eq!(rows[0][3], "CONF-KB-002");
    }
}
