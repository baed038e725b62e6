//! 固定词汇表
//!
//! 各生成器从这些分类词汇中随机抽取字段值。

pub const TEAM_NAMES: &[&str] = &[
    "Team Phoenix",
    "Team Griffin",
    "Team Hydra",
    "Marketing",
    "Cross-functional",
    "Operations",
];

/// 主开发团队，变更记录的公平分配只在这些团队之间轮转
pub const PRIMARY_TEAMS: &[&str] = &["Team Phoenix", "Team Griffin", "Team Hydra"];

// ==================== 问题 ====================

pub const ISSUE_DEFAULT_PREFIX: &str = "NOVA";
pub const ISSUE_ALT_PREFIXES: &[&str] = &["LOG", "PERF", "BUG", "FEAT"];

pub const ISSUE_TYPES: &[&str] = &[
    "Story",
    "Task",
    "Bug",
    "Feature",
    "Epic",
    "Project",
    "Business Outcome",
];
pub const ISSUE_PRIORITIES: &[&str] = &["Minor", "Major", "Critical", "Low", "Medium", "High"];
pub const ISSUE_STATUSES: &[&str] = &[
    "Pending",
    "Development",
    "Review",
    "Release",
    "Closed",
    "Blocked",
    "Open",
    "In Progress",
];
pub const ISSUE_LINK_TYPES: &[&str] = &[
    "blocks",
    "relates to",
    "duplicates",
    "sub-task of",
    "cloned by",
];
pub const ISSUE_COMPONENTS: &[&str] = &["API", "Mobile UI", "Database", "Auth", "Payments", "NFC"];
pub const ISSUE_LABELS: &[&str] = &[
    "performance",
    "security",
    "sprint-goal",
    "ProjectNova",
    "tech-debt",
    "ux",
];
pub const SPRINT_STREAMS: &[&str] = &["Nova", "General", "Infra"];
/// 空字符串表示抽中"无应用"
pub const APP_NAMES: &[&str] = &["CoreBankingApp_Wallet", "MobileApp_Global", "AdminPortal", ""];
pub const VERSION_QUALIFIERS: &[&str] = &["-beta", "-RC", "", "-hotfix"];
pub const STORY_POINTS: &[u8] = &[1, 2, 3, 5, 8, 13, 21];

pub const MAX_COMPONENTS: usize = 3;
pub const MAX_LABELS: usize = 3;
pub const MAX_ISSUE_LINKS: usize = 2;
pub const MAX_WATCHERS: usize = 3;

// ==================== 文档 ====================

pub const DOCUMENT_PREFIXES: &[&str] = &["PN", "LOG", "SEC", "ARCH", "KB"];
pub const DOCUMENT_SPACES: &[&str] = &[
    "Project Nova",
    "Team Phoenix KB",
    "Team Griffin Design",
    "Team Hydra Compliance",
    "General Fintech Policies",
];
pub const MAX_DOCUMENT_ISSUE_REFS: usize = 4;
pub const MAX_DOCUMENT_CHANGE_REFS: usize = 2;

// ==================== 变更记录 ====================

pub const CHANGE_ID_PREFIX: &str = "CR-FS";
pub const CHANGE_TYPES: &[&str] = &["Standard", "Emergency", "Normal"];
pub const CHANGE_CATEGORIES: &[&str] = &[
    "Enhancement",
    "BugFix",
    "Security",
    "Infrastructure",
    "Deployment",
    "Audit",
    "Maintenance",
    "New Feature",
    "Communication",
];
pub const CHANGE_RISKS: &[&str] = &["Low", "Medium", "High"];
pub const ENVIRONMENTS: &[&str] = &["Production", "Staging", "Development", "N/A"];
pub const DEPARTMENTS: &[&str] = &[
    "Payments",
    "Mobile Banking",
    "Security",
    "Core API",
    "Marketing",
];
pub const CONFLICT_STATUSES: &[&str] = &["No Conflict", "Conflict Detected", "Resolved"];
pub const CANNED_PLAN: &str = "Details in Confluence";
pub const CANNED_BACKOUT: &str = "Standard rollback";
pub const MAX_DEPARTMENTS: usize = 3;
pub const MAX_TRANSITIONS: usize = 3;

// ==================== 活动日志 ====================

pub const CANNED_COMMENT: &str = "Comment added.";
