//! 生成上下文
//!
//! 一次运行内唯一的跨阶段状态：随机源、"当前时间"、用户池和三类 ID 池。
//! 上下文按固定阶段顺序依次传入各生成器，运行结束即丢弃。

use chrono::{Local, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::sampling::sample_list;

/// 单调递增的序号计数器
///
/// 与前缀选择解耦：无论抽中哪个前缀，序号都全局递增，保证 ID 唯一。
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: u32,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取下一个序号（从 1 开始）
    pub fn next_value(&mut self) -> u32 {
        self.last += 1;
        self.last
    }
}

/// 生成上下文
pub struct GenerationContext {
    rng: StdRng,
    seed: u64,
    now: NaiveDateTime,
    identities: Vec<String>,
    issue_ids: Vec<String>,
    document_ids: Vec<String>,
    change_ids: Vec<String>,
    issue_sequence: IdSequence,
}

impl GenerationContext {
    /// 使用指定种子和固定"当前时间"创建上下文，测试中用于获得确定性结果
    pub fn with_seed_at(seed: u64, now: NaiveDateTime) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            now,
            identities: Vec::new(),
            issue_ids: Vec::new(),
            document_ids: Vec::new(),
            change_ids: Vec::new(),
            issue_sequence: IdSequence::new(),
        }
    }

    /// 按可选的种子和"当前时间"创建上下文
    ///
    /// 未指定种子时从系统熵源抽取，未指定时间时取本地当前时间。
    /// 两者都可通过 [`seed`](Self::seed) 和 [`now`](Self::now) 取回，同一组值即可重放整次运行。
    pub fn resolve(seed: Option<u64>, now: Option<NaiveDateTime>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let now = now.unwrap_or_else(|| Local::now().naive_local());
        Self::with_seed_at(seed, now)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    // ==================== 用户池 ====================

    pub fn identities(&self) -> &[String] {
        &self.identities
    }

    pub fn set_identities(&mut self, identities: Vec<String>) {
        self.identities = identities;
    }

    /// 随机抽取一个用户，用户池为空时返回空字符串
    ///
    /// 依赖用户池的生成器应在运行前检查用户池，这里不会被空池调用。
    pub fn pick_identity(&mut self) -> String {
        self.identities
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }

    // ==================== ID 池 ====================

    pub fn issue_ids(&self) -> &[String] {
        &self.issue_ids
    }

    pub fn document_ids(&self) -> &[String] {
        &self.document_ids
    }

    pub fn change_ids(&self) -> &[String] {
        &self.change_ids
    }

    pub fn register_issue(&mut self, id: &str) {
        self.issue_ids.push(id.to_string());
    }

    pub fn register_document(&mut self, id: &str) {
        self.document_ids.push(id.to_string());
    }

    pub fn register_change(&mut self, id: &str) {
        self.change_ids.push(id.to_string());
    }

    /// 从指定 ID 池中均匀抽取一个 ID，池为空时返回 None
    pub fn pick_id(&mut self, pool: Pool) -> Option<String> {
        let ids = match pool {
            Pool::Issues => &self.issue_ids,
            Pool::Documents => &self.document_ids,
            Pool::Changes => &self.change_ids,
        };
        ids.choose(&mut self.rng).cloned()
    }

    /// 从指定 ID 池中抽取 0..=max_items 个不重复 ID
    pub fn sample_ids(&mut self, pool: Pool, max_items: usize) -> Vec<String> {
        let ids = match pool {
            Pool::Issues => &self.issue_ids,
            Pool::Documents => &self.document_ids,
            Pool::Changes => &self.change_ids,
        };
        sample_list(&mut self.rng, ids, max_items)
    }

    /// 从问题池中抽取至多 `amount` 个不重复且不等于 `exclude` 的 ID
    pub fn choose_issue_ids_excluding(&mut self, amount: usize, exclude: &str) -> Vec<String> {
        let candidates: Vec<&String> = self
            .issue_ids
            .iter()
            .filter(|id| id.as_str() != exclude)
            .collect();
        candidates
            .choose_multiple(&mut self.rng, amount)
            .map(|id| (*id).clone())
            .collect()
    }

    /// 抽取至多 `amount` 个不重复用户
    pub fn choose_identities(&mut self, amount: usize) -> Vec<String> {
        self.identities
            .choose_multiple(&mut self.rng, amount)
            .cloned()
            .collect()
    }

    /// 问题 ID 的全局序号，跨前缀共享
    pub fn next_issue_sequence(&mut self) -> u32 {
        self.issue_sequence.next_value()
    }
}

/// ID 池类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Issues,
    Documents,
    Changes,
}
