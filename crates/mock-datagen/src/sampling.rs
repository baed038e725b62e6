//! 随机抽样工具
//!
//! 所有函数都接收显式的随机源，保证在固定种子下结果可复现。

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::IndexedRandom;

/// 多值字段的子分隔符，不能与 CSV 字段分隔符相同
pub const LIST_DELIMITER: &str = ";";

/// 日期格式 yyyy-MM-dd
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 时间戳格式 yyyy-MM-dd HH:mm
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 从固定词汇中均匀抽取一个值，空词汇返回空字符串
pub fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// 从来源中无放回抽取 0..=min(max_items, len) 个不重复元素
pub fn sample_list<T: Clone, R: Rng + ?Sized>(rng: &mut R, source: &[T], max_items: usize) -> Vec<T> {
    if source.is_empty() || max_items == 0 {
        return Vec::new();
    }
    let count = rng.random_range(0..=max_items.min(source.len()));
    source.choose_multiple(rng, count).cloned().collect()
}

/// [`sample_list`] 的词汇版本，直接返回 String 列表
pub fn sample_words<R: Rng + ?Sized>(
    rng: &mut R,
    source: &[&'static str],
    max_items: usize,
) -> Vec<String> {
    sample_list(rng, source, max_items)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// 在 [start, end] 闭区间内随机抽取日期
///
/// 区间倒置时返回 start，而不是重新抽样。
pub fn random_date_between<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    if start >= end {
        return start;
    }
    let span = (end - start).num_days();
    start + Duration::days(rng.random_range(0..=span))
}

/// 在 [start, end] 闭区间内随机抽取时间点（秒级）
pub fn random_datetime_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> NaiveDateTime {
    if start >= end {
        return start;
    }
    let span = (end - start).num_seconds();
    start + Duration::seconds(rng.random_range(0..=span))
}

/// 构造固定日期，仅用于字面量合法的历史窗口边界
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// 首字母大写
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 用子分隔符拼接多值字段
pub fn join_list(items: &[String]) -> String {
    items.join(LIST_DELIMITER)
}

/// 可选值渲染为单元格，None 渲染为空字符串
pub fn optional_cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}
