//! 用户池构建
//!
//! 生成 `<名>_<姓首字母>` 形式的唯一用户名，供所有生成器作为报告人、经办人、关注人等字段取值。

use std::collections::HashSet;

use datagen_shared::error::{DataGenError, Result};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use tracing::{debug, info};

/// 姓为空时使用的首字母
const FALLBACK_INITIAL: char = 'X';

/// 生成一个用户名
pub fn random_handle<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first: String = FirstName().fake_with_rng(rng);
    let last: String = LastName().fake_with_rng(rng);
    let initial = last.chars().next().unwrap_or(FALLBACK_INITIAL);
    format!("{first}_{initial}")
}

/// 构建指定数量的唯一用户池
///
/// - `count <= 0` 返回空池，由下游生成器自行检测并跳过
/// - 碰撞重试次数上限为 `count * attempts_per_handle`，超过即返回
///   [`DataGenError::InsufficientNameSpace`]，不会无限循环
pub fn build_identity_pool<R: Rng + ?Sized>(
    rng: &mut R,
    count: i64,
    attempts_per_handle: usize,
) -> Result<Vec<String>> {
    build_with(rng, count, attempts_per_handle, random_handle)
}

/// 使用自定义用户名生成函数构建用户池
pub fn build_with<R, F>(
    rng: &mut R,
    count: i64,
    attempts_per_handle: usize,
    mut make_handle: F,
) -> Result<Vec<String>>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> String,
{
    let Ok(requested) = usize::try_from(count) else {
        return Ok(Vec::new());
    };
    if requested == 0 {
        return Ok(Vec::new());
    }

    let max_attempts = requested.saturating_mul(attempts_per_handle.max(1));
    let mut seen = HashSet::with_capacity(requested);
    let mut handles = Vec::with_capacity(requested);
    let mut attempts = 0;

    while handles.len() < requested {
        if attempts >= max_attempts {
            return Err(DataGenError::InsufficientNameSpace {
                requested,
                produced: handles.len(),
                attempts,
            });
        }
        attempts += 1;

        let handle = make_handle(rng);
        if seen.insert(handle.clone()) {
            handles.push(handle);
        }
    }

    debug!(attempts, collisions = attempts - requested, "用户名碰撞统计");
    info!(count = handles.len(), "用户池构建完成");
    Ok(handles)
}
