//! 等级表
//!
//! 按门槛积分升序保存的只读等级集合，提供两个有序查询：
//!
//! - `find_current_tier`: 门槛 <= 积分 的最大门槛等级
//! - `find_next_tier`: 门槛 > 积分 的最小门槛等级
//!
//! 两者都基于二分查找，存储层返回的顺序无关紧要。

use tracing::warn;

use crate::models::Tier;

/// 只读等级表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierTable {
    /// 按 threshold_points 严格升序
    tiers: Vec<Tier>,
}

impl TierTable {
    /// 从任意顺序的等级列表构建等级表
    ///
    /// 门槛相同的等级只保留列表中先出现的一个，其余丢弃并告警。
    pub fn new(tiers: impl IntoIterator<Item = Tier>) -> Self {
        let mut tiers: Vec<Tier> = tiers.into_iter().collect();
        // 稳定排序，相同门槛保持原始顺序
        tiers.sort_by_key(|t| t.threshold_points);

        let before = tiers.len();
        tiers.dedup_by(|later, kept| {
            let duplicate = later.threshold_points == kept.threshold_points;
            if duplicate {
                warn!(
                    threshold = later.threshold_points,
                    kept = %kept.tier_code,
                    dropped = %later.tier_code,
                    "Duplicate tier threshold, keeping the first listed tier"
                );
            }
            duplicate
        });

        if tiers.len() != before {
            warn!(
                dropped = before - tiers.len(),
                "Tier table contained duplicate thresholds"
            );
        }

        Self { tiers }
    }

    /// 空等级表
    pub fn empty() -> Self {
        Self::default()
    }

    /// 按门槛升序的全部等级
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// 门槛 <= points 的等级个数，即第一个门槛 > points 的下标
    fn split_index(&self, points: i64) -> usize {
        self.tiers
            .partition_point(|t| t.threshold_points <= points)
    }

    /// 当前等级：门槛不超过 points 的最高等级
    ///
    /// 积分低于最低门槛时返回 None
    pub fn find_current_tier(&self, points: i64) -> Option<&Tier> {
        self.split_index(points)
            .checked_sub(1)
            .and_then(|idx| self.tiers.get(idx))
    }

    /// 下一等级：门槛严格大于 points 的最低等级
    ///
    /// 已达到或超过最高门槛时返回 None
    pub fn find_next_tier(&self, points: i64) -> Option<&Tier> {
        self.tiers.get(self.split_index(points))
    }
}

impl FromIterator<Tier> for TierTable {
    fn from_iter<I: IntoIterator<Item = Tier>>(iter: I) -> Self {
        Self::new(iter)
    }
}
