//! 等级判定与进度计算引擎
//!
//! 纯计算：输入累计积分与等级表，输出当前等级、下一等级与进度。
//! 不做任何 I/O，可脱离存储单独测试。
//!
//! ## 进度规则
//!
//! - 已达最高等级（无下一等级）：进度为 0
//! - 低于最低门槛（无当前等级）：以 0 积分为起点计算
//! - 其余情况：(积分 - 当前门槛) / (下一门槛 - 当前门槛)，四舍五入保留两位小数
//!
//! 结果始终限制在 [0, 1]。

use tracing::debug;

use crate::models::TierAssignment;
use crate::tier_table::TierTable;

/// 根据累计积分判定等级与进度
pub fn resolve(points: i64, table: &TierTable) -> TierAssignment {
    let current = table.find_current_tier(points);
    let next = table.find_next_tier(points);

    match current {
        Some(tier) => debug!(tier = %tier.tier_code, points, "Identified current tier"),
        None => debug!(points, "Customer is not yet in a tier"),
    }

    let progress_fraction = match next {
        Some(next_tier) => {
            let baseline = current.map_or(0, |t| t.threshold_points);
            let progress = progress_between(points, baseline, next_tier.threshold_points);
            debug!(
                next_tier = %next_tier.tier_code,
                points,
                baseline,
                progress,
                "Identified point progress"
            );
            progress
        }
        None => {
            debug!(points, "Customer is already in the top tier");
            0.0
        }
    };

    TierAssignment {
        current_tier: current.cloned(),
        next_tier: next.cloned(),
        progress_fraction,
    }
}

/// 从 baseline 到 target 的进度比例
fn progress_between(points: i64, baseline: i64, target: i64) -> f64 {
    let span = target.saturating_sub(baseline);
    if span <= 0 {
        return 0.0;
    }
    let gathered = points.saturating_sub(baseline);
    round_to_hundredths((gathered as f64 / span as f64).clamp(0.0, 1.0))
}

/// 保留两位小数，恰好为 .5 时取偶数（银行家舍入）
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// 订单金额折算的积分：向下取整
///
/// 超出 i64 范围时饱和截断。
pub fn points_for_order(order_total: f64) -> i64 {
    order_total.floor() as i64
}

/// 在已有积分上累计一笔订单，结果不低于 0
pub fn accrue_points(existing: i64, order_total: f64) -> i64 {
    existing.saturating_add(points_for_order(order_total)).max(0)
}
