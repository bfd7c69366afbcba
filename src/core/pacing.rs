//! 配額進度計算。純函式，不做 I/O，也不讀取時間，相同輸入永遠得到相同結果。

use crate::domain::model::{Averages, CategoryPacing, PacingResult, Period, PeriodParse, QuotaRecord};
use regex::Regex;
use std::sync::LazyLock;

/// 衝刺目標 (1.3 bucket) 相對於基本目標的倍數，業務規則固定不可設定
pub const STRETCH_MULTIPLIER: f64 = 1.3;

/// 手機與 FWA 欄位以每件 $100 記錄
pub const COUNT_SCALE: f64 = 100.0;
pub const REVENUE_SCALE: f64 = 1.0;

static PERIOD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Day\s+([0-9]+)\s*/\s*([0-9]+)").expect("period pattern is a valid regex")
});

/// 從郵件主旨之類的文字中找出 "Day X/Y"，只接受 ASCII 數字。
/// 依序比對，取第一個能轉成 i64 的結果；都沒有時回傳預設的 Day 1/30。
pub fn parse_period(text: Option<&str>) -> PeriodParse {
    text.into_iter()
        .flat_map(|t| PERIOD_PATTERN.captures_iter(t))
        .find_map(|caps| {
            let current_day = caps[1].parse::<i64>().ok()?;
            let total_days = caps[2].parse::<i64>().ok()?;
            Some(PeriodParse::Matched(Period {
                current_day,
                total_days,
            }))
        })
        .unwrap_or(PeriodParse::Defaulted(Period::DEFAULT))
}

/// days_remaining <= 0 時回傳 0，不產生負的每日進度
fn daily_pace(gap: f64, days_remaining: i64) -> f64 {
    if days_remaining > 0 {
        gap / days_remaining as f64
    } else {
        0.0
    }
}

fn pacing_from_totals(target: f64, achieved: f64, days_remaining: i64) -> CategoryPacing {
    let remaining = target - achieved;
    let stretch_target = STRETCH_MULTIPLIER * target;

    CategoryPacing {
        target,
        achieved,
        remaining,
        daily_base: daily_pace(remaining, days_remaining),
        daily_stretch: daily_pace(stretch_target - achieved, days_remaining),
    }
}

pub fn compute_category(
    target_raw: f64,
    achieved_raw: f64,
    scale: f64,
    days_remaining: i64,
) -> CategoryPacing {
    pacing_from_totals(target_raw / scale, achieved_raw / scale, days_remaining)
}

/// 合併目標直接用加總後的數字重新計算，而不是把兩邊的每日進度相加
pub fn compute_combined(
    phone: &CategoryPacing,
    internet: &CategoryPacing,
    days_remaining: i64,
) -> CategoryPacing {
    pacing_from_totals(
        phone.target + internet.target,
        phone.achieved + internet.achieved,
        days_remaining,
    )
}

pub fn compute_averages(
    phone_achieved: f64,
    internet_achieved: f64,
    revenue_achieved: f64,
    current_day: i64,
) -> Averages {
    // current_day <= 0 時以 1 天計
    let days_elapsed = current_day.max(1) as f64;

    Averages {
        phone: phone_achieved / days_elapsed,
        internet: internet_achieved / days_elapsed,
        combined: (phone_achieved + internet_achieved) / days_elapsed,
        revenue: revenue_achieved / days_elapsed,
    }
}

pub fn compute_all(record: &QuotaRecord, period_text: Option<&str>) -> PacingResult {
    compute_for_period(record, parse_period(period_text).period())
}

pub fn compute_for_period(record: &QuotaRecord, period: Period) -> PacingResult {
    let days_remaining = period.days_remaining();

    let phone = compute_category(
        record.phone_target_dollars,
        record.phone_achieved_dollars,
        COUNT_SCALE,
        days_remaining,
    );
    let internet = compute_category(
        record.fwa_target_dollars,
        record.fwa_achieved_dollars,
        COUNT_SCALE,
        days_remaining,
    );
    let combined = compute_combined(&phone, &internet, days_remaining);
    let revenue = compute_category(
        record.revenue_quota,
        record.revenue_achieved,
        REVENUE_SCALE,
        days_remaining,
    );
    let averages = compute_averages(
        phone.achieved,
        internet.achieved,
        revenue.achieved,
        period.current_day,
    );

    PacingResult {
        time: period,
        phone,
        internet,
        combined,
        revenue,
        averages,
    }
}
