use crate::utils::error::{CoachError, Result};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

pub const SUBJECT_INFO_COLUMN: &str = "EmailSubjectInfo";
pub const PHONE_TARGET_COLUMN: &str = "PhoneActivationsTarget";
pub const PHONE_ACHIEVED_COLUMN: &str = "PhoneActivationsAchievement";
pub const FWA_TARGET_COLUMN: &str = "FwaTarget";
// 來源報表的欄位名稱本來就拼錯，保持一致
pub const FWA_ACHIEVED_COLUMN: &str = "FwaAchivement";
pub const REVENUE_QUOTA_COLUMN: &str = "SalesDollarQuota";
pub const REVENUE_ACHIEVED_COLUMN: &str = "SalesDollarAttainment";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    /// 取得期間描述 (例如 "Day 4/22")，空字串視為沒有
    pub fn subject_info(&self) -> Option<&str> {
        self.data
            .get(SUBJECT_INFO_COLUMN)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    fn numeric_field(&self, column: &str) -> Result<f64> {
        let missing = || CoachError::MissingField {
            field: column.to_string(),
        };

        match self.data.get(column) {
            None | Some(serde_json::Value::Null) => Err(missing()),
            Some(serde_json::Value::Number(n)) => n.as_f64().ok_or_else(|| CoachError::InvalidField {
                field: column.to_string(),
                value: n.to_string(),
                reason: "number out of range".to_string(),
            }),
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => Err(missing()),
            Some(serde_json::Value::String(s)) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|e| CoachError::InvalidField {
                        field: column.to_string(),
                        value: s.clone(),
                        reason: e.to_string(),
                    })
            }
            Some(other) => Err(CoachError::InvalidField {
                field: column.to_string(),
                value: other.to_string(),
                reason: "expected a number".to_string(),
            }),
        }
    }
}

/// 單一業務員的配額資料。手機與 FWA 欄位是「件數 x 100」的金額，營收欄位直接使用。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuotaRecord {
    pub phone_target_dollars: f64,
    pub phone_achieved_dollars: f64,
    pub fwa_target_dollars: f64,
    pub fwa_achieved_dollars: f64,
    pub revenue_quota: f64,
    pub revenue_achieved: f64,
}

impl TryFrom<&Record> for QuotaRecord {
    type Error = CoachError;

    fn try_from(record: &Record) -> Result<Self> {
        Ok(Self {
            phone_target_dollars: record.numeric_field(PHONE_TARGET_COLUMN)?,
            phone_achieved_dollars: record.numeric_field(PHONE_ACHIEVED_COLUMN)?,
            fwa_target_dollars: record.numeric_field(FWA_TARGET_COLUMN)?,
            fwa_achieved_dollars: record.numeric_field(FWA_ACHIEVED_COLUMN)?,
            revenue_quota: record.numeric_field(REVENUE_QUOTA_COLUMN)?,
            revenue_achieved: record.numeric_field(REVENUE_ACHIEVED_COLUMN)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub current_day: i64,
    pub total_days: i64,
}

impl Period {
    pub const DEFAULT: Period = Period {
        current_day: 1,
        total_days: 30,
    };

    /// 可能為 0 或負數 (報表晚到)，不做截斷
    pub fn days_remaining(&self) -> i64 {
        self.total_days - self.current_day
    }

    /// 期間已結束，每日進度一律回報為 0
    pub fn is_elapsed(&self) -> bool {
        self.days_remaining() <= 0
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Period", 3)?;
        state.serialize_field("current_day", &self.current_day)?;
        state.serialize_field("total_days", &self.total_days)?;
        state.serialize_field("days_remaining", &self.days_remaining())?;
        state.end()
    }
}

/// 期間解析結果：區分成功比對與套用預設值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodParse {
    Matched(Period),
    Defaulted(Period),
}

impl PeriodParse {
    pub fn period(&self) -> Period {
        match self {
            PeriodParse::Matched(p) | PeriodParse::Defaulted(p) => *p,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, PeriodParse::Defaulted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Phone,
    Internet,
    Combined,
    Revenue,
}

impl Category {
    /// 下游報表依賴的欄位名稱：target, achieved, remaining, 1.0 pace, 1.3 pace
    pub fn field_names(self) -> [&'static str; 5] {
        match self {
            Category::Phone => [
                "phone_target_count",
                "phone_achieved_count",
                "remaining_phone",
                "daily_phone_target_1_0",
                "daily_phone_target_1_3",
            ],
            Category::Internet => [
                "internet_target_count",
                "internet_achieved_count",
                "remaining_internet",
                "daily_internet_target_1_0",
                "daily_internet_target_1_3",
            ],
            Category::Combined => [
                "combined_target",
                "combined_achieved",
                "remaining_combined",
                "daily_combined_target_1_0",
                "daily_combined_target_1_3",
            ],
            Category::Revenue => [
                "revenue_quota",
                "revenue_achieved",
                "remaining_revenue",
                "daily_revenue_target_1_0",
                "daily_revenue_target_1_3",
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryPacing {
    pub target: f64,
    pub achieved: f64,
    pub remaining: f64,
    pub daily_base: f64,
    pub daily_stretch: f64,
}

struct CategorySection<'a> {
    category: Category,
    pacing: &'a CategoryPacing,
}

impl Serialize for CategorySection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let [target, achieved, remaining, base, stretch] = self.category.field_names();
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry(target, &self.pacing.target)?;
        map.serialize_entry(achieved, &self.pacing.achieved)?;
        map.serialize_entry(remaining, &self.pacing.remaining)?;
        map.serialize_entry(base, &self.pacing.daily_base)?;
        map.serialize_entry(stretch, &self.pacing.daily_stretch)?;
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    #[serde(rename = "current_phone_avg")]
    pub phone: f64,
    #[serde(rename = "current_internet_avg")]
    pub internet: f64,
    #[serde(rename = "current_combined_avg")]
    pub combined: f64,
    #[serde(rename = "current_revenue_avg")]
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacingResult {
    pub time: Period,
    pub phone: CategoryPacing,
    pub internet: CategoryPacing,
    pub combined: CategoryPacing,
    pub revenue: CategoryPacing,
    pub averages: Averages,
}

impl PacingResult {
    pub fn section(&self, category: Category) -> &CategoryPacing {
        match category {
            Category::Phone => &self.phone,
            Category::Internet => &self.internet,
            Category::Combined => &self.combined,
            Category::Revenue => &self.revenue,
        }
    }
}

impl Serialize for PacingResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PacingResult", 6)?;
        state.serialize_field("time", &self.time)?;
        for (key, category) in [
            ("phone", Category::Phone),
            ("internet", Category::Internet),
            ("combined", Category::Combined),
            ("revenue", Category::Revenue),
        ] {
            state.serialize_field(
                key,
                &CategorySection {
                    category,
                    pacing: self.section(category),
                },
            )?;
        }
        state.serialize_field("averages", &self.averages)?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachingReport {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub pacing: PacingResult,
    pub report: CoachingReport,
}
