//! Tracker configuration.
//!
//! Holds the local time zone used to derive calendar dates from the clock and
//! the workflows seeded into an empty workflow repository.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;

const SECONDS_PER_HOUR: i32 = 3600;

/// Default UTC offset, in hours, of the tracker's local calendar.
pub const DEFAULT_UTC_OFFSET_HOURS: i8 = 8;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The UTC offset lies outside the representable range.
    #[error("UTC offset {0} hours is out of range")]
    OffsetOutOfRange(i8),

    /// A seed workflow has a blank name.
    #[error("seed workflow names must not be blank")]
    BlankSeedName,
}

/// A workflow created when the workflow repository is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSeed {
    /// Workflow name, matching the task type it governs.
    pub name: String,
    /// Ordered step names.
    pub steps: Vec<String>,
}

impl WorkflowSeed {
    /// Creates a seed from a name and its steps.
    #[must_use]
    pub fn new<S: Into<String>>(name: impl Into<String>, steps: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }
}

/// Configuration for the task tracker.
///
/// # Examples
///
/// ```
/// use work_calendar::config::TrackerConfig;
///
/// let config = TrackerConfig::default();
/// assert_eq!(config.utc_offset_hours, 8);
/// assert_eq!(config.seed_workflows.len(), 5);
///
/// let utc = TrackerConfig::from_json_str(r#"{"utc_offset_hours": 0}"#).unwrap();
/// assert_eq!(utc.utc_offset_hours, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Offset of the local calendar from UTC, in whole hours.
    pub utc_offset_hours: i8,
    /// Workflows created by
    /// [`WorkflowService::initialize_defaults`](crate::workflow::services::WorkflowService::initialize_defaults).
    pub seed_workflows: Vec<WorkflowSeed>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            seed_workflows: default_seed_workflows(),
        }
    }
}

impl TrackerConfig {
    /// Creates a configuration on UTC without seed workflows.
    ///
    /// Useful for tests that control every workflow themselves.
    #[must_use]
    pub const fn bare() -> Self {
        Self {
            utc_offset_hours: 0,
            seed_workflows: Vec::new(),
        }
    }

    /// Parses a JSON configuration document. Missing fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or a value is
    /// out of range.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is malformed or a value is
    /// out of range.
    pub fn from_reader(reader: impl Read) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configured values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OffsetOutOfRange`] or
    /// [`ConfigError::BlankSeedName`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checked_offset()?;
        if self
            .seed_workflows
            .iter()
            .any(|seed| seed.name.trim().is_empty())
        {
            return Err(ConfigError::BlankSeedName);
        }
        Ok(())
    }

    /// Returns the local calendar offset.
    ///
    /// Out-of-range values fall back to UTC; loaders reject them up front.
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        self.checked_offset().unwrap_or_else(|_| Utc.fix())
    }

    fn checked_offset(&self) -> Result<FixedOffset, ConfigError> {
        i32::from(self.utc_offset_hours)
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::OffsetOutOfRange(self.utc_offset_hours))
    }
}

fn default_seed_workflows() -> Vec<WorkflowSeed> {
    vec![
        WorkflowSeed::new(
            "五年战略规划",
            [
                "来文需求研究",
                "历史数据调研",
                "拟定框架",
                "提交至各部门收集数据",
                "梳理与补充内容材料",
                "各部门审阅",
                "领导审阅",
                "提交上级单位",
            ],
        ),
        WorkflowSeed::new(
            "商业计划",
            [
                "市场分析",
                "竞争对手分析",
                "商业模式设计",
                "财务预测",
                "营销策略",
                "运营计划",
                "团队建设",
                "风险管理",
            ],
        ),
        WorkflowSeed::new(
            "管理报告",
            [
                "数据收集和整理",
                "关键指标分析",
                "问题识别和分析",
                "解决方案制定",
                "报告撰写",
                "图表制作",
                "内部审核",
                "最终提交",
            ],
        ),
        WorkflowSeed::new(
            "临时报告",
            [
                "需求确认",
                "资料收集",
                "分析和总结",
                "报告撰写",
                "审核和修改",
                "提交",
            ],
        ),
        WorkflowSeed::new(
            "创新管理",
            [
                "创新需求识别",
                "创新方案征集",
                "方案评估",
                "项目立项",
                "资源配置",
                "项目实施",
                "效果评估",
                "推广应用",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests;
