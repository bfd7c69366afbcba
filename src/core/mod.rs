pub mod engine;
pub mod pacing;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{Record, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
