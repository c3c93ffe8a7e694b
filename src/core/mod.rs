pub mod catalog;
pub mod eol;
pub mod report;
pub mod scorecard;
pub mod setup;

#[cfg(test)]
pub(crate) mod mock_catalog;

pub use crate::domain::model::{Blueprint, Entity, Scorecard};
pub use crate::domain::ports::{CatalogApi, ConfigProvider};
pub use crate::utils::error::Result;
