use chrono::NaiveDate;
use serde::Deserialize;

use super::models::ColorMode;
use crate::games::{filter::FilterParams, GameFilter};
use crate::shared::AppError;

/// Query-string parameters of the color stats view
#[derive(Debug, Default, Deserialize)]
pub struct ColorStatsParams {
    #[serde(default)]
    pub mode: ColorMode,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub edition: Option<String>,
    pub format: Option<String>,
}

impl ColorStatsParams {
    pub fn into_parts(self) -> Result<(ColorMode, GameFilter), AppError> {
        let filter = GameFilter::try_from(FilterParams {
            start_date: self.start_date,
            end_date: self.end_date,
            edition: self.edition,
            format: self.format,
        })?;
        Ok((self.mode, filter))
    }
}
