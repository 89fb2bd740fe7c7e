//! Reporting views. Always computed from current store state.

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::report::{Dashboard, GenreCount, OverdueEntry},
    repository::Repository,
};

use super::today;

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self) -> AppResult<Dashboard> {
        self.dashboard_as_of(today()).await
    }

    pub async fn dashboard_as_of(&self, date: NaiveDate) -> AppResult<Dashboard> {
        let reports = &self.repository.reports;
        Ok(Dashboard {
            total_titles: reports.count_titles().await?,
            total_copies: reports.count_copies().await?,
            issued_now: reports.count_open().await?,
            overdue: reports.count_overdue(date).await?,
        })
    }

    pub async fn titles_by_genre(&self) -> AppResult<Vec<GenreCount>> {
        self.repository.reports.titles_by_genre().await
    }

    pub async fn overdue(&self) -> AppResult<Vec<OverdueEntry>> {
        self.overdue_as_of(today()).await
    }

    /// Open loans whose due date is strictly before `date`
    pub async fn overdue_as_of(&self, date: NaiveDate) -> AppResult<Vec<OverdueEntry>> {
        self.repository.reports.overdue(date).await
    }
}
