use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::domain::models::dashboard::{ClubScope, ManagerDashboard, MonthSeries, SchoolDashboard};
use crate::domain::ports::{ClubRepository, EventRepository, MemberRepository, PrizeRepository};
use crate::error::AppError;

pub const RECENT_MEMBERS_LIMIT: i64 = 10;

/// First and last day of the calendar year containing `today`.
pub fn year_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let year = today.year();
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
    let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today);
    (start, end)
}

/// Counts dates per month of `year`. Dates from any other year are dropped.
pub fn month_series(dates: &[NaiveDate], year: i32) -> MonthSeries {
    let mut series = [0i64; 12];
    for date in dates.iter().filter(|d| d.year() == year) {
        series[date.month0() as usize] += 1;
    }
    series
}

pub struct DashboardService {
    clubs: Arc<dyn ClubRepository>,
    members: Arc<dyn MemberRepository>,
    events: Arc<dyn EventRepository>,
    prizes: Arc<dyn PrizeRepository>,
}

impl DashboardService {
    pub fn new(
        clubs: Arc<dyn ClubRepository>,
        members: Arc<dyn MemberRepository>,
        events: Arc<dyn EventRepository>,
        prizes: Arc<dyn PrizeRepository>,
    ) -> Self {
        Self { clubs, members, events, prizes }
    }

    /// Roll-up over the clubs whose head-manager is `user_id`.
    pub async fn for_head_manager(&self, user_id: &str, today: NaiveDate) -> Result<ManagerDashboard, AppError> {
        let club_ids: Vec<i64> = self.clubs.list_by_head_manager(user_id).await?
            .into_iter()
            .map(|club| club.club_id)
            .collect();

        debug!("Dashboard for {} covers clubs {:?}", user_id, club_ids);

        let scope = ClubScope::Clubs(club_ids.clone());
        let (start, end) = year_bounds(today);

        let (total_members, total_prizes, event_dates, prize_dates, recent_members) = tokio::try_join!(
            self.members.count(&scope),
            self.prizes.count(&scope),
            self.events.list_dates(&scope, start, end),
            self.prizes.list_dates(&scope, start, end),
            self.members.list_recent(&scope, RECENT_MEMBERS_LIMIT),
        )?;

        Ok(ManagerDashboard {
            club_ids,
            total_members,
            total_prizes,
            events_by_month: month_series(&event_dates, today.year()),
            prizes_by_month: month_series(&prize_dates, today.year()),
            recent_members,
        })
    }

    /// Roll-up over every club, ignoring ownership.
    pub async fn school_wide(&self, today: NaiveDate) -> Result<SchoolDashboard, AppError> {
        let scope = ClubScope::All;
        let (start, end) = year_bounds(today);

        let (total_clubs, total_members, event_dates, prize_dates) = tokio::try_join!(
            self.clubs.count(),
            self.members.count(&scope),
            self.events.list_dates(&scope, start, end),
            self.prizes.list_dates(&scope, start, end),
        )?;

        let events_by_month = month_series(&event_dates, today.year());
        let prizes_by_month = month_series(&prize_dates, today.year());

        Ok(SchoolDashboard {
            total_clubs,
            total_members,
            total_events: events_by_month.iter().sum(),
            total_prizes: prizes_by_month.iter().sum(),
            events_by_month,
            prizes_by_month,
        })
    }
}
