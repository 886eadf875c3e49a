use serde::Serialize;

use crate::domain::models::member::RecentMember;

/// One count per calendar month, January first.
pub type MonthSeries = [i64; 12];

/// Which clubs an aggregation looks at.
#[derive(Debug, Clone, PartialEq)]
pub enum ClubScope {
    All,
    Clubs(Vec<i64>),
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagerDashboard {
    pub club_ids: Vec<i64>,
    pub total_members: i64,
    pub total_prizes: i64,
    pub events_by_month: MonthSeries,
    pub prizes_by_month: MonthSeries,
    pub recent_members: Vec<RecentMember>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDashboard {
    pub total_clubs: i64,
    pub total_members: i64,
    pub total_events: i64,
    pub total_prizes: i64,
    pub events_by_month: MonthSeries,
    pub prizes_by_month: MonthSeries,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClubFinance {
    pub club_id: i64,
    pub total_allocated: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}
