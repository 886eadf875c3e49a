use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, Utc};
use sqlx::FromRow;

pub const MEMBER_ACTIVE: &str = "Đang hoạt động";
pub const DEFAULT_MEMBER_ROLE: &str = "Thành viên";

/// A student enrolled in one club, keyed by their school id.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub ma_so_hoc_sinh: String,
    pub ho_ten: String,
    pub gioi_tinh: Option<String>,
    pub lop: Option<String>,
    pub ban: Option<String>,
    pub lien_he: Option<String>,
    pub ngay_tham_gia: NaiveDate,
    pub vai_tro: String,
    pub tinh_trang: String,
    pub club: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub ma_so_hoc_sinh: String,
    pub ho_ten: String,
    pub gioi_tinh: Option<String>,
    pub lop: Option<String>,
    pub ban: Option<String>,
    pub lien_he: Option<String>,
    pub ngay_tham_gia: Option<NaiveDate>,
    pub vai_tro: Option<String>,
    pub tinh_trang: Option<String>,
    pub club: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    pub ho_ten: Option<String>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub gioi_tinh: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub lop: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub ban: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub lien_he: Option<Option<String>>,
    pub ngay_tham_gia: Option<NaiveDate>,
    pub vai_tro: Option<String>,
    pub tinh_trang: Option<String>,
    pub club: Option<i64>,
}

impl From<NewMember> for Member {
    fn from(input: NewMember) -> Self {
        Self {
            ma_so_hoc_sinh: input.ma_so_hoc_sinh,
            ho_ten: input.ho_ten,
            gioi_tinh: input.gioi_tinh,
            lop: input.lop,
            ban: input.ban,
            lien_he: input.lien_he,
            ngay_tham_gia: input.ngay_tham_gia.unwrap_or_else(|| Utc::now().date_naive()),
            vai_tro: input.vai_tro.unwrap_or_else(|| DEFAULT_MEMBER_ROLE.to_string()),
            tinh_trang: input.tinh_trang.unwrap_or_else(|| MEMBER_ACTIVE.to_string()),
            club: input.club,
        }
    }
}

impl Member {
    pub fn apply(&mut self, patch: MemberPatch) {
        if let Some(val) = patch.ho_ten { self.ho_ten = val; }
        if let Some(val) = patch.gioi_tinh { self.gioi_tinh = val; }
        if let Some(val) = patch.lop { self.lop = val; }
        if let Some(val) = patch.ban { self.ban = val; }
        if let Some(val) = patch.lien_he { self.lien_he = val; }
        if let Some(val) = patch.ngay_tham_gia { self.ngay_tham_gia = val; }
        if let Some(val) = patch.vai_tro { self.vai_tro = val; }
        if let Some(val) = patch.tinh_trang { self.tinh_trang = val; }
        if let Some(val) = patch.club { self.club = val; }
    }
}

/// Row for the dashboard's "recently joined" list.
#[derive(Debug, Serialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentMember {
    pub ma_so_hoc_sinh: String,
    pub ho_ten: String,
    pub ngay_tham_gia: NaiveDate,
    pub club: i64,
    pub ten_club: String,
}
