use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::{types::Json, FromRow};

pub const EVENT_COUNTER: &str = "event";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub ten: String,
    pub ngay_to_chuc: NaiveDate,
    pub thoi_gian: Option<String>,
    pub dia_diem: Option<String>,
    pub noi_dung: Option<String>,
    pub ngan_sach: f64,
    pub nguoi_phu_trach: Option<String>,
    pub khach_moi: Json<Vec<String>>,
    pub club: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub ten: String,
    pub ngay_to_chuc: NaiveDate,
    pub thoi_gian: Option<String>,
    pub dia_diem: Option<String>,
    pub noi_dung: Option<String>,
    pub ngan_sach: Option<f64>,
    pub nguoi_phu_trach: Option<String>,
    pub khach_moi: Option<Vec<String>>,
    pub club: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub ten: Option<String>,
    pub ngay_to_chuc: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub thoi_gian: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub dia_diem: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub noi_dung: Option<Option<String>>,
    pub ngan_sach: Option<f64>,
    #[serde(default, deserialize_with = "super::clearable")]
    pub nguoi_phu_trach: Option<Option<String>>,
    pub khach_moi: Option<Vec<String>>,
    pub club: Option<i64>,
}

impl Event {
    pub fn new(id: i64, input: NewEvent) -> Self {
        Self {
            id,
            ten: input.ten,
            ngay_to_chuc: input.ngay_to_chuc,
            thoi_gian: input.thoi_gian,
            dia_diem: input.dia_diem,
            noi_dung: input.noi_dung,
            ngan_sach: input.ngan_sach.unwrap_or(0.0),
            nguoi_phu_trach: input.nguoi_phu_trach,
            khach_moi: Json(input.khach_moi.unwrap_or_default()),
            club: input.club,
        }
    }

    pub fn apply(&mut self, patch: EventPatch) {
        if let Some(val) = patch.ten { self.ten = val; }
        if let Some(val) = patch.ngay_to_chuc { self.ngay_to_chuc = val; }
        if let Some(val) = patch.thoi_gian { self.thoi_gian = val; }
        if let Some(val) = patch.dia_diem { self.dia_diem = val; }
        if let Some(val) = patch.noi_dung { self.noi_dung = val; }
        if let Some(val) = patch.ngan_sach { self.ngan_sach = val; }
        if let Some(val) = patch.nguoi_phu_trach { self.nguoi_phu_trach = val; }
        if let Some(val) = patch.khach_moi { self.khach_moi = Json(val); }
        if let Some(val) = patch.club { self.club = val; }
    }
}
