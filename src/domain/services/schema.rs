//! Declarative payload checks for every record kind.
//!
//! Each kind lists its fields with a primitive type and its presence rule:
//! required on create, optional and clearable with `null`, or defaulted (optional
//! on create, always holding a value afterwards). A payload is checked as a whole so the caller gets
//! every missing or mistyped field back in one `AppError::InvalidFields`,
//! then it is handed to serde for the typed conversion.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::models::{account::ACCOUNT_ROLES, club::CLUB_STATUSES};
use crate::error::{AppError, FieldError};

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Date,
    OneOf(&'static [&'static str]),
    TextList,
    IntegerList,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind, required: true, nullable: false }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind, required: false, nullable: true }
}

const fn defaulted(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind, required: false, nullable: false }
}

#[derive(Debug)]
pub struct Schema {
    pub kind: &'static str,
    pub fields: &'static [FieldSpec],
}

pub const CLUB: Schema = Schema {
    kind: "club",
    fields: &[
        required("ten", FieldKind::Text),
        optional("logo", FieldKind::Text),
        required("linhVucHoatDong", FieldKind::Text),
        required("ngayThanhLap", FieldKind::Date),
        required("giaoVienPhuTrach", FieldKind::Text),
        optional("moTa", FieldKind::Text),
        optional("quyDinh", FieldKind::Text),
        required("truongBanCLB", FieldKind::Text),
        defaulted("nganSach", FieldKind::Number),
        defaulted("tinhTrang", FieldKind::OneOf(CLUB_STATUSES)),
    ],
};

pub const MEMBER: Schema = Schema {
    kind: "member",
    fields: &[
        required("maSoHocSinh", FieldKind::Text),
        required("hoTen", FieldKind::Text),
        optional("gioiTinh", FieldKind::Text),
        optional("lop", FieldKind::Text),
        optional("ban", FieldKind::Text),
        optional("lienHe", FieldKind::Text),
        defaulted("ngayThamGia", FieldKind::Date),
        defaulted("vaiTro", FieldKind::Text),
        defaulted("tinhTrang", FieldKind::Text),
        required("club", FieldKind::Integer),
    ],
};

pub const EVENT: Schema = Schema {
    kind: "event",
    fields: &[
        required("ten", FieldKind::Text),
        required("ngayToChuc", FieldKind::Date),
        optional("thoiGian", FieldKind::Text),
        optional("diaDiem", FieldKind::Text),
        optional("noiDung", FieldKind::Text),
        defaulted("nganSach", FieldKind::Number),
        optional("nguoiPhuTrach", FieldKind::Text),
        defaulted("khachMoi", FieldKind::TextList),
        required("club", FieldKind::Integer),
    ],
};

pub const BUDGET: Schema = Schema {
    kind: "budget",
    fields: &[
        required("ten", FieldKind::Text),
        defaulted("khoanChi", FieldKind::Number),
        defaulted("khoanThu", FieldKind::Number),
        required("ngay", FieldKind::Date),
        optional("thanhVienPhuTrach", FieldKind::Text),
        optional("moTa", FieldKind::Text),
        required("club", FieldKind::Integer),
    ],
};

pub const BUDGET_ALLOCATION: Schema = Schema {
    kind: "budget_allocation",
    fields: &[
        required("soTien", FieldKind::Number),
        optional("mucDich", FieldKind::Text),
        required("ngayCapPhat", FieldKind::Date),
        required("club", FieldKind::Integer),
    ],
};

pub const REPORT: Schema = Schema {
    kind: "report",
    fields: &[
        required("tenBaoCao", FieldKind::Text),
        required("ngayBaoCao", FieldKind::Date),
        optional("nhanSuPhuTrach", FieldKind::Text),
        defaulted("danhSachSuKien", FieldKind::IntegerList),
        defaulted("tongNganSachChi", FieldKind::Number),
        defaulted("tongThu", FieldKind::Number),
        optional("ketQuaDatDuoc", FieldKind::Text),
        required("club", FieldKind::Integer),
    ],
};

pub const PRIZE: Schema = Schema {
    kind: "prize",
    fields: &[
        required("tenGiaiThuong", FieldKind::Text),
        required("ngayDatGiai", FieldKind::Date),
        optional("loaiGiai", FieldKind::Text),
        optional("ghiChu", FieldKind::Text),
        optional("anhDatGiai", FieldKind::Text),
        required("club", FieldKind::Integer),
        required("thanhVien", FieldKind::Text),
    ],
};

pub const ACCOUNT: Schema = Schema {
    kind: "account",
    fields: &[
        required("userId", FieldKind::Text),
        required("ten", FieldKind::Text),
        required("email", FieldKind::Text),
        required("password", FieldKind::Text),
        required("role", FieldKind::OneOf(ACCOUNT_ROLES)),
    ],
};

/// Account edits; the id is the path key and cannot change.
pub const ACCOUNT_PATCH: Schema = Schema {
    kind: "account",
    fields: &[
        required("ten", FieldKind::Text),
        required("email", FieldKind::Text),
        required("password", FieldKind::Text),
        required("role", FieldKind::OneOf(ACCOUNT_ROLES)),
    ],
};

impl Schema {
    /// Every problem with a create payload; empty when it is acceptable.
    pub fn check_create(&self, payload: &Value) -> Vec<FieldError> {
        self.check(payload, false)
    }

    /// Same as `check_create` but absent fields are left alone.
    pub fn check_update(&self, payload: &Value) -> Vec<FieldError> {
        self.check(payload, true)
    }

    /// Checks a create payload and converts it into `T`.
    pub fn parse_create<T: DeserializeOwned>(&self, payload: Value) -> Result<T, AppError> {
        let errors = self.check_create(&payload);
        self.finish(payload, errors)
    }

    pub fn parse_update<T: DeserializeOwned>(&self, payload: Value) -> Result<T, AppError> {
        let errors = self.check_update(&payload);
        self.finish(payload, errors)
    }

    fn finish<T: DeserializeOwned>(&self, payload: Value, errors: Vec<FieldError>) -> Result<T, AppError> {
        if !errors.is_empty() {
            return Err(AppError::InvalidFields(errors));
        }
        serde_json::from_value(payload)
            .map_err(|e| AppError::Validation(format!("Invalid {} payload: {}", self.kind, e)))
    }

    fn check(&self, payload: &Value, partial: bool) -> Vec<FieldError> {
        let Some(object) = payload.as_object() else {
            return vec![FieldError::new("$", "expected a JSON object")];
        };

        self.fields
            .iter()
            .filter_map(|spec| check_field(object, spec, partial))
            .collect()
    }
}

fn check_field(object: &Map<String, Value>, spec: &FieldSpec, partial: bool) -> Option<FieldError> {
    match object.get(spec.name) {
        None if spec.required && !partial => Some(FieldError::new(spec.name, "missing")),
        None => None,
        Some(Value::Null) if spec.required => Some(FieldError::new(
            spec.name,
            if partial { "cannot be cleared" } else { "missing" },
        )),
        Some(Value::Null) if partial && !spec.nullable => Some(FieldError::new(spec.name, "cannot be cleared")),
        Some(Value::Null) => None,
        Some(value) => check_kind(spec, value).map(|problem| FieldError::new(spec.name, problem)),
    }
}

fn check_kind(spec: &FieldSpec, value: &Value) -> Option<String> {
    match spec.kind {
        FieldKind::Text => match value.as_str() {
            None => Some("expected a string".to_string()),
            Some(s) if spec.required && s.trim().is_empty() => Some("must not be empty".to_string()),
            Some(_) => None,
        },
        FieldKind::Number => (!value.is_number()).then(|| "expected a number".to_string()),
        FieldKind::Integer => value.as_i64().is_none().then(|| "expected an integer".to_string()),
        FieldKind::Date => match value.as_str() {
            Some(s) if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() => None,
            _ => Some("expected a date (YYYY-MM-DD)".to_string()),
        },
        FieldKind::OneOf(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => None,
            _ => Some(format!("expected one of: {}", allowed.join(", "))),
        },
        FieldKind::TextList => match value.as_array() {
            Some(items) if items.iter().all(Value::is_string) => None,
            _ => Some("expected a list of strings".to_string()),
        },
        FieldKind::IntegerList => match value.as_array() {
            Some(items) if items.iter().all(|v| v.as_i64().is_some()) => None,
            _ => Some("expected a list of integers".to_string()),
        },
    }
}
