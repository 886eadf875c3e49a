use serde::Serialize;

#[derive(Serialize)]
pub struct DeletedResponse {
    pub status: &'static str,
}

pub const DELETED: DeletedResponse = DeletedResponse { status: "deleted" };
