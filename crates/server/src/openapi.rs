use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct RecordDoc { pub id: String, pub name: String, pub age: f64, pub class: String }

#[derive(Serialize, ToSchema)]
pub struct RecordPatchDoc {
    pub id: String,
    pub name: Option<String>,
    pub age: Option<f64>,
    pub class: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct RecordIdDoc { pub id: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    /// One entry per validation problem.
    pub details: Option<Vec<String>>,
}

#[derive(Serialize, ToSchema)]
pub struct UpdateOutputDoc {
    pub status: String,
    #[serde(rename = "updated entry")]
    pub updated_entry: RecordDoc,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteOutputDoc {
    pub status: String,
    #[serde(rename = "deleted id")]
    pub deleted_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct DataOutputDoc { pub data: RecordDoc }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::records::health,
        crate::routes::records::list_records,
        crate::routes::records::create_record,
        crate::routes::records::update_record,
        crate::routes::records::delete_record,
        crate::routes::records::get_record,
    ),
    components(
        schemas(
            RecordDoc,
            RecordPatchDoc,
            RecordIdDoc,
            ErrorDoc,
            UpdateOutputDoc,
            DeleteOutputDoc,
            DataOutputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "records")
    )
)]
pub struct ApiDoc;
