use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Coarse facts about an uploaded file, stored as a JSON column.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, FromJsonQueryResult)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "images")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub url: String,
    pub user_id: Uuid,
    pub plant_id: Option<Uuid>,
    /// Set once a diagnosis has been produced from this image.
    pub diagnosis_id: Option<Uuid>,
    pub uploaded_at: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<ImageMetadata>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::plant::Entity",
        from = "Column::PlantId",
        to = "super::plant::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Plant,
    #[sea_orm(
        belongs_to = "super::diagnosis::Entity",
        from = "Column::DiagnosisId",
        to = "super::diagnosis::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Diagnosis,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plant.def()
    }
}

impl Related<super::diagnosis::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Diagnosis.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
