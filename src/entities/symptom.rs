use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "symptoms")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::disease_symptom::Entity")]
    DiseaseSymptom,
}

impl Related<super::disease_symptom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiseaseSymptom.def()
    }
}

impl Related<super::disease::Entity> for Entity {
    fn to() -> RelationDef {
        super::disease_symptom::Relation::Disease.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::disease_symptom::Relation::Symptom.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
