use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Qualitative rating shared by disease severity and treatment effectiveness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "diseases")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub causes: String,
    pub severity: Rating,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::treatment::Entity")]
    Treatment,
    #[sea_orm(has_many = "super::disease_symptom::Entity")]
    DiseaseSymptom,
    #[sea_orm(has_many = "super::diagnosis::Entity")]
    Diagnosis,
}

impl Related<super::treatment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Treatment.def()
    }
}

impl Related<super::disease_symptom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiseaseSymptom.def()
    }
}

// Symptoms are reached through the disease_symptoms join table.
impl Related<super::symptom::Entity> for Entity {
    fn to() -> RelationDef {
        super::disease_symptom::Relation::Symptom.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::disease_symptom::Relation::Disease.def().rev())
    }
}

impl Related<super::diagnosis::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Diagnosis.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
