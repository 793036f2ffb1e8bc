use sea_orm_migration::prelude::*;

use super::m20261019_000001_create_catalog::{Diseases, Plants, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Diagnoses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Diagnoses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Diagnoses::PlantId).uuid())
                    .col(ColumnDef::new(Diagnoses::DiseaseId).uuid().not_null())
                    .col(ColumnDef::new(Diagnoses::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Diagnoses::Confidence)
                            .double()
                            .not_null()
                            .check(Expr::col(Diagnoses::Confidence).between(0.0, 1.0)),
                    )
                    .col(
                        ColumnDef::new(Diagnoses::DiagnosedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Diagnoses::Notes).text())
                    .col(
                        ColumnDef::new(Diagnoses::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-diagnoses-plant_id")
                            .from(Diagnoses::Table, Diagnoses::PlantId)
                            .to(Plants::Table, Plants::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-diagnoses-disease_id")
                            .from(Diagnoses::Table, Diagnoses::DiseaseId)
                            .to(Diseases::Table, Diseases::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-diagnoses-user_id")
                            .from(Diagnoses::Table, Diagnoses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Images carry the back-reference to the diagnosis they produced.
        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Images::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Images::Url).string().not_null())
                    .col(ColumnDef::new(Images::UserId).uuid().not_null())
                    .col(ColumnDef::new(Images::PlantId).uuid())
                    .col(ColumnDef::new(Images::DiagnosisId).uuid())
                    .col(
                        ColumnDef::new(Images::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Images::Metadata).json())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-images-user_id")
                            .from(Images::Table, Images::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-images-plant_id")
                            .from(Images::Table, Images::PlantId)
                            .to(Plants::Table, Plants::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-images-diagnosis_id")
                            .from(Images::Table, Images::DiagnosisId)
                            .to(Diagnoses::Table, Diagnoses::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Diagnoses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Diagnoses {
    Table,
    Id,
    PlantId,
    DiseaseId,
    UserId,
    Confidence,
    DiagnosedAt,
    Notes,
    Status,
}

#[derive(DeriveIden)]
enum Images {
    Table,
    Id,
    Url,
    UserId,
    PlantId,
    DiagnosisId,
    UploadedAt,
    Metadata,
}
