use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users Table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Plants Table
        manager
            .create_table(
                Table::create()
                    .table(Plants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Plants::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Plants::Name).string().not_null())
                    .col(ColumnDef::new(Plants::ScientificName).string().not_null())
                    .col(ColumnDef::new(Plants::Description).text().not_null())
                    .col(ColumnDef::new(Plants::CareInstructions).text().not_null())
                    .col(ColumnDef::new(Plants::ImageUrl).string())
                    .to_owned(),
            )
            .await?;

        // Diseases Table
        manager
            .create_table(
                Table::create()
                    .table(Diseases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Diseases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Diseases::Name).string().not_null())
                    .col(ColumnDef::new(Diseases::Description).text().not_null())
                    .col(ColumnDef::new(Diseases::Causes).text().not_null())
                    .col(ColumnDef::new(Diseases::Severity).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;

        // Symptoms Table
        manager
            .create_table(
                Table::create()
                    .table(Symptoms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Symptoms::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Symptoms::Name).string().not_null())
                    .col(ColumnDef::new(Symptoms::Description).text().not_null())
                    .to_owned(),
            )
            .await?;

        // Disease <-> Symptom join
        manager
            .create_table(
                Table::create()
                    .table(DiseaseSymptoms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DiseaseSymptoms::DiseaseId).uuid().not_null())
                    .col(ColumnDef::new(DiseaseSymptoms::SymptomId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(DiseaseSymptoms::DiseaseId)
                            .col(DiseaseSymptoms::SymptomId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-disease_symptoms-disease_id")
                            .from(DiseaseSymptoms::Table, DiseaseSymptoms::DiseaseId)
                            .to(Diseases::Table, Diseases::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-disease_symptoms-symptom_id")
                            .from(DiseaseSymptoms::Table, DiseaseSymptoms::SymptomId)
                            .to(Symptoms::Table, Symptoms::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Treatments Table
        manager
            .create_table(
                Table::create()
                    .table(Treatments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Treatments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Treatments::DiseaseId).uuid().not_null())
                    .col(ColumnDef::new(Treatments::Name).string().not_null())
                    .col(ColumnDef::new(Treatments::Description).text().not_null())
                    .col(ColumnDef::new(Treatments::Instructions).text().not_null())
                    .col(ColumnDef::new(Treatments::Duration).string())
                    .col(
                        ColumnDef::new(Treatments::Effectiveness)
                            .string_len(16)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-treatments-disease_id")
                            .from(Treatments::Table, Treatments::DiseaseId)
                            .to(Diseases::Table, Diseases::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-treatments-disease_id")
                    .table(Treatments::Table)
                    .col(Treatments::DiseaseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Treatments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DiseaseSymptoms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Symptoms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Diseases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Users {
    Table,
    Id,
    Username,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(super) enum Plants {
    Table,
    Id,
    Name,
    ScientificName,
    Description,
    CareInstructions,
    ImageUrl,
}

#[derive(DeriveIden)]
pub(super) enum Diseases {
    Table,
    Id,
    Name,
    Description,
    Causes,
    Severity,
}

#[derive(DeriveIden)]
enum Symptoms {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum DiseaseSymptoms {
    Table,
    DiseaseId,
    SymptomId,
}

#[derive(DeriveIden)]
enum Treatments {
    Table,
    Id,
    DiseaseId,
    Name,
    Description,
    Instructions,
    Duration,
    Effectiveness,
}
