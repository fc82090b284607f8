//! Credit ledger schema.
//!
//! Creates the reference tables, the append-only `credit_transactions`
//! ledger, the business event tables that feed it and the link tables that
//! tie each ledger row back to its event.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // PART 1: ORGANIZATIONS & REFERENCE TABLES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(uuid_pk(Organizations::Id))
                    .col(ColumnDef::new(Organizations::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Organizations::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(Organizations::CreatedAt))
                    .col(timestamp(Organizations::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        create_reference_table(manager, ModelYears::Table, ModelYears::Id, ModelYears::Name)
            .await?;
        create_reference_table(
            manager,
            CreditClasses::Table,
            CreditClasses::Id,
            CreditClasses::CreditClass,
        )
        .await?;
        create_reference_table(
            manager,
            WeightClasses::Table,
            WeightClasses::Id,
            WeightClasses::WeightClassCode,
        )
        .await?;
        create_reference_table(
            manager,
            CreditTransactionTypes::Table,
            CreditTransactionTypes::Id,
            CreditTransactionTypes::TransactionType,
        )
        .await?;

        // ============================================================
        // PART 2: LEDGER
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(CreditTransactions::Table)
                    .if_not_exists()
                    .col(uuid_pk(CreditTransactions::Id))
                    .col(ColumnDef::new(CreditTransactions::CreditToId).uuid().null())
                    .col(ColumnDef::new(CreditTransactions::DebitFromId).uuid().null())
                    .col(reference_id(CreditTransactions::CreditClassId))
                    .col(reference_id(CreditTransactions::WeightClassId))
                    .col(reference_id(CreditTransactions::ModelYearId))
                    .col(
                        ColumnDef::new(CreditTransactions::NumberOfCredits)
                            .big_integer()
                            .not_null(),
                    )
                    .col(credits(CreditTransactions::CreditValue))
                    .col(credits(CreditTransactions::TotalValue))
                    .col(reference_id(CreditTransactions::TransactionTypeId))
                    .col(timestamp(CreditTransactions::TransactionTimestamp))
                    .col(audit_user(CreditTransactions::CreateUser))
                    .col(audit_user(CreditTransactions::UpdateUser))
                    .col(timestamp(CreditTransactions::CreatedAt))
                    .col(timestamp(CreditTransactions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_transactions_credit_to")
                            .from(CreditTransactions::Table, CreditTransactions::CreditToId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_transactions_debit_from")
                            .from(CreditTransactions::Table, CreditTransactions::DebitFromId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_transactions_credit_class")
                            .from(CreditTransactions::Table, CreditTransactions::CreditClassId)
                            .to(CreditClasses::Table, CreditClasses::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_transactions_weight_class")
                            .from(CreditTransactions::Table, CreditTransactions::WeightClassId)
                            .to(WeightClasses::Table, WeightClasses::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_transactions_model_year")
                            .from(CreditTransactions::Table, CreditTransactions::ModelYearId)
                            .to(ModelYears::Table, ModelYears::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_transactions_type")
                            .from(
                                CreditTransactions::Table,
                                CreditTransactions::TransactionTypeId,
                            )
                            .to(CreditTransactionTypes::Table, CreditTransactionTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Balance aggregation filters on either side of the movement
        manager
            .create_index(
                Index::create()
                    .name("idx_credit_transactions_credit_to")
                    .table(CreditTransactions::Table)
                    .col(CreditTransactions::CreditToId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_credit_transactions_debit_from")
                    .table(CreditTransactions::Table)
                    .col(CreditTransactions::DebitFromId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrganizationDeficits::Table)
                    .if_not_exists()
                    .col(uuid_pk(OrganizationDeficits::Id))
                    .col(
                        ColumnDef::new(OrganizationDeficits::OrganizationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(reference_id(OrganizationDeficits::CreditClassId))
                    .col(reference_id(OrganizationDeficits::ModelYearId))
                    .col(credits(OrganizationDeficits::CreditValue))
                    .col(audit_user(OrganizationDeficits::CreateUser))
                    .col(audit_user(OrganizationDeficits::UpdateUser))
                    .col(timestamp(OrganizationDeficits::CreatedAt))
                    .col(timestamp(OrganizationDeficits::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_deficits_organization")
                            .from(
                                OrganizationDeficits::Table,
                                OrganizationDeficits::OrganizationId,
                            )
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_deficits_model_year")
                            .from(OrganizationDeficits::Table, OrganizationDeficits::ModelYearId)
                            .to(ModelYears::Table, ModelYears::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 3: BUSINESS EVENTS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(ModelYearReports::Table)
                    .if_not_exists()
                    .col(uuid_pk(ModelYearReports::Id))
                    .col(ColumnDef::new(ModelYearReports::OrganizationId).uuid().not_null())
                    .col(reference_id(ModelYearReports::ModelYearId))
                    .col(
                        ColumnDef::new(ModelYearReports::CreditReductionSelection)
                            .string_len(3)
                            .null(),
                    )
                    .col(status(ModelYearReports::ValidationStatus))
                    .col(audit_user(ModelYearReports::CreateUser))
                    .col(audit_user(ModelYearReports::UpdateUser))
                    .col(timestamp(ModelYearReports::CreatedAt))
                    .col(timestamp(ModelYearReports::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_model_year_reports_organization")
                            .from(ModelYearReports::Table, ModelYearReports::OrganizationId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_model_year_reports_model_year")
                            .from(ModelYearReports::Table, ModelYearReports::ModelYearId)
                            .to(ModelYears::Table, ModelYears::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(uuid_pk(Vehicles::Id))
                    .col(ColumnDef::new(Vehicles::OrganizationId).uuid().not_null())
                    .col(ColumnDef::new(Vehicles::Make).string_len(250).not_null())
                    .col(ColumnDef::new(Vehicles::ModelName).string_len(250).not_null())
                    .col(reference_id(Vehicles::ModelYearId))
                    .col(ColumnDef::new(Vehicles::VehicleZevType).string_len(8).not_null())
                    .col(ColumnDef::new(Vehicles::Range).integer().not_null())
                    .col(timestamp(Vehicles::CreatedAt))
                    .col(timestamp(Vehicles::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_organization")
                            .from(Vehicles::Table, Vehicles::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_model_year")
                            .from(Vehicles::Table, Vehicles::ModelYearId)
                            .to(ModelYears::Table, ModelYears::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SalesSubmissions::Table)
                    .if_not_exists()
                    .col(uuid_pk(SalesSubmissions::Id))
                    .col(ColumnDef::new(SalesSubmissions::OrganizationId).uuid().not_null())
                    .col(
                        ColumnDef::new(SalesSubmissions::PartOfModelYearReport)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(audit_user(SalesSubmissions::CreateUser))
                    .col(audit_user(SalesSubmissions::UpdateUser))
                    .col(timestamp(SalesSubmissions::CreatedAt))
                    .col(timestamp(SalesSubmissions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_submissions_organization")
                            .from(SalesSubmissions::Table, SalesSubmissions::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RecordsOfSale::Table)
                    .if_not_exists()
                    .col(uuid_pk(RecordsOfSale::Id))
                    .col(ColumnDef::new(RecordsOfSale::SubmissionId).uuid().not_null())
                    .col(ColumnDef::new(RecordsOfSale::VehicleId).uuid().not_null())
                    .col(ColumnDef::new(RecordsOfSale::Vin).string_len(17).not_null())
                    .col(status(RecordsOfSale::ValidationStatus))
                    .col(timestamp(RecordsOfSale::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_records_of_sale_submission")
                            .from(RecordsOfSale::Table, RecordsOfSale::SubmissionId)
                            .to(SalesSubmissions::Table, SalesSubmissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_records_of_sale_vehicle")
                            .from(RecordsOfSale::Table, RecordsOfSale::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CreditTransfers::Table)
                    .if_not_exists()
                    .col(uuid_pk(CreditTransfers::Id))
                    .col(ColumnDef::new(CreditTransfers::DebitFromId).uuid().not_null())
                    .col(ColumnDef::new(CreditTransfers::CreditToId).uuid().not_null())
                    .col(status(CreditTransfers::Status))
                    .col(audit_user(CreditTransfers::CreateUser))
                    .col(audit_user(CreditTransfers::UpdateUser))
                    .col(timestamp(CreditTransfers::CreatedAt))
                    .col(timestamp(CreditTransfers::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_transfers_debit_from")
                            .from(CreditTransfers::Table, CreditTransfers::DebitFromId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_transfers_credit_to")
                            .from(CreditTransfers::Table, CreditTransfers::CreditToId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CreditTransferContent::Table)
                    .if_not_exists()
                    .col(uuid_pk(CreditTransferContent::Id))
                    .col(
                        ColumnDef::new(CreditTransferContent::CreditTransferId)
                            .uuid()
                            .not_null(),
                    )
                    .col(reference_id(CreditTransferContent::ModelYearId))
                    .col(reference_id(CreditTransferContent::CreditClassId))
                    .col(reference_id(CreditTransferContent::WeightClassId))
                    .col(credits(CreditTransferContent::CreditValue))
                    .col(credits(CreditTransferContent::DollarValue))
                    .col(timestamp(CreditTransferContent::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_transfer_content_transfer")
                            .from(
                                CreditTransferContent::Table,
                                CreditTransferContent::CreditTransferId,
                            )
                            .to(CreditTransfers::Table, CreditTransfers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CreditAgreements::Table)
                    .if_not_exists()
                    .col(uuid_pk(CreditAgreements::Id))
                    .col(ColumnDef::new(CreditAgreements::OrganizationId).uuid().not_null())
                    .col(
                        ColumnDef::new(CreditAgreements::TransactionType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CreditAgreements::EffectiveDate).date().null())
                    .col(timestamp(CreditAgreements::CreatedAt))
                    .col(timestamp(CreditAgreements::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_credit_agreements_organization")
                            .from(CreditAgreements::Table, CreditAgreements::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 4: LINK TABLES
        // ============================================================
        create_link_table(
            manager,
            LinkTable::SalesSubmissionCreditTransactions,
            LinkTable::SalesSubmissionId,
            SalesSubmissions::Table,
            SalesSubmissions::Id,
        )
        .await?;
        create_link_table(
            manager,
            LinkTable::CreditTransferCreditTransactions,
            LinkTable::CreditTransferId,
            CreditTransfers::Table,
            CreditTransfers::Id,
        )
        .await?;
        create_link_table(
            manager,
            LinkTable::CreditAgreementCreditTransactions,
            LinkTable::CreditAgreementId,
            CreditAgreements::Table,
            CreditAgreements::Id,
        )
        .await?;
        create_link_table(
            manager,
            LinkTable::ModelYearReportCreditTransactions,
            LinkTable::ModelYearReportId,
            ModelYearReports::Table,
            ModelYearReports::Id,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let tables: [DynIden; 18] = [
            LinkTable::ModelYearReportCreditTransactions.into_iden(),
            LinkTable::CreditAgreementCreditTransactions.into_iden(),
            LinkTable::CreditTransferCreditTransactions.into_iden(),
            LinkTable::SalesSubmissionCreditTransactions.into_iden(),
            CreditAgreements::Table.into_iden(),
            CreditTransferContent::Table.into_iden(),
            CreditTransfers::Table.into_iden(),
            RecordsOfSale::Table.into_iden(),
            SalesSubmissions::Table.into_iden(),
            Vehicles::Table.into_iden(),
            ModelYearReports::Table.into_iden(),
            OrganizationDeficits::Table.into_iden(),
            CreditTransactions::Table.into_iden(),
            CreditTransactionTypes::Table.into_iden(),
            WeightClasses::Table.into_iden(),
            CreditClasses::Table.into_iden(),
            ModelYears::Table.into_iden(),
            Organizations::Table.into_iden(),
        ];

        for table in tables {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

// ============================================================
// COLUMN HELPERS
// ============================================================

fn uuid_pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().primary_key().to_owned()
}

fn reference_id<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).integer().not_null().to_owned()
}

/// Credit quantities. Precision stays within what SQLite can round-trip.
fn credits<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).decimal_len(16, 2).not_null().to_owned()
}

fn timestamp<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

fn audit_user<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string_len(130).not_null().to_owned()
}

fn status<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string_len(32).not_null().to_owned()
}

async fn create_reference_table<T, I, N>(
    manager: &SchemaManager<'_>,
    table: T,
    id: I,
    name: N,
) -> Result<(), DbErr>
where
    T: IntoIden + 'static,
    I: IntoIden,
    N: IntoIden,
{
    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(ColumnDef::new(id).integer().not_null().primary_key())
                .col(ColumnDef::new(name).string_len(100).not_null().unique_key())
                .to_owned(),
        )
        .await
}

async fn create_link_table<P, C>(
    manager: &SchemaManager<'_>,
    table: LinkTable,
    event_column: LinkTable,
    parent: P,
    parent_id: C,
) -> Result<(), DbErr>
where
    P: IntoIden + 'static,
    C: IntoIden + 'static,
{
    let name = table.to_string();
    let fk_event = format!("fk_{name}_event");
    let fk_transaction = format!("fk_{name}_credit_transaction");

    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(uuid_pk(LinkTable::Id))
                .col(ColumnDef::new(event_column).uuid().not_null())
                .col(
                    ColumnDef::new(LinkTable::CreditTransactionId)
                        .uuid()
                        .not_null()
                        .unique_key(),
                )
                .col(audit_user(LinkTable::CreateUser))
                .col(audit_user(LinkTable::UpdateUser))
                .col(timestamp(LinkTable::CreatedAt))
                .foreign_key(
                    ForeignKey::create()
                        .name(fk_event)
                        .from(table, event_column)
                        .to(parent, parent_id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name(fk_transaction)
                        .from(table, LinkTable::CreditTransactionId)
                        .to(CreditTransactions::Table, CreditTransactions::Id),
                )
                .to_owned(),
        )
        .await
}

// ============================================================
// IDENTIFIERS
// ============================================================

#[derive(DeriveIden)]
enum Organizations {
    Table,
    Id,
    Name,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ModelYears {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum CreditClasses {
    Table,
    Id,
    CreditClass,
}

#[derive(DeriveIden)]
enum WeightClasses {
    Table,
    Id,
    WeightClassCode,
}

#[derive(DeriveIden)]
enum CreditTransactionTypes {
    Table,
    Id,
    TransactionType,
}

#[derive(DeriveIden)]
enum CreditTransactions {
    Table,
    Id,
    CreditToId,
    DebitFromId,
    CreditClassId,
    WeightClassId,
    ModelYearId,
    NumberOfCredits,
    CreditValue,
    TotalValue,
    TransactionTypeId,
    TransactionTimestamp,
    CreateUser,
    UpdateUser,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrganizationDeficits {
    Table,
    Id,
    OrganizationId,
    CreditClassId,
    ModelYearId,
    CreditValue,
    CreateUser,
    UpdateUser,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ModelYearReports {
    Table,
    Id,
    OrganizationId,
    ModelYearId,
    CreditReductionSelection,
    ValidationStatus,
    CreateUser,
    UpdateUser,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Vehicles {
    Table,
    Id,
    OrganizationId,
    Make,
    ModelName,
    ModelYearId,
    VehicleZevType,
    Range,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SalesSubmissions {
    Table,
    Id,
    OrganizationId,
    PartOfModelYearReport,
    CreateUser,
    UpdateUser,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RecordsOfSale {
    Table,
    Id,
    SubmissionId,
    VehicleId,
    Vin,
    ValidationStatus,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CreditTransfers {
    Table,
    Id,
    DebitFromId,
    CreditToId,
    Status,
    CreateUser,
    UpdateUser,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CreditTransferContent {
    Table,
    Id,
    CreditTransferId,
    ModelYearId,
    CreditClassId,
    WeightClassId,
    CreditValue,
    DollarValue,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CreditAgreements {
    Table,
    Id,
    OrganizationId,
    TransactionType,
    EffectiveDate,
    CreatedAt,
    UpdatedAt,
}

/// Tables and columns shared by the four link tables.
#[derive(DeriveIden, Clone, Copy)]
enum LinkTable {
    SalesSubmissionCreditTransactions,
    CreditTransferCreditTransactions,
    CreditAgreementCreditTransactions,
    ModelYearReportCreditTransactions,
    Id,
    SalesSubmissionId,
    CreditTransferId,
    CreditAgreementId,
    ModelYearReportId,
    CreditTransactionId,
    CreateUser,
    UpdateUser,
    CreatedAt,
}
