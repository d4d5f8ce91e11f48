use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create employee_task_histories table (append-only ledger)
        manager
            .create_table(
                Table::create()
                    .table(EmployeeTaskHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeTaskHistories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTaskHistories::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTaskHistories::OrderNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTaskHistories::StepName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTaskHistories::MachineNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTaskHistories::Target)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTaskHistories::ActionType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTaskHistories::WorkingDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create rfid_scans table (per-increment audit trail)
        manager
            .create_table(
                Table::create()
                    .table(RfidScans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RfidScans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RfidScans::EmployeeId).integer().not_null())
                    .col(ColumnDef::new(RfidScans::TaskId).integer().not_null())
                    .col(
                        ColumnDef::new(RfidScans::ScanTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create reg_scans table (registration kiosk buffer)
        manager
            .create_table(
                Table::create()
                    .table(RegScans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RegScans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RegScans::Rfid).string().not_null())
                    .col(
                        ColumnDef::new(RegScans::ScannedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RegScans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RfidScans::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(EmployeeTaskHistories::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum EmployeeTaskHistories {
    Table,
    Id,
    EmployeeId,
    OrderNumber,
    StepName,
    MachineNumber,
    Target,
    ActionType,
    WorkingDate,
}

#[derive(DeriveIden)]
enum RfidScans {
    Table,
    Id,
    EmployeeId,
    TaskId,
    ScanTime,
}

#[derive(DeriveIden)]
enum RegScans {
    Table,
    Id,
    Rfid,
    ScannedAt,
}
