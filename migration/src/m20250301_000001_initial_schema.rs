use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create employees table
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Name).string().not_null())
                    .col(
                        ColumnDef::new(Employees::Rfid)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::Mobile).string().unique_key())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create machines table
        manager
            .create_table(
                Table::create()
                    .table(Machines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Machines::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Machines::MachineNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Machines::Status)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
                    .col(
                        ColumnDef::new(Machines::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Machines::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create orders table
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Orders::OrderNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Orders::Product).string().not_null())
                    .col(ColumnDef::new(Orders::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Orders::CurrentStage)
                            .string()
                            .not_null()
                            .default("Cutting"),
                    )
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create order_steps table
        manager
            .create_table(
                Table::create()
                    .table(OrderSteps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderSteps::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderSteps::OrderId).integer().not_null())
                    .col(ColumnDef::new(OrderSteps::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_steps_order_id")
                            .from(OrderSteps::Table, OrderSteps::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create machine_allocations table
        manager
            .create_table(
                Table::create()
                    .table(MachineAllocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MachineAllocations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MachineAllocations::OrderId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MachineAllocations::MachineId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MachineAllocations::Step).string().not_null())
                    .col(
                        ColumnDef::new(MachineAllocations::Status)
                            .string()
                            .not_null()
                            .default("Assigned"),
                    )
                    .col(
                        ColumnDef::new(MachineAllocations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MachineAllocations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_machine_allocations_order_id")
                            .from(MachineAllocations::Table, MachineAllocations::OrderId)
                            .to(Orders::Table, Orders::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_machine_allocations_machine_id")
                            .from(MachineAllocations::Table, MachineAllocations::MachineId)
                            .to(Machines::Table, Machines::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create employee_tasks table
        manager
            .create_table(
                Table::create()
                    .table(EmployeeTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeTasks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTasks::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeTasks::MachineAllocationId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmployeeTasks::Target).integer().not_null())
                    .col(
                        ColumnDef::new(EmployeeTasks::Completed)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(EmployeeTasks::Duration).string().not_null())
                    .col(
                        ColumnDef::new(EmployeeTasks::Status)
                            .string()
                            .not_null()
                            .default("Assigned"),
                    )
                    .col(
                        ColumnDef::new(EmployeeTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(EmployeeTasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_tasks_employee_id")
                            .from(EmployeeTasks::Table, EmployeeTasks::EmployeeId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_tasks_machine_allocation_id")
                            .from(EmployeeTasks::Table, EmployeeTasks::MachineAllocationId)
                            .to(MachineAllocations::Table, MachineAllocations::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeTasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MachineAllocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderSteps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Machines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Name,
    Rfid,
    Mobile,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Machines {
    Table,
    Id,
    MachineNumber,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    OrderNumber,
    Product,
    Quantity,
    Status,
    CurrentStage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrderSteps {
    Table,
    Id,
    OrderId,
    Name,
}

#[derive(DeriveIden)]
enum MachineAllocations {
    Table,
    Id,
    OrderId,
    MachineId,
    Step,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmployeeTasks {
    Table,
    Id,
    EmployeeId,
    MachineAllocationId,
    Target,
    Completed,
    Duration,
    Status,
    CreatedAt,
    UpdatedAt,
}
