use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Scan processing walks an employee's tasks oldest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_tasks_employee_id_created_at")
                    .table(EmployeeTasks::Table)
                    .col(EmployeeTasks::EmployeeId)
                    .col(EmployeeTasks::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_employee_tasks_machine_allocation_id")
                    .table(EmployeeTasks::Table)
                    .col(EmployeeTasks::MachineAllocationId)
                    .to_owned(),
            )
            .await?;

        // Liveness checks filter allocations by machine/status and (order, step)
        manager
            .create_index(
                Index::create()
                    .name("idx_machine_allocations_machine_id_status")
                    .table(MachineAllocations::Table)
                    .col(MachineAllocations::MachineId)
                    .col(MachineAllocations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_machine_allocations_order_id_step")
                    .table(MachineAllocations::Table)
                    .col(MachineAllocations::OrderId)
                    .col(MachineAllocations::Step)
                    .to_owned(),
            )
            .await?;

        // Ledger queries are per employee, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_task_histories_employee_id_working_date")
                    .table(EmployeeTaskHistories::Table)
                    .col(EmployeeTaskHistories::EmployeeId)
                    .col(EmployeeTaskHistories::WorkingDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reg_scans_scanned_at")
                    .table(RegScans::Table)
                    .col(RegScans::ScannedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reg_scans_scanned_at")
                    .table(RegScans::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_employee_task_histories_employee_id_working_date")
                    .table(EmployeeTaskHistories::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_machine_allocations_order_id_step")
                    .table(MachineAllocations::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_machine_allocations_machine_id_status")
                    .table(MachineAllocations::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_employee_tasks_machine_allocation_id")
                    .table(EmployeeTasks::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_employee_tasks_employee_id_created_at")
                    .table(EmployeeTasks::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum EmployeeTasks {
    Table,
    EmployeeId,
    MachineAllocationId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MachineAllocations {
    Table,
    MachineId,
    OrderId,
    Step,
    Status,
}

#[derive(DeriveIden)]
enum EmployeeTaskHistories {
    Table,
    EmployeeId,
    WorkingDate,
}

#[derive(DeriveIden)]
enum RegScans {
    Table,
    ScannedAt,
}
