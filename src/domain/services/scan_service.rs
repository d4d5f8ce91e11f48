// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scan::ScanOutcome;
use crate::domain::repositories::employee_repository::EmployeeRepository;
use crate::domain::repositories::task_repository::{ScanApplication, TaskRepository};
use crate::domain::services::CoreError;
use std::sync::Arc;
use tracing::{debug, info};

/// 扫描服务
///
/// RFID工牌扫描事件的处理入口，核心状态机的编排者。
/// 处理顺序是确定性的：
/// 1. 按RFID解析员工，未知标签返回NotFound且无任何副作用；
/// 2. 按创建时间升序取该员工的任务（最早指派的优先）；
/// 3. 选择第一个有剩余容量的任务，没有则报告"无剩余工作"，
///    无任何副作用；
/// 4. 该任务completed加1，重算状态；
/// 5. 同一状态写到所属分配；
/// 6. 任务达标时追加Complete历史并对机器做对账（可能释放）；
/// 7. 无条件写入RFID扫描审计记录。
///
/// 第3-7步由任务仓库在单个事务内落账，两次并发扫描不可能
/// 把同一个任务递增到目标之上。
pub struct ScanService {
    employees: Arc<dyn EmployeeRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl ScanService {
    /// 创建新的扫描服务实例
    pub fn new(employees: Arc<dyn EmployeeRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { employees, tasks }
    }

    /// 处理一次工牌扫描
    ///
    /// # 参数
    ///
    /// * `rfid` - 读卡器上报的RFID标签
    ///
    /// # 返回值
    ///
    /// * `Ok(ScanOutcome)` - 扫描已计入，或该员工没有剩余工作
    /// * `Err(CoreError)` - 标签缺失、员工不存在或存储故障
    pub async fn process(&self, rfid: &str) -> Result<ScanOutcome, CoreError> {
        let rfid = rfid.trim();
        if rfid.is_empty() {
            return Err(CoreError::Validation("rfid tag is required".to_string()));
        }

        let employee = self
            .employees
            .find_by_rfid(rfid)
            .await?
            .ok_or_else(|| CoreError::NotFound("employee".to_string()))?;

        debug!("Scan from {} resolved to employee {}", rfid, employee.id);

        match self.tasks.apply_scan(employee.id).await? {
            ScanApplication::NoRemainingCapacity => {
                debug!("No remaining work for employee {}", employee.id);
                Ok(ScanOutcome::NoRemainingWork {
                    employee_name: employee.name,
                })
            }
            ScanApplication::Applied {
                task,
                order_id,
                step,
            } => {
                info!(
                    "Scan recorded for employee {}: task {} now {}/{} ({})",
                    employee.id, task.id, task.completed, task.target, task.status
                );
                Ok(ScanOutcome::Recorded {
                    employee_name: employee.name,
                    order_id,
                    step,
                    completed: task.completed,
                    target: task.target,
                    status: task.status,
                })
            }
        }
    }
}
