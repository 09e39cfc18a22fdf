//! Batch orchestration for payroll generation and reconciliation runs.
//!
//! [`PayrollEngine`] wires the calculation pipeline to the store traits.
//! Batch generation runs one independent pipeline per employee on a
//! bounded tokio worker pool: a slow or failing employee never blocks or
//! aborts its siblings, and every external read phase is bounded by the
//! configured timeout. The write phase for each employee is one atomic
//! store call, so a crash mid-batch can never leave a record without its
//! adjustment flags or vice versa.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::calculation::{
    aggregate_attendance, apply_adjustments, build_record, calculate_deductions,
    calculate_earnings, resolve_structure,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Adjustment, AttendanceRecord, Employee, InternalPayment, LeaveRequest, PayPeriod,
    PayrollRecord, SalaryStructure,
};
use crate::reconciliation::{DiscrepancyTracker, match_payments};
use crate::stores::{
    AdjustmentStore, AttendanceStore, EmployeeDirectory, LeaveStore, PayrollStore,
    SalaryStructureStore, SettlementFeed,
};

/// The store handles the engine works against.
#[derive(Clone)]
pub struct StoreSet {
    /// Employee identity and status.
    pub employees: Arc<dyn EmployeeDirectory>,
    /// Per-day attendance rows.
    pub attendance: Arc<dyn AttendanceStore>,
    /// Approved leave requests.
    pub leave: Arc<dyn LeaveStore>,
    /// Versioned salary structures.
    pub structures: Arc<dyn SalaryStructureStore>,
    /// One-off adjustments.
    pub adjustments: Arc<dyn AdjustmentStore>,
    /// Payroll record persistence.
    pub payroll: Arc<dyn PayrollStore>,
    /// External settlement rows.
    pub settlements: Arc<dyn SettlementFeed>,
}

impl StoreSet {
    /// Builds a store set from one value implementing every store trait,
    /// such as [`crate::stores::memory::InMemoryStore`].
    pub fn from_single<S>(store: Arc<S>) -> Self
    where
        S: EmployeeDirectory
            + AttendanceStore
            + LeaveStore
            + SalaryStructureStore
            + AdjustmentStore
            + PayrollStore
            + SettlementFeed
            + 'static,
    {
        Self {
            employees: store.clone(),
            attendance: store.clone(),
            leave: store.clone(),
            structures: store.clone(),
            adjustments: store.clone(),
            payroll: store.clone(),
            settlements: store,
        }
    }
}

/// One employee's failure within a batch.
#[derive(Debug)]
pub struct EmployeeFailure {
    /// The employee whose generation failed.
    pub employee_id: String,
    /// The failure.
    pub error: EngineError,
}

/// Aggregated result of a batch generation.
///
/// Per-employee failures are captured here instead of aborting the batch;
/// state-machine and validation errors on single-record operations still
/// propagate to the caller directly.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully created records, sorted by employee id.
    pub succeeded: Vec<PayrollRecord>,
    /// Captured failures, sorted by employee id.
    pub failed: Vec<EmployeeFailure>,
}

/// Everything read for one employee before calculation starts.
struct ReadPhase {
    employee: Employee,
    structures: Vec<SalaryStructure>,
    attendance: Vec<AttendanceRecord>,
    leave: Vec<LeaveRequest>,
    pending: Vec<Adjustment>,
}

/// The payroll engine: generation batches and reconciliation runs.
#[derive(Clone)]
pub struct PayrollEngine {
    stores: StoreSet,
    config: EngineConfig,
}

impl PayrollEngine {
    /// Creates an engine over the given stores and configuration.
    pub fn new(stores: StoreSet, config: EngineConfig) -> Self {
        Self { stores, config }
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates payroll for a batch of employees.
    ///
    /// Employees are processed independently on a worker pool bounded by
    /// `generation.max_concurrency`. One employee's failure (missing
    /// structure, invalid data, store timeout) is captured in the
    /// returned [`BatchOutcome`] and never prevents sibling records from
    /// being created.
    pub async fn generate_batch(&self, employee_ids: &[String], period: PayPeriod) -> BatchOutcome {
        info!(
            period = %period,
            employees = employee_ids.len(),
            max_concurrency = self.config.generation.max_concurrency,
            "starting payroll batch"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.generation.max_concurrency));
        let mut tasks = JoinSet::new();

        for employee_id in employee_ids {
            let engine = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let employee_id = employee_id.clone();
            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => engine.generate_for_employee(&employee_id, period).await,
                    Err(_) => Err(EngineError::CalculationError {
                        message: "worker pool semaphore closed".to_string(),
                    }),
                };
                (employee_id, result)
            });
        }

        let mut outcome = BatchOutcome::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(record))) => outcome.succeeded.push(record),
                Ok((employee_id, Err(error))) => {
                    warn!(employee_id, %error, "payroll generation failed");
                    outcome.failed.push(EmployeeFailure { employee_id, error });
                }
                Err(join_error) => {
                    warn!(%join_error, "payroll worker task failed");
                    outcome.failed.push(EmployeeFailure {
                        employee_id: String::new(),
                        error: EngineError::CalculationError {
                            message: format!("worker task failed: {join_error}"),
                        },
                    });
                }
            }
        }

        // Completion order depends on scheduling; sort for stable output.
        outcome.succeeded.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        outcome.failed.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

        info!(
            period = %period,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "payroll batch finished"
        );
        outcome
    }

    /// Generates payroll for every active employee of a company.
    ///
    /// A convenience over [`Self::generate_batch`]: the directory read is
    /// bounded by the configured timeout, then the roster runs on the
    /// worker pool.
    ///
    /// # Errors
    ///
    /// `StoreTimeout` if the directory read expires. Per-employee
    /// failures land in the returned [`BatchOutcome`] as usual.
    pub async fn generate_for_company(
        &self,
        company_id: &str,
        period: PayPeriod,
    ) -> EngineResult<BatchOutcome> {
        let directory = Arc::clone(&self.stores.employees);
        let company = company_id.to_string();
        let roster = self
            .bounded_read("active employees", move || {
                directory.active_employees(&company)
            })
            .await?;

        let employee_ids: Vec<String> = roster.into_iter().map(|e| e.id).collect();
        Ok(self.generate_batch(&employee_ids, period).await)
    }

    /// Generates and persists one employee's payroll record for a period.
    ///
    /// Runs the full pipeline: structure resolution, attendance
    /// aggregation, two-phase component calculation, adjustment
    /// application, record assembly, then one atomic write that inserts
    /// the draft record and flips the consumed adjustments' flags.
    ///
    /// # Errors
    ///
    /// Any stage's error propagates: `EmployeeNotFound`,
    /// `SalaryStructureNotFound`, `Validation`, `StoreTimeout`, or
    /// `RecordAlreadyExists` when a record for the employee and period
    /// was generated before. A failed attempt applies no adjustment.
    pub async fn generate_for_employee(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> EngineResult<PayrollRecord> {
        let read = self.read_inputs(employee_id, period).await?;
        debug!(
            employee_id,
            company_id = read.employee.company_id,
            attendance_rows = read.attendance.len(),
            leave_requests = read.leave.len(),
            pending_adjustments = read.pending.len(),
            "payroll inputs loaded"
        );

        let structure = resolve_structure(&read.structures, employee_id, period.start_date())?;
        structure.validate()?;

        let summary = aggregate_attendance(&read.attendance, &read.leave);
        let earnings = calculate_earnings(structure, &summary)?;
        let deductions = calculate_deductions(structure, earnings.gross_salary);
        let adjustments = apply_adjustments(
            earnings.gross_salary,
            deductions.total_deductions,
            &read.pending,
        )?;
        let record = build_record(
            employee_id,
            period,
            &summary,
            &earnings,
            &deductions,
            &adjustments,
        );

        self.stores
            .payroll
            .insert_with_adjustments(record.clone(), &adjustments.applied_ids)?;

        info!(
            employee_id,
            period = %period,
            net_salary = %record.net_salary,
            adjustments = adjustments.applied_ids.len(),
            "payroll record created"
        );
        Ok(record)
    }

    /// Reconciles internal payments against the settlement feed for one
    /// company and period.
    ///
    /// The feed read is bounded by the configured timeout; matching
    /// itself runs single-threaded for determinism.
    ///
    /// # Errors
    ///
    /// `StoreTimeout` on feed read expiry,
    /// `DuplicateSettlementReference` or `Validation` from the matcher.
    pub async fn reconcile_payments(
        &self,
        company_id: &str,
        period: PayPeriod,
        internal: &[InternalPayment],
    ) -> EngineResult<DiscrepancyTracker> {
        let feed = Arc::clone(&self.stores.settlements);
        let company = company_id.to_string();
        let rows = self
            .bounded_read("settlement feed", move || {
                feed.settlement_rows(&company, period)
            })
            .await?;

        debug!(
            company_id,
            period = %period,
            internal = internal.len(),
            external = rows.len(),
            "matching payments"
        );
        let matched = match_payments(internal, &rows, &self.config.reconciliation)?;
        Ok(DiscrepancyTracker::record(company_id, period, &matched))
    }

    /// Loads one employee's payroll inputs inside the read timeout.
    async fn read_inputs(&self, employee_id: &str, period: PayPeriod) -> EngineResult<ReadPhase> {
        let stores = self.stores.clone();
        let employee_id = employee_id.to_string();
        self.bounded_read("payroll inputs", move || {
            let start = period.start_date();
            let end = period.end_date();
            let employee = stores.employees.find_employee(&employee_id)?;
            let structures = stores.structures.structures_for(&employee_id)?;
            let attendance = stores
                .attendance
                .attendance_in_range(&employee_id, start, end)?;
            let leave = stores
                .leave
                .approved_leave_overlapping(&employee_id, start, end)?;
            let pending = stores.adjustments.pending_adjustments(&employee_id, period)?;
            Ok(ReadPhase {
                employee,
                structures,
                attendance,
                leave,
                pending,
            })
        })
        .await
    }

    /// Runs a blocking store read on the blocking pool, bounded by the
    /// configured timeout. Expiry is a hard failure for the unit; no
    /// retry is attempted.
    async fn bounded_read<T, F>(&self, operation: &str, read: F) -> EngineResult<T>
    where
        T: Send + 'static,
        F: FnOnce() -> EngineResult<T> + Send + 'static,
    {
        let timeout = self.config.generation.read_timeout();
        let handle = tokio::task::spawn_blocking(read);
        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(EngineError::CalculationError {
                message: format!("{operation} read task failed: {join_error}"),
            }),
            Err(_) => Err(EngineError::StoreTimeout {
                operation: operation.to_string(),
                timeout_secs: self.config.generation.read_timeout_secs,
            }),
        }
    }
}
