//! Command handlers.
//!
//! Each handler wires one engine operation to its ports: load through a
//! repository, run the pure domain logic, persist, and log. Handlers own the
//! failure-degradation policy (what degrades, what fails closed); the domain
//! modules stay pure.

mod check_report_access;
mod complete_refresh_cycle;
mod decide_upgrade_credit;
mod finalize_workbook;
mod generate_report;
mod refine_report;
mod request_refresh;
mod update_workbook;
mod upgrade_report;
mod workbook_status;

pub use check_report_access::{
    AccessCheckError, CheckReportAccessCommand, CheckReportAccessHandler, ReportAccessGrant,
};
pub use complete_refresh_cycle::{
    CompleteRefreshCycleCommand, CompleteRefreshCycleHandler, CompleteRefreshCycleResult,
};
pub use decide_upgrade_credit::{
    DecideUpgradeCreditCommand, DecideUpgradeCreditHandler, ResolvedCredit,
};
pub use finalize_workbook::{
    FinalizeWorkbookCommand, FinalizeWorkbookHandler, FinalizeWorkbookResult,
};
pub use generate_report::{GenerateReportCommand, GenerateReportHandler, GenerateReportResult};
pub use refine_report::{RefineReportCommand, RefineReportHandler};
pub use request_refresh::{RequestRefreshCommand, RequestRefreshHandler, RequestRefreshResult};
pub use update_workbook::{UpdateWorkbookCommand, UpdateWorkbookHandler};
pub use upgrade_report::{UpgradeReportCommand, UpgradeReportHandler};
pub use workbook_status::{WorkbookStatusCommand, WorkbookStatusHandler};
