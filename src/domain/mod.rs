//! Domain layer: pure business logic, no I/O.

pub mod access;
pub mod billing;
pub mod foundation;
pub mod pillar;
pub mod report;
pub mod workbook;
