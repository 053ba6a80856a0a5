//! Raw operational records and the grouped rows read from them.

pub mod event;
pub mod row;

pub use event::{FuelConsumptionEvent, MachineryRunningEvent};
pub use row::{FuelConsumptionRow, MachineryRunningRow};
