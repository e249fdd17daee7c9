//! Commands against the meter (billing) service.

mod associated_bills;
mod bill_reports;
mod meter_alerts;

use crate::shell::{Registry, RegistryError};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    associated_bills::register(registry)?;
    bill_reports::register(registry)?;
    meter_alerts::register(registry)
}
