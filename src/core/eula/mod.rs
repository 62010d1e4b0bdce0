pub mod gate;
pub mod record;

pub use gate::{LicenseGate, EULA_URL};
pub use record::LicenseRecord;
