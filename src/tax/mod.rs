pub mod ng;
pub mod paye;

pub use ng::{Band, TaxYear};
pub use paye::{assess, progressive_tax, BandLine, TaxAssessment};
