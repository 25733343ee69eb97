//! Fixed-schema row building
//!
//! Pure mappings from a resolved aggregate to the two export row
//! shapes. Both start from a fully-defaulted row and overwrite only the
//! derivable columns, so the output schema never varies in column set
//! or order.

pub mod birth;
pub mod death;

pub use birth::{BirthRow, BIRTH_COLUMNS};
pub use death::{DeathRow, DEATH_COLUMNS};
