mod form;
mod lookup;
mod structures;

pub use form::{LookupTicket, SalaryStructureAssignment, StructureFilter};
pub use lookup::{RegimePreferenceLookup, StaticPreferences};
pub use structures::{AssignmentError, RegimeStructureMap};
