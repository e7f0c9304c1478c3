pub mod aggregator;
pub mod amount;
pub mod caps;
pub mod declaration;
pub mod fiscal;
pub mod regime;
pub mod validation;

// Flat public surface for domain types and functions.
pub use aggregator::{compute_total, compute_warnings, recompute, Recomputed};
pub use amount::{round2, RawAmount};
pub use caps::{CapTable, CapWarning, Section};
pub use declaration::{
    DeclarationField, DeclarationInput, DeclarationState, FieldSpec, InvestmentDeclaration,
};
pub use fiscal::{monthly_exemption, FiscalYear};
pub use regime::Regime;
pub use validation::{validate_declaration, CapPolicy, DeclarationError, ValidatedDeclaration};
