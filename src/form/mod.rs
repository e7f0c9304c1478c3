pub mod console;
pub mod controller;
pub mod presentation;

pub use console::ConsolePort;
pub use controller::{AdvisoryState, DeclarationController, FieldError, FormEvent};
pub use presentation::{AdvisoryChannel, Capabilities, Notice, PresentationPort, Severity};
