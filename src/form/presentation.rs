use crate::core::{CapWarning, DeclarationField};

/// Indicator colour attached to a blocking notice. Cap advisories are orange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Orange,
}

/// A blocking notice the user has to dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

/// What a presentation surface can display, queried once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub inline_banner: bool,
}

/// The surface a declaration form is drawn on.
pub trait PresentationPort {
    fn capabilities(&self) -> Capabilities;

    fn show_banner(&mut self, message: &str);

    fn clear_banner(&mut self);

    fn show_modal(&mut self, notice: &Notice);

    /// Help text shown above the form.
    fn set_intro(&mut self, _message: &str) {}

    /// Lock a field against direct edits.
    fn set_read_only(&mut self, _field: DeclarationField) {}
}

pub const BANNER_SEPARATOR: &str = " • ";
pub const MODAL_SEPARATOR: &str = "<br>";

/// How cap advisories reach the user on a given surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryChannel {
    /// Inline banner that stays until cleared
    Banner,
    /// Blocking notice for surfaces without a banner area
    Modal,
}

impl AdvisoryChannel {
    pub fn for_capabilities(capabilities: Capabilities) -> Self {
        if capabilities.inline_banner {
            AdvisoryChannel::Banner
        } else {
            AdvisoryChannel::Modal
        }
    }

    pub fn show<P: PresentationPort + ?Sized>(&self, port: &mut P, warnings: &[CapWarning]) {
        match self {
            AdvisoryChannel::Banner => port.show_banner(&join(warnings, BANNER_SEPARATOR)),
            AdvisoryChannel::Modal => port.show_modal(&Notice {
                title: "Warning".to_string(),
                message: join(warnings, MODAL_SEPARATOR),
                severity: Severity::Orange,
            }),
        }
    }

    /// A dismissed modal leaves nothing on screen, only banners need clearing.
    pub fn clear<P: PresentationPort + ?Sized>(&self, port: &mut P) {
        if let AdvisoryChannel::Banner = self {
            port.clear_banner();
        }
    }
}

fn join(warnings: &[CapWarning], separator: &str) -> String {
    warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}
