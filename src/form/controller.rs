use super::presentation::{AdvisoryChannel, PresentationPort};
use crate::core::{recompute, CapTable, DeclarationField, DeclarationState, RawAmount, Recomputed};

pub const INTRO: &str =
    "Enter employee investment amounts for the selected fiscal year. Total is auto-calculated.";

/// Fields whose changes trigger a recompute.
const SUBSCRIPTIONS: &[DeclarationField] = &[
    DeclarationField::Section80C,
    DeclarationField::Section80D,
    DeclarationField::OtherExemptions,
];

/// Whether a cap advisory is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvisoryState {
    #[default]
    Clean,
    Warned,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Form loaded or explicitly refreshed
    Refresh,
    FieldChanged(DeclarationField, RawAmount),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{0} is read-only")]
    ReadOnly(&'static str),
}

/// Keeps the derived total and the cap advisory in step with the inputs of one
/// open declaration form.
pub struct DeclarationController<P: PresentationPort> {
    port: P,
    channel: AdvisoryChannel,
    caps: CapTable,
    state: DeclarationState,
    advisory: AdvisoryState,
}

impl<P: PresentationPort> DeclarationController<P> {
    pub fn new(port: P, caps: CapTable, state: DeclarationState) -> Self {
        let channel = AdvisoryChannel::for_capabilities(port.capabilities());
        log::debug!("Declaration form using {:?} advisories", channel);
        DeclarationController {
            port,
            channel,
            caps,
            state,
            advisory: AdvisoryState::Clean,
        }
    }

    /// Prepare the surface and recompute from whatever was loaded.
    pub fn load(&mut self) -> Recomputed {
        self.port.set_read_only(DeclarationField::TotalExemption);
        self.port.set_intro(INTRO);
        self.apply_recompute()
    }

    /// Apply a form event. Edits to the derived total are rejected and leave
    /// the form untouched.
    pub fn handle(&mut self, event: FormEvent) -> Result<Option<Recomputed>, FieldError> {
        match event {
            FormEvent::Refresh => Ok(Some(self.apply_recompute())),
            FormEvent::FieldChanged(field, value) => {
                if field.is_read_only() {
                    return Err(FieldError::ReadOnly(field.label()));
                }
                let Some(slot) = self.state.amount_mut(field) else {
                    return Err(FieldError::ReadOnly(field.label()));
                };
                *slot = value;
                if SUBSCRIPTIONS.contains(&field) {
                    Ok(Some(self.apply_recompute()))
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn apply_recompute(&mut self) -> Recomputed {
        let result = recompute(&self.state, &self.caps);
        self.state.set_total(result.total);

        if result.warnings.is_empty() {
            // clear unconditionally so no stale banner can survive
            self.channel.clear(&mut self.port);
            self.advisory = AdvisoryState::Clean;
        } else {
            self.channel.show(&mut self.port, &result.warnings);
            self.advisory = AdvisoryState::Warned;
        }
        result
    }

    pub fn state(&self) -> &DeclarationState {
        &self.state
    }

    pub fn advisory(&self) -> AdvisoryState {
        self.advisory
    }
}
