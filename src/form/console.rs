use super::presentation::{Capabilities, Notice, PresentationPort, Severity, MODAL_SEPARATOR};
use colored::*;
use std::io::Write;

/// Terminal surface for the declaration form.
///
/// Banners are printed as highlighted lines; without banner support every
/// advisory becomes a boxed notice instead.
pub struct ConsolePort<W: Write> {
    out: W,
    inline_banner: bool,
}

impl<W: Write> ConsolePort<W> {
    pub fn new(out: W, inline_banner: bool) -> Self {
        ConsolePort { out, inline_banner }
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{}", text) {
            log::warn!("Failed to write to console: {}", err);
        }
    }
}

impl<W: Write> PresentationPort for ConsolePort<W> {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            inline_banner: self.inline_banner,
        }
    }

    fn show_banner(&mut self, message: &str) {
        self.line(&format!("{} {}", "⚠".yellow(), message.yellow()));
    }

    fn clear_banner(&mut self) {
        // nothing stays on a terminal, log the transition instead
        log::debug!("Advisory cleared");
    }

    fn show_modal(&mut self, notice: &Notice) {
        let title = match notice.severity {
            Severity::Orange => notice.title.yellow().bold(),
        };
        self.line(&format!("[{}]", title));
        for message in notice.message.split(MODAL_SEPARATOR) {
            self.line(&format!("  {}", message));
        }
    }

    fn set_intro(&mut self, message: &str) {
        self.line(&message.dimmed().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_prints_each_message_on_its_own_line() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        {
            let mut port = ConsolePort::new(&mut buf, false);
            port.show_modal(&Notice {
                title: "Warning".to_string(),
                message: "first<br>second".to_string(),
                severity: Severity::Orange,
            });
        }
        let printed = String::from_utf8(buf).unwrap();
        assert_eq!(printed, "[Warning]\n  first\n  second\n");
    }

    #[test]
    fn banner_capability_follows_constructor() {
        assert!(ConsolePort::new(Vec::new(), true).capabilities().inline_banner);
        assert!(!ConsolePort::new(Vec::new(), false).capabilities().inline_banner);
    }
}
