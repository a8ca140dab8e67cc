//! Live adapter for the `Notifier` port.
//!
//! Email delivery is out of scope for this crate, so the live side channel is
//! the operator's terminal: the welcome is printed exactly once and never
//! written anywhere else.

use std::io::Write;

use crate::ports::notifier::{NotifyError, Notifier, Welcome};

/// Prints welcome messages to standard output.
pub struct ConsoleNotifier;

/// Renders the text of a welcome message.
#[must_use]
pub fn render(welcome: &Welcome) -> String {
    format!(
        "Welcome aboard, {name}!\n\
         \x20 email:    {email}\n\
         \x20 login id: {login_id}\n\
         \x20 password: {password}\n\
         Change this password after the first sign-in.\n",
        name = welcome.full_name,
        email = welcome.email,
        login_id = welcome.login_id,
        password = welcome.password.expose(),
    )
}

impl Notifier for ConsoleNotifier {
    fn send_welcome(&self, welcome: &Welcome) -> Result<(), NotifyError> {
        let mut out = std::io::stdout().lock();
        out.write_all(render(welcome).as_bytes()).and_then(|()| out.flush()).map_err(|e| {
            NotifyError::DeliveryFailed { recipient: welcome.email.clone(), reason: e.to_string() }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::Secret;

    #[test]
    fn renders_login_id_and_password() {
        let welcome = Welcome {
            email: "ava@techcorp.example".into(),
            full_name: "Ava Lee".into(),
            login_id: "EMPTEAVLE20240001".parse().unwrap(),
            password: Secret::new("Xy7#abcdEFGH"),
        };
        let text = render(&welcome);
        assert!(text.starts_with("Welcome aboard, Ava Lee!"));
        assert!(text.contains("  login id: EMPTEAVLE20240001"));
        assert!(text.contains("  password: Xy7#abcdEFGH"));
    }
}
