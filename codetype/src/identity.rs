use std::collections::VecDeque;

use quill::{AuthEvent, Identity, IdentityProvider};

/// Identity from the configured profile, signed in and out by hand
#[derive(Debug, Default)]
pub struct LocalIdentity {
    profile: Option<Identity>,
    signed_in: bool,
    pending: VecDeque<AuthEvent>,
}

impl LocalIdentity {
    /// Starts signed in when a profile is configured
    pub fn new(profile: Option<Identity>) -> Self {
        let mut identity = Self {
            signed_in: false,
            profile,
            pending: VecDeque::new(),
        };
        identity.sign_in();
        identity
    }

    pub const fn has_profile(&self) -> bool {
        self.profile.is_some()
    }

    fn sign_in(&mut self) {
        if let Some(profile) = &self.profile
            && !self.signed_in
        {
            self.signed_in = true;
            self.pending.push_back(AuthEvent::SignedIn(profile.clone()));
        }
    }

    fn sign_out(&mut self) {
        if self.signed_in {
            self.signed_in = false;
            self.pending.push_back(AuthEvent::SignedOut);
        }
    }

    /// Flip between signed in and anonymous. Without a profile nothing changes.
    pub fn toggle(&mut self) {
        if self.signed_in {
            self.sign_out();
        } else {
            self.sign_in();
        }
    }
}

impl IdentityProvider for LocalIdentity {
    fn current(&self) -> Option<&Identity> {
        self.profile.as_ref().filter(|_| self.signed_in)
    }

    fn poll_event(&mut self) -> Option<AuthEvent> {
        self.pending.pop_front()
    }
}
