//! Derived, read-only queries over a state snapshot
//!
//! Every operation takes the snapshot by reference and is total: decode
//! failures and lookup misses come back as `false`/`None`, never as errors.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::state::StateStore;
use crate::token::{decode_claims, TokenClaims};

/// Env var read by [`SessionConfig::from_env`]
pub const LEEWAY_ENV: &str = "SESSION_VIEW_LEEWAY_SECS";

/// Tunables for expiry evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds a token is still accepted after its `exp` has passed
    pub leeway_secs: u64,
}

impl SessionConfig {
    pub fn with_leeway(leeway_secs: u64) -> Self {
        Self { leeway_secs }
    }

    /// Load from the environment, falling back to defaults
    pub fn from_env() -> Self {
        match std::env::var(LEEWAY_ENV) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(leeway_secs) => Self { leeway_secs },
                Err(e) => {
                    warn!("Ignoring {}={:?}: {}", LEEWAY_ENV, raw, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

/// Outcome of evaluating the held credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionStatus {
    /// No token held
    Absent,
    /// Token present but no usable `exp` could be decoded
    Malformed,
    /// `exp` has passed
    Expired { exp: i64 },
    /// `exp` has not passed yet
    Valid { exp: i64 },
}

impl SessionStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionStatus::Valid { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Absent => "absent",
            SessionStatus::Malformed => "malformed",
            SessionStatus::Expired { .. } => "expired",
            SessionStatus::Valid { .. } => "valid",
        }
    }
}

/// Read-model over entity lists and the session token
#[derive(Debug, Clone, Default)]
pub struct SessionView<C: Clock = SystemClock> {
    clock: C,
    config: SessionConfig,
}

impl SessionView<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> SessionView<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            config: SessionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Entity names in list order, duplicates included
    pub fn entity_names<'s, S: StateStore + ?Sized>(&self, state: &'s S) -> Vec<&'s str> {
        state.entities().iter().map(|e| e.name.as_str()).collect()
    }

    /// Color of the first entity whose name matches exactly
    pub fn color_of<'s, S: StateStore + ?Sized>(
        &self,
        state: &'s S,
        name: &str,
    ) -> Option<&'s str> {
        state
            .entities()
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.color.as_str())
    }

    pub fn entity_count<S: StateStore + ?Sized>(&self, state: &S) -> usize {
        state.entities().len()
    }

    /// The raw token exactly as held, possibly empty
    pub fn current_token<'s, S: StateStore + ?Sized>(&self, state: &'s S) -> &'s str {
        state.token()
    }

    /// Decoded claims of the held token, if any
    pub fn claims<S: StateStore + ?Sized>(&self, state: &S) -> Option<TokenClaims> {
        let token = state.token();
        if token.is_empty() {
            return None;
        }
        match decode_claims(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(kind = e.kind(), "Token payload could not be decoded: {}", e);
                None
            }
        }
    }

    pub fn session_status<S: StateStore + ?Sized>(&self, state: &S) -> SessionStatus {
        if state.token().is_empty() {
            return SessionStatus::Absent;
        }
        let Some(claims) = self.claims(state) else {
            return SessionStatus::Malformed;
        };

        let now = self.clock.now();
        let deadline = claims.exp.saturating_add_unsigned(self.config.leeway_secs);
        let status = if deadline >= now {
            SessionStatus::Valid { exp: claims.exp }
        } else {
            SessionStatus::Expired { exp: claims.exp }
        };
        trace!(now, exp = claims.exp, status = status.as_str(), "Evaluated session");
        status
    }

    /// True when a token is held and its `exp` is at or after now.
    ///
    /// The signature is not checked, so this is an optimistic client-side
    /// answer only.
    pub fn is_session_valid<S: StateStore + ?Sized>(&self, state: &S) -> bool {
        self.session_status(state).is_valid()
    }

    /// Seconds until `exp`, negative once passed. Ignores leeway.
    pub fn expires_in<S: StateStore + ?Sized>(&self, state: &S) -> Option<i64> {
        self.claims(state)
            .map(|claims| claims.exp.saturating_sub(self.clock.now()))
    }
}
