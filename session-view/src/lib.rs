//! Session View
//!
//! Read-only accessors over client-side application state: the list of
//! named, colored entities and the status of the held session token.
//!
//! State is owned and mutated elsewhere. This crate only derives facts from
//! a snapshot passed in by reference, so every query is a pure function of
//! that snapshot and (for expiry) an injected [`Clock`].
//!
//! # Example
//!
//! ```
//! use session_view::{AppState, Entity, FixedClock, SessionView};
//!
//! let state = AppState::new(
//!     vec![Entity::new("a", "red"), Entity::new("b", "blue")],
//!     "",
//! );
//! let view = SessionView::with_clock(FixedClock(1_700_000_000));
//!
//! assert_eq!(view.entity_names(&state), vec!["a", "b"]);
//! assert_eq!(view.color_of(&state, "b"), Some("blue"));
//! assert!(!view.is_session_valid(&state));
//! assert_eq!(view.current_token(&state), "");
//! ```
//!
//! Token signatures are never verified. A token whose payload claims a
//! future `exp` is reported valid even if it was tampered with; real
//! authentication has to happen wherever the token is presented.

pub mod clock;
pub mod error;
pub mod state;
pub mod token;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::StateError;
pub use state::{AppState, Entity, Session, StateStore};
pub use token::{decode_claims, DecodeError, TokenClaims};
pub use view::{SessionConfig, SessionStatus, SessionView, LEEWAY_ENV};
