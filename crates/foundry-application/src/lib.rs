//! Application layer for Foundry.
//!
//! Use-case implementations that coordinate the core engines into one
//! user-facing onboarding session.

pub mod onboarding;
pub mod publisher;

pub use onboarding::OnboardingSession;
pub use publisher::{LogPublisher, Publisher};
