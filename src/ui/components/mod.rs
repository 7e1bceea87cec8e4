//! Reusable UI components.
//!
//! Every component reads the accent and theme palettes from the
//! [`Branding`](crate::branding::Branding) provided to the current render.
//!
//! # Components
//!
//! - [`Button`], [`LinkButton`]: Clickable actions with variants
//! - [`Card`]: Themed container
//! - [`Badge`]: POPULAR, CURRENT and plan labels
//! - [`Avatar`]: Initial-letter avatar
//! - [`icons`]: SVG icon components

mod avatar;
mod badge;
mod button;
mod card;
mod icons;

pub use avatar::Avatar;
pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonSize, ButtonVariant, LinkButton};
pub use card::Card;
pub use icons::*;
