//! Side-scrolling ship demo built on `actor_engine`
//!
//! A keyboard-driven ship over two parallax star layers, an animated
//! skeleton and comets that come and go.

#![warn(missing_docs)]

pub mod app;
pub mod comets;
pub mod placeholder;
pub mod ship;

pub use app::ShipDemo;
pub use placeholder::PlaceholderLoader;
