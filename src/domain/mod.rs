//! Domain modules split by discipline so teams can work independently.
//! - `controls`: keyboard/gamepad mapping, HUD toggles and the chase camera.
//! - `presentation`: egui HUD panels.
//! - `simulation`: vehicle modes, signal prop, wheel drive and their Bevy wiring.

pub mod controls;
pub mod presentation;
pub mod simulation;

pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use simulation::SimPlugin;
