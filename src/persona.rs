//! Persona action catalog: tagged action phrases and the random draw.

pub mod catalog;
pub mod chooser;

pub use catalog::{PersonaAction, PersonaActionCatalog};
pub use chooser::{ActionChooser, RandomChooser};
