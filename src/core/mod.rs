pub mod clock;
pub mod controller;
pub mod format;
pub mod preferences;
pub mod screen;
pub mod ticker;
