pub mod components;
pub mod main;
pub mod runtime;
pub mod theme;
