// src/components/mod.rs
pub mod gallery;
pub mod photo_modal;
