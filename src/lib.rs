pub mod anchors;
pub mod config;
pub mod controller;
pub mod handlers;
pub mod models;
pub mod predictor;
pub mod preview;
pub mod routes;
pub mod slot;
pub mod state;
pub mod templates;
pub mod validation;
pub mod view;
