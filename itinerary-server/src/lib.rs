//! Metro itinerary reconstruction server.
//!
//! A JSON service that asks a routing backend for alternative paths between
//! two stations and turns the chosen one into a station-by-station itinerary
//! with interpolated times and transfer figures.

pub mod backend;
pub mod cache;
pub mod domain;
pub mod itinerary;
pub mod web;
