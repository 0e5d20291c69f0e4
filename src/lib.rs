// Copyright @yucwang 2021

pub extern crate nalgebra as na;

pub mod core;
pub mod emitters;
pub mod estimators;
pub mod integrators;
pub mod io;
pub mod math;
pub mod phases;
pub mod renderers;
pub mod sensors;
pub mod volumes;
