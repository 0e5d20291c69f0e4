// Copyright @yucwang 2021

pub mod emitter;
pub mod integrator;
pub mod phase;
pub mod rng;
pub mod scene;
pub mod sensor;
pub mod settings;
pub mod settings_loader;
pub mod transmittance;
pub mod volume;
