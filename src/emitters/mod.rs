// Copyright @yucwang 2026

pub mod constant;
pub mod directional;
pub mod single_scatter;
