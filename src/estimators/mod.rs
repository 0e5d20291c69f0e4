// Copyright @yucwang 2026

pub mod comb;
pub mod power_series;
pub mod quadrature;
pub mod roulette;
pub mod unbiased;

pub use self::quadrature::QuadratureTransmittance;
pub use self::unbiased::PowerSeriesEstimator;
