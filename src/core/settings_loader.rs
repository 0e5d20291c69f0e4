// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::core::settings::{ConfigError, EmissionKind, MediumKind, RenderSettings, TransmittanceMethod};
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Error)]
pub enum SettingsLoadError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Reads and validates render settings from an XML file.
///
/// ```xml
/// <render seed="42">
///     <default name="res" value="256"/>
///     <film>
///         <integer name="width" value="$res"/>
///         <integer name="height" value="$res"/>
///     </film>
///     <estimator type="power_series">
///         <float name="roulette" value="2.5"/>
///     </estimator>
///     <medium type="noise">
///         <float name="radius" value="2"/>
///     </medium>
///     <emitter type="single_scatter">
///         <vector name="direction" value="0, 0, -1"/>
///         <rgb name="irradiance" value="70, 28, 24.5"/>
///     </emitter>
/// </render>
/// ```
///
/// Everything left out keeps the value of [`RenderSettings::cloud`].
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<RenderSettings, SettingsLoadError> {
    let path = path.as_ref();
    log::info!("Loading settings from {}.", path.display());
    let xml = fs::read_to_string(path)?;
    parse_settings(&xml)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Film,
    Estimator,
    March,
    Shadow,
    Medium,
    Emitter,
}

impl Section {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"film" => Some(Section::Film),
            b"estimator" => Some(Section::Estimator),
            b"march" => Some(Section::March),
            b"shadow" => Some(Section::Shadow),
            b"medium" => Some(Section::Medium),
            b"emitter" => Some(Section::Emitter),
            _ => None,
        }
    }
}

type Properties = HashMap<String, String>;

pub fn parse_settings(xml: &str) -> Result<RenderSettings, SettingsLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut settings = RenderSettings::cloud();
    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut seen_root = false;

    let mut section: Option<Section> = None;
    let mut section_type: Option<String> = None;
    let mut properties = Properties::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| SettingsLoadError::Parse(e.to_string()))?;
        match event {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"render" => {
                seen_root = true;
                if let Some(seed) = attribute(&e, b"seed", &defaults) {
                    settings.seed = parse_u64(&seed)?;
                }
            }
            Event::Start(e) => {
                let name = e.name();
                if let Some(next) = Section::from_tag(name.as_ref()) {
                    section = Some(next);
                    section_type = attribute(&e, b"type", &defaults);
                    properties.clear();
                } else {
                    read_tag(&e, section, &mut defaults, &mut properties)?;
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                if let Some(next) = Section::from_tag(name.as_ref()) {
                    let kind = attribute(&e, b"type", &defaults);
                    apply_section(&mut settings, next, kind.as_deref(), &Properties::new())?;
                } else {
                    read_tag(&e, section, &mut defaults, &mut properties)?;
                }
            }
            Event::End(e) => {
                if let Some(closed) = Section::from_tag(e.name().as_ref()) {
                    if section == Some(closed) {
                        apply_section(&mut settings, closed, section_type.as_deref(), &properties)?;
                    }
                    section = None;
                    section_type = None;
                    properties.clear();
                }
            }
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(SettingsLoadError::MissingField("render"));
    }

    settings.validate()?;
    log::debug!("Loaded settings: {:?}.", settings);
    Ok(settings)
}

fn read_tag(e: &BytesStart,
            section: Option<Section>,
            defaults: &mut HashMap<String, String>,
            properties: &mut Properties) -> Result<(), SettingsLoadError> {
    let tag = e.name();
    match tag.as_ref() {
        b"default" => {
            let key = attribute(e, b"name", defaults).ok_or(SettingsLoadError::MissingField("default.name"))?;
            let value = attribute(e, b"value", defaults).ok_or(SettingsLoadError::MissingField("default.value"))?;
            defaults.insert(key, value);
        }
        b"integer" | b"float" | b"rgb" | b"point" | b"vector" | b"string" => {
            if section.is_none() {
                return Err(SettingsLoadError::Parse(format!(
                    "property <{}> outside of a section",
                    String::from_utf8_lossy(tag.as_ref())
                )));
            }
            let key = attribute(e, b"name", defaults).ok_or(SettingsLoadError::MissingField("property.name"))?;
            let value = attribute(e, b"value", defaults).ok_or(SettingsLoadError::MissingField("property.value"))?;
            properties.insert(key, value);
        }
        other => {
            return Err(SettingsLoadError::Parse(format!("unknown tag <{}>", String::from_utf8_lossy(other))));
        }
    }
    Ok(())
}

fn apply_section(settings: &mut RenderSettings,
                 section: Section,
                 kind: Option<&str>,
                 props: &Properties) -> Result<(), SettingsLoadError> {
    match section {
        Section::Film => {
            expect_keys(props, &["width", "height", "spp", "background", "origin"])?;
            let film = &mut settings.film;
            set(props, "width", &mut film.width, parse_usize)?;
            set(props, "height", &mut film.height, parse_usize)?;
            set(props, "spp", &mut film.samples_per_pixel, parse_u32)?;
            set(props, "background", &mut film.background, parse_spectrum)?;
            set(props, "origin", &mut film.camera_origin, parse_vec3)?;
        }
        Section::Estimator => {
            settings.transmittance = match kind.unwrap_or("power_series") {
                "power_series" => TransmittanceMethod::PowerSeries,
                "quadrature" => TransmittanceMethod::Quadrature,
                other => return Err(SettingsLoadError::Parse(format!("unsupported estimator: {}", other))),
            };
            expect_keys(props, &["baseline_samples", "roulette", "comb_samples"])?;
            let estimator = &mut settings.estimator;
            set(props, "baseline_samples", &mut estimator.baseline_samples, parse_usize)?;
            set(props, "roulette", &mut estimator.roulette, parse_float)?;
            set(props, "comb_samples", &mut estimator.comb_samples, parse_usize)?;
        }
        Section::March => {
            expect_keys(props, &["step_size", "t_min", "t_max", "min_transmittance", "max_steps"])?;
            let march = &mut settings.march;
            set(props, "step_size", &mut march.step_size, parse_float)?;
            set(props, "t_min", &mut march.t_min, parse_float)?;
            set(props, "t_max", &mut march.t_max, parse_float)?;
            set(props, "min_transmittance", &mut march.min_transmittance, parse_float)?;
            set(props, "max_steps", &mut march.max_steps, parse_usize)?;
        }
        Section::Shadow => {
            expect_keys(props, &["step_size", "max_distance", "max_steps", "min_transmittance"])?;
            let shadow = &mut settings.shadow;
            set(props, "step_size", &mut shadow.step_size, parse_float)?;
            set(props, "max_distance", &mut shadow.max_distance, parse_float)?;
            set(props, "max_steps", &mut shadow.max_steps, parse_usize)?;
            set(props, "min_transmittance", &mut shadow.min_transmittance, parse_float)?;
        }
        Section::Medium => {
            settings.medium = parse_medium(kind.ok_or(SettingsLoadError::MissingField("medium.type"))?, props)?;
        }
        Section::Emitter => {
            settings.emission = parse_emission(kind.ok_or(SettingsLoadError::MissingField("emitter.type"))?, props)?;
        }
    }
    Ok(())
}

fn parse_medium(kind: &str, props: &Properties) -> Result<MediumKind, SettingsLoadError> {
    match kind {
        "constant" => {
            expect_keys(props, &["density", "radius"])?;
            let (mut density, mut radius) = (0.8, 2.0);
            set(props, "density", &mut density, parse_float)?;
            set(props, "radius", &mut radius, parse_float)?;
            Ok(MediumKind::ConstantSphere { density, radius })
        }
        "falloff" => {
            expect_keys(props, &["radius"])?;
            let mut radius = 2.0;
            set(props, "radius", &mut radius, parse_float)?;
            Ok(MediumKind::FalloffSphere { radius })
        }
        "exponential" => {
            expect_keys(props, &["scale"])?;
            let mut scale = 1.0;
            set(props, "scale", &mut scale, parse_float)?;
            Ok(MediumKind::Exponential { scale })
        }
        "noise" => {
            expect_keys(props, &["radius", "seed", "octaves", "frequency"])?;
            let (mut radius, mut seed, mut octaves, mut frequency) = (2.0, 1337, 5, 0.5);
            set(props, "radius", &mut radius, parse_float)?;
            set(props, "seed", &mut seed, parse_u64)?;
            set(props, "octaves", &mut octaves, parse_u32)?;
            set(props, "frequency", &mut frequency, parse_float)?;
            Ok(MediumKind::NoiseCloud { radius, seed, octaves, frequency })
        }
        other => Err(SettingsLoadError::Parse(format!("unsupported medium: {}", other))),
    }
}

fn parse_emission(kind: &str, props: &Properties) -> Result<EmissionKind, SettingsLoadError> {
    match kind {
        "constant" => {
            expect_keys(props, &["radiance", "radius"])?;
            let mut radiance = RGBSpectrum::new(1.0, 0.5, 0.35);
            let mut radius = 2.0;
            set(props, "radiance", &mut radiance, parse_spectrum)?;
            set(props, "radius", &mut radius, parse_float)?;
            Ok(EmissionKind::Constant { radiance, radius })
        }
        "single_scatter" => {
            expect_keys(props, &["direction", "irradiance", "g", "sigma_s"])?;
            let mut direction = Vector3f::new(0.0, 0.0, -1.0);
            let mut irradiance = RGBSpectrum::new(20.0, 8.0, 7.0) * 3.5;
            let (mut g, mut sigma_s) = (0.2, 1.0);
            set(props, "direction", &mut direction, parse_vec3)?;
            set(props, "irradiance", &mut irradiance, parse_spectrum)?;
            set(props, "g", &mut g, parse_float)?;
            set(props, "sigma_s", &mut sigma_s, parse_float)?;
            if direction.norm() == 0.0 {
                return Err(SettingsLoadError::Parse("emitter direction must be non-zero".to_string()));
            }
            Ok(EmissionKind::SingleScatter { direction, irradiance, g, sigma_s })
        }
        other => Err(SettingsLoadError::Parse(format!("unsupported emitter: {}", other))),
    }
}

fn expect_keys(props: &Properties, allowed: &[&str]) -> Result<(), SettingsLoadError> {
    match props.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(unknown) => Err(SettingsLoadError::Parse(format!("unknown property: {}", unknown))),
        None => Ok(()),
    }
}

fn set<T>(props: &Properties,
          key: &str,
          target: &mut T,
          parse: fn(&str) -> Result<T, SettingsLoadError>) -> Result<(), SettingsLoadError> {
    if let Some(raw) = props.get(key) {
        *target = parse(raw)?;
    }
    Ok(())
}

fn attribute(e: &BytesStart, key: &[u8], defaults: &HashMap<String, String>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| resolve_value(&attr.unescape_value().unwrap_or_default(), defaults))
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn parse_float(value: &str) -> Result<Float, SettingsLoadError> {
    value.trim().parse::<Float>().map_err(|_| SettingsLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_u32(value: &str) -> Result<u32, SettingsLoadError> {
    value.trim().parse::<u32>().map_err(|_| SettingsLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_u64(value: &str) -> Result<u64, SettingsLoadError> {
    value.trim().parse::<u64>().map_err(|_| SettingsLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_usize(value: &str) -> Result<usize, SettingsLoadError> {
    value.trim().parse::<usize>().map_err(|_| SettingsLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_vec3(value: &str) -> Result<Vector3f, SettingsLoadError> {
    let mut parts = value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty());
    let x = parts.next().ok_or_else(|| SettingsLoadError::Parse("invalid vec3".to_string()))?;
    let y = parts.next().ok_or_else(|| SettingsLoadError::Parse("invalid vec3".to_string()))?;
    let z = parts.next().ok_or_else(|| SettingsLoadError::Parse("invalid vec3".to_string()))?;
    if parts.next().is_some() {
        return Err(SettingsLoadError::Parse(format!("invalid vec3: {}", value)));
    }
    Ok(Vector3f::new(parse_float(x)?, parse_float(y)?, parse_float(z)?))
}

fn parse_spectrum(value: &str) -> Result<RGBSpectrum, SettingsLoadError> {
    if !value.contains(',') {
        return Ok(RGBSpectrum::splat(parse_float(value)?));
    }
    let v = parse_vec3(value)?;
    Ok(RGBSpectrum::new(v.x, v.y, v.z))
}
