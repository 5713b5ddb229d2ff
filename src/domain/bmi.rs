use serde::{Deserialize, Serialize};
use std::fmt;

/// Body-mass index from weight in kilograms and height in centimetres,
/// rounded to one decimal place.
///
/// Returns `None` when either input is zero, negative or not finite.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    let height_m = height_cm / 100.0;
    if !(weight_kg.is_finite() && height_m.is_finite()) || weight_kg <= 0.0 || height_m <= 0.0 {
        return None;
    }
    let value = weight_kg / (height_m * height_m);
    Some((value * 10.0).round() / 10.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
    Unknown,
}

impl BmiCategory {
    pub fn from_bmi(bmi: Option<f64>) -> Self {
        match bmi {
            Some(v) if v.is_nan() => BmiCategory::Unknown,
            Some(v) if v < 18.5 => BmiCategory::Underweight,
            Some(v) if v < 25.0 => BmiCategory::Normal,
            Some(v) if v < 30.0 => BmiCategory::Overweight,
            Some(_) => BmiCategory::Obese,
            None => BmiCategory::Unknown,
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "Underweight"),
            BmiCategory::Normal => write!(f, "Normal"),
            BmiCategory::Overweight => write!(f, "Overweight"),
            BmiCategory::Obese => write!(f, "Obese"),
            BmiCategory::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A computed BMI together with its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiReading {
    pub bmi: f64,
    pub category: BmiCategory,
}

impl BmiReading {
    pub fn measure(weight_kg: f64, height_cm: f64) -> Option<Self> {
        compute_bmi(weight_kg, height_cm).map(|bmi| Self {
            bmi,
            category: BmiCategory::from_bmi(Some(bmi)),
        })
    }
}
