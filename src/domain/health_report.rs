use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Age arrives as a number or, once edited through the profile form, as text.
fn age_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Employee profile as returned by the `health_report` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "age_text")]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub chronic_conditions: Option<String>,
    /// Sent as either `healthScore` or `health_score`
    #[serde(default, alias = "healthScore")]
    pub health_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub personalized_tips: Vec<String>,
    #[serde(default)]
    pub bmi: Option<f64>,
}

/// Editable profile form. Every field is sent as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub age: String,
    pub gender: String,
    pub blood_group: String,
    pub allergies: String,
    pub chronic_conditions: String,
}

impl ProfileUpdate {
    /// Draft pre-filled from the current profile, empty strings for gaps
    pub fn from_profile(profile: Option<&Profile>) -> Self {
        let Some(p) = profile else {
            return Self::default();
        };
        Self {
            name: p.name.clone().unwrap_or_default(),
            email: p.email.clone().unwrap_or_default(),
            age: p.age.clone().unwrap_or_default(),
            gender: p.gender.clone().unwrap_or_default(),
            blood_group: p.blood_group.clone().unwrap_or_default(),
            allergies: p.allergies.clone().unwrap_or_default(),
            chronic_conditions: p.chronic_conditions.clone().unwrap_or_default(),
        }
    }
}
