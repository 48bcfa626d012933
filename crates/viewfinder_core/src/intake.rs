//! Pre-structured intake forms.

use serde::{Deserialize, Serialize};

/// A questionnaire-style alternative to a recorded conversation.
///
/// Every field is optional; the form is rendered into labelled lines and fed
/// to the pipeline exactly like a raw transcript.
///
/// # Examples
///
/// ```
/// use viewfinder_core::IntakeForm;
///
/// let form = IntakeForm {
///     shoot_type: Some("portrait".into()),
///     subject: Some("my grandmother in her garden".into()),
///     mood: vec!["warm".into(), "nostalgic".into()],
///     ..Default::default()
/// };
///
/// let text = form.render();
/// assert!(text.contains("Shoot type: portrait"));
/// assert!(text.contains("Mood: warm, nostalgic"));
/// assert!(!text.contains("Duration"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeForm {
    /// Kind of shoot (portrait, engagement, product, ...)
    pub shoot_type: Option<String>,
    /// Who or what is being photographed
    pub subject: Option<String>,
    /// Mood descriptors
    pub mood: Vec<String>,
    /// Preferred time of day
    pub time_of_day: Option<String>,
    /// Named location, if one is already chosen
    pub location: Option<String>,
    /// Whether locations should be close together or spread out
    pub location_preference: Option<String>,
    /// Shoot date
    pub date: Option<String>,
    /// Start time
    pub start_time: Option<String>,
    /// Expected duration
    pub duration: Option<String>,
    /// Available equipment
    pub equipment: Vec<String>,
    /// Photographer experience level
    pub experience_level: Option<String>,
    /// Anything else the client asked for
    pub special_requests: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl IntakeForm {
    /// Render the non-blank fields as `Label: value` lines.
    ///
    /// Returns an empty string when every field is blank.
    pub fn render(&self) -> String {
        let mood = self.mood.join(", ");
        let equipment = self.equipment.join(", ");
        let fields: [(&str, Option<&str>); 13] = [
            ("Shoot type", self.shoot_type.as_deref()),
            ("Subject", self.subject.as_deref()),
            ("Mood", Some(mood.as_str())),
            ("Time of day", self.time_of_day.as_deref()),
            ("Location", self.location.as_deref()),
            ("Location preference", self.location_preference.as_deref()),
            ("Date", self.date.as_deref()),
            ("Start time", self.start_time.as_deref()),
            ("Duration", self.duration.as_deref()),
            ("Equipment", Some(equipment.as_str())),
            ("Experience level", self.experience_level.as_deref()),
            ("Special requests", self.special_requests.as_deref()),
            ("Notes", self.notes.as_deref()),
        ];

        fields
            .iter()
            .filter_map(|(label, value)| {
                value
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{}: {}", label, v))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
