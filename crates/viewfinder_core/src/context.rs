//! Planning context extracted from a conversation.

use serde::{Deserialize, Serialize};

/// Structured intent of the shoot.
///
/// Every required field is always populated: values missing from the
/// conversation are replaced with documented defaults during extraction.
///
/// # Examples
///
/// ```
/// use viewfinder_core::PlanningContext;
///
/// let context = PlanningContext::builder()
///     .shoot_type("engagement")
///     .mood(vec!["romantic".to_string(), "playful".to_string()])
///     .time_of_day("golden hour")
///     .subject("a couple and their dog")
///     .duration("2 hours")
///     .experience_level("intermediate")
///     .location_preference("clustered")
///     .build()
///     .unwrap();
///
/// assert_eq!(context.shoot_type(), "engagement");
/// assert!(context.equipment().is_empty());
/// assert!(context.special_requests().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct PlanningContext {
    /// Kind of shoot (portrait, engagement, product, ...)
    shoot_type: String,
    /// Two or three mood descriptors
    mood: Vec<String>,
    /// Preferred time of day
    time_of_day: String,
    /// Who or what is being photographed
    subject: String,
    /// Expected duration
    duration: String,
    /// Available equipment
    #[serde(default)]
    #[builder(default)]
    equipment: Vec<String>,
    /// Photographer experience level
    experience_level: String,
    /// Anything else the client asked for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    special_requests: Option<String>,
    /// Named location, if one was agreed on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    location_name: Option<String>,
    /// Shoot date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    date: Option<String>,
    /// Start time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    start_time: Option<String>,
    /// Whether locations should be clustered or spread out
    location_preference: String,
}

impl PlanningContext {
    /// Creates a new planning context builder.
    pub fn builder() -> PlanningContextBuilder {
        PlanningContextBuilder::default()
    }
}
