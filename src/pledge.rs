use serde::Deserialize;

/// A submitted pledge form. Consumed by `validate` and then dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PledgeSubmission {
    #[serde(default)]
    pub name: String,
    /// Accepted for the form's sake; never validated or used.
    #[serde(default)]
    pub email: String,
    /// Unchecked checkboxes are absent from the form body.
    #[serde(default, deserialize_with = "checkbox")]
    pub agreed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    WarningNoAgreement,
    WarningNoName,
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Success(name) => format!("Thank you, {}, for taking the pledge! 🙌", name),
            Outcome::WarningNoAgreement => "Please agree to the pledge to submit.".to_string(),
            Outcome::WarningNoName => "Please enter your name to continue.".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// The agreement check runs before the name check, so a submission missing
/// both reports the missing agreement.
pub fn validate(submission: &PledgeSubmission) -> Outcome {
    if !submission.agreed {
        Outcome::WarningNoAgreement
    } else if submission.name.is_empty() {
        Outcome::WarningNoName
    } else {
        Outcome::Success(submission.name.clone())
    }
}

fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(value.as_deref(), Some("on" | "true" | "1" | "yes")))
}
