use clap::ValueEnum;
use serde::Serialize;

/// Editable fields of a session. Duration and earnings are not editable; they
/// only change as a consequence of editing start, end or rate.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ValueEnum)]
pub enum SessionField {
    Title,
    Description,
    #[value(name = "start", alias = "start-time")]
    StartTime,
    #[value(name = "end", alias = "end-time")]
    EndTime,
    #[value(name = "rate", alias = "hourly-rate")]
    HourlyRate,
}

impl SessionField {
    pub fn label(&self) -> &'static str {
        match self {
            SessionField::Title => "title",
            SessionField::Description => "description",
            SessionField::StartTime => "start time",
            SessionField::EndTime => "end time",
            SessionField::HourlyRate => "hourly rate",
        }
    }

    /// True when editing this field changes duration and/or earnings.
    pub fn affects_derived(&self) -> bool {
        matches!(
            self,
            SessionField::StartTime | SessionField::EndTime | SessionField::HourlyRate
        )
    }
}
