// 📋 Ramp Form - Conditional fields + completion progress
// The non-allocation half of the ramp input form, minus the widgets.
//
// Visibility rules:
//   - start/end date shows when its availability is "available"
//   - a duration number shows once its unit (days/weeks) is picked
//   - the additional section (training, nesting, batch size) shows once
//     both trainer selects are filled and total trainers > 0
//
// Hidden fields are never required. Progress counts required fields only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD VALUES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    Unset,
    Available,
    NotAvailable,
}

impl Availability {
    /// Select option value: "", "available", "not-available".
    pub fn from_form_value(value: &str) -> Self {
        match value {
            "available" => Availability::Available,
            "not-available" => Availability::NotAvailable,
            _ => Availability::Unset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DurationUnit {
    #[default]
    Unset,
    Days,
    Weeks,
}

impl DurationUnit {
    pub fn from_form_value(value: &str) -> Self {
        match value {
            "days" => DurationUnit::Days,
            "weeks" => DurationUnit::Weeks,
            _ => DurationUnit::Unset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Languages {
    #[default]
    Unset,
    Single,
    Bilingual,
}

impl Languages {
    pub fn from_form_value(value: &str) -> Self {
        match value {
            "single" => Languages::Single,
            "bilingual" => Languages::Bilingual,
            _ => Languages::Unset,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channels {
    pub voice_inbound: bool,
    pub voice_outbound: bool,
    pub chat: bool,
    pub email: bool,
    pub social_sms: bool,
    pub back_office: bool,
    pub others: bool,
}

impl Channels {
    pub fn any(&self) -> bool {
        self.voice_inbound
            || self.voice_outbound
            || self.chat
            || self.email
            || self.social_sms
            || self.back_office
            || self.others
    }
}

pub const DEFAULT_RATIO: &str = "1:1";

/// Operational assumptions. Free text, never required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratios {
    pub supervisor: String,
    pub qa: String,
    pub trainer: String,
}

impl Default for Ratios {
    fn default() -> Self {
        Ratios {
            supervisor: DEFAULT_RATIO.to_string(),
            qa: DEFAULT_RATIO.to_string(),
            trainer: DEFAULT_RATIO.to_string(),
        }
    }
}

/// Fields that can count toward progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormField {
    StartAvailability,
    StartDate,
    EndAvailability,
    EndDate,
    ClientTrainer,
    InternalTrainer,
    TotalTrainers,
    Channels,
    TrainingDuration,
    TrainingDurationNumber,
    NestingDuration,
    NestingDurationNumber,
    BatchSize,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::StartAvailability => "Ramp Start Date Availability",
            FormField::StartDate => "Ramp Start Date",
            FormField::EndAvailability => "Ramp End Date Availability",
            FormField::EndDate => "Ramp End Date",
            FormField::ClientTrainer => "Client Trainer",
            FormField::InternalTrainer => "Internal Trainer",
            FormField::TotalTrainers => "Total Trainers",
            FormField::Channels => "Channel Support",
            FormField::TrainingDuration => "Training Duration Type",
            FormField::TrainingDurationNumber => "Training Duration Number",
            FormField::NestingDuration => "Nesting Duration Type",
            FormField::NestingDurationNumber => "Nesting Duration Number",
            FormField::BatchSize => "Batch Size",
        }
    }
}

// ============================================================================
// VISIBILITY + PROGRESS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub start_date: bool,
    pub end_date: bool,
    pub additional_fields: bool,
    pub training_duration_number: bool,
    pub nesting_duration_number: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressBand {
    Low,    // < 30%
    Medium, // < 70%
    High,
}

impl ProgressBand {
    pub fn from_percent(percent: u8) -> Self {
        if percent < 30 {
            ProgressBand::Low
        } else if percent < 70 {
            ProgressBand::Medium
        } else {
            ProgressBand::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormProgress {
    pub completed: usize,
    pub required: usize,
    pub percent: u8,
    pub band: ProgressBand,
}

impl FormProgress {
    pub fn new(completed: usize, required: usize) -> Self {
        let percent = if required == 0 {
            0
        } else {
            // Round half up, same as the bar's display
            ((completed * 200 + required) / (required * 2)).min(100) as u8
        };

        FormProgress {
            completed,
            required,
            percent,
            band: ProgressBand::from_percent(percent),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.required > 0 && self.completed == self.required
    }
}

// ============================================================================
// RAMP FORM
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RampForm {
    start_availability: Availability,
    start_date: Option<NaiveDate>,
    end_availability: Availability,
    end_date: Option<NaiveDate>,

    client_trainer: Option<u8>,
    internal_trainer: Option<u8>,
    total_trainers: u32,

    training_duration: DurationUnit,
    training_duration_number: Option<u8>,
    nesting_duration: DurationUnit,
    nesting_duration_number: Option<u8>,
    batch_size: Option<u8>,

    languages: Languages,
    pub ratios: Ratios,
    pub channels: Channels,
}

impl RampForm {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Ramp dates
    // ------------------------------------------------------------------------

    pub fn set_start_availability(&mut self, availability: Availability) {
        self.start_availability = availability;
        if availability != Availability::Available {
            self.start_date = None;
        }
    }

    /// Ignored while the date is hidden.
    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        if self.visibility().start_date {
            self.start_date = date;
        }
    }

    pub fn set_end_availability(&mut self, availability: Availability) {
        self.end_availability = availability;
        if availability != Availability::Available {
            self.end_date = None;
        }
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        if self.visibility().end_date {
            self.end_date = date;
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    // ------------------------------------------------------------------------
    // Trainers
    // ------------------------------------------------------------------------

    pub fn set_client_trainer(&mut self, trainers: Option<u8>) {
        self.client_trainer = trainers;
    }

    pub fn set_internal_trainer(&mut self, trainers: Option<u8>) {
        self.internal_trainer = trainers;
    }

    pub fn set_total_trainers(&mut self, total: u32) {
        self.total_trainers = total;
    }

    // ------------------------------------------------------------------------
    // Additional fields
    // ------------------------------------------------------------------------

    pub fn set_training_duration(&mut self, unit: DurationUnit) {
        self.training_duration = unit;
        if unit == DurationUnit::Unset {
            self.training_duration_number = None;
        }
    }

    pub fn set_training_duration_number(&mut self, number: Option<u8>) {
        if self.training_duration != DurationUnit::Unset {
            self.training_duration_number = number;
        }
    }

    pub fn set_nesting_duration(&mut self, unit: DurationUnit) {
        self.nesting_duration = unit;
        if unit == DurationUnit::Unset {
            self.nesting_duration_number = None;
        }
    }

    pub fn set_nesting_duration_number(&mut self, number: Option<u8>) {
        if self.nesting_duration != DurationUnit::Unset {
            self.nesting_duration_number = number;
        }
    }

    pub fn set_batch_size(&mut self, size: Option<u8>) {
        self.batch_size = size;
    }

    pub fn set_languages(&mut self, languages: Languages) {
        self.languages = languages;
    }

    // ------------------------------------------------------------------------
    // Current values
    // ------------------------------------------------------------------------

    pub fn start_availability(&self) -> Availability {
        self.start_availability
    }

    pub fn end_availability(&self) -> Availability {
        self.end_availability
    }

    pub fn client_trainer(&self) -> Option<u8> {
        self.client_trainer
    }

    pub fn internal_trainer(&self) -> Option<u8> {
        self.internal_trainer
    }

    pub fn total_trainers(&self) -> u32 {
        self.total_trainers
    }

    pub fn training_duration(&self) -> DurationUnit {
        self.training_duration
    }

    pub fn training_duration_number(&self) -> Option<u8> {
        self.training_duration_number
    }

    pub fn nesting_duration(&self) -> DurationUnit {
        self.nesting_duration
    }

    pub fn nesting_duration_number(&self) -> Option<u8> {
        self.nesting_duration_number
    }

    pub fn batch_size(&self) -> Option<u8> {
        self.batch_size
    }

    pub fn languages(&self) -> Languages {
        self.languages
    }

    // ------------------------------------------------------------------------
    // Derived
    // ------------------------------------------------------------------------

    pub fn visibility(&self) -> Visibility {
        let additional_fields = self.client_trainer.is_some()
            && self.internal_trainer.is_some()
            && self.total_trainers > 0;

        Visibility {
            start_date: self.start_availability == Availability::Available,
            end_date: self.end_availability == Availability::Available,
            additional_fields,
            training_duration_number: additional_fields
                && self.training_duration != DurationUnit::Unset,
            nesting_duration_number: additional_fields
                && self.nesting_duration != DurationUnit::Unset,
        }
    }

    /// Required fields in form order, given what is currently shown.
    pub fn required_fields(&self) -> Vec<FormField> {
        let visibility = self.visibility();
        let mut fields = vec![FormField::StartAvailability];

        if visibility.start_date {
            fields.push(FormField::StartDate);
        }
        fields.push(FormField::EndAvailability);
        if visibility.end_date {
            fields.push(FormField::EndDate);
        }

        fields.extend([
            FormField::ClientTrainer,
            FormField::InternalTrainer,
            FormField::TotalTrainers,
        ]);

        if visibility.additional_fields {
            fields.push(FormField::TrainingDuration);
            if visibility.training_duration_number {
                fields.push(FormField::TrainingDurationNumber);
            }
            fields.push(FormField::NestingDuration);
            if visibility.nesting_duration_number {
                fields.push(FormField::NestingDurationNumber);
            }
            fields.push(FormField::BatchSize);
        }

        fields.push(FormField::Channels);
        fields
    }

    pub fn is_filled(&self, field: FormField) -> bool {
        match field {
            FormField::StartAvailability => self.start_availability != Availability::Unset,
            FormField::StartDate => self.start_date.is_some(),
            FormField::EndAvailability => self.end_availability != Availability::Unset,
            FormField::EndDate => self.end_date.is_some(),
            FormField::ClientTrainer => self.client_trainer.is_some(),
            FormField::InternalTrainer => self.internal_trainer.is_some(),
            FormField::TotalTrainers => self.total_trainers > 0,
            FormField::Channels => self.channels.any(),
            FormField::TrainingDuration => self.training_duration != DurationUnit::Unset,
            FormField::TrainingDurationNumber => self.training_duration_number.is_some(),
            FormField::NestingDuration => self.nesting_duration != DurationUnit::Unset,
            FormField::NestingDurationNumber => self.nesting_duration_number.is_some(),
            FormField::BatchSize => self.batch_size.is_some(),
        }
    }

    pub fn progress(&self) -> FormProgress {
        let required = self.required_fields();
        let completed = required.iter().filter(|f| self.is_filled(**f)).count();
        FormProgress::new(completed, required.len())
    }

    /// Required fields still empty, in form order.
    pub fn missing_fields(&self) -> Vec<FormField> {
        self.required_fields()
            .into_iter()
            .filter(|f| !self.is_filled(*f))
            .collect()
    }

    pub fn validation_message(&self) -> String {
        let missing = self.missing_fields().len();
        if missing == 0 {
            "Form validation successful! All required fields are completed.".to_string()
        } else {
            format!(
                "Form validation failed! {} required field(s) need to be completed.",
                missing
            )
        }
    }

    pub fn reset(&mut self) {
        *self = RampForm::default();
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn form_with_trainers() -> RampForm {
        let mut form = RampForm::new();
        form.set_client_trainer(Some(2));
        form.set_internal_trainer(Some(3));
        form.set_total_trainers(5);
        form
    }

    #[test]
    fn test_empty_form_progress() {
        let form = RampForm::new();
        let progress = form.progress();

        // start avail, end avail, client, internal, total, channels
        assert_eq!(progress.required, 6);
        assert_eq!(progress.completed, 0);
        assert_eq!(progress.percent, 0);
        assert_eq!(progress.band, ProgressBand::Low);
    }

    #[test]
    fn test_start_date_visibility() {
        let mut form = RampForm::new();
        form.set_start_date(Some(date(2025, 3, 1)));
        assert_eq!(form.start_date(), None);

        form.set_start_availability(Availability::Available);
        assert!(form.visibility().start_date);
        assert!(form.required_fields().contains(&FormField::StartDate));

        form.set_start_date(Some(date(2025, 3, 1)));
        assert_eq!(form.start_date(), Some(date(2025, 3, 1)));

        // Hiding clears the date and drops the requirement
        form.set_start_availability(Availability::NotAvailable);
        assert_eq!(form.start_date(), None);
        assert!(!form.required_fields().contains(&FormField::StartDate));
    }

    #[test]
    fn test_end_date_visibility() {
        let mut form = RampForm::new();
        form.set_end_availability(Availability::from_form_value("available"));
        form.set_end_date(Some(date(2025, 6, 30)));
        assert_eq!(form.end_date(), Some(date(2025, 6, 30)));

        form.set_end_availability(Availability::from_form_value(""));
        assert_eq!(form.end_date(), None);
        assert!(!form.visibility().end_date);
    }

    #[test]
    fn test_additional_fields_need_all_trainer_inputs() {
        let mut form = RampForm::new();
        form.set_client_trainer(Some(1));
        form.set_internal_trainer(Some(1));
        assert!(!form.visibility().additional_fields);

        form.set_total_trainers(2);
        assert!(form.visibility().additional_fields);
        assert!(form.required_fields().contains(&FormField::BatchSize));

        form.set_client_trainer(None);
        assert!(!form.visibility().additional_fields);
        assert!(!form.required_fields().contains(&FormField::TrainingDuration));
    }

    #[test]
    fn test_duration_number_follows_unit() {
        let mut form = form_with_trainers();
        form.set_training_duration_number(Some(4));
        assert_eq!(form.training_duration_number(), None);

        form.set_training_duration(DurationUnit::from_form_value("weeks"));
        assert!(form.visibility().training_duration_number);
        form.set_training_duration_number(Some(4));
        assert_eq!(form.training_duration_number(), Some(4));

        form.set_training_duration(DurationUnit::Unset);
        assert_eq!(form.training_duration_number(), None);
        assert!(!form.visibility().training_duration_number);
    }

    #[test]
    fn test_nesting_duration_number_follows_unit() {
        let mut form = form_with_trainers();
        form.set_nesting_duration(DurationUnit::Days);
        form.set_nesting_duration_number(Some(10));
        assert_eq!(form.nesting_duration_number(), Some(10));
        assert!(form.required_fields().contains(&FormField::NestingDurationNumber));

        form.set_nesting_duration(DurationUnit::from_form_value("bogus"));
        assert_eq!(form.nesting_duration_number(), None);
    }

    #[test]
    fn test_progress_rounds_and_bands() {
        let mut form = RampForm::new();
        form.set_start_availability(Availability::NotAvailable);
        form.set_end_availability(Availability::NotAvailable);

        // 2 of 6
        let progress = form.progress();
        assert_eq!(progress.percent, 33);
        assert_eq!(progress.band, ProgressBand::Medium);

        form.set_client_trainer(Some(1));
        form.set_internal_trainer(Some(1));
        // 4 of 6
        assert_eq!(form.progress().percent, 67);

        form.set_total_trainers(2);
        // additional section opens: 5 of 9
        let progress = form.progress();
        assert_eq!(progress.required, 9);
        assert_eq!(progress.completed, 5);
        assert_eq!(progress.percent, 56);
    }

    #[test]
    fn test_complete_form() {
        let mut form = form_with_trainers();
        form.set_start_availability(Availability::Available);
        form.set_start_date(Some(date(2025, 1, 6)));
        form.set_end_availability(Availability::NotAvailable);
        form.set_training_duration(DurationUnit::Weeks);
        form.set_training_duration_number(Some(3));
        form.set_nesting_duration(DurationUnit::Days);
        form.set_nesting_duration_number(Some(5));
        form.set_batch_size(Some(20));
        form.channels.chat = true;

        let progress = form.progress();
        assert!(progress.is_complete());
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.band, ProgressBand::High);
        assert!(form.missing_fields().is_empty());
        assert!(form.validation_message().starts_with("Form validation successful"));
    }

    #[test]
    fn test_validation_message_counts_missing() {
        let mut form = RampForm::new();
        form.channels.email = true;
        assert_eq!(
            form.validation_message(),
            "Form validation failed! 5 required field(s) need to be completed."
        );
        assert_eq!(form.missing_fields()[0].label(), "Ramp Start Date Availability");
    }

    #[test]
    fn test_back_office_alone_fills_channels() {
        let mut form = RampForm::new();
        assert!(!form.is_filled(FormField::Channels));

        form.channels.back_office = true;
        assert!(form.is_filled(FormField::Channels));
        assert!(!form.missing_fields().contains(&FormField::Channels));
        assert_eq!(form.progress().completed, 1);

        form.channels.back_office = false;
        form.channels.social_sms = true;
        assert!(form.is_filled(FormField::Channels));
    }

    #[test]
    fn test_languages_and_ratios_are_optional() {
        let mut form = RampForm::new();
        assert_eq!(form.ratios.supervisor, "1:1");
        assert_eq!(form.ratios.qa, DEFAULT_RATIO);
        assert_eq!(form.languages(), Languages::Unset);

        let before = form.progress();
        form.set_languages(Languages::from_form_value("bilingual"));
        form.ratios.trainer = "1:12".to_string();
        assert_eq!(form.languages(), Languages::Bilingual);
        assert_eq!(form.progress(), before);
    }

    #[test]
    fn test_progress_band_edges() {
        assert_eq!(ProgressBand::from_percent(29), ProgressBand::Low);
        assert_eq!(ProgressBand::from_percent(30), ProgressBand::Medium);
        assert_eq!(ProgressBand::from_percent(69), ProgressBand::Medium);
        assert_eq!(ProgressBand::from_percent(70), ProgressBand::High);
        assert_eq!(FormProgress::new(0, 0).percent, 0);
        assert!(!FormProgress::new(0, 0).is_complete());
    }

    #[test]
    fn test_reset() {
        let mut form = form_with_trainers();
        form.channels.voice_inbound = true;
        form.channels.others = true;
        form.set_languages(Languages::Single);
        form.ratios.qa = "1:20".to_string();
        form.reset();

        assert_eq!(form, RampForm::default());
        assert_eq!(form.ratios, Ratios::default());
        assert_eq!(form.ratios.qa, "1:1");
    }
}
