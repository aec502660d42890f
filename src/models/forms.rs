//! Payloads edited by the registration and booking forms.
//!
//! Text inputs hold strings exactly as typed; the API does its own parsing.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    forms::FormRecord,
    schema::Schema,
};

/// An option in a multi-select input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    pub const fn new(value: &'static str) -> Self {
        Self { value, label: value }
    }
}

/// Specializations offered by the doctor sign-up form.
pub const SPECIALIZATIONS: [SelectOption; 18] = [
    SelectOption::new("Cardiology"),
    SelectOption::new("Dermatology"),
    SelectOption::new("Neurology"),
    SelectOption::new("Orthopedics"),
    SelectOption::new("Pediatrics"),
    SelectOption::new("Psychiatry"),
    SelectOption::new("Surgery"),
    SelectOption::new("General Medicine"),
    SelectOption::new("Allergy and Immunology"),
    SelectOption::new("Anesthesiology"),
    SelectOption::new("Emergency Medicine"),
    SelectOption::new("Endocrinology"),
    SelectOption::new("Gastroenterology"),
    SelectOption::new("Geriatrics"),
    SelectOption::new("Hematology"),
    SelectOption::new("Infectious Disease"),
    SelectOption::new("Internal Medicine"),
    SelectOption::new("Nephrology"),
];

/// Looks up a specialization option by value.
pub fn specialization(value: &str) -> Option<&'static SelectOption> {
    SPECIALIZATIONS.iter().find(|option| option.value == value)
}

fn unknown_field(name: &str) -> Error {
    Error::InvalidField(format!("unknown field '{}'", name))
}

/// Empty input clears an optional field.
fn optional(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Body of `POST /api/doctor/sign-up`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoctorSignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub speciality: Vec<String>,
    pub experience: String,
    pub clinic_address: String,
    pub consultation_fee: String,
    pub availability: String,
    pub qualifications: String,
    pub bio: String,
    pub password: String,
}

impl DoctorSignupForm {
    /// Options whose values are currently selected, in option-list order.
    pub fn selected_specialties(&self) -> Vec<&'static SelectOption> {
        SPECIALIZATIONS
            .iter()
            .filter(|option| self.speciality.iter().any(|s| s == option.value))
            .collect()
    }

    /// Replaces the whole selection.
    pub fn set_specialties<'a, I>(&mut self, selection: I)
    where
        I: IntoIterator<Item = &'a SelectOption>,
    {
        self.speciality = selection
            .into_iter()
            .map(|option| option.value.to_string())
            .collect();
    }
}

impl FormRecord for DoctorSignupForm {
    const ENDPOINT: &'static str = "/api/doctor/sign-up";
    const SUCCESS_MESSAGE: &'static str = "Doctor signed up successfully";
    const FAILURE_MESSAGE: &'static str = "Failed to sign up";

    fn schema() -> Schema {
        Schema::doctor_signup()
    }

    fn set_field(&mut self, name: &str, value: String) -> Result<()> {
        let slot = match name {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "experience" => &mut self.experience,
            "clinicAddress" => &mut self.clinic_address,
            "consultationFee" => &mut self.consultation_fee,
            "availability" => &mut self.availability,
            "qualifications" => &mut self.qualifications,
            "bio" => &mut self.bio,
            "password" => &mut self.password,
            "speciality" => {
                return Err(Error::InvalidField(
                    "'speciality' is a multi-select field".to_string(),
                ));
            }
            _ => return Err(unknown_field(name)),
        };
        *slot = value;
        Ok(())
    }
}

/// Body of `POST /api/patient/sign-up`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientSignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
}

impl FormRecord for PatientSignupForm {
    const ENDPOINT: &'static str = "/api/patient/sign-up";
    const SUCCESS_MESSAGE: &'static str = "Patient signed up successfully";
    const FAILURE_MESSAGE: &'static str = "Failed to sign up";

    fn schema() -> Schema {
        Schema::patient_signup()
    }

    fn set_field(&mut self, name: &str, value: String) -> Result<()> {
        let slot = match name {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "password" => &mut self.password,
            _ => return Err(unknown_field(name)),
        };
        *slot = value;
        Ok(())
    }
}

/// Body of `POST /api/appointment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppointmentRequestForm {
    pub patient_name: String,
    pub patient_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_phone_number: Option<String>,
    pub patient_address: String,
    pub doctor_name: String,
    pub doctor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinic_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<String>,
}

impl FormRecord for AppointmentRequestForm {
    const ENDPOINT: &'static str = "/api/appointment";
    const SUCCESS_MESSAGE: &'static str = "Appointment booked successfully";
    const FAILURE_MESSAGE: &'static str = "Failed to book appointment";

    fn schema() -> Schema {
        Schema::appointment_request()
    }

    fn set_field(&mut self, name: &str, value: String) -> Result<()> {
        match name {
            "patientName" => self.patient_name = value,
            "patientEmail" => self.patient_email = value,
            "patientPhoneNumber" => self.patient_phone_number = optional(value),
            "patientAddress" => self.patient_address = value,
            "doctorName" => self.doctor_name = value,
            "doctorId" => self.doctor_id = value,
            "clinicAddress" => self.clinic_address = optional(value),
            "startTimestamp" => self.start_timestamp = optional(value),
            "endTimestamp" => self.end_timestamp = optional(value),
            _ => return Err(unknown_field(name)),
        }
        Ok(())
    }
}
