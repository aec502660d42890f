use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result, ValidationErrors, Violation},
    schema::Schema,
};

/// Records checked against a [`Schema`] before they leave this layer.
pub trait Validate: Serialize {
    /// The shape this record must satisfy.
    fn schema() -> Schema;

    /// Floating-point fields by wire name.
    ///
    /// JSON has no NaN or infinity, so serde_json writes them as `null` and
    /// the schema would read the field as absent. These are checked first.
    fn numbers(&self) -> Vec<(&'static str, Option<f64>)> {
        Vec::new()
    }

    /// Serializes the record and validates it against [`Validate::schema`].
    fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        for (field, value) in self.numbers() {
            if value.is_some_and(|n| !n.is_finite()) {
                errors.push(
                    field,
                    Violation::WrongType {
                        expected: "a number".to_string(),
                    },
                );
            }
        }

        let candidate = serde_json::to_value(self)?;
        if let Err(schema_errors) = Self::schema().validate(&candidate) {
            for failure in schema_errors.failures {
                // A non-finite field already reported shows up here as missing
                if !errors.has_field(&failure.field) {
                    errors.failures.push(failure);
                }
            }
        }

        errors.into_result().map_err(Error::from)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
    pub phone_number: String,
    pub name: String,

    // Patient demographics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diseases: Option<Vec<String>>,

    // Doctor profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<Vec<String>>,
}

impl Validate for UserRecord {
    fn schema() -> Schema {
        Schema::user()
    }

    fn numbers(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("age", self.age),
            ("height", self.height),
            ("weight", self.weight),
            ("consultationFee", self.consultation_fee),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorRecord {
    pub name: String,
    pub email: String,
    pub department: String,
    pub description: String,
    pub phone_number: u64,
    pub location: String,
    pub image: String,
    pub experience: String,
    pub consultation_fee: f64,
    pub availability: String,
    pub bio: String,
    pub specialty: Vec<String>,
}

impl Validate for DoctorRecord {
    fn schema() -> Schema {
        Schema::doctor()
    }

    fn numbers(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![("consultationFee", Some(self.consultation_fee))]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diseases: Option<Vec<String>>,
}

impl Validate for PatientRecord {
    fn schema() -> Schema {
        Schema::patient()
    }

    fn numbers(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![("age", self.age), ("height", self.height), ("weight", self.weight)]
    }
}

/// An appointment with a snapshot of the patient's details at booking time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub patient_name: String,
    pub patient_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_phone_number: Option<String>,
    pub patient_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_blood_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_medications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_body_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_prescription_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_diseases: Option<Vec<String>>,
    pub doctor_name: String,
    pub doctor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinic_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<DateTime<Utc>>,
}

impl Validate for AppointmentRecord {
    fn schema() -> Schema {
        Schema::appointment()
    }

    fn numbers(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("patientAge", self.patient_age),
            ("patientHeight", self.patient_height),
            ("patientWeight", self.patient_weight),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use chrono::TimeZone;

    fn minimal_user() -> UserRecord {
        UserRecord {
            email: "a@b.com".to_string(),
            password: "abcdef".to_string(),
            phone_number: "1234567890".to_string(),
            name: "Bob".to_string(),
            ..Default::default()
        }
    }

    fn doctor(phone_number: u64) -> DoctorRecord {
        DoctorRecord {
            name: "Dr. Strange".to_string(),
            email: "strange@sanctum.org".to_string(),
            department: "Surgery".to_string(),
            description: "Neurosurgeon".to_string(),
            phone_number,
            location: "New York".to_string(),
            image: "strange.png".to_string(),
            experience: "20 years".to_string(),
            consultation_fee: 300.0,
            availability: "Mon-Fri".to_string(),
            bio: "Former neurosurgeon".to_string(),
            specialty: vec!["Neurology".to_string(), "Surgery".to_string()],
        }
    }

    #[test]
    fn test_user_record_serializes_camel_case_without_absent_fields() {
        let json = serde_json::to_value(minimal_user()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "a@b.com",
                "password": "abcdef",
                "phoneNumber": "1234567890",
                "name": "Bob"
            })
        );
    }

    #[test]
    fn test_user_record_validate() {
        assert!(minimal_user().validate().is_ok());

        let user = UserRecord {
            email: "not-an-email".to_string(),
            ..minimal_user()
        };
        match user.validate() {
            Err(Error::Validation(errors)) => {
                assert_eq!(errors.failures[0].field, "email");
                assert_eq!(errors.failures[0].violation, Violation::InvalidEmail);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_user_record_negative_weight_fails() {
        let user = UserRecord {
            weight: Some(-3.0),
            ..minimal_user()
        };
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_non_finite_numbers_fail_as_wrong_type() {
        let wrong_type = Violation::WrongType {
            expected: "a number".to_string(),
        };

        let user = UserRecord {
            age: Some(f64::NAN),
            height: Some(f64::NEG_INFINITY),
            ..minimal_user()
        };
        let Err(Error::Validation(errors)) = user.validate() else {
            panic!("NaN and -inf should not validate");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field("age").collect::<Vec<_>>(), vec![&wrong_type]);
        assert_eq!(errors.for_field("height").collect::<Vec<_>>(), vec![&wrong_type]);

        let patient = PatientRecord {
            email: "pat@example.com".to_string(),
            age: Some(f64::NAN),
            ..Default::default()
        };
        assert!(patient.validate().is_err());
    }

    #[test]
    fn test_required_non_finite_fee_reported_once() {
        let record = DoctorRecord {
            consultation_fee: f64::INFINITY,
            ..doctor(7_000_000_000)
        };
        let Err(Error::Validation(errors)) = record.validate() else {
            panic!("infinite fee should not validate");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.failures[0].violation,
            Violation::WrongType {
                expected: "a number".to_string()
            }
        );
    }

    #[test]
    fn test_doctor_record_phone_range() {
        assert!(doctor(5_999_999_999).validate().is_err());
        assert!(doctor(7_000_000_000).validate().is_ok());
    }

    #[test]
    fn test_patient_record_only_needs_email() {
        let patient = PatientRecord {
            email: "pat@example.com".to_string(),
            ..Default::default()
        };
        assert!(patient.validate().is_ok());

        let patient = PatientRecord {
            name: Some("Al".to_string()),
            ..patient
        };
        assert!(patient.validate().is_err());
    }

    #[test]
    fn test_appointment_record_validate() {
        let appointment = AppointmentRecord {
            patient_name: "Alice".to_string(),
            patient_email: "alice@example.com".to_string(),
            patient_address: "1 Main St".to_string(),
            doctor_name: "Dr. Who".to_string(),
            doctor_id: "doc-001".to_string(),
            start_timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
            end_timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()),
            ..Default::default()
        };
        assert!(appointment.validate().is_ok());

        let appointment = AppointmentRecord {
            doctor_id: "d1".to_string(),
            clinic_address: Some("X".to_string()),
            ..appointment
        };
        let err = appointment.validate().unwrap_err();
        let Error::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.has_field("doctorId"));
        assert!(errors.has_field("clinicAddress"));
    }
}
