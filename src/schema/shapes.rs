use super::{CrossFieldRule, FieldRule, Schema};

/// Inclusive bounds for a 10-digit phone number.
pub const PHONE_NUMBER_MIN: f64 = 6_000_000_000.0;
pub const PHONE_NUMBER_MAX: f64 = 9_999_999_999.0;

fn phone_number(rule: FieldRule) -> FieldRule {
    rule.min(PHONE_NUMBER_MIN).max(PHONE_NUMBER_MAX)
}

impl Schema {
    /// Registration record shared by patients and doctors.
    pub fn user() -> Self {
        Schema::new("user")
            .field(FieldRule::string("email").email())
            .field(FieldRule::string("password").min_length(6))
            .field(
                FieldRule::string("confirmPassword")
                    .optional()
                    .min_length(6)
                    .password_complexity(),
            )
            .field(FieldRule::string("phoneNumber"))
            .field(FieldRule::number("age").optional().min(0.0))
            .field(FieldRule::string("address").optional())
            .field(FieldRule::string("name").min_length(3))
            .field(FieldRule::string("image").optional())
            .field(FieldRule::string("bloodGroup").optional())
            .field(FieldRule::number("height").optional().min(0.0))
            .field(FieldRule::number("weight").optional().min(0.0))
            .field(FieldRule::string_list("allergies").optional())
            .field(FieldRule::string_list("medications").optional())
            .field(FieldRule::string_list("diseases").optional())
            .field(FieldRule::string("experience").optional())
            .field(FieldRule::number("consultationFee").optional().min(0.0))
            .field(FieldRule::string("availability").optional())
            .field(FieldRule::string("bio").optional())
            .field(FieldRule::string("department").optional())
            .field(FieldRule::string_list("specialty").optional())
            .cross_field(CrossFieldRule::Matches {
                field: "confirmPassword",
                other: "password",
            })
    }

    pub fn doctor() -> Self {
        Schema::new("doctor")
            .field(FieldRule::string("name").min_length(3))
            .field(FieldRule::string("email").email())
            .field(FieldRule::string("department"))
            .field(FieldRule::string("description"))
            .field(phone_number(FieldRule::coerced_number("phoneNumber")))
            .field(FieldRule::string("location"))
            .field(FieldRule::string("image"))
            .field(FieldRule::string("experience"))
            .field(FieldRule::number("consultationFee").min(0.0))
            .field(FieldRule::string("availability"))
            .field(FieldRule::string("bio"))
            .field(FieldRule::string_list("specialty"))
    }

    pub fn patient() -> Self {
        Schema::new("patient")
            .field(FieldRule::string("name").optional().min_length(3))
            .field(FieldRule::string("email").email())
            .field(phone_number(FieldRule::number("phoneNumber").optional()))
            .field(FieldRule::string("address").optional())
            .field(FieldRule::string("image").optional())
            .field(FieldRule::number("age").optional().min(0.0))
            .field(FieldRule::number("height").optional().min(0.0))
            .field(FieldRule::number("weight").optional().min(0.0))
            .field(FieldRule::string("bloodGroup").optional())
            .field(FieldRule::string_list("allergies").optional())
            .field(FieldRule::string_list("medications").optional())
            .field(FieldRule::string_list("diseases").optional())
    }

    pub fn appointment() -> Self {
        Schema::new("appointment")
            .field(FieldRule::string("patientName").min_length(3))
            .field(FieldRule::string("patientEmail").email())
            .field(FieldRule::string("patientPhoneNumber").optional())
            .field(FieldRule::string("patientAddress"))
            .field(FieldRule::string("patientImage").optional())
            .field(FieldRule::number("patientAge").optional().min(0.0))
            .field(FieldRule::number("patientHeight").optional().min(0.0))
            .field(FieldRule::number("patientWeight").optional().min(0.0))
            .field(FieldRule::string("patientBloodGroup").optional())
            .field(FieldRule::string_list("patientAllergies").optional())
            .field(FieldRule::string_list("patientMedications").optional())
            .field(FieldRule::string("patientBodyImage").optional())
            .field(FieldRule::string("patientPrescriptionImage").optional())
            .field(FieldRule::string_list("patientDiseases").optional())
            .field(FieldRule::string("doctorName").min_length(3))
            .field(FieldRule::string("doctorId").min_length(3))
            .field(FieldRule::string("clinicAddress").optional().min_length(2))
            .field(FieldRule::date("startTimestamp").optional())
            .field(FieldRule::date("endTimestamp").optional())
    }

    /// Pre-submit check for the doctor sign-up form: every input but the
    /// specialty picker is required, and the email input must be email-shaped.
    pub fn doctor_signup() -> Self {
        Schema::new("doctor_signup")
            .field(FieldRule::string("name").non_empty())
            .field(FieldRule::string("email").non_empty().email())
            .field(FieldRule::string("phone").non_empty())
            .field(FieldRule::string_list("speciality").optional())
            .field(FieldRule::string("experience").non_empty())
            .field(FieldRule::string("consultationFee").non_empty())
            .field(FieldRule::string("clinicAddress").non_empty())
            .field(FieldRule::string("availability").non_empty())
            .field(FieldRule::string("qualifications").non_empty())
            .field(FieldRule::string("bio").non_empty())
            .field(FieldRule::string("password").non_empty())
    }

    pub fn patient_signup() -> Self {
        Schema::new("patient_signup")
            .field(FieldRule::string("name").non_empty())
            .field(FieldRule::string("email").non_empty().email())
            .field(FieldRule::string("phone").non_empty())
            .field(FieldRule::string("address").non_empty())
            .field(FieldRule::string("password").non_empty())
    }

    pub fn appointment_request() -> Self {
        Schema::new("appointment_request")
            .field(FieldRule::string("patientName").non_empty())
            .field(FieldRule::string("patientEmail").non_empty().email())
            .field(FieldRule::string("patientPhoneNumber").optional())
            .field(FieldRule::string("patientAddress").non_empty())
            .field(FieldRule::string("doctorName").non_empty())
            .field(FieldRule::string("doctorId").non_empty())
            .field(FieldRule::string("clinicAddress").optional())
            .field(FieldRule::date("startTimestamp").optional())
            .field(FieldRule::date("endTimestamp").optional())
    }
}
