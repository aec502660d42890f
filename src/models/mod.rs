pub mod forms;
pub mod records;

pub use forms::{
    AppointmentRequestForm, DoctorSignupForm, PatientSignupForm, SPECIALIZATIONS, SelectOption,
};
pub use records::{AppointmentRecord, DoctorRecord, PatientRecord, UserRecord, Validate};
