use carebook::{
    FormController, FormRecord, FormStatus, HttpTransport, Result, load_config,
    models::{AppointmentRequestForm, DoctorSignupForm, PatientSignupForm},
};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: carebook <doctor|patient|appointment> < payload.json";

async fn submit<F>(input: &str, transport: HttpTransport) -> Result<FormStatus>
where
    F: FormRecord + DeserializeOwned,
{
    let record: F = serde_json::from_str(input)?;
    let mut controller = FormController::with_record(record, transport);
    controller.submit().await;
    Ok(controller.status())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    tracing::debug!("Loaded configuration:\n{}", config);

    let Some(form) = std::env::args().nth(1) else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let input = std::io::read_to_string(std::io::stdin())?;
    let transport = HttpTransport::new(&config.api)?;

    let status = match form.trim() {
        "doctor" => submit::<DoctorSignupForm>(&input, transport).await?,
        "patient" => submit::<PatientSignupForm>(&input, transport).await?,
        "appointment" => submit::<AppointmentRequestForm>(&input, transport).await?,
        other => {
            eprintln!("unknown form '{}'\n{}", other, USAGE);
            std::process::exit(2);
        }
    };

    println!("{}", serde_json::to_string_pretty(&status)?);

    if status.error.is_some() {
        std::process::exit(1);
    }

    Ok(())
}
