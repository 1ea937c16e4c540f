// libs/doctor-cell/src/services/normalizer.rs
use crate::models::{ConsultationMode, Doctor, ProviderAddress, ProviderDoctor};

/// Map one provider record onto the canonical `Doctor`.
pub fn normalize_doctor(provider: ProviderDoctor) -> Doctor {
    let consultation_mode = consultation_mode(provider.video_consult, provider.in_clinic);
    let address = format_address(&provider.clinic.address);

    Doctor {
        id: provider.id,
        name: provider.name,
        photo_url: provider.photo.unwrap_or_default(),
        specialties: provider
            .specialities
            .into_iter()
            .map(|spec| spec.name)
            .collect(),
        experience_label: provider.experience,
        fee_label: provider.fees,
        clinic_name: provider.clinic.name,
        address,
        consultation_mode,
    }
}

pub fn normalize_all(providers: Vec<ProviderDoctor>) -> Vec<Doctor> {
    providers.into_iter().map(normalize_doctor).collect()
}

/// Video wins when both flags are set.
pub fn consultation_mode(video_consult: bool, in_clinic: bool) -> Option<ConsultationMode> {
    match (video_consult, in_clinic) {
        (true, _) => Some(ConsultationMode::VideoConsult),
        (false, true) => Some(ConsultationMode::InClinic),
        (false, false) => None,
    }
}

/// Empty components are kept as empty segments.
pub fn format_address(address: &ProviderAddress) -> String {
    format!(
        "{}, {}, {}",
        address.address_line1, address.locality, address.city
    )
}
