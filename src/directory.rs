//! Patient and professional lookup tables.
//!
//! Appointment forms pick people by id. The directory turns those ids into
//! display names, and refuses ids it does not know instead of inventing a
//! placeholder name.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AgendaError, Result};
use crate::models::{parse_date, parse_time, AppointmentForm, AppointmentStatus, NewAppointment};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    patients: Vec<Patient>,
    professionals: Vec<Professional>,
}

impl Directory {
    pub fn new(patients: Vec<Patient>, professionals: Vec<Professional>) -> Self {
        Directory {
            patients,
            professionals,
        }
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn professionals(&self) -> &[Professional] {
        &self.professionals
    }

    pub fn patient(&self, id: u32) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn professional(&self, id: u32) -> Option<&Professional> {
        self.professionals.iter().find(|p| p.id == id)
    }

    /// Validate a form and resolve its ids into a storable appointment.
    pub fn resolve(&self, form: &AppointmentForm) -> Result<NewAppointment> {
        let patient = self.patient(form.patient_id).ok_or_else(|| {
            warn!(patient_id = form.patient_id, "Form references unknown patient");
            AgendaError::UnknownPatient(form.patient_id)
        })?;
        let professional = self.professional(form.professional_id).ok_or_else(|| {
            warn!(
                professional_id = form.professional_id,
                "Form references unknown professional"
            );
            AgendaError::UnknownProfessional(form.professional_id)
        })?;

        let date = parse_date(&form.date)?;
        let time = parse_time(&form.time)?;
        let status = match form.status.as_deref() {
            Some(raw) if !raw.trim().is_empty() => AppointmentStatus::from_string(raw)?,
            _ => AppointmentStatus::default(),
        };

        let new = NewAppointment::new(
            patient.name.clone(),
            professional.name.clone(),
            date,
            time,
            form.duration_minutes,
            form.kind.clone(),
        )?
        .with_status(status)
        .with_insurance(form.insurance.clone())
        .with_notes(form.notes.clone());

        Ok(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    fn directory() -> Directory {
        Directory::new(
            vec![
                Patient { id: 1, name: "Ana Silva".to_string() },
                Patient { id: 2, name: "João Oliveira".to_string() },
            ],
            vec![
                Professional { id: 1, name: "Dr. Carlos Mendes".to_string() },
                Professional { id: 2, name: "Dra. Juliana Alves".to_string() },
            ],
        )
    }

    fn form() -> AppointmentForm {
        AppointmentForm {
            patient_id: 2,
            professional_id: 1,
            date: "2023-06-15".to_string(),
            time: "09:30".to_string(),
            duration_minutes: config::DEFAULT_DURATION_MINUTES,
            kind: "Individual Therapy".to_string(),
            status: None,
            insurance: Some("Unimed".to_string()),
            notes: None,
        }
    }

    #[test]
    fn resolves_ids_to_names() {
        let new = directory().resolve(&form()).unwrap();
        assert_eq!(new.patient_name, "João Oliveira");
        assert_eq!(new.professional_name, "Dr. Carlos Mendes");
        assert_eq!(new.insurance, "Unimed");
        assert_eq!(new.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut f = form();
        f.patient_id = 99;
        assert_eq!(directory().resolve(&f), Err(AgendaError::UnknownPatient(99)));

        let mut f = form();
        f.professional_id = 42;
        assert_eq!(
            directory().resolve(&f),
            Err(AgendaError::UnknownProfessional(42))
        );
    }

    #[test]
    fn malformed_date_and_time_are_rejected() {
        let mut f = form();
        f.date = "2023-13-01".to_string();
        assert!(matches!(
            directory().resolve(&f),
            Err(AgendaError::InvalidDate(_))
        ));

        let mut f = form();
        f.time = "9h".to_string();
        assert!(matches!(
            directory().resolve(&f),
            Err(AgendaError::InvalidTime(_))
        ));
    }

    #[test]
    fn explicit_status_is_parsed() {
        let mut f = form();
        f.status = Some("pending".to_string());
        let new = directory().resolve(&f).unwrap();
        assert_eq!(new.status, AppointmentStatus::Pending);

        f.status = Some("maybe".to_string());
        assert!(directory().resolve(&f).is_err());
    }

    #[test]
    fn form_deserializes_with_defaults() {
        let raw = r#"{"patient_id":1,"professional_id":2,"date":"2023-06-16","time":"14:00","type":"Couples Therapy"}"#;
        let f: AppointmentForm = serde_json::from_str(raw).unwrap();
        assert_eq!(f.duration_minutes, config::DEFAULT_DURATION_MINUTES);

        let new = directory().resolve(&f).unwrap();
        assert_eq!(new.professional_name, "Dra. Juliana Alves");
        assert_eq!(new.insurance, config::SELF_PAY);
    }
}
