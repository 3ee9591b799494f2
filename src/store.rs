//! In-memory appointment list for the calendar.
//!
//! The store owns the records in insertion order. New records are appended
//! with the next free id; edits and deletions rebuild the list and swap it in
//! through `replace_all`.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{AgendaError, Result};
use crate::models::{Appointment, NewAppointment};

#[derive(Debug, Clone, Default)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        AppointmentStore {
            appointments: Vec::new(),
        }
    }

    /// All appointments in insertion order.
    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Id the next added appointment will receive.
    pub fn next_id(&self) -> Result<u32> {
        let max = self.appointments.iter().map(|a| a.id).max().unwrap_or(0);
        max.checked_add(1).ok_or(AgendaError::IdSpaceExhausted)
    }

    /// Append a validated appointment and return it with its assigned id.
    pub fn add(&mut self, new: NewAppointment) -> Result<Appointment> {
        let appointment = Appointment::from_new(self.next_id()?, new);
        info!(
            id = appointment.id,
            date = %appointment.date,
            professional = %appointment.professional_name,
            "Appointment added"
        );
        self.appointments.push(appointment.clone());
        Ok(appointment)
    }

    /// Swap in a whole new list. Ids must be unique.
    pub fn replace_all(&mut self, appointments: Vec<Appointment>) -> Result<()> {
        let mut seen = HashSet::with_capacity(appointments.len());
        for appointment in &appointments {
            appointment.validate()?;
            if !seen.insert(appointment.id) {
                return Err(AgendaError::DuplicateId(appointment.id));
            }
        }
        debug!(count = appointments.len(), "Appointment list replaced");
        self.appointments = appointments;
        Ok(())
    }

    /// Replace the record with the same id, keeping its position.
    pub fn update(&mut self, updated: Appointment) -> Result<()> {
        if self.get(updated.id).is_none() {
            return Err(AgendaError::AppointmentNotFound(updated.id));
        }
        let id = updated.id;
        let next: Vec<Appointment> = self
            .appointments
            .iter()
            .map(|a| if a.id == id { updated.clone() } else { a.clone() })
            .collect();
        self.replace_all(next)?;
        info!(id, "Appointment updated");
        Ok(())
    }

    /// Remove a record by id and return it.
    pub fn remove(&mut self, id: u32) -> Result<Appointment> {
        let removed = self
            .get(id)
            .cloned()
            .ok_or(AgendaError::AppointmentNotFound(id))?;
        let next: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.id != id)
            .cloned()
            .collect();
        self.replace_all(next)?;
        info!(id, "Appointment removed");
        Ok(removed)
    }

    pub fn get(&self, id: u32) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Distinct professional names, in first-seen order.
    pub fn professional_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for appointment in &self.appointments {
            if !names.contains(&appointment.professional_name) {
                names.push(appointment.professional_name.clone());
            }
        }
        names
    }
}

impl std::fmt::Display for AppointmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AppointmentStore(appointments={})", self.appointments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_date, parse_time, AppointmentStatus};

    fn new_appointment(patient: &str, professional: &str, date: &str, time: &str) -> NewAppointment {
        NewAppointment::new(
            patient.to_string(),
            professional.to_string(),
            parse_date(date).unwrap(),
            parse_time(time).unwrap(),
            50,
            "Individual Therapy".to_string(),
        )
        .unwrap()
    }

    fn two_appointments() -> AppointmentStore {
        let mut store = AppointmentStore::new();
        store.add(new_appointment("A", "Dr. A", "2023-06-15", "09:00")).unwrap();
        store.add(new_appointment("B", "Dr. A", "2023-06-15", "10:00")).unwrap();
        store
    }

    #[test]
    fn first_id_is_one() {
        let mut store = AppointmentStore::new();
        let added = store
            .add(new_appointment("Ana Silva", "Dr. A", "2023-06-15", "09:00"))
            .unwrap();
        assert_eq!(added.id, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ids_follow_max_not_count() {
        let mut store = two_appointments();
        store.add(new_appointment("C", "Dr. A", "2023-06-15", "11:00")).unwrap();
        store.remove(2).unwrap();

        let added = store.add(new_appointment("D", "Dr. A", "2023-06-15", "12:00")).unwrap();
        assert_eq!(added.id, 4);

        store.remove(4).unwrap();
        store.remove(3).unwrap();
        let added = store.add(new_appointment("E", "Dr. A", "2023-06-15", "12:00")).unwrap();
        assert_eq!(added.id, 2);
    }

    #[test]
    fn add_after_max_id_fails_without_wrapping() {
        let mut store = AppointmentStore::new();
        let last = Appointment::from_new(u32::MAX, new_appointment("A", "Dr. A", "2023-06-15", "09:00"));
        store.replace_all(vec![last]).unwrap();

        assert_eq!(store.next_id(), Err(AgendaError::IdSpaceExhausted));
        let result = store.add(new_appointment("B", "Dr. A", "2023-06-15", "10:00"));
        assert_eq!(result, Err(AgendaError::IdSpaceExhausted));
        assert_eq!(store.len(), 1);
        assert!(store.get(0).is_none());
    }

    #[test]
    fn add_appends_at_end() {
        let mut store = AppointmentStore::new();
        store.add(new_appointment("A", "Dr. A", "2023-06-16", "09:00")).unwrap();
        store.add(new_appointment("B", "Dr. A", "2023-06-15", "09:00")).unwrap();
        let names: Vec<&str> = store.all().iter().map(|a| a.patient_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = two_appointments();

        let mut edited = store.get(1).cloned().unwrap();
        edited.status = AppointmentStatus::Confirmed;
        store.update(edited).unwrap();

        assert_eq!(store.all()[0].status, AppointmentStatus::Confirmed);
        assert_eq!(store.all()[1].patient_name, "B");
    }

    #[test]
    fn update_unknown_id_fails() {
        let mut store = two_appointments();
        let mut ghost = store.get(1).cloned().unwrap();
        ghost.id = 9;
        assert_eq!(store.update(ghost), Err(AgendaError::AppointmentNotFound(9)));
    }

    #[test]
    fn update_with_zero_duration_is_rejected() {
        let mut store = two_appointments();
        let before = store.all().to_vec();

        let mut edited = store.get(2).cloned().unwrap();
        edited.duration_minutes = 0;
        assert_eq!(
            store.update(edited),
            Err(AgendaError::InvalidDuration { minutes: 0, minimum: 1 })
        );
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn remove_unknown_id_fails() {
        let mut store = AppointmentStore::new();
        assert_eq!(store.remove(1), Err(AgendaError::AppointmentNotFound(1)));
    }

    #[test]
    fn replace_all_rejects_duplicate_ids() {
        let mut store = AppointmentStore::new();
        let a = Appointment::from_new(1, new_appointment("A", "Dr. A", "2023-06-15", "09:00"));
        let b = Appointment::from_new(1, new_appointment("B", "Dr. A", "2023-06-15", "10:00"));
        assert_eq!(store.replace_all(vec![a, b]), Err(AgendaError::DuplicateId(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn replace_all_rejects_invalid_records_and_keeps_list() {
        let mut store = two_appointments();
        let before = store.all().to_vec();

        let mut short = Appointment::from_new(3, new_appointment("C", "Dr. A", "2023-06-16", "09:00"));
        short.duration_minutes = 0;
        assert_eq!(
            store.replace_all(vec![short]),
            Err(AgendaError::InvalidDuration { minutes: 0, minimum: 1 })
        );
        assert_eq!(store.all(), before.as_slice());

        let mut unnamed = Appointment::from_new(3, new_appointment("C", "Dr. A", "2023-06-16", "09:00"));
        unnamed.patient_name = "  ".to_string();
        assert_eq!(
            store.replace_all(vec![unnamed]),
            Err(AgendaError::EmptyField("Patient name"))
        );
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn professional_names_are_distinct() {
        let mut store = AppointmentStore::new();
        store.add(new_appointment("A", "Dr. B", "2023-06-15", "09:00")).unwrap();
        store.add(new_appointment("B", "Dr. A", "2023-06-15", "10:00")).unwrap();
        store.add(new_appointment("C", "Dr. B", "2023-06-15", "11:00")).unwrap();
        assert_eq!(store.professional_names(), vec!["Dr. B", "Dr. A"]);
    }
}
