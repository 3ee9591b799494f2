//! Command-line interface for the clinic appointment calendar.
//!
//! This module provides an interactive CLI for browsing the calendar by day,
//! week or month, filtering by professional, and adding, editing or removing
//! appointments.

mod config;
mod directory;
mod error;
mod filter;
mod grouping;
mod models;
mod navigation;
mod range;
mod store;
mod summary;
mod view;

use chrono::{Datelike, Local, NaiveDate};
use directory::{Directory, Patient, Professional};
use grouping::group_by_grid;
use models::{parse_date, AppointmentForm, AppointmentStatus, Direction, Granularity};
use range::{grid_weekdays, month_grid};
use std::io::{self, Write};
use store::AppointmentStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use view::{CalendarView, ViewLayout, ViewState};

/// Appointments shown per cell in the month grid before "+N more".
const MONTH_CELL_PREVIEW: usize = 3;

struct AgendaCLI {
    store: AppointmentStore,
    directory: Directory,
    state: ViewState,
    running: bool,
}

impl AgendaCLI {
    fn new() -> Self {
        AgendaCLI {
            store: AppointmentStore::new(),
            directory: clinic_directory(),
            state: ViewState::new(Local::now().date_naive(), Granularity::Day),
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       {} v{}", config::APP_NAME.to_uppercase(), config::APP_VERSION);
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        let reference = self
            .state
            .reference_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "none".to_string());
        let professional = self
            .state
            .professional_filter
            .as_deref()
            .unwrap_or("all professionals");

        println!(
            "\n--- Main Menu ({} view, {}, {}) ---",
            self.state.granularity.name(),
            reference,
            professional
        );
        println!("1. Set reference date");
        println!("2. Choose view (day/week/month)");
        println!("3. Filter by professional");
        println!("4. Previous");
        println!("5. Next");
        println!("6. Show calendar");
        println!("7. New appointment");
        println!("8. Change appointment status");
        println!("9. Remove appointment");
        println!("10. Export current view (JSON)");
        println!("11. Load demo appointments");
        println!("12. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&mut self, prompt: &str, default: Option<&str>) -> String {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => {
                // stdin closed: finish after this prompt
                self.running = false;
                return default.unwrap_or("").to_string();
            }
            Ok(_) => {}
        }
        let input = input.trim();

        if input.is_empty() {
            default.unwrap_or("").to_string()
        } else {
            input.to_string()
        }
    }

    fn get_int_input(&mut self, prompt: &str, default: Option<u32>) -> u32 {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref());

            if let Ok(value) = input.parse::<u32>() {
                return value;
            }
            if !self.running {
                return default.unwrap_or(0);
            }
            println!("Please enter a valid number");
        }
    }

    fn set_reference_date(&mut self) {
        println!("\n--- Reference Date ---");
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let input = self.get_input("Date (YYYY-MM-DD, '-' for none)", Some(today.as_str()));

        if input == "-" {
            self.state.reference_date = None;
            println!("\nReference date cleared");
            return;
        }
        match parse_date(&input) {
            Ok(date) => {
                self.state.reference_date = Some(date);
                let visible = filter::appointments_for(
                    self.store.all(),
                    self.state.reference_date,
                    self.state.granularity,
                    self.state.professional_filter.as_deref(),
                );
                println!(
                    "\nShowing {} ({} appointments this {})",
                    date.format("%A, %Y-%m-%d"),
                    visible.len(),
                    self.state.granularity.name()
                );
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    fn choose_view(&mut self) {
        let current = self.state.granularity.name().to_string();
        let input = self.get_input("View (day/week/month)", Some(current.as_str()));
        match Granularity::from_string(&input) {
            Ok(granularity) => self.state.granularity = granularity,
            Err(e) => println!("Error: {}", e),
        }
    }

    fn choose_professional(&mut self) {
        println!("\n--- Filter by Professional ---");
        println!("  0. All professionals");
        let booked = self.store.professional_names();
        for professional in self.directory.professionals() {
            let marker = if booked.contains(&professional.name) { " *" } else { "" };
            println!("  {}. {}{}", professional.id, professional.name, marker);
        }
        if !booked.is_empty() {
            println!("  (* has appointments)");
        }
        let choice = self.get_int_input("Select professional", Some(0));

        if choice == 0 {
            self.state.set_professional(None);
            return;
        }
        match self.directory.professional(choice) {
            Some(professional) => {
                let name = professional.name.clone();
                self.state.set_professional(Some(name));
            }
            None => println!("Unknown professional"),
        }
    }

    fn navigate(&mut self, direction: Direction) {
        if self.state.reference_date.is_none() {
            println!("\nPlease set a reference date first (option 1)");
            return;
        }
        self.state.navigate(direction);
        self.show_calendar();
    }

    fn show_calendar(&self) {
        let view = CalendarView::build(self.store.all(), &self.state);

        let Some(range) = &view.range else {
            println!("\nNo reference date selected");
            return;
        };

        println!("\n=== {} ===", view.label);

        match &view.layout {
            ViewLayout::List(items) => {
                if items.is_empty() {
                    println!("\nNo appointments for this date.");
                }
                for apt in items {
                    println!(
                        "  [{}] {} | {} with {} ({}) - {}",
                        apt.id,
                        apt.time_span(),
                        apt.patient_name,
                        apt.professional_name,
                        apt.kind,
                        apt.status.name()
                    );
                }
            }
            ViewLayout::Buckets(buckets) if range.granularity == Granularity::Week => {
                for bucket in buckets {
                    println!("\n{}:", bucket.date.format("%A, %d"));
                    if bucket.is_empty() {
                        println!("  (free)");
                    }
                    for apt in &bucket.appointments {
                        println!(
                            "  [{}] {} - {} with {} - {}",
                            apt.id,
                            apt.time.format("%H:%M"),
                            apt.patient_name,
                            apt.professional_name,
                            apt.status.name()
                        );
                    }
                }
            }
            ViewLayout::Buckets(buckets) => {
                let visible: Vec<_> = buckets
                    .iter()
                    .flat_map(|b| b.appointments.iter().cloned())
                    .collect();
                print_month_grid(range.start, &visible);
            }
        }

        if !view.is_empty() {
            println!(
                "\n{} appointments | confirmed {:.1}% | completed {:.1}%",
                view.summary.total,
                view.summary.confirmation_rate(),
                view.summary.completion_rate()
            );
        }
    }

    fn new_appointment(&mut self) {
        println!("\n--- New Appointment ---");

        println!("\nPatients:");
        for patient in self.directory.patients() {
            println!("  {}. {}", patient.id, patient.name);
        }
        let patient_id = self.get_int_input("Select patient", Some(1));

        println!("\nProfessionals:");
        for professional in self.directory.professionals() {
            println!("  {}. {}", professional.id, professional.name);
        }
        let professional_id = self.get_int_input("Select professional", Some(1));

        let default_date = self
            .state
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive())
            .format("%Y-%m-%d")
            .to_string();
        let date = self.get_input("Date (YYYY-MM-DD)", Some(default_date.as_str()));

        let options: Vec<String> = models::time_options()
            .iter()
            .map(|t| t.format("%H:%M").to_string())
            .collect();
        println!("\nAvailable times: {}", options.join(" "));
        let time = self.get_input("Time (HH:MM)", Some("09:00"));

        let duration = self.get_int_input(
            "Duration (minutes)",
            Some(config::DEFAULT_DURATION_MINUTES),
        );
        let kind = self.get_input("Session type", Some("Individual Therapy"));
        let insurance = self.get_input("Insurance", Some(config::SELF_PAY));
        let notes = self.get_input("Notes", Some(""));

        let form = AppointmentForm {
            patient_id,
            professional_id,
            date,
            time,
            duration_minutes: duration,
            kind,
            status: None,
            insurance: Some(insurance),
            notes: Some(notes),
        };

        match self.directory.resolve(&form) {
            Ok(new) => match self.store.add(new) {
                Ok(appointment) => println!(
                    "\nAppointment #{} for {} with {} on {} at {} created",
                    appointment.id,
                    appointment.patient_name,
                    appointment.professional_name,
                    appointment.date.format("%d/%m/%Y"),
                    appointment.time.format("%H:%M")
                ),
                Err(e) => println!("Error creating appointment: {}", e),
            },
            Err(e) => {
                warn!("Appointment form rejected: {e}");
                println!("Error creating appointment: {}", e);
            }
        }
    }

    fn change_status(&mut self) {
        if self.store.is_empty() {
            println!("\nNo appointments to edit");
            return;
        }

        let id = self.get_int_input("Appointment id (0 to go back)", Some(0));
        if id == 0 {
            return;
        }
        let Some(current) = self.store.get(id).cloned() else {
            println!("\nAppointment #{} not found", id);
            return;
        };

        println!("\nStatuses:");
        for status in AppointmentStatus::ALL {
            println!("  - {}", status.name());
        }
        let input = self.get_input("New status", Some(current.status.name()));

        let result = AppointmentStatus::from_string(&input).and_then(|status| {
            let mut edited = current;
            edited.status = status;
            self.store.update(edited)
        });
        match result {
            Ok(()) => println!("\nAppointment #{} updated", id),
            Err(e) => println!("Error: {}", e),
        }
    }

    fn remove_appointment(&mut self) {
        if self.store.is_empty() {
            println!("\nNo appointments to remove");
            return;
        }

        let id = self.get_int_input("Appointment id (0 to go back)", Some(0));
        if id == 0 {
            return;
        }
        match self.store.remove(id) {
            Ok(removed) => println!(
                "\nAppointment for {} on {} removed",
                removed.patient_name,
                removed.date.format("%Y-%m-%d")
            ),
            Err(e) => println!("Error: {}", e),
        }
    }

    fn export_view(&self) {
        let view = CalendarView::build(self.store.all(), &self.state);
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{}", json),
            Err(e) => println!("Error exporting view: {}", e),
        }
    }

    fn load_demo(&mut self) {
        println!("\n--- Loading Demo ---");

        let forms = demo_forms();
        let mut added = 0;
        for form in &forms {
            match self.directory.resolve(form).and_then(|new| self.store.add(new)) {
                Ok(_) => added += 1,
                Err(e) => warn!("Skipping demo appointment: {e}"),
            }
        }

        if let Ok(date) = parse_date("2023-06-15") {
            self.state = ViewState::new(date, Granularity::Day);
        }
        info!(added, total = self.store.len(), "Demo appointments loaded");
        println!(
            "Loaded {} appointments ({} in the calendar); moved to 2023-06-15",
            added,
            self.store.len()
        );
        self.show_calendar();
    }

    fn run(&mut self) {
        self.print_header();

        while self.running {
            self.print_menu();

            let choice = self.get_int_input("Enter choice", Some(6));
            if !self.running {
                break;
            }

            match choice {
                1 => self.set_reference_date(),
                2 => self.choose_view(),
                3 => self.choose_professional(),
                4 => self.navigate(Direction::Previous),
                5 => self.navigate(Direction::Next),
                6 => self.show_calendar(),
                7 => self.new_appointment(),
                8 => self.change_status(),
                9 => self.remove_appointment(),
                10 => self.export_view(),
                11 => self.load_demo(),
                12 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
    }
}

fn print_month_grid(reference: NaiveDate, visible: &[models::Appointment]) {
    let grid = month_grid(reference);
    let cells = group_by_grid(visible, &grid);

    let headers: Vec<String> = grid_weekdays().iter().map(|d| format!("{:>5}", d)).collect();
    println!("{}", headers.join(" "));

    for week in cells.chunks(7) {
        let line: Vec<String> = week
            .iter()
            .map(|cell| {
                let marker = if cell.appointments.is_empty() { ' ' } else { '*' };
                if cell.cell.in_month {
                    format!("{:>4}{}", cell.cell.date.day(), marker)
                } else {
                    "    .".to_string()
                }
            })
            .collect();
        println!("{}", line.join(" "));
    }

    for cell in cells.iter().filter(|c| c.cell.in_month && !c.appointments.is_empty()) {
        let (shown, hidden) = cell.preview(MONTH_CELL_PREVIEW);
        println!("\n{}:", cell.cell.date.format("%a %d"));
        for apt in shown {
            let first_name = apt.patient_name.split_whitespace().next().unwrap_or("");
            println!("  {} {}", apt.time.format("%H:%M"), first_name);
        }
        if hidden > 0 {
            println!("  +{} more", hidden);
        }
    }
}

fn clinic_directory() -> Directory {
    let patients = [
        "Ana Silva",
        "João Oliveira",
        "Mariana Costa",
        "Carlos Santos",
        "Patricia Lima",
    ];
    let professionals = [
        "Dr. Carlos Mendes",
        "Dra. Juliana Alves",
        "Dr. Ricardo Sousa",
        "Dra. Mariana Costa",
        "Dr. Fernando Lima",
    ];

    Directory::new(
        patients
            .iter()
            .zip(1..)
            .map(|(name, id)| Patient { id, name: name.to_string() })
            .collect(),
        professionals
            .iter()
            .zip(1..)
            .map(|(name, id)| Professional { id, name: name.to_string() })
            .collect(),
    )
}

fn demo_forms() -> Vec<AppointmentForm> {
    let rows = [
        (1, 1, "2023-06-15", "09:00", "Individual Therapy", "confirmed", "Unimed"),
        (2, 2, "2023-06-15", "10:00", "Child Therapy", "confirmed", "Bradesco Saúde"),
        (3, 3, "2023-06-15", "11:00", "Family Therapy", "pending", "SulAmérica"),
        (4, 1, "2023-06-15", "14:00", "Individual Therapy", "confirmed", config::SELF_PAY),
        (5, 2, "2023-06-15", "15:00", "Child Therapy", "confirmed", "Amil"),
    ];

    rows.iter()
        .map(
            |(patient_id, professional_id, date, time, kind, status, insurance)| AppointmentForm {
                patient_id: *patient_id,
                professional_id: *professional_id,
                date: date.to_string(),
                time: time.to_string(),
                duration_minutes: config::DEFAULT_DURATION_MINUTES,
                kind: kind.to_string(),
                status: Some(status.to_string()),
                insurance: Some(insurance.to_string()),
                notes: None,
            },
        )
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let mut cli = AgendaCLI::new();
    cli.run();
}
