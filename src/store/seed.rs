//! Fixed seed data for first-run stores.
//!
//! When no usable snapshot exists the store hydrates from these four
//! reports. They span all four statuses and two priorities, so the UI and
//! the test suite always have representative data on first run. Content
//! is the demo municipality's original mock data.

use chrono::{DateTime, TimeZone, Utc};

use crate::category::Category;
use crate::report::{Coordinates, Report, ReportId};
use crate::status::{Priority, Status};

fn seed_time(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    // All seed reports date from November 2024.
    Utc.with_ymd_and_hms(2024, 11, day, hour, minute, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn seed_report(
    id: u64,
    title: &str,
    category: Category,
    location: &str,
    coordinates: Coordinates,
    status: Status,
    priority: Priority,
    reporter: &str,
    created_at: DateTime<Utc>,
    votes: u32,
    description: &str,
) -> Report {
    Report {
        id: ReportId::new(id),
        title: title.to_string(),
        category,
        location: location.to_string(),
        coordinates,
        status,
        priority,
        reporter: reporter.to_string(),
        created_at,
        votes,
        description: description.to_string(),
        emblem: category.emblem().to_string(),
    }
}

/// The fixed 4-report seed set, most recent first (ids 1025 down to 1022).
#[must_use]
pub fn seed_reports() -> Vec<Report> {
    vec![
        seed_report(
            1025,
            "Bache grande en la Autopista Aeropuerto",
            Category::RoadSurface,
            "Autopista José María Córdoba Km 2.5, Rionegro",
            Coordinates { lat: 6.1549, lng: -75.4194 },
            Status::Pending,
            Priority::High,
            "María Gómez",
            seed_time(18, 8, 30),
            45,
            "Bache de aproximadamente 50cm que causa daños a vehículos",
        ),
        seed_report(
            1024,
            "Luminaria apagada en Parque Principal",
            Category::PublicLighting,
            "Calle 50 con Carrera 48, Centro, Rionegro",
            Coordinates { lat: 6.1561, lng: -75.3736 },
            Status::InRepair,
            Priority::Medium,
            "Carlos Ruiz",
            seed_time(17, 19, 45),
            23,
            "Poste de luz apagado hace 3 días, zona oscura en la noche",
        ),
        seed_report(
            1023,
            "Árbol caído en zona peatonal",
            Category::Forestry,
            "Av. Las Acacias con Calle 45, Rionegro",
            Coordinates { lat: 6.1498, lng: -75.3801 },
            Status::Resolved,
            Priority::High,
            "Juan Pérez",
            seed_time(16, 14, 20),
            67,
            "Árbol obstruye paso peatonal después de tormenta",
        ),
        seed_report(
            1022,
            "Acumulación de basura en esquina",
            Category::Sanitation,
            "Carrera 52 # 49-23, Rionegro",
            Coordinates { lat: 6.1575, lng: -75.3689 },
            Status::Rejected,
            Priority::Medium,
            "Ana Martínez",
            seed_time(15, 10, 15),
            12,
            "Basuras sin recoger durante 2 días generan malos olores",
        ),
    ]
}
