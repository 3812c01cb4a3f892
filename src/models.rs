use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::repo::{Collection, Record};

// Wire format matches the dashboard client: camelCase field names, a
// capitalized "Id", and RFC 3339 / ISO-8601 date strings. The serde
// attributes are the single mapping table between the stored format and
// the Rust field names.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    #[serde(rename = "Id")]
    pub id: u32,
    pub name: String,
    pub location: String,
    pub total_area: f64, // acres
    pub soil_type: String,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(rename = "Id")]
    pub id: u32,
    pub name: String,
    pub size: f64, // acres
    pub coordinates: String,
    pub farm_id: u32,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropStatus {
    Planted,
    Growing,
    Ready,
    Harvested,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    #[serde(rename = "Id")]
    pub id: u32,
    pub name: String,
    pub variety: Option<String>,
    pub field_id: u32,
    pub planting_date: DateTime<FixedOffset>,
    pub expected_harvest_date: DateTime<FixedOffset>,
    pub status: CropStatus,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "Id")]
    pub id: u32,
    pub title: String,
    pub description: Option<String>,
    pub crop_id: u32,
    pub due_date: DateTime<FixedOffset>,
    pub priority: TaskPriority,
    // false until the complete transition fires; completed_at is set at
    // that moment and never unset afterwards
    pub completed: bool,
    pub completed_at: Option<DateTime<FixedOffset>>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Operational,
    Maintenance,
    Retired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(rename = "Id")]
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub brand: String,
    pub model: String,
    pub purchase_date: NaiveDate,
    pub status: EquipmentStatus,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: Option<NaiveDate>,
    pub cost: f64,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborStatus {
    Available,
    Working,
    OnLeave,
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Labor {
    #[serde(rename = "Id")]
    pub id: u32,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub hourly_rate: f64,
    pub status: LaborStatus,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub hire_date: NaiveDate,
    pub total_hours_worked: f64,
    pub current_tasks: Vec<u32>, // task ids, no referential guarantee
    pub emergency_contact: EmergencyContact,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "Id")]
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

// Weather is read-only seeded data: no repository, no write path.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: f64, // °F
    pub condition: String,
    pub humidity: u32,   // percent
    pub wind_speed: f64, // mph
    pub visibility: f64, // miles
    pub agricultural_advice: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDay {
    #[serde(rename = "Id")]
    pub id: u32,
    pub date: NaiveDate,
    pub high: f64,
    pub low: f64,
    pub condition: String,
    pub precipitation: Option<u32>, // chance, percent
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlert {
    #[serde(rename = "Id")]
    pub id: u32,
    pub title: String,
    pub severity: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub current: WeatherSnapshot,
    pub forecast: Vec<ForecastDay>,
    pub alerts: Vec<WeatherAlert>,
}

macro_rules! impl_record {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl Record for $ty {
                const NAME: &'static str = $name;

                fn id(&self) -> u32 {
                    self.id
                }
                fn set_id(&mut self, id: u32) {
                    self.id = id;
                }
                fn created_at(&self) -> Option<DateTime<FixedOffset>> {
                    self.created_at
                }
                fn set_created_at(&mut self, at: Option<DateTime<FixedOffset>>) {
                    self.created_at = at;
                }
                fn set_updated_at(&mut self, at: Option<DateTime<FixedOffset>>) {
                    self.updated_at = at;
                }
            }
        )+
    };
}

impl_record!(
    Farm => "Farm",
    Field => "Field",
    Crop => "Crop",
    Task => "Task",
    Equipment => "Equipment",
    Labor => "Labor",
    Transaction => "Transaction",
);

// The whole database: one collection per entity plus the seeded weather
// data. Round-trips through store::load_db / store::save_db.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Db {
    pub farms: Collection<Farm>,
    pub fields: Collection<Field>,
    pub crops: Collection<Crop>,
    pub tasks: Collection<Task>,
    pub equipment: Collection<Equipment>,
    pub labors: Collection<Labor>,
    pub transactions: Collection<Transaction>,
    pub weather: WeatherData,
}

impl Db {
    // Fallback database when no file exists yet: empty collections plus a
    // weather fixture so the read-only weather endpoints have data.
    pub fn seed() -> Self {
        Db {
            farms: Collection::default(),
            fields: Collection::default(),
            crops: Collection::default(),
            tasks: Collection::default(),
            equipment: Collection::default(),
            labors: Collection::default(),
            transactions: Collection::default(),
            weather: WeatherData::seed(),
        }
    }
}

impl WeatherData {
    pub fn seed() -> Self {
        let date = |m: u32, d: u32| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        let day = |id: u32, date: NaiveDate, high: f64, low: f64, cond: &str, precip: u32| {
            ForecastDay {
                id,
                date,
                high,
                low,
                condition: cond.to_string(),
                precipitation: Some(precip),
            }
        };

        WeatherData {
            current: WeatherSnapshot {
                temperature: 72.0,
                condition: "Partly Cloudy".to_string(),
                humidity: 55,
                wind_speed: 8.0,
                visibility: 10.0,
                agricultural_advice: Some(
                    "Good conditions for field work and irrigation checks.".to_string(),
                ),
            },
            forecast: vec![
                day(1, date(6, 20), 75.0, 58.0, "Sunny", 5),
                day(2, date(6, 21), 78.0, 60.0, "Sunny", 0),
                day(3, date(6, 22), 74.0, 61.0, "Cloudy", 30),
                day(4, date(6, 23), 69.0, 57.0, "Rain", 80),
                day(5, date(6, 24), 71.0, 56.0, "Partly Cloudy", 20),
            ],
            alerts: vec![WeatherAlert {
                id: 1,
                title: "Heavy Rain Advisory".to_string(),
                severity: "moderate".to_string(),
                message: "Rain expected Thursday; plan harvesting and spraying around it."
                    .to_string(),
            }],
        }
    }
}
