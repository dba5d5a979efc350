use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One job listing as scraped from the board.
///
/// Every field is free text and may be empty when the page omits it.
/// Field order matches the persisted and served JSON layout. Keys missing
/// from a stored record read back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct Job {
    #[serde(rename = "job_title")]
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub requirements: String,
    pub sector: String,
    pub category: String,
    pub experience: String,
    pub position: String,
    pub job_type: String,
    pub time_left: String,
}

/// Addressable fields of a [`Job`], in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobField {
    #[serde(rename = "job_title")]
    Title,
    Company,
    Location,
    Salary,
    Description,
    Requirements,
    Sector,
    Category,
    Experience,
    Position,
    JobType,
    TimeLeft,
}

impl JobField {
    pub const ALL: [JobField; 12] = [
        JobField::Title,
        JobField::Company,
        JobField::Location,
        JobField::Salary,
        JobField::Description,
        JobField::Requirements,
        JobField::Sector,
        JobField::Category,
        JobField::Experience,
        JobField::Position,
        JobField::JobType,
        JobField::TimeLeft,
    ];

    /// The JSON key this field is stored under.
    pub fn key(self) -> &'static str {
        match self {
            JobField::Title => "job_title",
            JobField::Company => "company",
            JobField::Location => "location",
            JobField::Salary => "salary",
            JobField::Description => "description",
            JobField::Requirements => "requirements",
            JobField::Sector => "sector",
            JobField::Category => "category",
            JobField::Experience => "experience",
            JobField::Position => "position",
            JobField::JobType => "job_type",
            JobField::TimeLeft => "time_left",
        }
    }
}

impl std::fmt::Display for JobField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Job {
    pub fn field(&self, field: JobField) -> &str {
        match field {
            JobField::Title => &self.title,
            JobField::Company => &self.company,
            JobField::Location => &self.location,
            JobField::Salary => &self.salary,
            JobField::Description => &self.description,
            JobField::Requirements => &self.requirements,
            JobField::Sector => &self.sector,
            JobField::Category => &self.category,
            JobField::Experience => &self.experience,
            JobField::Position => &self.position,
            JobField::JobType => &self.job_type,
            JobField::TimeLeft => &self.time_left,
        }
    }

    pub fn set_field(&mut self, field: JobField, value: String) {
        let slot = match field {
            JobField::Title => &mut self.title,
            JobField::Company => &mut self.company,
            JobField::Location => &mut self.location,
            JobField::Salary => &mut self.salary,
            JobField::Description => &mut self.description,
            JobField::Requirements => &mut self.requirements,
            JobField::Sector => &mut self.sector,
            JobField::Category => &mut self.category,
            JobField::Experience => &mut self.experience,
            JobField::Position => &mut self.position,
            JobField::JobType => &mut self.job_type,
            JobField::TimeLeft => &mut self.time_left,
        };
        *slot = value;
    }
}

/// Where the jobs held by a [`JobSnapshot`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSource {
    /// Freshly scraped from the board.
    Live,
    /// Read back from the jobs file after the live scrape failed.
    Persisted,
    /// Both sources failed; the snapshot is empty.
    Unavailable,
}

impl JobSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::Live => "live",
            JobSource::Persisted => "persisted",
            JobSource::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for JobSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The read-only job collection a process holds after startup.
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    pub jobs: Vec<Job>,
    pub source: JobSource,
    pub loaded_at: DateTime<Utc>,
}

impl JobSnapshot {
    pub fn new(jobs: Vec<Job>, source: JobSource) -> Self {
        Self {
            jobs,
            source,
            loaded_at: Utc::now(),
        }
    }

    /// True unless the jobs came straight from the board.
    pub fn is_degraded(&self) -> bool {
        self.source != JobSource::Live
    }
}
