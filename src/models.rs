use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FlowLevel {
    None,
    Spotting,
    Light,
    Medium,
    Heavy,
}

impl FlowLevel {
    /// True for flow that counts as an actual period day.
    /// Spotting is logged but does not anchor predictions.
    pub fn is_period(self) -> bool {
        !matches!(self, FlowLevel::None | FlowLevel::Spotting)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Symptom {
    Cramps,
    Headache,
    Bloating,
    Fatigue,
    BreastTenderness,
    Backache,
    Nausea,
    Acne,
    Insomnia,
    Cravings,
    Dizziness,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Calm,
    Sad,
    Anxious,
    Irritable,
    Sensitive,
    Energetic,
    Tired,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
    Unknown,
}

/// One tracked day. At most one entry per date; saving again replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackingEntry {
    pub date: NaiveDate,
    pub flow: FlowLevel,
    pub symptoms: Vec<Symptom>,
    pub moods: Vec<Mood>,
    pub notes: String,
}

/// User-reported cycle averages. An unset cycle length means predictions
/// cannot be made yet; an unset period length falls back to 5 days.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CycleProfile {
    pub cycle_length_days: Option<u32>,
    pub period_length_days: Option<u32>,
}

/// Forward projection of the next cycle. Always derived from
/// (entries, profile), never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CyclePrediction {
    pub next_period_start: NaiveDate,
    pub next_period_end: NaiveDate,
    pub ovulation_day: NaiveDate,
    pub fertile_window_start: NaiveDate,
    pub fertile_window_end: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    pub time: NaiveTime,
    pub taken: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExerciseCategory {
    Breathing,
    Meditation,
    Stretching,
    Relaxation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindfulnessExercise {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub category: ExerciseCategory,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TipCategory {
    Period,
    Nutrition,
    Fitness,
    Mental,
    Sleep,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthTip {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: TipCategory,
    pub relevant_phase: Option<CyclePhase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub auto_lock_minutes: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            auto_lock_minutes: 5,
        }
    }
}

/// Everything the vault holds. Catalogs are seeded with the built-in
/// content on first setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppData {
    pub profile: CycleProfile,
    pub entries: Vec<TrackingEntry>,
    pub medications: Vec<Medication>,
    #[serde(default = "crate::content::default_exercises")]
    pub exercises: Vec<MindfulnessExercise>,
    #[serde(default = "crate::content::default_tips")]
    pub tips: Vec<HealthTip>,
    pub settings: AppSettings,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            profile: CycleProfile::default(),
            entries: Vec::new(),
            medications: Vec::new(),
            exercises: crate::content::default_exercises(),
            tips: crate::content::default_tips(),
            settings: AppSettings::default(),
        }
    }
}

/// Data returned to the frontend for a month view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthData {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<TrackingEntry>,
    pub prediction: Option<CyclePrediction>,
    pub day_phases: Vec<DayPhase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPhase {
    pub date: NaiveDate,
    pub phase: CyclePhase,
}

/// Phase-aware content picks for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyContent {
    pub phase: CyclePhase,
    pub tips: Vec<HealthTip>,
    pub exercises: Vec<MindfulnessExercise>,
}
