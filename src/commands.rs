use chrono::{Duration, NaiveDate, NaiveTime};
use std::sync::Mutex;
use tauri::State;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::content;
use crate::models::*;
use crate::prediction;
use crate::storage;

/// Profile bounds enforced at the command boundary; the cycle math itself
/// never validates.
const CYCLE_LENGTH_RANGE: std::ops::RangeInclusive<u32> = 21..=45;
const PERIOD_LENGTH_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// App state holding the decrypted data and passphrase while unlocked.
pub struct AppState {
    pub passphrase: Mutex<Option<String>>,
    pub data: Mutex<Option<AppData>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            passphrase: Mutex::new(None),
            data: Mutex::new(None),
        }
    }

    /// Lock the app: zeroize the passphrase and drop data from memory.
    pub fn lock(&self) {
        if let Ok(mut pass) = self.passphrase.lock() {
            if let Some(ref mut p) = *pass {
                p.zeroize();
            }
            *pass = None;
        }
        if let Ok(mut data) = self.data.lock() {
            *data = None;
        }
    }

    fn save_data(&self) -> Result<(), String> {
        let pass = self.passphrase.lock().map_err(|e| e.to_string())?;
        let data = self.data.lock().map_err(|e| e.to_string())?;
        match (pass.as_ref(), data.as_ref()) {
            (Some(p), Some(d)) => storage::save(p, d).map_err(|e| e.to_string()),
            _ => Err("app is locked".into()),
        }
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| e.to_string())
}

/// Insert or replace the entry for its date. Last write wins.
fn upsert_entry(data: &mut AppData, entry: TrackingEntry) {
    if let Some(existing) = data.entries.iter_mut().find(|e| e.date == entry.date) {
        *existing = entry;
    } else {
        data.entries.push(entry);
    }
}

#[tauri::command]
pub fn is_setup() -> Result<bool, String> {
    storage::vault_exists().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn setup(passphrase: String, state: State<'_, AppState>) -> Result<(), String> {
    let data = AppData::default();
    storage::save(&passphrase, &data).map_err(|e| e.to_string())?;

    *state.passphrase.lock().map_err(|e| e.to_string())? = Some(passphrase);
    *state.data.lock().map_err(|e| e.to_string())? = Some(data);

    log::info!("vault created");
    Ok(())
}

#[tauri::command]
pub fn unlock(passphrase: String, state: State<'_, AppState>) -> Result<bool, String> {
    match storage::load(&passphrase) {
        Ok(data) => {
            *state.passphrase.lock().map_err(|e| e.to_string())? = Some(passphrase);
            *state.data.lock().map_err(|e| e.to_string())? = Some(data);
            log::info!("vault unlocked");
            Ok(true)
        }
        Err(e) => {
            log::warn!("unlock failed: {e}");
            Ok(false)
        }
    }
}

#[tauri::command]
pub fn lock(state: State<'_, AppState>) -> Result<(), String> {
    state.lock();
    log::info!("vault locked");
    Ok(())
}

#[tauri::command]
pub fn save_entry(
    date: String,
    flow: FlowLevel,
    symptoms: Vec<Symptom>,
    moods: Vec<Mood>,
    notes: String,
    state: State<'_, AppState>,
) -> Result<(), String> {
    let date = parse_date(&date)?;

    let mut data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_mut().ok_or("app is locked")?;

    upsert_entry(
        data,
        TrackingEntry {
            date,
            flow,
            symptoms,
            moods,
            notes,
        },
    );

    drop(data_lock);
    state.save_data()
}

#[tauri::command]
pub fn get_entry(date: String, state: State<'_, AppState>) -> Result<Option<TrackingEntry>, String> {
    let date = parse_date(&date)?;
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;
    Ok(data.entries.iter().find(|e| e.date == date).cloned())
}

#[tauri::command]
pub fn get_entries(state: State<'_, AppState>) -> Result<Vec<TrackingEntry>, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;

    let mut entries = data.entries.clone();
    entries.sort_by_key(|e| e.date);
    Ok(entries)
}

#[tauri::command]
pub fn get_prediction(state: State<'_, AppState>) -> Result<Option<CyclePrediction>, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;
    Ok(prediction::predict(&data.entries, &data.profile))
}

#[tauri::command]
pub fn current_phase(state: State<'_, AppState>) -> Result<CyclePhase, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;

    let predicted = prediction::predict(&data.entries, &data.profile);
    let today = chrono::Local::now().date_naive();
    Ok(prediction::classify_phase(today, predicted.as_ref()))
}

#[tauri::command]
pub fn get_month(year: i32, month: u32, state: State<'_, AppState>) -> Result<MonthData, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;

    let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or("invalid date")?;
    let last_day = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or("invalid date")?
        - Duration::days(1);

    let mut entries: Vec<TrackingEntry> = data
        .entries
        .iter()
        .filter(|e| e.date >= first_day && e.date <= last_day)
        .cloned()
        .collect();
    entries.sort_by_key(|e| e.date);

    let predicted = prediction::predict(&data.entries, &data.profile);

    let day_phases = first_day
        .iter_days()
        .take_while(|d| *d <= last_day)
        .map(|date| DayPhase {
            date,
            phase: prediction::classify_phase(date, predicted.as_ref()),
        })
        .collect();

    Ok(MonthData {
        year,
        month,
        entries,
        prediction: predicted,
        day_phases,
    })
}

#[tauri::command]
pub fn get_daily_content(state: State<'_, AppState>) -> Result<DailyContent, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;

    let predicted = prediction::predict(&data.entries, &data.profile);
    let today = chrono::Local::now().date_naive();
    let phase = prediction::classify_phase(today, predicted.as_ref());

    Ok(DailyContent {
        phase,
        tips: content::relevant_content(phase, &data.tips).cloned().collect(),
        exercises: content::relevant_content(phase, &data.exercises)
            .cloned()
            .collect(),
    })
}

#[tauri::command]
pub fn list_exercises(state: State<'_, AppState>) -> Result<Vec<MindfulnessExercise>, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;
    Ok(data.exercises.clone())
}

#[tauri::command]
pub fn list_tips(state: State<'_, AppState>) -> Result<Vec<HealthTip>, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;
    Ok(data.tips.clone())
}

#[tauri::command]
pub fn list_medications(state: State<'_, AppState>) -> Result<Vec<Medication>, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;
    Ok(data.medications.clone())
}

#[tauri::command]
pub fn save_medication(
    id: Option<Uuid>,
    name: String,
    dosage: String,
    time: String,
    notes: String,
    state: State<'_, AppState>,
) -> Result<Medication, String> {
    let time = NaiveTime::parse_from_str(&time, "%H:%M").map_err(|e| e.to_string())?;

    let mut data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_mut().ok_or("app is locked")?;

    let medication = match id.and_then(|id| data.medications.iter_mut().find(|m| m.id == id)) {
        Some(existing) => {
            existing.name = name;
            existing.dosage = dosage;
            existing.time = time;
            existing.notes = notes;
            existing.clone()
        }
        None => {
            let medication = Medication {
                id: Uuid::new_v4(),
                name,
                dosage,
                time,
                taken: false,
                notes,
            };
            data.medications.push(medication.clone());
            medication
        }
    };

    drop(data_lock);
    state.save_data()?;
    Ok(medication)
}

#[tauri::command]
pub fn delete_medication(id: Uuid, state: State<'_, AppState>) -> Result<(), String> {
    let mut data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_mut().ok_or("app is locked")?;
    data.medications.retain(|m| m.id != id);
    drop(data_lock);
    state.save_data()
}

#[tauri::command]
pub fn toggle_medication_taken(id: Uuid, state: State<'_, AppState>) -> Result<bool, String> {
    let mut data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_mut().ok_or("app is locked")?;

    let medication = data
        .medications
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or("medication not found")?;
    medication.taken = !medication.taken;
    let taken = medication.taken;

    drop(data_lock);
    state.save_data()?;
    Ok(taken)
}

#[tauri::command]
pub fn get_profile(state: State<'_, AppState>) -> Result<CycleProfile, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;
    Ok(data.profile.clone())
}

#[tauri::command]
pub fn update_profile(
    cycle_length_days: Option<u32>,
    period_length_days: Option<u32>,
    state: State<'_, AppState>,
) -> Result<(), String> {
    if let Some(days) = cycle_length_days {
        if !CYCLE_LENGTH_RANGE.contains(&days) {
            return Err(format!(
                "cycle length must be between {} and {} days",
                CYCLE_LENGTH_RANGE.start(),
                CYCLE_LENGTH_RANGE.end()
            ));
        }
    }
    if let Some(days) = period_length_days {
        if !PERIOD_LENGTH_RANGE.contains(&days) {
            return Err(format!(
                "period length must be between {} and {} days",
                PERIOD_LENGTH_RANGE.start(),
                PERIOD_LENGTH_RANGE.end()
            ));
        }
    }

    let mut data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_mut().ok_or("app is locked")?;
    data.profile = CycleProfile {
        cycle_length_days,
        period_length_days,
    };

    drop(data_lock);
    state.save_data()
}

#[tauri::command]
pub fn get_settings(state: State<'_, AppState>) -> Result<AppSettings, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;
    Ok(data.settings.clone())
}

#[tauri::command]
pub fn update_settings(auto_lock_minutes: u32, state: State<'_, AppState>) -> Result<(), String> {
    let mut data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_mut().ok_or("app is locked")?;
    data.settings.auto_lock_minutes = auto_lock_minutes.clamp(1, 60);
    drop(data_lock);
    state.save_data()
}

#[tauri::command]
pub fn export_data(state: State<'_, AppState>) -> Result<String, String> {
    let data_lock = state.data.lock().map_err(|e| e.to_string())?;
    let data = data_lock.as_ref().ok_or("app is locked")?;
    serde_json::to_string_pretty(data).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn wipe_all_data(state: State<'_, AppState>) -> Result<(), String> {
    state.lock();
    log::info!("vault wiped");
    storage::wipe().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: &str, flow: FlowLevel, notes: &str) -> TrackingEntry {
        TrackingEntry {
            date: parse_date(day).unwrap(),
            flow,
            symptoms: vec![],
            moods: vec![],
            notes: notes.into(),
        }
    }

    #[test]
    fn upsert_keeps_one_entry_per_date() {
        let mut data = AppData::default();
        upsert_entry(&mut data, entry("2024-01-01", FlowLevel::Light, "first"));
        upsert_entry(&mut data, entry("2024-01-02", FlowLevel::Medium, ""));
        upsert_entry(&mut data, entry("2024-01-01", FlowLevel::Heavy, "revised"));

        assert_eq!(data.entries.len(), 2);
        let day_one = data
            .entries
            .iter()
            .find(|e| e.date == parse_date("2024-01-01").unwrap())
            .unwrap();
        assert_eq!(day_one.flow, FlowLevel::Heavy);
        assert_eq!(day_one.notes, "revised");
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_date("01/02/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }
}
